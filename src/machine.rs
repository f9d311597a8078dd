use crate::bus::{Bus, Memory};
use crate::config::CpuConfig;
use crate::cpu::CPU;
use crate::error::Result;

/// One CPU wired to its own 64 KiB of memory.
pub struct Machine {
    pub cpu: CPU,
    pub memory: Memory,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Machine {
            cpu: CPU::with_config(config),
            memory: Memory::new(),
        }
    }

    /// Copies `program` to `origin` and points the reset vector at it.
    pub fn load_program(&mut self, origin: u16, program: &[u8]) -> Result<()> {
        self.memory.load(origin, program)?;
        self.memory.write_word(CPU::RESET_VECTOR, origin)
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&self.memory);
    }

    pub fn run(&mut self, cycles: i32) -> Result<i32> {
        self.cpu.execute(cycles, &mut self.memory)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
