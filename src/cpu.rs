use tracing::{debug, trace, warn};

use crate::bus::Bus;
use crate::config::{CpuConfig, StackPolicy};
use crate::error::{EmulatorError, Result};
use crate::flags::StatusFlags;
use crate::opcodes::{self, Instruction};

mod addressing;
mod instructions;

/**
* 6502 Microprocessor
* -------------------
* 8-bit CPU (registers + data bus size)
*  - Accumulator and both index registers are 8 bits wide
*
* 16-bit address bus
*  - 2^16 = 65,536 bytes (or 64 Kb)
*  - the stack lives in page one ($0100 - $01FF), SP is an offset into it
*
* Little Endian (LSB first)
*
* The register file does not own memory. Every operation that touches the
* bus takes it as an argument, and `execute` runs whole instructions until
* the cycle budget it was handed is used up.
**/
#[derive(Clone, Debug)]
pub struct CPU {
    ac: u8,
    x: u8,
    y: u8,
    pc: u16,         // Program Counter
    sp: u8,          // Stack Pointer, offset into $0100 - $01FF
    sr: StatusFlags, // Status Register
    cycles: i32,     // budget left in the current run
    config: CpuConfig,
}

impl CPU {
    pub const STACK_PAGE: u16 = 0x0100;
    pub const INITIAL_SP: u8 = 0xFF;

    pub const NMI_VECTOR: u16 = 0xFFFA;
    pub const RESET_VECTOR: u16 = 0xFFFC;
    pub const IRQ_VECTOR: u16 = 0xFFFE;

    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        CPU {
            ac: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: Self::INITIAL_SP,
            sr: StatusFlags::default(),
            cycles: 0,
            config,
        }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Reinitializes the register file and loads PC from the reset vector.
    ///
    /// Memory is left untouched, so a program may be loaded before or after
    /// the reset.
    pub fn reset<B: Bus>(&mut self, bus: &B) {
        self.sp = Self::INITIAL_SP;
        self.ac = 0;
        self.x = 0;
        self.y = 0;
        self.sr = StatusFlags::default();
        self.cycles = 0;

        self.pc = match bus.read_word(Self::RESET_VECTOR) {
            Ok(address) => address,
            Err(err) => {
                warn!(%err, "reset vector unreadable, using fallback entry point");
                self.config.fallback_entry_point
            }
        };
        debug!("reset: PC={:#06X}", self.pc);
    }

    /// Runs whole instructions until `cycles` are used up.
    ///
    /// Returns the cycles actually spent, which can overshoot the budget by
    /// part of the last instruction. A budget of zero or less runs nothing
    /// and returns 0. The first error aborts the run.
    pub fn execute<B: Bus>(&mut self, cycles: i32, bus: &mut B) -> Result<i32> {
        if cycles <= 0 {
            return Ok(0);
        }

        self.cycles = cycles;
        while self.cycles > 0 {
            self.step(bus)?;
        }
        Ok(cycles - self.cycles)
    }

    /// Fetches, decodes and executes one instruction. Returns its cycle cost.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<i32> {
        let start = self.cycles;
        let pc = self.pc;
        let opcode = self.fetch_byte(bus)?;

        let Some(entry) = opcodes::decode(opcode) else {
            warn!("invalid opcode {opcode:#04X} at {pc:#06X}");
            return Err(EmulatorError::InvalidOpcode { opcode, pc });
        };

        trace!(
            "{pc:04X}  {opcode:02X}  {:<3} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            entry.instruction,
            self.ac,
            self.x,
            self.y,
            self.sr.to_byte(),
            self.sp
        );

        match entry.instruction {
            Instruction::Lda => self.lda(&entry, bus)?,
            Instruction::Ldx => self.ldx(&entry, bus)?,
            Instruction::Ldy => self.ldy(&entry, bus)?,
            Instruction::Adc => self.adc(&entry, bus)?,
            Instruction::And => self.and(&entry, bus)?,
            Instruction::Asl => self.asl(&entry, bus)?,
            Instruction::Jmp => self.jmp(&entry, bus)?,
            Instruction::Jsr => self.jsr(bus)?,
            Instruction::Rts => self.rts(bus)?,
        }

        Ok(start.wrapping_sub(self.cycles))
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn a(&self) -> u8 {
        self.ac
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn flags(&self) -> StatusFlags {
        self.sr
    }

    pub fn flags_mut(&mut self) -> &mut StatusFlags {
        &mut self.sr
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_a(&mut self, value: u8) {
        self.ac = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    // Wraps so that stepping outside `execute` can run indefinitely.
    fn tick(&mut self, cycles: i32) {
        self.cycles = self.cycles.wrapping_sub(cycles);
    }

    fn fetch_byte<B: Bus>(&mut self, bus: &B) -> Result<u8> {
        let value = bus.read_byte(self.pc)?;
        self.pc = self.pc.wrapping_add(1);
        self.tick(1);
        Ok(value)
    }

    fn fetch_word<B: Bus>(&mut self, bus: &B) -> Result<u16> {
        let value = bus.read_word(self.pc)?;
        self.pc = self.pc.wrapping_add(2);
        self.tick(2);
        Ok(value)
    }

    /// Reads an already resolved operand address: one bus cycle.
    fn read_operand_byte<B: Bus>(&mut self, address: u16, bus: &B) -> Result<u8> {
        let value = bus.read_byte(address)?;
        self.tick(1);
        Ok(value)
    }

    fn write_operand_byte<B: Bus>(&mut self, address: u16, value: u8, bus: &mut B) -> Result<()> {
        bus.write_byte(address, value)?;
        self.tick(1);
        Ok(())
    }

    pub fn push_byte<B: Bus>(&mut self, value: u8, bus: &mut B) -> Result<()> {
        if self.sp == 0 && self.config.stack_policy == StackPolicy::Checked {
            return Err(EmulatorError::StackUnderflow);
        }
        bus.write_byte(Self::STACK_PAGE + u16::from(self.sp), value)?;
        self.sp = self.sp.wrapping_sub(1);
        self.tick(1);
        Ok(())
    }

    pub fn pop_byte<B: Bus>(&mut self, bus: &B) -> Result<u8> {
        if self.sp == 0xFF && self.config.stack_policy == StackPolicy::Checked {
            return Err(EmulatorError::StackOverflow);
        }
        self.sp = self.sp.wrapping_add(1);
        let value = bus.read_byte(Self::STACK_PAGE + u16::from(self.sp))?;
        self.tick(1);
        Ok(value)
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}
