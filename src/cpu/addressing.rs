use super::CPU;
use crate::bus::Bus;
use crate::error::{EmulatorError, Result};
use crate::opcodes::{AddressingMode, OpcodeEntry};

/// When an indexed mode spends its extra cycle on the address fix-up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum IndexCycle {
    /// Only when the index carries into the high byte.
    OnPageCross,
    /// Unconditionally (read-modify-write instructions).
    Always,
}

impl IndexCycle {
    pub(super) fn for_entry(entry: &OpcodeEntry) -> Self {
        if entry.page_cross_penalty() {
            IndexCycle::OnPageCross
        } else {
            IndexCycle::Always
        }
    }
}

fn page_crossed(base_addr: u16, effective_addr: u16) -> bool {
    // if the upper bytes are different there's a page cross
    (base_addr & 0xFF00) != (effective_addr & 0xFF00)
}

impl CPU {
    /// Reads the operand of a read-only instruction.
    pub(super) fn read_operand<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<u8> {
        let address = self.resolve_address(entry, bus)?;
        self.read_operand_byte(address, bus)
    }

    /// Computes the effective address of `entry`'s operand, consuming the
    /// operand bytes and any address-computation cycles.
    ///
    /// Implied and accumulator entries have no address and are rejected as
    /// invalid for the instruction.
    pub(super) fn resolve_address<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<u16> {
        let index_cycle = IndexCycle::for_entry(entry);
        match entry.mode {
            AddressingMode::Immediate => Ok(self.addr_immediate()),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_indexed(self.x, bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_indexed(self.y, bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_indexed(self.x, index_cycle, bus),
            AddressingMode::AbsoluteY => self.addr_absolute_indexed(self.y, index_cycle, bus),
            AddressingMode::Indirect => self.addr_absolute_indirect(bus),
            AddressingMode::IndexedIndirectX => self.addr_zero_page_x_indirect(bus),
            AddressingMode::IndirectIndexedY => self.addr_zero_page_y_indirect(index_cycle, bus),
            AddressingMode::Implied | AddressingMode::Accumulator => {
                Err(EmulatorError::InvalidOpcode {
                    opcode: entry.opcode,
                    pc: self.pc.wrapping_sub(1),
                })
            }
        }
    }

    // The operand byte itself; reading it costs the cycle.
    fn addr_immediate(&mut self) -> u16 {
        let address = self.pc;
        self.pc = self.pc.wrapping_add(1);
        address
    }

    fn addr_zero_page<B: Bus>(&mut self, bus: &B) -> Result<u16> {
        Ok(u16::from(self.fetch_byte(bus)?))
    }

    fn addr_zero_page_indexed<B: Bus>(&mut self, index: u8, bus: &B) -> Result<u16> {
        let base = self.fetch_byte(bus)?;
        self.tick(1);
        Ok(u16::from(base.wrapping_add(index)))
    }

    fn addr_absolute<B: Bus>(&mut self, bus: &B) -> Result<u16> {
        self.fetch_word(bus)
    }

    fn addr_absolute_indexed<B: Bus>(
        &mut self,
        index: u8,
        index_cycle: IndexCycle,
        bus: &B,
    ) -> Result<u16> {
        let base_addr = self.fetch_word(bus)?;
        let effective_addr = base_addr.wrapping_add(u16::from(index));
        self.index_fixup(base_addr, effective_addr, index_cycle);
        Ok(effective_addr)
    }

    /// `JMP ($nnnn)`. A pointer ending in $FF takes its high byte from the
    /// start of the same page.
    fn addr_absolute_indirect<B: Bus>(&mut self, bus: &B) -> Result<u16> {
        let pointer = self.fetch_word(bus)?;
        let high_pointer = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
        let lsb = self.read_operand_byte(pointer, bus)?;
        let msb = self.read_operand_byte(high_pointer, bus)?;
        Ok(u16::from_le_bytes([lsb, msb]))
    }

    fn addr_zero_page_x_indirect<B: Bus>(&mut self, bus: &B) -> Result<u16> {
        let base = self.fetch_byte(bus)?;
        let pointer = base.wrapping_add(self.x);
        self.tick(1);
        self.read_zero_page_pointer(pointer, bus)
    }

    fn addr_zero_page_y_indirect<B: Bus>(&mut self, index_cycle: IndexCycle, bus: &B) -> Result<u16> {
        let pointer = self.fetch_byte(bus)?;
        let base_addr = self.read_zero_page_pointer(pointer, bus)?;
        let effective_addr = base_addr.wrapping_add(u16::from(self.y));
        self.index_fixup(base_addr, effective_addr, index_cycle);
        Ok(effective_addr)
    }

    // Pointer bytes stay inside zero page: $FF pairs with $00.
    fn read_zero_page_pointer<B: Bus>(&mut self, pointer: u8, bus: &B) -> Result<u16> {
        let lsb = self.read_operand_byte(u16::from(pointer), bus)?;
        let msb = self.read_operand_byte(u16::from(pointer.wrapping_add(1)), bus)?;
        Ok(u16::from_le_bytes([lsb, msb]))
    }

    fn index_fixup(&mut self, base_addr: u16, effective_addr: u16, index_cycle: IndexCycle) {
        if index_cycle == IndexCycle::Always || page_crossed(base_addr, effective_addr) {
            self.tick(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Memory;
    use crate::opcodes::decode;

    fn setup_cpu() -> (CPU, Memory) {
        let mut cpu = CPU::new();
        cpu.pc = 0x1000;
        (cpu, Memory::new())
    }

    #[test]
    fn test_addr_immediate() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0x42;

        let addr = cpu
            .resolve_address(&decode(0xA9).unwrap(), &memory)
            .unwrap();

        assert_eq!(addr, 0x1000);
        assert_eq!(cpu.pc, 0x1001);
        assert_eq!(cpu.read_operand_byte(addr, &memory), Ok(0x42));
        assert_eq!(cpu.cycles, -1);
    }

    #[test]
    fn test_addr_absolute() {
        let (mut cpu, mut memory) = setup_cpu();

        // The address $1234 stored in little-endian format
        memory[0x1000] = 0x34;
        memory[0x1001] = 0x12;

        let addr = cpu.addr_absolute(&memory).unwrap();

        assert_eq!(addr, 0x1234);
        assert_eq!(cpu.pc, 0x1002); // PC should advance by 2
        assert_eq!(cpu.cycles, -2);
    }

    #[test]
    fn test_addr_absolute_x_no_page_cross() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0x00;
        memory[0x1001] = 0x20;
        cpu.x = 0x05;

        let addr = cpu
            .addr_absolute_indexed(cpu.x, IndexCycle::OnPageCross, &memory)
            .unwrap();

        assert_eq!(addr, 0x2005);
        assert_eq!(cpu.cycles, -2);
        assert_eq!(cpu.pc, 0x1002);
    }

    #[test]
    fn test_addr_absolute_x_page_cross() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0xFF;
        memory[0x1001] = 0x20;
        cpu.x = 0xFF;

        let addr = cpu
            .addr_absolute_indexed(cpu.x, IndexCycle::OnPageCross, &memory)
            .unwrap();

        assert_eq!(addr, 0x21FE);
        assert_eq!(cpu.cycles, -3);
    }

    #[test]
    fn test_addr_absolute_y_page_cross() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0xFF;
        memory[0x1001] = 0x00;
        cpu.y = 0x01;

        let addr = cpu
            .resolve_address(&decode(0xB9).unwrap(), &memory)
            .unwrap();

        assert_eq!(addr, 0x0100);
        assert_eq!(cpu.cycles, -3);
        assert_eq!(cpu.pc, 0x1002);
    }

    #[test]
    fn test_addr_absolute_x_always_pays_for_rmw() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0x00;
        memory[0x1001] = 0x20;
        cpu.x = 0x01;

        let addr = cpu
            .resolve_address(&decode(0x1E).unwrap(), &memory)
            .unwrap();

        assert_eq!(addr, 0x2001);
        assert_eq!(cpu.cycles, -3);
    }

    #[test]
    fn test_addr_absolute_indirect_normal() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0xFD;
        memory[0x1001] = 0x12;
        // LSB
        memory[0x12FD] = 0x21;
        // MSB
        memory[0x12FE] = 0x23;

        let addr = cpu.addr_absolute_indirect(&memory).unwrap();
        assert_eq!(addr, 0x2321);
        assert_eq!(cpu.cycles, -4);
    }

    #[test]
    fn test_addr_absolute_indirect_page_wrap() {
        let (mut cpu, mut memory) = setup_cpu();
        memory[0x1000] = 0xFF;
        memory[0x1001] = 0x12;
        // LSB
        memory[0x12FF] = 0x21;
        // MSB comes from the start of the page, not $1300
        memory[0x1200] = 0x23;
        memory[0x1300] = 0x99;

        let addr = cpu.addr_absolute_indirect(&memory).unwrap();
        assert_eq!(addr, 0x2321);
    }

    #[test]
    fn test_addr_zero_page() {
        let (mut cpu, mut memory) = setup_cpu();

        // Get LSB
        memory[0x1000] = 0x23;

        let addr = cpu.addr_zero_page(&memory).unwrap();

        assert_eq!(addr, 0x0023);
        assert_eq!(cpu.cycles, -1);
    }

    #[test]
    fn test_addr_zero_page_x() {
        let (mut cpu, mut memory) = setup_cpu();

        memory[0x1000] = 0xFD;
        cpu.x = 0x04;

        let addr = cpu
            .resolve_address(&decode(0xB5).unwrap(), &memory)
            .unwrap();

        assert_eq!(addr, 0x0001);
        assert_eq!(cpu.cycles, -2);
    }

    #[test]
    fn test_addr_zero_page_y() {
        let (mut cpu, mut memory) = setup_cpu();

        memory[0x1000] = 0xFD;
        cpu.y = 0x04;

        let addr = cpu
            .resolve_address(&decode(0xB6).unwrap(), &memory)
            .unwrap();

        assert_eq!(addr, 0x0001);
    }

    #[test]
    fn test_addr_zero_page_x_indirect() {
        let (mut cpu, mut memory) = setup_cpu();

        cpu.x = 0x02;
        memory[0x1000] = 0xFC;

        // Memory location 1 in page zero
        memory[0x00FE] = 0x34;
        // Memory location 2 in page zero
        memory[0x00FF] = 0x12;

        let addr = cpu.addr_zero_page_x_indirect(&memory).unwrap();

        assert_eq!(addr, 0x1234);
        assert_eq!(cpu.cycles, -4);
    }

    #[test]
    fn test_addr_zero_page_x_indirect_pointer_wraps() {
        let (mut cpu, mut memory) = setup_cpu();

        cpu.x = 0x01;
        memory[0x1000] = 0xFE;
        memory[0x00FF] = 0x34;
        memory[0x0000] = 0x12;
        memory[0x0100] = 0x99;

        let addr = cpu.addr_zero_page_x_indirect(&memory).unwrap();

        assert_eq!(addr, 0x1234);
    }

    #[test]
    fn test_addr_zero_page_y_indirect() {
        let (mut cpu, mut memory) = setup_cpu();
        cpu.pc = 0x0001;

        cpu.y = 0x01;
        memory[0x0001] = 0xAB;
        memory[0x00AB] = 0xFF;
        memory[0x00AC] = 0x02;

        let addr = cpu
            .addr_zero_page_y_indirect(IndexCycle::OnPageCross, &memory)
            .unwrap();

        assert_eq!(addr, 0x0300);
        // fetch + two pointer reads + page cross
        assert_eq!(cpu.cycles, -4);
    }

    #[test]
    fn test_addr_zero_page_y_indirect_same_page() {
        let (mut cpu, mut memory) = setup_cpu();

        cpu.y = 0x10;
        memory[0x1000] = 0x40;
        memory[0x0040] = 0x00;
        memory[0x0041] = 0x30;

        let addr = cpu
            .addr_zero_page_y_indirect(IndexCycle::OnPageCross, &memory)
            .unwrap();

        assert_eq!(addr, 0x3010);
        assert_eq!(cpu.cycles, -3);
    }

    #[test]
    fn test_addr_zero_page_y_indirect_pointer_wraps() {
        let (mut cpu, mut memory) = setup_cpu();

        cpu.y = 0x02;
        memory[0x1000] = 0xFF;
        memory[0x00FF] = 0x34;
        // high byte comes from $00, not $0100
        memory[0x0000] = 0x12;
        memory[0x0100] = 0x99;

        let addr = cpu
            .addr_zero_page_y_indirect(IndexCycle::OnPageCross, &memory)
            .unwrap();

        assert_eq!(addr, 0x1236);
        assert_eq!(cpu.cycles, -3);
    }

    #[test]
    fn test_resolve_address_rejects_modes_without_address() {
        let (mut cpu, memory) = setup_cpu();

        // ASL A and RTS carry no operand address
        for opcode in [0x0A, 0x60] {
            let entry = decode(opcode).unwrap();
            assert_eq!(
                cpu.resolve_address(&entry, &memory),
                Err(EmulatorError::InvalidOpcode { opcode, pc: 0x0FFF })
            );
        }
        assert_eq!(cpu.pc, 0x1000);
        assert_eq!(cpu.cycles, 0);
    }
}
