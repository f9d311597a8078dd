use super::CPU;
use crate::bus::Bus;
use crate::error::Result;
use crate::opcodes::{AddressingMode, OpcodeEntry};

impl CPU {
    pub(super) fn lda<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        self.ac = self.read_operand(entry, bus)?;
        self.sr.set_zn(self.ac);
        Ok(())
    }

    pub(super) fn ldx<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        self.x = self.read_operand(entry, bus)?;
        self.sr.set_zn(self.x);
        Ok(())
    }

    pub(super) fn ldy<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        self.y = self.read_operand(entry, bus)?;
        self.sr.set_zn(self.y);
        Ok(())
    }

    /// ADC. Binary only; the decimal flag is carried but not honoured.
    pub(super) fn adc<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        let value = self.read_operand(entry, bus)?;
        self.add_with_carry(value);
        Ok(())
    }

    pub(super) fn and<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        let value = self.read_operand(entry, bus)?;
        self.ac &= value;
        self.sr.set_zn(self.ac);
        Ok(())
    }

    pub(super) fn asl<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &mut B) -> Result<()> {
        if entry.mode == AddressingMode::Accumulator {
            self.tick(1);
            self.ac = self.shift_left(self.ac);
            return Ok(());
        }

        let address = self.resolve_address(entry, bus)?;
        let value = self.read_operand_byte(address, bus)?;
        self.tick(1); // modify
        let result = self.shift_left(value);
        self.write_operand_byte(address, result, bus)
    }

    pub(super) fn jmp<B: Bus>(&mut self, entry: &OpcodeEntry, bus: &B) -> Result<()> {
        self.pc = self.resolve_address(entry, bus)?;
        Ok(())
    }

    /// Pushes the address of the last byte of the JSR, high byte first.
    pub(super) fn jsr<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        let target = self.fetch_word(bus)?;
        let [lsb, msb] = self.pc.wrapping_sub(1).to_le_bytes();
        self.tick(1); // internal

        self.push_byte(msb, bus)?;
        self.push_byte(lsb, bus)?;
        self.pc = target;
        Ok(())
    }

    pub(super) fn rts<B: Bus>(&mut self, bus: &B) -> Result<()> {
        self.tick(1); // internal

        let lsb = self.pop_byte(bus)?;
        let msb = self.pop_byte(bus)?;
        self.pc = u16::from_le_bytes([lsb, msb]).wrapping_add(1);
        self.tick(2); // increment PC
        Ok(())
    }

    fn add_with_carry(&mut self, value: u8) {
        let sum = u16::from(self.ac) + u16::from(value) + u16::from(self.sr.carry);
        let result = sum as u8;

        self.sr.carry = sum > 0xFF;
        // same-signed operands with a differently signed result
        self.sr.overflow = (!(self.ac ^ value) & (self.ac ^ result) & 0x80) != 0;
        self.ac = result;
        self.sr.set_zn(result);
    }

    fn shift_left(&mut self, value: u8) -> u8 {
        self.sr.carry = (value & 0x80) != 0;
        let result = value << 1;
        self.sr.set_zn(result);
        result
    }
}
