use std::ops::{Index, IndexMut};

use crate::error::{EmulatorError, Result};

/// Anything the CPU can read from and write to.
///
/// Byte access is the only required surface. Word access is little endian
/// and refuses to straddle the end of the 16-bit address space.
pub trait Bus {
    fn read_byte(&self, address: u16) -> Result<u8>;
    fn write_byte(&mut self, address: u16, value: u8) -> Result<()>;

    fn read_word(&self, address: u16) -> Result<u16> {
        let high_address = address
            .checked_add(1)
            .ok_or(EmulatorError::InvalidAddress(address))?;
        let lsb = self.read_byte(address)?;
        let msb = self.read_byte(high_address)?;
        Ok(u16::from_le_bytes([lsb, msb]))
    }

    fn write_word(&mut self, address: u16, value: u16) -> Result<()> {
        let high_address = address
            .checked_add(1)
            .ok_or(EmulatorError::InvalidAddress(address))?;
        let [lsb, msb] = value.to_le_bytes();
        self.write_byte(address, lsb)?;
        self.write_byte(high_address, msb)
    }
}

/// Flat 64 KiB store covering the whole address space.
///
/// | Region     | Range         |
/// |------------|---------------|
/// | Zero page  | $0000 - $00FF |
/// | Stack      | $0100 - $01FF |
/// | NMI vector | $FFFA - $FFFB |
/// | Reset      | $FFFC - $FFFD |
/// | IRQ/BRK    | $FFFE - $FFFF |
pub struct Memory {
    data: Box<[u8; Memory::SIZE]>,
}

impl Memory {
    pub const SIZE: usize = 0x10000;

    pub fn new() -> Self {
        Memory {
            data: Box::new([0u8; Memory::SIZE]),
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copies `bytes` into memory starting at `origin`.
    pub fn load(&mut self, origin: u16, bytes: &[u8]) -> Result<()> {
        let start = origin as usize;
        let end = start + bytes.len();
        if end > Memory::SIZE {
            return Err(EmulatorError::InvalidAddress(origin));
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Memory {
    fn read_byte(&self, address: u16) -> Result<u8> {
        Ok(self.data[address as usize])
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        self.data[address as usize] = value;
        Ok(())
    }

    fn read_word(&self, address: u16) -> Result<u16> {
        if address == 0xFFFF {
            return Err(EmulatorError::InvalidAddress(address));
        }
        let index = address as usize;
        Ok(u16::from_le_bytes([self.data[index], self.data[index + 1]]))
    }

    fn write_word(&mut self, address: u16, value: u16) -> Result<()> {
        if address == 0xFFFF {
            return Err(EmulatorError::InvalidAddress(address));
        }
        let index = address as usize;
        self.data[index..index + 2].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

// Raw access for preloading images; always in range.
impl Index<u16> for Memory {
    type Output = u8;

    fn index(&self, address: u16) -> &u8 {
        &self.data[address as usize]
    }
}

impl IndexMut<u16> for Memory {
    fn index_mut(&mut self, address: u16) -> &mut u8 {
        &mut self.data[address as usize]
    }
}
