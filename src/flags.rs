use bitflags::bitflags;

bitflags! {
    /// Bit layout of the status register as pushed to the stack.
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    struct StatusBits: u8 {
        const CARRY = 1;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL_MODE = 1 << 3;
        const BREAK = 1 << 4;
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

/// Processor status (P register).
///
/// Held as plain booleans; the packed form only exists at the
/// `to_byte`/`from_byte` boundary, where bit 5 is always set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct StatusFlags {
    pub carry: bool,
    pub zero: bool,
    pub interrupt: bool,
    pub decimal: bool,
    pub brk: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl StatusFlags {
    pub fn to_byte(self) -> u8 {
        let mut bits = StatusBits::UNUSED;
        bits.set(StatusBits::CARRY, self.carry);
        bits.set(StatusBits::ZERO, self.zero);
        bits.set(StatusBits::INTERRUPT_DISABLE, self.interrupt);
        bits.set(StatusBits::DECIMAL_MODE, self.decimal);
        bits.set(StatusBits::BREAK, self.brk);
        bits.set(StatusBits::OVERFLOW, self.overflow);
        bits.set(StatusBits::NEGATIVE, self.negative);
        bits.bits()
    }

    pub fn from_byte(value: u8) -> Self {
        let bits = StatusBits::from_bits_retain(value);
        StatusFlags {
            carry: bits.contains(StatusBits::CARRY),
            zero: bits.contains(StatusBits::ZERO),
            interrupt: bits.contains(StatusBits::INTERRUPT_DISABLE),
            decimal: bits.contains(StatusBits::DECIMAL_MODE),
            brk: bits.contains(StatusBits::BREAK),
            overflow: bits.contains(StatusBits::OVERFLOW),
            negative: bits.contains(StatusBits::NEGATIVE),
        }
    }

    pub(crate) fn set_zn(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = (value & 0x80) != 0;
    }
}
