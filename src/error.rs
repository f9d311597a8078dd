use thiserror::Error;

/// Everything that can stop the engine mid-run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("invalid memory address: {0:#06X}")]
    InvalidAddress(u16),

    /// A push was attempted with no room left on the stack page.
    #[error("stack underflow: no room left to push")]
    StackUnderflow,

    /// A pop was attempted on an empty stack.
    #[error("stack overflow: nothing left to pop")]
    StackOverflow,

    #[error("invalid opcode {opcode:#04X} at {pc:#06X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    #[error("insufficient cycles: budget of {0} cannot fetch an instruction")]
    InsufficientCycles(i32),
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
