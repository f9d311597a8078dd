//! Instruction-execution core of a 6502-class CPU.
//!
//! A caller owns a [`Memory`] (or any other [`Bus`]) and a [`CPU`], preloads
//! the program and vectors, calls [`CPU::reset`] and then drives the engine
//! with [`CPU::execute`] and a cycle budget.

pub mod bus;
pub mod config;
pub mod cpu;
pub mod error;
pub mod flags;
pub mod machine;
pub mod opcodes;

pub use bus::{Bus, Memory};
pub use config::{CpuConfig, StackPolicy};
pub use cpu::CPU;
pub use error::{EmulatorError, Result};
pub use flags::StatusFlags;
pub use machine::Machine;
pub use opcodes::{AddressingMode, Instruction, OpcodeEntry, decode};
