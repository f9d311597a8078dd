//! Static opcode table.
//!
//! Every implemented opcode maps to an addressing mode, an instruction
//! family and its documented base cycle cost. Bytes without an entry
//! decode to `None`; the CPU turns that into `InvalidOpcode`.

use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    /// `(zp,X)`: pointer in zero page, pre-indexed by X.
    IndexedIndirectX,
    /// `(zp),Y`: pointer in zero page, post-indexed by Y.
    IndirectIndexedY,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    Lda,
    Ldx,
    Ldy,
    Adc,
    And,
    Asl,
    Jmp,
    Jsr,
    Rts,
}

impl Instruction {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Lda => "LDA",
            Instruction::Ldx => "LDX",
            Instruction::Ldy => "LDY",
            Instruction::Adc => "ADC",
            Instruction::And => "AND",
            Instruction::Asl => "ASL",
            Instruction::Jmp => "JMP",
            Instruction::Jsr => "JSR",
            Instruction::Rts => "RTS",
        }
    }

    /// Instructions that only read their operand.
    fn reads_operand(self) -> bool {
        matches!(
            self,
            Instruction::Lda
                | Instruction::Ldx
                | Instruction::Ldy
                | Instruction::Adc
                | Instruction::And
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpcodeEntry {
    pub opcode: u8,
    pub instruction: Instruction,
    pub mode: AddressingMode,
    /// Cycle cost including the opcode fetch, before any page-cross penalty.
    pub base_cycles: u8,
}

impl OpcodeEntry {
    const fn new(
        opcode: u8,
        instruction: Instruction,
        mode: AddressingMode,
        base_cycles: u8,
    ) -> Self {
        OpcodeEntry {
            opcode,
            instruction,
            mode,
            base_cycles,
        }
    }

    /// Whether crossing a page while indexing costs one more cycle.
    ///
    /// Read-modify-write instructions always pay for the index fix-up, so
    /// for them the penalty is folded into `base_cycles` instead.
    pub fn page_cross_penalty(&self) -> bool {
        self.instruction.reads_operand()
            && matches!(
                self.mode,
                AddressingMode::AbsoluteX
                    | AddressingMode::AbsoluteY
                    | AddressingMode::IndirectIndexedY
            )
    }
}

use AddressingMode::*;
use Instruction::*;

const OPCODES: &[OpcodeEntry] = &[
    // LDA
    OpcodeEntry::new(0xA9, Lda, Immediate, 2),
    OpcodeEntry::new(0xA5, Lda, ZeroPage, 3),
    OpcodeEntry::new(0xB5, Lda, ZeroPageX, 4),
    OpcodeEntry::new(0xAD, Lda, Absolute, 4),
    OpcodeEntry::new(0xBD, Lda, AbsoluteX, 4),
    OpcodeEntry::new(0xB9, Lda, AbsoluteY, 4),
    OpcodeEntry::new(0xA1, Lda, IndexedIndirectX, 6),
    OpcodeEntry::new(0xB1, Lda, IndirectIndexedY, 5),
    // LDX
    OpcodeEntry::new(0xA2, Ldx, Immediate, 2),
    OpcodeEntry::new(0xA6, Ldx, ZeroPage, 3),
    OpcodeEntry::new(0xB6, Ldx, ZeroPageY, 4),
    OpcodeEntry::new(0xAE, Ldx, Absolute, 4),
    OpcodeEntry::new(0xBE, Ldx, AbsoluteY, 4),
    // LDY
    OpcodeEntry::new(0xA0, Ldy, Immediate, 2),
    OpcodeEntry::new(0xA4, Ldy, ZeroPage, 3),
    OpcodeEntry::new(0xB4, Ldy, ZeroPageX, 4),
    OpcodeEntry::new(0xAC, Ldy, Absolute, 4),
    OpcodeEntry::new(0xBC, Ldy, AbsoluteX, 4),
    // ADC
    OpcodeEntry::new(0x69, Adc, Immediate, 2),
    OpcodeEntry::new(0x65, Adc, ZeroPage, 3),
    OpcodeEntry::new(0x75, Adc, ZeroPageX, 4),
    OpcodeEntry::new(0x6D, Adc, Absolute, 4),
    OpcodeEntry::new(0x7D, Adc, AbsoluteX, 4),
    OpcodeEntry::new(0x79, Adc, AbsoluteY, 4),
    OpcodeEntry::new(0x61, Adc, IndexedIndirectX, 6),
    OpcodeEntry::new(0x71, Adc, IndirectIndexedY, 5),
    // AND
    OpcodeEntry::new(0x29, And, Immediate, 2),
    OpcodeEntry::new(0x25, And, ZeroPage, 3),
    OpcodeEntry::new(0x35, And, ZeroPageX, 4),
    OpcodeEntry::new(0x2D, And, Absolute, 4),
    OpcodeEntry::new(0x3D, And, AbsoluteX, 4),
    OpcodeEntry::new(0x39, And, AbsoluteY, 4),
    OpcodeEntry::new(0x21, And, IndexedIndirectX, 6),
    OpcodeEntry::new(0x31, And, IndirectIndexedY, 5),
    // ASL
    OpcodeEntry::new(0x0A, Asl, Accumulator, 2),
    OpcodeEntry::new(0x06, Asl, ZeroPage, 5),
    OpcodeEntry::new(0x16, Asl, ZeroPageX, 6),
    OpcodeEntry::new(0x0E, Asl, Absolute, 6),
    OpcodeEntry::new(0x1E, Asl, AbsoluteX, 7),
    // Control flow
    OpcodeEntry::new(0x4C, Jmp, Absolute, 3),
    OpcodeEntry::new(0x6C, Jmp, Indirect, 5),
    OpcodeEntry::new(0x20, Jsr, Absolute, 6),
    OpcodeEntry::new(0x60, Rts, Implied, 6),
];

const fn build_table() -> [Option<OpcodeEntry>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < OPCODES.len() {
        let entry = OPCODES[i];
        table[entry.opcode as usize] = Some(entry);
        i += 1;
    }
    table
}

pub static OPCODE_TABLE: [Option<OpcodeEntry>; 256] = build_table();

pub fn decode(opcode: u8) -> Option<OpcodeEntry> {
    OPCODE_TABLE[opcode as usize]
}
