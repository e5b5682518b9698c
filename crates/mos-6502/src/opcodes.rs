//! 6502 opcode table.
//!
//! Maps each opcode byte to its mnemonic, addressing mode and base cycle
//! count. Only the 151 documented NMOS opcodes are present; every other byte
//! decodes to `None`.

use std::fmt;

/// 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Read-class instructions pay one extra cycle when indexing crosses a
    /// page. Stores and read-modify-write already include that cycle.
    #[must_use]
    pub const fn has_page_penalty(self) -> bool {
        matches!(
            self,
            Self::Adc
                | Self::And
                | Self::Cmp
                | Self::Eor
                | Self::Lda
                | Self::Ldx
                | Self::Ldy
                | Self::Ora
                | Self::Sbc
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format!("{self:?}").to_uppercase())
    }
}

/// 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand (CLC, RTS).
    Implied,
    /// Operates on A (ASL A).
    Accumulator,
    /// `#$nn`
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`, wraps in page zero.
    ZeroPageX,
    /// `$nn,Y`, wraps in page zero.
    ZeroPageY,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// `($nnnn)`, JMP only.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    /// Signed branch offset.
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycles, before page-cross and branch extras.
    pub cycles: u8,
}

use AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Accumulator as ACC, Immediate as IMM,
    Implied as IMP, IndexedIndirect as IZX, Indirect as IND, IndirectIndexed as IZY,
    Relative as REL, ZeroPage as ZP, ZeroPageX as ZPX, ZeroPageY as ZPY,
};
use Mnemonic::{
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld, Cli, Clv, Cmp, Cpx,
    Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla,
    Plp, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
};

const ENTRIES: [(u8, Mnemonic, AddressingMode, u8); 151] = [
    // Load/store
    (0xA9, Lda, IMM, 2),
    (0xA5, Lda, ZP, 3),
    (0xB5, Lda, ZPX, 4),
    (0xAD, Lda, ABS, 4),
    (0xBD, Lda, ABX, 4),
    (0xB9, Lda, ABY, 4),
    (0xA1, Lda, IZX, 6),
    (0xB1, Lda, IZY, 5),
    (0xA2, Ldx, IMM, 2),
    (0xA6, Ldx, ZP, 3),
    (0xB6, Ldx, ZPY, 4),
    (0xAE, Ldx, ABS, 4),
    (0xBE, Ldx, ABY, 4),
    (0xA0, Ldy, IMM, 2),
    (0xA4, Ldy, ZP, 3),
    (0xB4, Ldy, ZPX, 4),
    (0xAC, Ldy, ABS, 4),
    (0xBC, Ldy, ABX, 4),
    (0x85, Sta, ZP, 3),
    (0x95, Sta, ZPX, 4),
    (0x8D, Sta, ABS, 4),
    (0x9D, Sta, ABX, 5),
    (0x99, Sta, ABY, 5),
    (0x81, Sta, IZX, 6),
    (0x91, Sta, IZY, 6),
    (0x86, Stx, ZP, 3),
    (0x96, Stx, ZPY, 4),
    (0x8E, Stx, ABS, 4),
    (0x84, Sty, ZP, 3),
    (0x94, Sty, ZPX, 4),
    (0x8C, Sty, ABS, 4),
    // Transfers
    (0xAA, Tax, IMP, 2),
    (0xA8, Tay, IMP, 2),
    (0xBA, Tsx, IMP, 2),
    (0x8A, Txa, IMP, 2),
    (0x9A, Txs, IMP, 2),
    (0x98, Tya, IMP, 2),
    // Stack
    (0x48, Pha, IMP, 3),
    (0x08, Php, IMP, 3),
    (0x68, Pla, IMP, 4),
    (0x28, Plp, IMP, 4),
    // Arithmetic
    (0x69, Adc, IMM, 2),
    (0x65, Adc, ZP, 3),
    (0x75, Adc, ZPX, 4),
    (0x6D, Adc, ABS, 4),
    (0x7D, Adc, ABX, 4),
    (0x79, Adc, ABY, 4),
    (0x61, Adc, IZX, 6),
    (0x71, Adc, IZY, 5),
    (0xE9, Sbc, IMM, 2),
    (0xE5, Sbc, ZP, 3),
    (0xF5, Sbc, ZPX, 4),
    (0xED, Sbc, ABS, 4),
    (0xFD, Sbc, ABX, 4),
    (0xF9, Sbc, ABY, 4),
    (0xE1, Sbc, IZX, 6),
    (0xF1, Sbc, IZY, 5),
    (0xC9, Cmp, IMM, 2),
    (0xC5, Cmp, ZP, 3),
    (0xD5, Cmp, ZPX, 4),
    (0xCD, Cmp, ABS, 4),
    (0xDD, Cmp, ABX, 4),
    (0xD9, Cmp, ABY, 4),
    (0xC1, Cmp, IZX, 6),
    (0xD1, Cmp, IZY, 5),
    (0xE0, Cpx, IMM, 2),
    (0xE4, Cpx, ZP, 3),
    (0xEC, Cpx, ABS, 4),
    (0xC0, Cpy, IMM, 2),
    (0xC4, Cpy, ZP, 3),
    (0xCC, Cpy, ABS, 4),
    // Logical
    (0x29, And, IMM, 2),
    (0x25, And, ZP, 3),
    (0x35, And, ZPX, 4),
    (0x2D, And, ABS, 4),
    (0x3D, And, ABX, 4),
    (0x39, And, ABY, 4),
    (0x21, And, IZX, 6),
    (0x31, And, IZY, 5),
    (0x09, Ora, IMM, 2),
    (0x05, Ora, ZP, 3),
    (0x15, Ora, ZPX, 4),
    (0x0D, Ora, ABS, 4),
    (0x1D, Ora, ABX, 4),
    (0x19, Ora, ABY, 4),
    (0x01, Ora, IZX, 6),
    (0x11, Ora, IZY, 5),
    (0x49, Eor, IMM, 2),
    (0x45, Eor, ZP, 3),
    (0x55, Eor, ZPX, 4),
    (0x4D, Eor, ABS, 4),
    (0x5D, Eor, ABX, 4),
    (0x59, Eor, ABY, 4),
    (0x41, Eor, IZX, 6),
    (0x51, Eor, IZY, 5),
    (0x24, Bit, ZP, 3),
    (0x2C, Bit, ABS, 4),
    // Increment/decrement
    (0xE6, Inc, ZP, 5),
    (0xF6, Inc, ZPX, 6),
    (0xEE, Inc, ABS, 6),
    (0xFE, Inc, ABX, 7),
    (0xC6, Dec, ZP, 5),
    (0xD6, Dec, ZPX, 6),
    (0xCE, Dec, ABS, 6),
    (0xDE, Dec, ABX, 7),
    (0xE8, Inx, IMP, 2),
    (0xC8, Iny, IMP, 2),
    (0xCA, Dex, IMP, 2),
    (0x88, Dey, IMP, 2),
    // Shifts and rotates
    (0x0A, Asl, ACC, 2),
    (0x06, Asl, ZP, 5),
    (0x16, Asl, ZPX, 6),
    (0x0E, Asl, ABS, 6),
    (0x1E, Asl, ABX, 7),
    (0x4A, Lsr, ACC, 2),
    (0x46, Lsr, ZP, 5),
    (0x56, Lsr, ZPX, 6),
    (0x4E, Lsr, ABS, 6),
    (0x5E, Lsr, ABX, 7),
    (0x2A, Rol, ACC, 2),
    (0x26, Rol, ZP, 5),
    (0x36, Rol, ZPX, 6),
    (0x2E, Rol, ABS, 6),
    (0x3E, Rol, ABX, 7),
    (0x6A, Ror, ACC, 2),
    (0x66, Ror, ZP, 5),
    (0x76, Ror, ZPX, 6),
    (0x6E, Ror, ABS, 6),
    (0x7E, Ror, ABX, 7),
    // Jumps and calls
    (0x4C, Jmp, ABS, 3),
    (0x6C, Jmp, IND, 5),
    (0x20, Jsr, ABS, 6),
    (0x60, Rts, IMP, 6),
    (0x40, Rti, IMP, 6),
    (0x00, Brk, IMP, 7),
    // Branches
    (0x90, Bcc, REL, 2),
    (0xB0, Bcs, REL, 2),
    (0xF0, Beq, REL, 2),
    (0x30, Bmi, REL, 2),
    (0xD0, Bne, REL, 2),
    (0x10, Bpl, REL, 2),
    (0x50, Bvc, REL, 2),
    (0x70, Bvs, REL, 2),
    // Flags
    (0x18, Clc, IMP, 2),
    (0xD8, Cld, IMP, 2),
    (0x58, Cli, IMP, 2),
    (0xB8, Clv, IMP, 2),
    (0x38, Sec, IMP, 2),
    (0xF8, Sed, IMP, 2),
    (0x78, Sei, IMP, 2),
    (0xEA, Nop, IMP, 2),
];

const fn build() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < ENTRIES.len() {
        let (byte, mnemonic, mode, cycles) = ENTRIES[i];
        assert!(table[byte as usize].is_none(), "duplicate opcode entry");
        table[byte as usize] = Some(Opcode {
            mnemonic,
            mode,
            cycles,
        });
        i += 1;
    }
    table
}

/// Opcode byte → table entry.
pub static OPCODES: [Option<Opcode>; 256] = build();

/// Look up an opcode byte.
#[must_use]
pub fn decode(byte: u8) -> Option<Opcode> {
    OPCODES[byte as usize]
}
