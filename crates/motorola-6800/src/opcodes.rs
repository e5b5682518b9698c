//! 6800 opcode table.
//!
//! The 197 documented opcodes. Instructions with A and B forms (ADDA/ADDB,
//! PSHA/PSHB, NEGA/NEGB...) share a mnemonic and name the accumulator in the
//! entry.

use std::fmt;

use crate::Accumulator;

/// 6800 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Aba,
    Adc,
    Add,
    And,
    Asl,
    Asr,
    Bcc,
    Bcs,
    Beq,
    Bge,
    Bgt,
    Bhi,
    Bit,
    Ble,
    Bls,
    Blt,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Bsr,
    Bvc,
    Bvs,
    Cba,
    Clc,
    Cli,
    Clr,
    Clv,
    Cmp,
    Com,
    Cpx,
    Daa,
    Dec,
    Des,
    Dex,
    Eor,
    Inc,
    Ins,
    Inx,
    Jmp,
    Jsr,
    Lda,
    Lds,
    Ldx,
    Lsr,
    Neg,
    Nop,
    Ora,
    Psh,
    Pul,
    Rol,
    Ror,
    Rti,
    Rts,
    Sba,
    Sbc,
    Sec,
    Sei,
    Sev,
    Sta,
    Sts,
    Stx,
    Sub,
    Swi,
    Tab,
    Tap,
    Tba,
    Tpa,
    Tst,
    Tsx,
    Txs,
    Wai,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format!("{self:?}").to_uppercase())
    }
}

/// 6800 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Operands implied by the opcode (registers, accumulator, stack).
    Inherent,
    /// `#$nn`
    Immediate,
    /// `#$nnnn`, for CPX/LDS/LDX.
    Immediate16,
    /// `$nn`, page zero.
    Direct,
    /// `$nn,X`: unsigned offset plus IX.
    Indexed,
    /// `$nnnn`, high byte first.
    Extended,
    /// Signed branch offset.
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Inherent => 0,
            Self::Immediate | Self::Direct | Self::Indexed | Self::Relative => 1,
            Self::Immediate16 | Self::Extended => 2,
        }
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Accumulator for instructions with A/B forms.
    pub acc: Option<Accumulator>,
    pub cycles: u8,
}

use AddressingMode::{
    Direct as DIR, Extended as EXT, Immediate as IMM, Immediate16 as IMM16, Indexed as IDX,
    Inherent as INH, Relative as REL,
};
use Mnemonic::{
    Aba, Adc, Add, And, Asl, Asr, Bcc, Bcs, Beq, Bge, Bgt, Bhi, Bit, Ble, Bls, Blt, Bmi, Bne, Bpl,
    Bra, Bsr, Bvc, Bvs, Cba, Clc, Cli, Clr, Clv, Cmp, Com, Cpx, Daa, Dec, Des, Dex, Eor, Inc, Ins,
    Inx, Jmp, Jsr, Lda, Lds, Ldx, Lsr, Neg, Nop, Ora, Psh, Pul, Rol, Ror, Rti, Rts, Sba, Sbc, Sec,
    Sei, Sev, Sta, Sts, Stx, Sub, Swi, Tab, Tap, Tba, Tpa, Tst, Tsx, Txs, Wai,
};

const ACCA: Option<Accumulator> = Some(Accumulator::A);
const ACCB: Option<Accumulator> = Some(Accumulator::B);
const NOACC: Option<Accumulator> = None;

const ENTRIES: [(u8, Mnemonic, AddressingMode, Option<Accumulator>, u8); 197] = [
    // Inherent
    (0x01, Nop, INH, NOACC, 2),
    (0x06, Tap, INH, NOACC, 2),
    (0x07, Tpa, INH, NOACC, 2),
    (0x08, Inx, INH, NOACC, 4),
    (0x09, Dex, INH, NOACC, 4),
    (0x0A, Clv, INH, NOACC, 2),
    (0x0B, Sev, INH, NOACC, 2),
    (0x0C, Clc, INH, NOACC, 2),
    (0x0D, Sec, INH, NOACC, 2),
    (0x0E, Cli, INH, NOACC, 2),
    (0x0F, Sei, INH, NOACC, 2),
    (0x10, Sba, INH, NOACC, 2),
    (0x11, Cba, INH, NOACC, 2),
    (0x16, Tab, INH, NOACC, 2),
    (0x17, Tba, INH, NOACC, 2),
    (0x19, Daa, INH, NOACC, 2),
    (0x1B, Aba, INH, NOACC, 2),
    // Branches
    (0x20, Bra, REL, NOACC, 4),
    (0x22, Bhi, REL, NOACC, 4),
    (0x23, Bls, REL, NOACC, 4),
    (0x24, Bcc, REL, NOACC, 4),
    (0x25, Bcs, REL, NOACC, 4),
    (0x26, Bne, REL, NOACC, 4),
    (0x27, Beq, REL, NOACC, 4),
    (0x28, Bvc, REL, NOACC, 4),
    (0x29, Bvs, REL, NOACC, 4),
    (0x2A, Bpl, REL, NOACC, 4),
    (0x2B, Bmi, REL, NOACC, 4),
    (0x2C, Bge, REL, NOACC, 4),
    (0x2D, Blt, REL, NOACC, 4),
    (0x2E, Bgt, REL, NOACC, 4),
    (0x2F, Ble, REL, NOACC, 4),
    // Stack and control
    (0x30, Tsx, INH, NOACC, 4),
    (0x31, Ins, INH, NOACC, 4),
    (0x32, Pul, INH, ACCA, 4),
    (0x33, Pul, INH, ACCB, 4),
    (0x34, Des, INH, NOACC, 4),
    (0x35, Txs, INH, NOACC, 4),
    (0x36, Psh, INH, ACCA, 4),
    (0x37, Psh, INH, ACCB, 4),
    (0x39, Rts, INH, NOACC, 5),
    (0x3B, Rti, INH, NOACC, 10),
    (0x3E, Wai, INH, NOACC, 9),
    (0x3F, Swi, INH, NOACC, 12),
    // Accumulator read-modify-write
    (0x40, Neg, INH, ACCA, 2),
    (0x43, Com, INH, ACCA, 2),
    (0x44, Lsr, INH, ACCA, 2),
    (0x46, Ror, INH, ACCA, 2),
    (0x47, Asr, INH, ACCA, 2),
    (0x48, Asl, INH, ACCA, 2),
    (0x49, Rol, INH, ACCA, 2),
    (0x4A, Dec, INH, ACCA, 2),
    (0x4C, Inc, INH, ACCA, 2),
    (0x4D, Tst, INH, ACCA, 2),
    (0x4F, Clr, INH, ACCA, 2),
    (0x50, Neg, INH, ACCB, 2),
    (0x53, Com, INH, ACCB, 2),
    (0x54, Lsr, INH, ACCB, 2),
    (0x56, Ror, INH, ACCB, 2),
    (0x57, Asr, INH, ACCB, 2),
    (0x58, Asl, INH, ACCB, 2),
    (0x59, Rol, INH, ACCB, 2),
    (0x5A, Dec, INH, ACCB, 2),
    (0x5C, Inc, INH, ACCB, 2),
    (0x5D, Tst, INH, ACCB, 2),
    (0x5F, Clr, INH, ACCB, 2),
    // Memory read-modify-write and jumps
    (0x60, Neg, IDX, NOACC, 7),
    (0x63, Com, IDX, NOACC, 7),
    (0x64, Lsr, IDX, NOACC, 7),
    (0x66, Ror, IDX, NOACC, 7),
    (0x67, Asr, IDX, NOACC, 7),
    (0x68, Asl, IDX, NOACC, 7),
    (0x69, Rol, IDX, NOACC, 7),
    (0x6A, Dec, IDX, NOACC, 7),
    (0x6C, Inc, IDX, NOACC, 7),
    (0x6D, Tst, IDX, NOACC, 7),
    (0x6F, Clr, IDX, NOACC, 7),
    (0x6E, Jmp, IDX, NOACC, 4),
    (0x70, Neg, EXT, NOACC, 6),
    (0x73, Com, EXT, NOACC, 6),
    (0x74, Lsr, EXT, NOACC, 6),
    (0x76, Ror, EXT, NOACC, 6),
    (0x77, Asr, EXT, NOACC, 6),
    (0x78, Asl, EXT, NOACC, 6),
    (0x79, Rol, EXT, NOACC, 6),
    (0x7A, Dec, EXT, NOACC, 6),
    (0x7C, Inc, EXT, NOACC, 6),
    (0x7D, Tst, EXT, NOACC, 6),
    (0x7F, Clr, EXT, NOACC, 6),
    (0x7E, Jmp, EXT, NOACC, 3),
    // $8x: A immediate, CPX/LDS #, BSR
    (0x80, Sub, IMM, ACCA, 2),
    (0x81, Cmp, IMM, ACCA, 2),
    (0x82, Sbc, IMM, ACCA, 2),
    (0x84, And, IMM, ACCA, 2),
    (0x85, Bit, IMM, ACCA, 2),
    (0x86, Lda, IMM, ACCA, 2),
    (0x88, Eor, IMM, ACCA, 2),
    (0x89, Adc, IMM, ACCA, 2),
    (0x8A, Ora, IMM, ACCA, 2),
    (0x8B, Add, IMM, ACCA, 2),
    (0x8C, Cpx, IMM16, NOACC, 3),
    (0x8D, Bsr, REL, NOACC, 8),
    (0x8E, Lds, IMM16, NOACC, 3),
    // $9x: A direct
    (0x90, Sub, DIR, ACCA, 3),
    (0x91, Cmp, DIR, ACCA, 3),
    (0x92, Sbc, DIR, ACCA, 3),
    (0x94, And, DIR, ACCA, 3),
    (0x95, Bit, DIR, ACCA, 3),
    (0x96, Lda, DIR, ACCA, 3),
    (0x98, Eor, DIR, ACCA, 3),
    (0x99, Adc, DIR, ACCA, 3),
    (0x9A, Ora, DIR, ACCA, 3),
    (0x9B, Add, DIR, ACCA, 3),
    (0x97, Sta, DIR, ACCA, 4),
    (0x9C, Cpx, DIR, NOACC, 4),
    (0x9E, Lds, DIR, NOACC, 4),
    (0x9F, Sts, DIR, NOACC, 5),
    // $Ax: A indexed
    (0xA0, Sub, IDX, ACCA, 5),
    (0xA1, Cmp, IDX, ACCA, 5),
    (0xA2, Sbc, IDX, ACCA, 5),
    (0xA4, And, IDX, ACCA, 5),
    (0xA5, Bit, IDX, ACCA, 5),
    (0xA6, Lda, IDX, ACCA, 5),
    (0xA8, Eor, IDX, ACCA, 5),
    (0xA9, Adc, IDX, ACCA, 5),
    (0xAA, Ora, IDX, ACCA, 5),
    (0xAB, Add, IDX, ACCA, 5),
    (0xA7, Sta, IDX, ACCA, 6),
    (0xAC, Cpx, IDX, NOACC, 6),
    (0xAD, Jsr, IDX, NOACC, 8),
    (0xAE, Lds, IDX, NOACC, 6),
    (0xAF, Sts, IDX, NOACC, 7),
    // $Bx: A extended
    (0xB0, Sub, EXT, ACCA, 4),
    (0xB1, Cmp, EXT, ACCA, 4),
    (0xB2, Sbc, EXT, ACCA, 4),
    (0xB4, And, EXT, ACCA, 4),
    (0xB5, Bit, EXT, ACCA, 4),
    (0xB6, Lda, EXT, ACCA, 4),
    (0xB8, Eor, EXT, ACCA, 4),
    (0xB9, Adc, EXT, ACCA, 4),
    (0xBA, Ora, EXT, ACCA, 4),
    (0xBB, Add, EXT, ACCA, 4),
    (0xB7, Sta, EXT, ACCA, 5),
    (0xBC, Cpx, EXT, NOACC, 5),
    (0xBD, Jsr, EXT, NOACC, 9),
    (0xBE, Lds, EXT, NOACC, 5),
    (0xBF, Sts, EXT, NOACC, 6),
    // $Cx: B immediate, LDX #
    (0xC0, Sub, IMM, ACCB, 2),
    (0xC1, Cmp, IMM, ACCB, 2),
    (0xC2, Sbc, IMM, ACCB, 2),
    (0xC4, And, IMM, ACCB, 2),
    (0xC5, Bit, IMM, ACCB, 2),
    (0xC6, Lda, IMM, ACCB, 2),
    (0xC8, Eor, IMM, ACCB, 2),
    (0xC9, Adc, IMM, ACCB, 2),
    (0xCA, Ora, IMM, ACCB, 2),
    (0xCB, Add, IMM, ACCB, 2),
    (0xCE, Ldx, IMM16, NOACC, 3),
    // $Dx: B direct
    (0xD0, Sub, DIR, ACCB, 3),
    (0xD1, Cmp, DIR, ACCB, 3),
    (0xD2, Sbc, DIR, ACCB, 3),
    (0xD4, And, DIR, ACCB, 3),
    (0xD5, Bit, DIR, ACCB, 3),
    (0xD6, Lda, DIR, ACCB, 3),
    (0xD8, Eor, DIR, ACCB, 3),
    (0xD9, Adc, DIR, ACCB, 3),
    (0xDA, Ora, DIR, ACCB, 3),
    (0xDB, Add, DIR, ACCB, 3),
    (0xD7, Sta, DIR, ACCB, 4),
    (0xDE, Ldx, DIR, NOACC, 4),
    (0xDF, Stx, DIR, NOACC, 5),
    // $Ex: B indexed
    (0xE0, Sub, IDX, ACCB, 5),
    (0xE1, Cmp, IDX, ACCB, 5),
    (0xE2, Sbc, IDX, ACCB, 5),
    (0xE4, And, IDX, ACCB, 5),
    (0xE5, Bit, IDX, ACCB, 5),
    (0xE6, Lda, IDX, ACCB, 5),
    (0xE8, Eor, IDX, ACCB, 5),
    (0xE9, Adc, IDX, ACCB, 5),
    (0xEA, Ora, IDX, ACCB, 5),
    (0xEB, Add, IDX, ACCB, 5),
    (0xE7, Sta, IDX, ACCB, 6),
    (0xEE, Ldx, IDX, NOACC, 6),
    (0xEF, Stx, IDX, NOACC, 7),
    // $Fx: B extended
    (0xF0, Sub, EXT, ACCB, 4),
    (0xF1, Cmp, EXT, ACCB, 4),
    (0xF2, Sbc, EXT, ACCB, 4),
    (0xF4, And, EXT, ACCB, 4),
    (0xF5, Bit, EXT, ACCB, 4),
    (0xF6, Lda, EXT, ACCB, 4),
    (0xF8, Eor, EXT, ACCB, 4),
    (0xF9, Adc, EXT, ACCB, 4),
    (0xFA, Ora, EXT, ACCB, 4),
    (0xFB, Add, EXT, ACCB, 4),
    (0xF7, Sta, EXT, ACCB, 5),
    (0xFE, Ldx, EXT, NOACC, 5),
    (0xFF, Stx, EXT, NOACC, 6),
];

const fn build() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < ENTRIES.len() {
        let (byte, mnemonic, mode, acc, cycles) = ENTRIES[i];
        assert!(table[byte as usize].is_none(), "duplicate opcode entry");
        table[byte as usize] = Some(Opcode {
            mnemonic,
            mode,
            acc,
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
