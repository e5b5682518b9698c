//! 6800 CPU registers.

use crate::flags::{C, H, I, N, UNUSED, V, Z};

/// Accumulator selector for instructions that exist in an A and a B form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accumulator {
    A,
    B,
}

/// 6800 CPU register set.
///
/// - A, B: 8-bit accumulators
/// - IX: 16-bit index register
/// - SP: 16-bit stack pointer (stack may live anywhere)
/// - PC: 16-bit program counter
/// - CC: condition codes, held here as individual booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub ix: u16,
    pub sp: u16,
    pub pc: u16,
    /// Half carry.
    pub h: bool,
    /// Interrupt mask.
    pub i: bool,
    /// Negative.
    pub n: bool,
    /// Zero.
    pub z: bool,
    /// Overflow.
    pub v: bool,
    /// Carry.
    pub c: bool,
}

impl Registers {
    /// All registers and flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            ix: 0,
            sp: 0,
            pc: 0,
            h: false,
            i: false,
            n: false,
            z: false,
            v: false,
            c: false,
        }
    }

    #[must_use]
    pub const fn acc(&self, which: Accumulator) -> u8 {
        match which {
            Accumulator::A => self.a,
            Accumulator::B => self.b,
        }
    }

    pub fn set_acc(&mut self, which: Accumulator, value: u8) {
        match which {
            Accumulator::A => self.a = value,
            Accumulator::B => self.b = value,
        }
    }

    /// Pack the flags into CC. Bits 6 and 7 read as 1.
    #[must_use]
    pub const fn cc(&self) -> u8 {
        let mut cc = UNUSED;
        if self.h {
            cc |= H;
        }
        if self.i {
            cc |= I;
        }
        if self.n {
            cc |= N;
        }
        if self.z {
            cc |= Z;
        }
        if self.v {
            cc |= V;
        }
        if self.c {
            cc |= C;
        }
        cc
    }

    /// Unpack CC into the individual flags.
    pub fn set_cc(&mut self, cc: u8) {
        self.h = cc & H != 0;
        self.i = cc & I != 0;
        self.n = cc & N != 0;
        self.z = cc & Z != 0;
        self.v = cc & V != 0;
        self.c = cc & C != 0;
    }

    /// Update N and Z from an 8-bit result.
    pub fn update_nz(&mut self, value: u8) {
        self.n = value & 0x80 != 0;
        self.z = value == 0;
    }

    /// Update N and Z from a 16-bit result.
    pub fn update_nz16(&mut self, value: u16) {
        self.n = value & 0x8000 != 0;
        self.z = value == 0;
    }
}
