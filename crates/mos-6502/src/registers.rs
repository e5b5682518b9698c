//! 6502 CPU registers.

use crate::flags::{B, C, D, I, N, U, V, Z};

/// Base of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// 6502 CPU register set.
///
/// The 6502 has minimal registers:
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: status flags, held here as individual booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Carry.
    pub c: bool,
    /// Zero.
    pub z: bool,
    /// Interrupt disable.
    pub i: bool,
    /// Decimal mode.
    pub d: bool,
    /// Break.
    pub b: bool,
    /// Overflow.
    pub v: bool,
    /// Negative.
    pub n: bool,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in reset state.
    ///
    /// After reset:
    /// - A, X, Y are undefined (we use 0)
    /// - SP is $FD (the three phantom pushes of the reset sequence)
    /// - PC is left at 0; hosts load it from the reset vector
    /// - I is set, every other flag clear
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            c: false,
            z: false,
            i: true,
            d: false,
            b: false,
            v: false,
            n: false,
        }
    }

    /// Pack the flags into P. The unused bit always reads as 1.
    #[must_use]
    pub const fn status(&self) -> u8 {
        let mut p = U;
        if self.n {
            p |= N;
        }
        if self.v {
            p |= V;
        }
        if self.b {
            p |= B;
        }
        if self.d {
            p |= D;
        }
        if self.i {
            p |= I;
        }
        if self.z {
            p |= Z;
        }
        if self.c {
            p |= C;
        }
        p
    }

    /// Unpack P into the individual flags.
    pub fn set_status(&mut self, p: u8) {
        self.n = p & N != 0;
        self.v = p & V != 0;
        self.b = p & B != 0;
        self.d = p & D != 0;
        self.i = p & I != 0;
        self.z = p & Z != 0;
        self.c = p & C != 0;
    }

    /// Update N and Z from a result byte.
    pub fn update_nz(&mut self, value: u8) {
        self.n = value & 0x80 != 0;
        self.z = value == 0;
    }

    /// Address the next push writes to; post-decrements SP.
    pub fn push(&mut self) -> u16 {
        let addr = STACK_PAGE | u16::from(self.sp);
        self.sp = self.sp.wrapping_sub(1);
        addr
    }

    /// Pre-increments SP; returns the address the pull reads from.
    pub fn pop(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(1);
        STACK_PAGE | u16::from(self.sp)
    }

    /// Current stack address without modifying SP.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        STACK_PAGE | (self.sp as u16)
    }
}
