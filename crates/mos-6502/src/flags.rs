//! 6502 processor status register (P) bit layout.
//!
//! The CPU keeps each flag as a separate `bool` in [`Registers`]; these masks
//! only matter when the status is packed into a byte (PHP, BRK, interrupts)
//! or unpacked from one (PLP, RTI).
//!
//! [`Registers`]: crate::Registers

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable - when set, IRQ interrupts are ignored.
pub const I: u8 = 0x04;

/// Decimal mode - enables BCD arithmetic for ADC/SBC.
pub const D: u8 = 0x08;

/// Break flag - set in the copy of P that BRK and PHP push.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;
