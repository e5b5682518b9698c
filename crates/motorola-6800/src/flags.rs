//! 6800 condition code register (CC) bit layout.
//!
//! Bits 6 and 7 are unused and read as 1. TPA/TAP and the interrupt frame
//! are the only places the packed form is visible.

/// Carry/borrow out of bit 7.
pub const C: u8 = 0x01;

/// Two's-complement overflow.
pub const V: u8 = 0x02;

/// Result is zero.
pub const Z: u8 = 0x04;

/// Result bit 7 set.
pub const N: u8 = 0x08;

/// Interrupt mask - IRQ is ignored while set.
pub const I: u8 = 0x10;

/// Half carry out of bit 3, used by DAA.
pub const H: u8 = 0x20;

/// Bits 6-7, always 1.
pub const UNUSED: u8 = 0xC0;
