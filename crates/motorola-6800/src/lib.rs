//! Cycle-counted Motorola 6800 CPU emulator.
//!
//! Implements the 197 documented opcodes with the two accumulators, the
//! 16-bit index register and a stack that may sit anywhere in memory. All
//! 16-bit quantities are big-endian, in the instruction stream and in memory.
//!
//! Beyond the common [`emu_core::Cpu`] surface the 6800 has a HALT input
//! ([`Mc6800::set_halt`]) and a BA output ([`Mc6800::bus_available`]). WAI
//! stacks the interrupt frame early so the eventual interrupt only has to
//! fetch its vector.

mod addressing;
pub mod alu;
mod cpu;
pub mod flags;
mod opcodes;
mod registers;

pub use cpu::{IRQ_VECTOR, Mc6800, NMI_VECTOR, RESET_VECTOR, SWI_VECTOR};
pub use opcodes::{AddressingMode, Mnemonic, OPCODES, Opcode, decode};
pub use registers::{Accumulator, Registers};
