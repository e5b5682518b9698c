//! Cycle-counted MOS 6502 CPU emulator.
//!
//! Implements the 151 documented NMOS opcodes. Each `tick()` advances one
//! clock cycle: the instruction executes on its first cycle and the rest of
//! its cycle budget is counted down before the next fetch.
//!
//! Compatible variants (see [`Variant`]):
//!
//! - **6502** - Original NMOS CPU
//! - **2A03** - Ricoh NES CPU, decimal mode disabled
//!
//! Undocumented ("illegal") opcodes are not decoded; they surface as
//! [`emu_core::CpuError::UnknownOpcode`].

mod addressing;
pub mod alu;
mod cpu;
pub mod flags;
mod model;
mod opcodes;
mod registers;

pub use cpu::{IRQ_VECTOR, Mos6502, NMI_VECTOR, RESET_VECTOR};
pub use model::{Capabilities, Variant};
pub use opcodes::{AddressingMode, Mnemonic, OPCODES, Opcode, decode};
pub use registers::{Registers, STACK_PAGE};
