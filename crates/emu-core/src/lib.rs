//! Core traits and types for cycle-counted 8-bit CPU emulation.
//!
//! The pieces every CPU core shares: the bus it talks to, the error type its
//! tick can fail with, the effective-address sum type its addressing modes
//! produce, and the countdown that spreads an instruction over its cycles.

mod bus;
mod cpu;
mod error;
mod observable;
mod operand;
mod timing;

pub use bus::{ADDRESS_SPACE, Bus, SimpleBus};
pub use cpu::Cpu;
pub use error::CpuError;
pub use observable::{Observable, Value};
pub use operand::{EffectiveAddress, Operand, crosses_page};
pub use timing::{RunState, Ticks};
