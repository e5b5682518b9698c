//! CPU core trait.

use crate::{Bus, CpuError};

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. The bus is
/// passed into `tick` rather than owned, so the host keeps control of it
/// between cycles and can share it with other components.
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Advance the CPU by one clock cycle.
    ///
    /// The cycle that starts an instruction performs all of its bus traffic
    /// and register updates; the remaining cycles of that instruction only
    /// count down.
    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true while an instruction is still consuming cycles.
    fn is_executing(&self) -> bool;

    /// Returns true if the CPU has stopped fetching instructions.
    fn is_halted(&self) -> bool;

    /// Request a maskable interrupt. Returns true if accepted.
    fn interrupt(&mut self) -> bool;

    /// Request a non-maskable interrupt.
    fn nmi(&mut self);

    /// Reset the CPU to its initial state. Memory is not touched.
    fn reset(&mut self);
}
