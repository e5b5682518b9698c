//! Cycle accounting.
//!
//! Instructions are executed atomically on their first cycle and then hold
//! the CPU for the rest of their cost. `RunState` is that countdown; `Ticks`
//! is the running total of cycles a CPU has been clocked.

/// A count of CPU clock cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::ops::Add for Ticks {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl core::ops::AddAssign<u64> for Ticks {
    fn add_assign(&mut self, rhs: u64) {
        self.0 = self.0.wrapping_add(rhs);
    }
}

/// Remaining-cycle counter for the instruction in flight.
///
/// Zero means idle: the next tick may fetch. Anything above zero means the
/// current instruction still owns that many ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    remaining: u32,
}

impl RunState {
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// True while an instruction is mid-execution.
    #[must_use]
    pub const fn is_executing(self) -> bool {
        self.remaining > 0
    }

    /// Ticks still owed by the current instruction.
    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    /// Start an instruction costing `cycles`. The tick that started it is
    /// already spent.
    pub fn begin(&mut self, cycles: u32) {
        self.remaining = cycles.saturating_sub(1);
    }

    /// Spend one tick of the current instruction.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Abandon the instruction in flight.
    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}
