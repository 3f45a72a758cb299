//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. The bus is
/// passed in, not owned, so it can be shared with other components.
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Execute one complete instruction.
    fn step<B: Bus>(&mut self, bus: &mut B);

    /// Returns the current program counter.
    ///
    /// Returns `u32` to support address widths beyond 16 bits; the
    /// H8/300H program counter is 24 bits wide.
    fn pc(&self) -> u32;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Reset the CPU to its initial state.
    fn reset(&mut self);
}
