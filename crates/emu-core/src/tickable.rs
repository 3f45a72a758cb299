//! Trait for components that can be advanced by clock ticks.

/// A component that can be advanced by clock ticks.
///
/// Peripherals with internal timing (prescalers, shift clocks) implement
/// this and are ticked by the machine alongside CPU execution.
pub trait Tickable {
    /// Advance the component by one clock tick.
    fn tick(&mut self);

    /// Advance the component by multiple ticks.
    ///
    /// Default implementation calls `tick()` in a loop. Components may
    /// override for efficiency, but must produce identical results.
    fn tick_n(&mut self, count: u32) {
        for _ in 0..count {
            self.tick();
        }
    }
}
