//! Core traits for H8 microcontroller emulation.
//!
//! The CPU sees a 16-bit address space through [`Bus`]. A machine
//! implements [`Bus`] by routing each access to a [`BusDevice`] (or to
//! open bus). Peripherals with internal clocking implement [`Tickable`].

mod bus;
mod cpu;
mod device;
mod tickable;

pub use bus::Bus;
pub use cpu::Cpu;
pub use device::BusDevice;
pub use tickable::Tickable;
