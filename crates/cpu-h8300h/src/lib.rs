//! H8/300H CPU core emulator.
//!
//! The core executes one instruction per `step` in normal mode: 24-bit
//! program counter, 16-bit external address space, word-sized stack
//! frames. Decoding is table-free: up to three tiers of `match` over
//! the instruction words produce a tagged operation, and a single
//! dispatch match runs it.

mod arith;
mod bits;
mod branches;
mod cpu;
mod decode;
pub mod flags;
mod logic;
mod mov;
mod registers;
mod shifts;

pub use cpu::H8300h;
pub use flags::Ccr;
pub use registers::Registers;
