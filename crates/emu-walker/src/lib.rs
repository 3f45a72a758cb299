//! H8/38606-based handheld pedometer emulator.
//!
//! The machine is an H8/300H core in normal mode with 48 KiB of
//! on-chip flash, 2 KiB of on-chip RAM, a synchronous serial unit and
//! a 64 KiB external EEPROM image. The display, buttons, IR port and
//! the remaining on-chip peripherals are not modeled yet.

mod bus;
mod eeprom;
mod flash;
mod ram;
mod walker;

use std::fmt;

pub use bus::{OPEN_BUS_BYTE, OPEN_BUS_WORD, WalkerBus};
pub use eeprom::{EEPROM_SIZE, Eeprom};
pub use flash::{Flash, ROM_SIZE};
pub use ram::{RAM_BASE, RAM_SIZE, Ram};
pub use walker::Walker;

/// Error loading a memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// The image does not fill its array exactly.
    WrongLength { expected: usize, actual: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "image is {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ImageError {}
