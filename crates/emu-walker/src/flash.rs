//! On-chip flash ROM and its control registers.
//!
//! The 48 KiB flash array backs addresses 0x0000-0xBFFF. The control
//! registers used for reprogramming (FLMCR1/FLMCR2/FLPWCR/EBR1/FENR)
//! are mapped but inert: programming mode is not modeled, so they read
//! 0xFF and ignore writes.

use emu_core::BusDevice;

use crate::ImageError;

/// Flash array size in bytes.
pub const ROM_SIZE: usize = 49152;

/// Flash memory control register 1.
pub const FLMCR1: u16 = 0xF020;
/// Flash memory control register 2.
pub const FLMCR2: u16 = 0xF021;
/// Flash memory power control register.
pub const FLPWCR: u16 = 0xF022;
/// Erase block register 1.
pub const EBR1: u16 = 0xF023;
/// Flash memory enable register.
pub const FENR: u16 = 0xF02B;

/// On-chip flash ROM.
pub struct Flash {
    data: Box<[u8; ROM_SIZE]>,
}

impl Flash {
    /// Create a flash array in the erased state (all bits set).
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Box::new([0xFF; ROM_SIZE]),
        }
    }

    /// Load a ROM image. The image must fill the array exactly.
    pub fn load(&mut self, image: &[u8]) -> Result<(), ImageError> {
        if image.len() != ROM_SIZE {
            return Err(ImageError::WrongLength {
                expected: ROM_SIZE,
                actual: image.len(),
            });
        }
        self.data.copy_from_slice(image);
        Ok(())
    }

    fn is_array(address: u16) -> bool {
        address & 0xC000 != 0xC000
    }
}

impl BusDevice for Flash {
    fn read8(&mut self, address: u16) -> u8 {
        if Self::is_array(address) {
            self.data[address as usize]
        } else {
            // FLMCR1/FLMCR2/FLPWCR/EBR1/FENR: inert, reads high.
            0xFF
        }
    }

    fn write8(&mut self, _address: u16, _value: u8) {
        // Array writes need programming mode; control writes are inert.
    }

    fn read16(&mut self, address: u16) -> u16 {
        if Self::is_array(address) {
            let address = (address & 0xFFFE) as usize;
            (u16::from(self.data[address]) << 8) | u16::from(self.data[address | 1])
        } else {
            0xFFFF
        }
    }

    fn write16(&mut self, _address: u16, _value: u16) {}
}

impl Default for Flash {
    fn default() -> Self {
        Self::new()
    }
}
