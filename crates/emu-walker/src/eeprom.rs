//! External serial EEPROM image.
//!
//! The EEPROM hangs off the SSU serial pins. The serial link itself is
//! not wired up, so for now this is backing storage for the image the
//! host loads and saves.

use crate::ImageError;

/// EEPROM size in bytes.
pub const EEPROM_SIZE: usize = 65536;

/// 64 KiB serial EEPROM.
pub struct Eeprom {
    data: Box<[u8; EEPROM_SIZE]>,
}

impl Eeprom {
    /// Create an EEPROM in the erased state (all bits set).
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Box::new([0xFF; EEPROM_SIZE]),
        }
    }

    /// Load an EEPROM image. The image must fill the array exactly.
    pub fn load(&mut self, image: &[u8]) -> Result<(), ImageError> {
        if image.len() != EEPROM_SIZE {
            return Err(ImageError::WrongLength {
                expected: EEPROM_SIZE,
                actual: image.len(),
            });
        }
        self.data.copy_from_slice(image);
        Ok(())
    }

    /// The current image contents.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for Eeprom {
    fn default() -> Self {
        Self::new()
    }
}
