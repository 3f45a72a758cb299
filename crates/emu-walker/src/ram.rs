//! On-chip RAM.

use emu_core::BusDevice;

/// First RAM address.
pub const RAM_BASE: u16 = 0xF780;

/// RAM size in bytes.
pub const RAM_SIZE: usize = 2048;

/// 2 KiB on-chip RAM mapped at 0xF780-0xFF7F.
pub struct Ram {
    data: [u8; RAM_SIZE],
}

impl Ram {
    /// Create zeroed RAM.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: [0; RAM_SIZE],
        }
    }

    /// Clear RAM contents.
    pub fn reset(&mut self) {
        self.data = [0; RAM_SIZE];
    }
}

impl BusDevice for Ram {
    fn read8(&mut self, address: u16) -> u8 {
        self.data[(address - RAM_BASE) as usize]
    }

    fn write8(&mut self, address: u16, value: u8) {
        self.data[(address - RAM_BASE) as usize] = value;
    }

    // Native word port.
    fn read16(&mut self, address: u16) -> u16 {
        let index = ((address & 0xFFFE) - RAM_BASE) as usize;
        (u16::from(self.data[index]) << 8) | u16::from(self.data[index + 1])
    }

    fn write16(&mut self, address: u16, value: u16) {
        let index = ((address & 0xFFFE) - RAM_BASE) as usize;
        self.data[index] = (value >> 8) as u8;
        self.data[index + 1] = value as u8;
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
