//! Memory map and bus dispatcher.
//!
//! Memory map (normal mode, 16-bit external address space):
//! - 0x0000-0xBFFF: flash ROM array
//! - 0xC000-0xF01F: open bus
//! - 0xF020-0xF0FF: I/O area 1, decoded per byte
//!   - 0xF020-0xF023, 0xF02B: flash control registers
//!   - 0xF0E0-0xF0E4, 0xF0E9, 0xF0EB: SSU
//! - 0xF100-0xF77F: open bus
//! - 0xF780-0xFF7F: 2 KiB on-chip RAM
//! - 0xFF80-0xFFFF: I/O area 2, decoded per byte (nothing mapped yet)
//!
//! Open bus reads high: 0xFF for bytes, 0xFFFF for words. Writes to
//! unmapped addresses are discarded. Word accesses are masked to even
//! alignment before routing.

use emu_core::{Bus, BusDevice};
use renesas_ssu::Ssu;

use crate::flash::Flash;
use crate::ram::Ram;

/// Value returned by a byte read of an unmapped address.
pub const OPEN_BUS_BYTE: u8 = 0xFF;

/// Value returned by a word read of an unmapped address.
pub const OPEN_BUS_WORD: u16 = 0xFFFF;

/// Routing target for one bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Flash,
    Ram,
    Ssu,
    Open,
}

/// The machine bus: flash, RAM and the SSU behind one address decoder.
pub struct WalkerBus {
    pub flash: Flash,
    pub ram: Ram,
    pub ssu: Ssu,
}

impl WalkerBus {
    /// Create a bus with all devices in their reset state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flash: Flash::new(),
            ram: Ram::new(),
            ssu: Ssu::new(),
        }
    }

    fn target(address: u16) -> Target {
        match address {
            0x0000..=0xBFFF => Target::Flash,
            // I/O area 1: flash control registers
            0xF020..=0xF023 | 0xF02B => Target::Flash,
            // I/O area 1: SSU
            0xF0E0..=0xF0E4 | 0xF0E9 | 0xF0EB => Target::Ssu,
            0xF780..=0xFF7F => Target::Ram,
            _ => Target::Open,
        }
    }
}

impl Bus for WalkerBus {
    fn read8(&mut self, address: u16) -> u8 {
        match Self::target(address) {
            Target::Flash => self.flash.read8(address),
            Target::Ram => self.ram.read8(address),
            Target::Ssu => self.ssu.read8(address),
            Target::Open => OPEN_BUS_BYTE,
        }
    }

    fn read16(&mut self, address: u16) -> u16 {
        let address = address & 0xFFFE;
        match Self::target(address) {
            Target::Flash => self.flash.read16(address),
            Target::Ram => self.ram.read16(address),
            Target::Ssu => self.ssu.read16(address),
            Target::Open => OPEN_BUS_WORD,
        }
    }

    fn write8(&mut self, address: u16, value: u8) {
        match Self::target(address) {
            Target::Flash => self.flash.write8(address, value),
            Target::Ram => self.ram.write8(address, value),
            Target::Ssu => self.ssu.write8(address, value),
            Target::Open => {}
        }
    }

    fn write16(&mut self, address: u16, value: u16) {
        let address = address & 0xFFFE;
        match Self::target(address) {
            Target::Flash => self.flash.write16(address, value),
            Target::Ram => self.ram.write16(address, value),
            Target::Ssu => self.ssu.write16(address, value),
            Target::Open => {}
        }
    }
}

impl Default for WalkerBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::ROM_SIZE;

    fn bus_with_rom(patch: &[(usize, u8)]) -> WalkerBus {
        let mut image = vec![0u8; ROM_SIZE];
        for &(offset, value) in patch {
            image[offset] = value;
        }
        let mut bus = WalkerBus::new();
        bus.flash.load(&image).expect("image length matches");
        bus
    }

    #[test]
    fn test_rom_window_routes_to_flash() {
        let mut bus = bus_with_rom(&[(0x0000, 0x12), (0xBFFF, 0x34)]);
        assert_eq!(bus.read8(0x0000), 0x12);
        assert_eq!(bus.read8(0xBFFF), 0x34);
    }

    #[test]
    fn test_ram_round_trip() {
        let mut bus = WalkerBus::new();
        bus.write8(0xF780, 0xAA);
        bus.write16(0xFF7E, 0x1234);
        assert_eq!(bus.read8(0xF780), 0xAA);
        assert_eq!(bus.read16(0xFF7E), 0x1234);
    }

    #[test]
    fn test_open_bus_reads_high() {
        let mut bus = WalkerBus::new();
        assert_eq!(bus.read8(0xC000), 0xFF);
        assert_eq!(bus.read8(0xF100), 0xFF);
        assert_eq!(bus.read16(0xC000), 0xFFFF);
    }

    #[test]
    fn test_open_bus_discards_writes() {
        let mut bus = WalkerBus::new();
        bus.write8(0xC123, 0x55);
        bus.write16(0xF200, 0x5566);
        assert_eq!(bus.read8(0xC123), 0xFF);
        assert_eq!(bus.read16(0xF200), 0xFFFF);
    }

    #[test]
    fn test_word_access_masks_to_even() {
        let mut bus = WalkerBus::new();
        bus.write16(0xF781, 0xBEEF);
        assert_eq!(bus.read16(0xF780), 0xBEEF);
        assert_eq!(bus.read16(0xF781), 0xBEEF);
    }

    #[test]
    fn test_io_area_1_decodes_per_byte() {
        let mut bus = WalkerBus::new();
        // SSU register vs the unmapped byte right before it.
        assert_eq!(bus.read8(0xF0E0), 0x08);
        assert_eq!(bus.read8(0xF0DF), 0xFF);
        // Flash control registers are mapped but inert.
        assert_eq!(bus.read8(0xF020), 0xFF);
        assert_eq!(bus.read8(0xF024), 0xFF);
    }

    #[test]
    fn test_io_area_2_is_open() {
        let mut bus = WalkerBus::new();
        bus.write8(0xFF80, 0x01);
        assert_eq!(bus.read8(0xFF80), 0xFF);
        assert_eq!(bus.read8(0xFFFF), 0xFF);
    }
}
