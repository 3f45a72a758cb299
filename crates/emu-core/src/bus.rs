//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device.
///
/// The H8 data bus is 16 bits wide. Word accesses are aligned: the bus
/// masks the address to even before dispatch. Longword accesses are
/// always two word accesses, high word first, and are provided here so
/// every implementation composes them the same way.
pub trait Bus {
    /// Read a byte from the given address.
    fn read8(&mut self, address: u16) -> u8;

    /// Read an aligned word from the given address.
    fn read16(&mut self, address: u16) -> u16;

    /// Write a byte to the given address.
    fn write8(&mut self, address: u16, value: u8);

    /// Write an aligned word to the given address.
    fn write16(&mut self, address: u16, value: u16);

    /// Read a longword as two word accesses, high word first.
    fn read32(&mut self, address: u16) -> u32 {
        let high = self.read16(address);
        let low = self.read16(address.wrapping_add(2));
        (u32::from(high) << 16) | u32::from(low)
    }

    /// Write a longword as two word accesses, high word first.
    fn write32(&mut self, address: u16, value: u32) {
        self.write16(address, (value >> 16) as u16);
        self.write16(address.wrapping_add(2), value as u16);
    }
}
