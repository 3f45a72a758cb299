//! Bus-attached device interface.

/// A device mapped into the bus address space.
///
/// Devices are addressed with the full bus address, not a local offset.
/// Byte access is mandatory. The provided word methods synthesize a
/// big-endian word from two byte accesses (high byte at the even
/// address); devices with a native word port override them.
pub trait BusDevice {
    /// Read a byte from the device.
    fn read8(&mut self, address: u16) -> u8;

    /// Write a byte to the device.
    fn write8(&mut self, address: u16, value: u8);

    /// Read an aligned word. The address has already been masked even.
    fn read16(&mut self, address: u16) -> u16 {
        let high = self.read8(address & 0xFFFE);
        let low = self.read8(address | 0x0001);
        (u16::from(high) << 8) | u16::from(low)
    }

    /// Write an aligned word. The address has already been masked even.
    fn write16(&mut self, address: u16, value: u16) {
        self.write8(address & 0xFFFE, (value >> 8) as u8);
        self.write8(address | 0x0001, value as u8);
    }
}
