//! H8/300H condition code register (CCR).
//!
//! The CCR reflects the result of operations and holds the interrupt
//! mask. Bits 4 and 6 are user bits with no architectural meaning.

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x02;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x04;

/// Negative flag - set if result has its sign bit set.
pub const N: u8 = 0x08;

/// User bit 4 - freely usable, no architectural meaning.
pub const U: u8 = 0x10;

/// Half-carry flag - carry/borrow at bit 3 (byte), 11 (word) or 27 (long).
pub const H: u8 = 0x20;

/// User bit 6 - freely usable, no architectural meaning.
pub const UI: u8 = 0x40;

/// Interrupt mask - when set, interrupts are held pending.
pub const I: u8 = 0x80;

/// Condition code register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ccr(pub u8);

impl Ccr {
    /// Create a new CCR in its reset state (only the interrupt mask set).
    #[must_use]
    pub const fn new() -> Self {
        Self(I)
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Update N and Z from a byte result.
    pub fn update_nz8(&mut self, value: u8) {
        self.set_if(N, value & 0x80 != 0);
        self.set_if(Z, value == 0);
    }

    /// Update N and Z from a word result.
    pub fn update_nz16(&mut self, value: u16) {
        self.set_if(N, value & 0x8000 != 0);
        self.set_if(Z, value == 0);
    }

    /// Update N and Z from a longword result.
    pub fn update_nz32(&mut self, value: u32) {
        self.set_if(N, value & 0x8000_0000 != 0);
        self.set_if(Z, value == 0);
    }

    /// Evaluate a branch condition field (bits 4-7 of a Bcc opcode).
    ///
    /// All sixteen encodings are defined; BRN (never) is among them.
    #[must_use]
    pub fn condition(self, cc: u8) -> bool {
        let c = self.is_set(C);
        let v = self.is_set(V);
        let z = self.is_set(Z);
        let n = self.is_set(N);

        match cc & 0x0F {
            0x0 => true,          // BRA - always
            0x1 => false,         // BRN - never
            0x2 => !(c || z),     // BHI - high (unsigned >)
            0x3 => c || z,        // BLS - low or same (unsigned <=)
            0x4 => !c,            // BCC/BHS - carry clear (unsigned >=)
            0x5 => c,             // BCS/BLO - carry set (unsigned <)
            0x6 => !z,            // BNE - not equal
            0x7 => z,             // BEQ - equal
            0x8 => !v,            // BVC - overflow clear
            0x9 => v,             // BVS - overflow set
            0xA => !n,            // BPL - plus
            0xB => n,             // BMI - minus
            0xC => n == v,        // BGE - signed >=
            0xD => n != v,        // BLT - signed <
            0xE => !z && n == v,  // BGT - signed >
            _ => z || n != v,     // BLE - signed <=
        }
    }
}

impl Default for Ccr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state_has_interrupt_mask() {
        let ccr = Ccr::new();
        assert!(ccr.is_set(I));
        assert_eq!(ccr.0, 0x80);
    }

    #[test]
    fn test_update_nz8() {
        let mut ccr = Ccr::new();
        ccr.update_nz8(0x80);
        assert!(ccr.is_set(N));
        assert!(!ccr.is_set(Z));
        ccr.update_nz8(0x00);
        assert!(!ccr.is_set(N));
        assert!(ccr.is_set(Z));
    }

    #[test]
    fn test_signed_conditions_with_overflow() {
        // N=1 V=1: the result wrapped, so the signed comparison is >=.
        let mut ccr = Ccr(0);
        ccr.set(N);
        ccr.set(V);
        assert!(ccr.condition(0xC)); // BGE taken
        assert!(!ccr.condition(0xD)); // BLT not taken
        assert!(ccr.condition(0xE)); // BGT taken (Z clear)
        assert!(!ccr.condition(0xF)); // BLE not taken
    }

    #[test]
    fn test_unsigned_conditions() {
        let mut ccr = Ccr(0);
        ccr.set(C);
        assert!(!ccr.condition(0x2)); // BHI
        assert!(ccr.condition(0x3)); // BLS
        assert!(!ccr.condition(0x4)); // BCC
        assert!(ccr.condition(0x5)); // BCS
    }

    #[test]
    fn test_bra_and_brn() {
        let ccr = Ccr(0xFF);
        assert!(ccr.condition(0x0));
        assert!(!ccr.condition(0x1));
    }
}
