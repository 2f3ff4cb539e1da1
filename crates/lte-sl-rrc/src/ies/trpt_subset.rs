/// TRPT-Subset-r12: 3-bit restriction on the usable repetition counts.
/// Bit 0 enables k=1, bit 1 enables k=2, bit 2 enables k=4 (k=8 is always allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlTrptSubset {
    bits: u8,
}

impl SlTrptSubset {
    pub fn from_value(value: u8) -> Self {
        Self { bits: value & 0x7 }
    }

    /// Subset with all repetition counts allowed
    pub fn all() -> Self {
        Self { bits: 0x7 }
    }

    pub fn value(&self) -> u8 {
        self.bits
    }

    pub fn bit(&self, i: u8) -> bool {
        assert!(i < 3, "TRPT subset index {} out of range", i);
        (self.bits >> i) & 1 == 1
    }

    pub fn none(&self) -> bool {
        self.bits == 0
    }
}

impl Default for SlTrptSubset {
    fn default() -> Self {
        Self::all()
    }
}
