/// Number of bits in a sidelink subframe bitmap (FDD)
pub const SL_SUBFRAME_BITMAP_LEN: u32 = 40;

/// SubframeBitmapSL-r12 for FDD, 40 bits. Bit i describes subframe i of the pool window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlSubframeBitmap {
    bits: u64,
}

impl SlSubframeBitmap {
    /// Builds a bitmap from its integer value. Bits above bit 39 are discarded.
    pub fn from_value(value: u64) -> Self {
        Self { bits: value & ((1u64 << SL_SUBFRAME_BITMAP_LEN) - 1) }
    }

    pub fn value(&self) -> u64 {
        self.bits
    }

    /// Returns whether subframe `i` (0..40) is part of the pool
    #[inline(always)]
    pub fn bit(&self, i: u32) -> bool {
        assert!(i < SL_SUBFRAME_BITMAP_LEN, "bitmap index {} out of range", i);
        (self.bits >> i) & 1 == 1
    }

    pub fn count_ones(&self) -> u32 {
        self.bits.count_ones()
    }
}

/// SL-TF-ResourceConfig-r12: time/frequency resources of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlTfResourceConfig {
    /// Number of PRBs at each edge of [prb_start, prb_end]
    pub prb_num: u8,
    pub prb_start: u8,
    pub prb_end: u8,
    /// Subframe offset of the pool within the SFN cycle
    pub offset: u16,
    pub subframe_bitmap: SlSubframeBitmap,
}
