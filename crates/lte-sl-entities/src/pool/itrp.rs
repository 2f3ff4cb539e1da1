//! Time resource patterns for PSSCH transmission (TS 36.213 table 14.1.1.1.1-1, FDD)

/// Number of subframes covered by one time resource pattern
pub const N_TRP: usize = 8;

/// Number of defined time resource pattern indices
pub const NUM_ITRP: usize = 107;

/// I_TRP to k_TRP, the number of set bits in the pattern
pub const ITRP_TO_KTRP: [u8; NUM_ITRP] = [
    1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 8,
];

/// I_TRP to the pattern b'. The most significant bit is b'_0.
pub const ITRP_TO_BITMAP: [u8; NUM_ITRP] = [
    // k = 1
    0b10000000, 0b01000000, 0b00100000, 0b00010000, 0b00001000, 0b00000100, 0b00000010, 0b00000001,
    // k = 2
    0b11000000, 0b10100000, 0b01100000, 0b10010000, 0b01010000, 0b00110000, 0b10001000, 0b01001000,
    0b00101000, 0b00011000, 0b10000100, 0b01000100, 0b00100100, 0b00010100, 0b00001100, 0b10000010,
    0b01000010, 0b00100010, 0b00010010, 0b00001010, 0b00000110, 0b10000001, 0b01000001, 0b00100001,
    0b00010001, 0b00001001, 0b00000101, 0b00000011,
    // k = 4
    0b11110000, 0b11101000, 0b11011000, 0b10111000, 0b01111000, 0b11100100, 0b11010100, 0b10110100,
    0b01110100, 0b11001100, 0b10101100, 0b01101100, 0b10011100, 0b01011100, 0b00111100, 0b11100010,
    0b11010010, 0b10110010, 0b01110010, 0b11001010, 0b10101010, 0b01101010, 0b10011010, 0b01011010,
    0b00111010, 0b11000110, 0b11000110, 0b01100110, 0b10010110, 0b01010110, 0b00110110, 0b10001110,
    0b01001110, 0b00101110, 0b00011110, 0b11100001, 0b11010001, 0b10110001, 0b01110001, 0b11001001,
    0b10101001, 0b01101001, 0b10011001, 0b01011001, 0b00111001, 0b11000101, 0b10100101, 0b01100101,
    0b10010101, 0b01010101, 0b00110101, 0b10001101, 0b01001101, 0b00101101, 0b00011101, 0b11000011,
    0b10100011, 0b01100011, 0b10010011, 0b01010011, 0b00110011, 0b10001011, 0b01001011, 0b00101011,
    0b00011011, 0b10000111, 0b01000111, 0b00100111, 0b00010111, 0b00001111,
    // k = 8
    0b11111111,
];

/// Returns b'_(i mod N_TRP) of the pattern selected by `itrp`
#[inline(always)]
pub fn pattern_bit(itrp: u8, i: usize) -> bool {
    let pattern = ITRP_TO_BITMAP[itrp as usize];
    (pattern >> (N_TRP - 1 - (i % N_TRP))) & 1 == 1
}

pub fn ktrp(itrp: u8) -> u8 {
    ITRP_TO_KTRP[itrp as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(ITRP_TO_KTRP.iter().filter(|&&k| k == 1).count(), 8);
        assert_eq!(ITRP_TO_KTRP.iter().filter(|&&k| k == 8).count(), 1);
        assert_eq!(ITRP_TO_KTRP[NUM_ITRP - 1], 8);
        assert_eq!(ITRP_TO_BITMAP[NUM_ITRP - 1], 0xFF);
        // Single transmission patterns walk b'_0 .. b'_7
        for itrp in 0..8u8 {
            for i in 0..N_TRP {
                assert_eq!(pattern_bit(itrp, i), i == itrp as usize);
            }
        }
    }

    #[test]
    fn test_pattern_bit_wraps_every_eight_subframes() {
        // 0b00000100: b'_5 only
        assert!(pattern_bit(5, 5));
        assert!(pattern_bit(5, 13));
        assert!(!pattern_bit(5, 12));
    }
}
