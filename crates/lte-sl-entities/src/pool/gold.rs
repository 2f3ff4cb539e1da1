//! Pseudo-random sequences driving Type 2 PSSCH frequency hopping
//! (TS 36.211 7.2 and 5.3.4)

use lte_sl_core::SUBFRAMES_PER_SFN_CYCLE;

/// Offset N_c of the Gold sequence generator
const GOLD_NC: usize = 1600;

/// Sequence length needed to cover f_hop(i) and f_m(i) for every subframe of an SFN cycle
pub const GOLD_SEQUENCE_LEN: usize = 102400;

/// Length-31 Gold sequence c(n), seeded with the hopping parameter as c_init
pub fn gold_sequence(hopping_parameter: u16) -> Vec<u8> {
    let total = GOLD_NC + GOLD_SEQUENCE_LEN + 31;
    let mut x1 = vec![0u8; total];
    let mut x2 = vec![0u8; total];

    x1[0] = 1;
    for i in 0..31 {
        x2[i] = ((u32::from(hopping_parameter) >> i) & 1) as u8;
    }

    for i in 0..GOLD_NC + GOLD_SEQUENCE_LEN {
        x1[i + 31] = (x1[i + 3] + x1[i]) % 2;
        x2[i + 31] = (x2[i + 3] + x2[i + 2] + x2[i + 1] + x2[i]) % 2;
    }

    let seq: Vec<u8> = (0..GOLD_SEQUENCE_LEN)
        .map(|i| (x1[i + GOLD_NC] + x2[i + GOLD_NC]) % 2)
        .collect();
    tracing::debug!("gold sequence for c_init {}: len {}, weight {}",
        hopping_parameter, seq.len(), seq.iter().map(|&b| b as u32).sum::<u32>());
    seq
}

/// Subband hop f_hop(i) for every subframe i of an SFN cycle
pub fn hop_sequence(gold: &[u8], num_subbands: u32) -> Vec<u8> {
    let len = SUBFRAMES_PER_SFN_CYCLE as usize;
    if num_subbands == 1 {
        return vec![0; len];
    }
    assert!(num_subbands == 2 || num_subbands == 4,
        "invalid number of subbands {} for frequency hopping", num_subbands);
    assert!(gold.len() >= GOLD_SEQUENCE_LEN);

    let mut seq = Vec::with_capacity(len);
    let mut prev = 0u32;
    for i in 0..len {
        let sum: u32 = (1..=9)
            .map(|k| u32::from(gold[10 * i + k]) << (k - 1))
            .sum();
        let hop = if num_subbands == 2 {
            (prev + sum) % num_subbands
        } else {
            (prev + sum % (num_subbands - 1) + 1) % num_subbands
        };
        seq.push(hop as u8);
        prev = hop;
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_sequence_is_binary_and_seed_dependent() {
        let a = gold_sequence(0);
        let b = gold_sequence(1);
        assert_eq!(a.len(), GOLD_SEQUENCE_LEN);
        assert!(a.iter().all(|&c| c <= 1));
        assert_ne!(a, b);
        assert_eq!(a, gold_sequence(0));
    }

    #[test]
    fn test_hop_sequence_range() {
        let gold = gold_sequence(10);
        assert!(hop_sequence(&gold, 1).iter().all(|&h| h == 0));

        let two = hop_sequence(&gold, 2);
        assert_eq!(two.len(), 10240);
        assert!(two.iter().all(|&h| h < 2));

        // With four subbands consecutive hops never stay in the same subband
        let four = hop_sequence(&gold, 4);
        assert!(four.iter().all(|&h| h < 4));
        assert!(four.windows(2).all(|w| w[0] != w[1]));
    }
}
