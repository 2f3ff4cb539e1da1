use std::collections::BTreeMap;

use lte_sl_core::RelayUeSelectionAlgorithm;
use rand::Rng;

/// Candidate with the strongest SD-RSRP, 0 when there is none.
/// Ties keep the lowest relay id.
pub fn max_sdrsrp(candidates: &BTreeMap<u64, f64>) -> u64 {
    let mut best_id = 0;
    let mut best = f64::NEG_INFINITY;
    for (&id, &rsrp) in candidates {
        tracing::debug!("  Relay UE ID {} SD-RSRP {}", id, rsrp);
        if rsrp > best {
            best_id = id;
            best = rsrp;
        }
    }
    best_id
}

/// Evaluates relay (re)selection. Returns the relay to use, which is
/// `current` when nothing changes.
pub fn select_relay<R: Rng>(algorithm: RelayUeSelectionAlgorithm, candidates: &BTreeMap<u64, f64>, current: u64, rng: &mut R) -> u64 {
    tracing::debug!("Selection algorithm: {}, {} valid Relay UEs", algorithm, candidates.len());
    let selected = match algorithm {
        RelayUeSelectionAlgorithm::RandomNoReselection => {
            if current != 0 || candidates.is_empty() {
                return current;
            }
            let pos = rng.random_range(0..candidates.len());
            candidates.keys().nth(pos).copied().unwrap_or(0)
        }
        RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection => {
            if current != 0 || candidates.is_empty() {
                return current;
            }
            max_sdrsrp(candidates)
        }
        RelayUeSelectionAlgorithm::MaxSdrsrp => {
            if candidates.is_empty() {
                tracing::debug!("No valid Relay UEs available.");
                return 0;
            }
            max_sdrsrp(candidates)
        }
    };
    assert!(selected != 0, "Unable to find a valid Relay UE ID");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidates() -> BTreeMap<u64, f64> {
        BTreeMap::from([(5, -90.0), (7, -70.0), (9, -70.0), (11, -100.0)])
    }

    #[test]
    fn test_max_sdrsrp_strict() {
        assert_eq!(max_sdrsrp(&candidates()), 7);
        assert_eq!(max_sdrsrp(&BTreeMap::new()), 0);
    }

    #[test]
    fn test_no_reselection_keeps_current() {
        let mut rng = StdRng::seed_from_u64(1);
        for alg in [RelayUeSelectionAlgorithm::RandomNoReselection, RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection] {
            assert_eq!(select_relay(alg, &candidates(), 11, &mut rng), 11);
            assert_eq!(select_relay(alg, &BTreeMap::new(), 0, &mut rng), 0);
        }
        assert_eq!(select_relay(RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection, &candidates(), 0, &mut rng), 7);
    }

    #[test]
    fn test_max_sdrsrp_always_reselects() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_relay(RelayUeSelectionAlgorithm::MaxSdrsrp, &candidates(), 11, &mut rng), 7);
        assert_eq!(select_relay(RelayUeSelectionAlgorithm::MaxSdrsrp, &BTreeMap::new(), 11, &mut rng), 0);
    }

    #[test]
    fn test_random_picks_a_candidate() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = candidates();
        for _ in 0..20 {
            let id = select_relay(RelayUeSelectionAlgorithm::RandomNoReselection, &c, 0, &mut rng);
            assert!(c.contains_key(&id));
        }
    }

    #[test]
    #[should_panic(expected = "Unable to find a valid Relay UE ID")]
    fn test_zero_candidate_is_fatal() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = BTreeMap::from([(0, -80.0)]);
        select_relay(RelayUeSelectionAlgorithm::MaxSdrsrp, &c, 0, &mut rng);
    }
}
