use crate::enums::sl_cp_len::SlCpLen;
use crate::enums::sl_period_disc::SlPeriodDisc;
use crate::enums::sl_pool_selection::SlPoolSelection;
use crate::enums::sl_tdd_config::{SpecialSubframePatterns, SubframeAssignment};
use crate::enums::sl_tx_probability::SlTxProbability;

use super::{SlTfResourceConfig, SlTxParameters};

/// RSRP thresholds (RSRP-RangeSL, 0..=7) for RSRP based pool selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlPoolSelectionRsrpBased {
    pub thresh_low: u8,
    pub thresh_high: u8,
}

impl Default for SlPoolSelectionRsrpBased {
    fn default() -> Self {
        Self { thresh_low: 0, thresh_high: 7 }
    }
}

/// Maps an RSRP-RangeSL value onto dBm. 0 is minus infinity and 7 plus infinity.
pub fn rsrp_value_dbm(range: u8) -> f64 {
    match range {
        0 => f64::NEG_INFINITY,
        1..=6 => -110.0 + f64::from(range - 1) * 10.0,
        7 => f64::INFINITY,
        _ => panic!("Invalid RSRP range value {}", range),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlDiscUeSelectedResourceConfig {
    pub pool_selection: SlPoolSelection,
    /// Present when pool selection is RSRP based
    pub pool_selection_rsrp_based: Option<SlPoolSelectionRsrpBased>,
    pub tx_probability: SlTxProbability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlDiscTxParameters {
    pub tx_parameters_general: SlTxParameters,
    pub ue_selected_resource_config: SlDiscUeSelectedResourceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlTddConfig {
    pub subframe_assignment: SubframeAssignment,
    pub special_subframe_patterns: SpecialSubframePatterns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlDiscRxParameters {
    pub tdd_config: SlTddConfig,
    /// 0..=15
    pub sync_config_index: u32,
}

/// SL-DiscResourcePool-r12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlDiscResourcePool {
    pub cp_len: SlCpLen,
    pub disc_period: SlPeriodDisc,
    /// Retransmissions per discovery message, 0..=3
    pub num_retx: u8,
    /// Repetitions of the subframe bitmap within a period, 1..=50
    pub num_repetition: u32,
    pub tf_resource_config: SlTfResourceConfig,
    /// Present for UE selected pools
    pub tx_parameters: Option<SlDiscTxParameters>,
    pub rx_parameters: Option<SlDiscRxParameters>,
}

impl Default for SlDiscResourcePool {
    fn default() -> Self {
        Self {
            cp_len: SlCpLen::Normal,
            disc_period: SlPeriodDisc::Rf32,
            num_retx: 0,
            num_repetition: 1,
            tf_resource_config: SlTfResourceConfig::default(),
            tx_parameters: None,
            rx_parameters: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsrp_value_dbm() {
        assert_eq!(rsrp_value_dbm(0), f64::NEG_INFINITY);
        assert_eq!(rsrp_value_dbm(1), -110.0);
        assert_eq!(rsrp_value_dbm(4), -80.0);
        assert_eq!(rsrp_value_dbm(6), -60.0);
        assert_eq!(rsrp_value_dbm(7), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "Invalid RSRP range value 8")]
    fn test_rsrp_value_dbm_out_of_range() {
        rsrp_value_dbm(8);
    }
}
