use crate::enums::sl_cp_len::SlCpLen;
use crate::enums::sl_period_comm::SlPeriodComm;

use super::{SlHoppingConfigComm, SlTfResourceConfig, SlTrptSubset, SlTxParameters};

/// Data resources of a pool from which UEs pick their own grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlUeSelectedResourceConfig {
    pub data_tf_resource_config: SlTfResourceConfig,
    /// Absent means all repetition counts are allowed
    pub trpt_subset: Option<SlTrptSubset>,
}

/// Control and data power control parameters of a transmission pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlCommTxParameters {
    pub sc_tx_parameters: SlTxParameters,
    pub data_tx_parameters: SlTxParameters,
}

/// SL-CommResourcePool-r12
///
/// With the optional blocks modelled as `Option`, derived equality compares
/// a block only when both sides carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlCommResourcePool {
    pub sc_cp_len: SlCpLen,
    pub sc_period: SlPeriodComm,
    pub sc_tf_resource_config: SlTfResourceConfig,
    pub data_cp_len: SlCpLen,
    pub data_hopping_config: SlHoppingConfigComm,
    /// Present for UE selected pools, absent for scheduled pools
    pub ue_selected_resource_config: Option<SlUeSelectedResourceConfig>,
    /// Mandatory for transmission pools
    pub tx_parameters: Option<SlCommTxParameters>,
}

impl SlCommResourcePool {
    pub fn is_ue_selected(&self) -> bool {
        self.ue_selected_resource_config.is_some()
    }
}

/// SL-CommConfig scheduled block: resources granted by the eNodeB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlCommConfigScheduled {
    pub crnti: u16,
    pub mac_main_config: super::SlMacMainConfigSl,
    pub comm_tx_config: SlCommResourcePool,
    /// 0..=28
    pub mcs: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlSubframeBitmap;

    fn pool() -> SlCommResourcePool {
        SlCommResourcePool {
            sc_tf_resource_config: SlTfResourceConfig {
                prb_num: 1,
                prb_start: 10,
                prb_end: 40,
                offset: 80,
                subframe_bitmap: SlSubframeBitmap::from_value(0x3),
            },
            ue_selected_resource_config: Some(SlUeSelectedResourceConfig::default()),
            tx_parameters: Some(SlCommTxParameters::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_equality_compares_present_blocks() {
        let a = pool();
        let mut b = pool();
        assert_eq!(a, b);

        b.ue_selected_resource_config = Some(SlUeSelectedResourceConfig {
            trpt_subset: Some(SlTrptSubset::from_value(0x1)),
            ..Default::default()
        });
        assert_ne!(a, b);

        let mut c = pool();
        c.tx_parameters = None;
        assert_ne!(a, c);
    }
}
