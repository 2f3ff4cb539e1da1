use crate::enums::sl_cp_len::SlCpLen;
use crate::enums::sl_period_disc::SlPeriodDisc;
use crate::enums::sl_tx_probability::SlTxProbability;

use super::{SlTfResourceConfig, SlTxParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlPreconfigDiscTxParameters {
    pub tx_parameters_general: SlTxParameters,
    pub tx_probability: SlTxProbability,
}

/// SL-PreconfigDiscPool-r12, used out of coverage. Always UE selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlPreconfigDiscPool {
    pub cp_len: SlCpLen,
    pub disc_period: SlPeriodDisc,
    pub num_retx: u8,
    pub num_repetition: u32,
    pub tf_resource_config: SlTfResourceConfig,
    pub tx_parameters: SlPreconfigDiscTxParameters,
}

impl Default for SlPreconfigDiscPool {
    fn default() -> Self {
        Self {
            cp_len: SlCpLen::Normal,
            disc_period: SlPeriodDisc::Rf32,
            num_retx: 0,
            num_repetition: 1,
            tf_resource_config: SlTfResourceConfig::default(),
            tx_parameters: SlPreconfigDiscTxParameters::default(),
        }
    }
}
