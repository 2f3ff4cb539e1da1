use crate::enums::sl_cp_len::SlCpLen;
use crate::enums::sl_period_comm::SlPeriodComm;

use super::{SlHoppingConfigComm, SlTfResourceConfig, SlTrptSubset, SlTxParameters};

/// SL-PreconfigCommPool-r12, used out of coverage. Always UE selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlPreconfigCommPool {
    pub sc_cp_len: SlCpLen,
    pub sc_period: SlPeriodComm,
    pub sc_tf_resource_config: SlTfResourceConfig,
    pub sc_tx_parameters: SlTxParameters,
    pub data_cp_len: SlCpLen,
    pub data_hopping_config: SlHoppingConfigComm,
    pub data_tf_resource_config: SlTfResourceConfig,
    pub trpt_subset: SlTrptSubset,
    pub data_tx_parameters: SlTxParameters,
}
