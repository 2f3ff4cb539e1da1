use crate::enums::sl_hopping_disc_c::SlHoppingDiscC;

use super::SlDiscResourcePool;

/// Starting subframe and PRB of a scheduled discovery resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlTfIndexPair {
    /// 1..=200
    pub disc_sf_index: u32,
    /// 1..=50
    pub disc_prb_index: u32,
}

pub type SlTfIndexPairList = Vec<SlTfIndexPair>;

/// SL-HoppingConfigDisc-r12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlHoppingConfigDisc {
    /// Per cell parameter, 1..=200
    pub a: u32,
    /// Per UE parameter, 1..=10
    pub b: u32,
    pub c: SlHoppingDiscC,
}

/// Discovery resources assigned by the eNodeB
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlDiscConfigScheduled {
    pub disc_tx_config: SlDiscResourcePool,
    pub disc_tf_index_list: SlTfIndexPairList,
    pub disc_hopping_config: SlHoppingConfigDisc,
}
