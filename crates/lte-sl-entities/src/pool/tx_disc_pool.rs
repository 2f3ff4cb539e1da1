use std::ops::Deref;

use lte_sl_rrc::enums::sl_pool_selection::SlPoolSelection;
use lte_sl_rrc::enums::sl_tx_probability::{SlTxProbability, tx_probability_as_int, tx_probability_from_int};
use lte_sl_rrc::{SlDiscResourcePool, SlHoppingConfigDisc, SlPoolSelectionRsrpBased, SlPreconfigDiscPool, SlTfIndexPairList, SlTxParameters};

use super::disc_pool::{DiscPoolType, SidelinkDiscResourcePool};

/// Discovery pool used for announcing
#[derive(Debug, Clone, Default)]
pub struct SidelinkTxDiscResourcePool {
    pool: SidelinkDiscResourcePool,
    tx_parameters_general: SlTxParameters,
    tx_probability: SlTxProbability,
    pool_selection: SlPoolSelection,
    rsrp_based: Option<SlPoolSelectionRsrpBased>,
    pool_identity: u8,

    // Scheduled
    disc_tx_config: SlDiscResourcePool,
    tf_index_list: SlTfIndexPairList,
    hopping_config: SlHoppingConfigDisc,
}

impl Deref for SidelinkTxDiscResourcePool {
    type Target = SidelinkDiscResourcePool;

    fn deref(&self) -> &SidelinkDiscResourcePool {
        &self.pool
    }
}

impl SidelinkTxDiscResourcePool {
    pub fn from_ie(ie: &SlDiscResourcePool) -> Self {
        let mut p = Self::default();
        p.set_pool(ie);
        p
    }

    pub fn from_preconfig(ie: &SlPreconfigDiscPool) -> Self {
        let mut p = Self::default();
        p.set_preconfig_pool(ie);
        p
    }

    pub fn set_pool(&mut self, ie: &SlDiscResourcePool) {
        self.pool.set_pool(ie);
        if self.pool.pool_type() == DiscPoolType::UeSelected {
            let Some(tx) = ie.tx_parameters else {
                panic!("UE selected discovery pool without Tx parameters");
            };
            let ue_selected = tx.ue_selected_resource_config;
            self.tx_parameters_general = tx.tx_parameters_general;
            self.tx_probability = ue_selected.tx_probability;
            self.pool_selection = ue_selected.pool_selection;
            self.rsrp_based = ue_selected.pool_selection_rsrp_based;
        }
    }

    pub fn set_preconfig_pool(&mut self, ie: &SlPreconfigDiscPool) {
        self.pool.set_preconfig_pool(ie);
        self.tx_parameters_general = ie.tx_parameters.tx_parameters_general;
        self.tx_probability = ie.tx_parameters.tx_probability;
    }

    pub fn set_scheduled_tx_parameters(&mut self, disc_tx_config: SlDiscResourcePool, tf_index_list: SlTfIndexPairList, hopping_config: SlHoppingConfigDisc) {
        tracing::debug!("scheduled discovery parameters: {} tf index pairs", tf_index_list.len());
        self.disc_tx_config = disc_tx_config;
        self.tf_index_list = tf_index_list;
        self.hopping_config = hopping_config;
    }

    pub fn set_ue_selected_tx_parameters(&mut self, identity: u8) {
        self.pool_identity = identity;
    }

    /// Transmission probability in percent
    pub fn tx_probability(&self) -> u32 {
        tx_probability_as_int(self.tx_probability)
    }

    /// Accepts 25, 50, 75 or 100 percent
    pub fn set_tx_probability(&mut self, theta: u32) {
        self.tx_probability = tx_probability_from_int(theta);
    }

    pub fn pool(&self) -> &SidelinkDiscResourcePool {
        &self.pool
    }

    pub fn pool_identity(&self) -> u8 {
        self.pool_identity
    }

    pub fn pool_selection(&self) -> SlPoolSelection {
        self.pool_selection
    }

    pub fn rsrp_thresholds(&self) -> Option<SlPoolSelectionRsrpBased> {
        self.rsrp_based
    }

    pub fn tx_parameters_general(&self) -> SlTxParameters {
        self.tx_parameters_general
    }

    pub fn disc_tx_config(&self) -> &SlDiscResourcePool {
        &self.disc_tx_config
    }

    pub fn tf_index_list(&self) -> &SlTfIndexPairList {
        &self.tf_index_list
    }

    pub fn hopping_config(&self) -> SlHoppingConfigDisc {
        self.hopping_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_rrc::SlTfIndexPair;
    use lte_sl_rrc::factory::{SlDiscPoolFactory, SlPreconfigDiscPoolFactory};

    #[test]
    fn test_ue_selected_copies_selection() {
        let mut f = SlDiscPoolFactory::new();
        f.set_disc_tx_probability("p50");
        f.set_rsrp_thresh_low(2);
        f.set_rsrp_thresh_high(5);
        let pool = SidelinkTxDiscResourcePool::from_ie(&f.create_pool());
        assert_eq!(pool.tx_probability(), 50);
        assert_eq!(pool.pool_selection(), SlPoolSelection::RsrpBased);
        assert_eq!(pool.rsrp_thresholds(), Some(SlPoolSelectionRsrpBased { thresh_low: 2, thresh_high: 5 }));
        assert_eq!(pool.n_psdch(), pool.pool().n_psdch());
    }

    #[test]
    fn test_set_tx_probability() {
        let mut pool = SidelinkTxDiscResourcePool::from_ie(&SlDiscPoolFactory::new().create_pool());
        assert_eq!(pool.tx_probability(), 100);
        pool.set_tx_probability(25);
        assert_eq!(pool.tx_probability(), 25);
    }

    #[test]
    #[should_panic(expected = "Invalid probability value")]
    fn test_invalid_tx_probability_is_fatal() {
        let mut pool = SidelinkTxDiscResourcePool::from_ie(&SlDiscPoolFactory::new().create_pool());
        pool.set_tx_probability(30);
    }

    #[test]
    fn test_scheduled_parameters() {
        let mut f = SlDiscPoolFactory::new();
        f.set_have_tx_parameters(false);
        let ie = f.create_pool();
        let mut pool = SidelinkTxDiscResourcePool::from_ie(&ie);
        assert_eq!(pool.pool_type(), DiscPoolType::Scheduled);
        let list = vec![SlTfIndexPair { disc_sf_index: 1, disc_prb_index: 3 }];
        pool.set_scheduled_tx_parameters(ie, list.clone(), SlHoppingConfigDisc::default());
        assert_eq!(pool.tf_index_list(), &list);
    }

    #[test]
    fn test_preconfigured_pool() {
        let mut pool = SidelinkTxDiscResourcePool::from_preconfig(&SlPreconfigDiscPoolFactory::new().create_pool());
        assert!(pool.is_preconfigured());
        assert_eq!(pool.pool_type(), DiscPoolType::UeSelected);
        pool.set_ue_selected_tx_parameters(1);
        assert_eq!(pool.pool_identity(), 1);
    }
}
