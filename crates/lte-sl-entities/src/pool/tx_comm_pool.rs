use std::ops::Deref;

use lte_sl_rrc::{SlCommResourcePool, SlMacMainConfigSl, SlPreconfigCommPool, SlTxParameters};

use super::comm_pool::SidelinkCommResourcePool;

/// Communication pool used for transmission, with the parameters granted by
/// the eNodeB (scheduled) or the pool identity picked by the UE (UE selected)
#[derive(Debug, Clone, Default)]
pub struct SidelinkTxCommResourcePool {
    pool: SidelinkCommResourcePool,
    sc_tx_parameters: SlTxParameters,
    data_tx_parameters: SlTxParameters,
    pool_identity: u8,

    // Scheduled
    slrnti: u16,
    mac_main_config: SlMacMainConfigSl,
    comm_tx_config: SlCommResourcePool,
    index: u8,
    mcs: u8,
    have_mcs: bool,
}

impl Deref for SidelinkTxCommResourcePool {
    type Target = SidelinkCommResourcePool;

    fn deref(&self) -> &SidelinkCommResourcePool {
        &self.pool
    }
}

impl SidelinkTxCommResourcePool {
    pub fn from_ie(ie: &SlCommResourcePool) -> Self {
        let mut p = Self::default();
        p.set_pool(ie);
        p
    }

    pub fn from_preconfig(ie: &SlPreconfigCommPool) -> Self {
        let mut p = Self::default();
        p.set_preconfig_pool(ie);
        p
    }

    /// UE selected transmission pools must carry Tx parameters
    pub fn set_pool(&mut self, ie: &SlCommResourcePool) {
        self.pool.set_pool(ie);
        self.index = 0;
        self.mcs = 0;
        if self.pool.is_ue_selected() {
            let Some(tx) = ie.tx_parameters else {
                panic!("UE selected transmission pool without Tx parameters");
            };
            self.sc_tx_parameters = tx.sc_tx_parameters;
            self.data_tx_parameters = tx.data_tx_parameters;
        }
    }

    pub fn set_preconfig_pool(&mut self, ie: &SlPreconfigCommPool) {
        self.pool.set_preconfig_pool(ie);
        self.index = 0;
        self.mcs = 0;
        self.sc_tx_parameters = ie.sc_tx_parameters;
        self.data_tx_parameters = ie.data_tx_parameters;
    }

    pub fn set_scheduled_tx_parameters(&mut self, slrnti: u16, mac_main_config: SlMacMainConfigSl, comm_tx_config: SlCommResourcePool, index: u8) {
        self.slrnti = slrnti;
        self.mac_main_config = mac_main_config;
        self.comm_tx_config = comm_tx_config;
        self.index = index;
    }

    /// Same as [`Self::set_scheduled_tx_parameters`] with an MCS imposed by the eNodeB
    pub fn set_scheduled_tx_parameters_with_mcs(&mut self, slrnti: u16, mac_main_config: SlMacMainConfigSl, comm_tx_config: SlCommResourcePool, index: u8, mcs: u8) {
        self.set_scheduled_tx_parameters(slrnti, mac_main_config, comm_tx_config, index);
        self.mcs = mcs;
        self.have_mcs = true;
    }

    pub fn set_ue_selected_tx_parameters(&mut self, identity: u8) {
        self.pool_identity = identity;
    }

    pub fn pool(&self) -> &SidelinkCommResourcePool {
        &self.pool
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn mcs(&self) -> u8 {
        self.mcs
    }

    pub fn have_mcs(&self) -> bool {
        self.have_mcs
    }

    pub fn pool_identity(&self) -> u8 {
        self.pool_identity
    }

    pub fn slrnti(&self) -> u16 {
        self.slrnti
    }

    pub fn mac_main_config(&self) -> SlMacMainConfigSl {
        self.mac_main_config
    }

    pub fn comm_tx_config(&self) -> &SlCommResourcePool {
        &self.comm_tx_config
    }

    pub fn sc_tx_parameters(&self) -> SlTxParameters {
        self.sc_tx_parameters
    }

    pub fn data_tx_parameters(&self) -> SlTxParameters {
        self.data_tx_parameters
    }
}

/// The MCS only takes part when imposed
impl PartialEq for SidelinkTxCommResourcePool {
    fn eq(&self, rhs: &Self) -> bool {
        let equal = self.sc_tx_parameters == rhs.sc_tx_parameters
            && self.data_tx_parameters == rhs.data_tx_parameters
            && self.pool_identity == rhs.pool_identity
            && self.slrnti == rhs.slrnti
            && self.mac_main_config == rhs.mac_main_config
            && self.comm_tx_config == rhs.comm_tx_config
            && self.index == rhs.index
            && self.have_mcs == rhs.have_mcs;
        equal && (!self.have_mcs || self.mcs == rhs.mcs)
    }
}
