use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use lte_sl_core::{BearerId, Campaign, Imsi, L2Id, RelayRole, RelayUeSelectionAlgorithm};

use crate::stack_config_pool::{CfgCommPool, CfgDiscPool};

/// Identity of the simulated UE
#[derive(Debug, Clone)]
pub struct CfgUe {
    pub imsi: Imsi,
    /// 24 bits, sidelink source layer 2 id
    pub l2_id: L2Id,
    /// Relay role this UE takes in scripted runs. None for plain sidelink UEs.
    pub role: Option<RelayRole>,
}

/// CAMAD 2019 measurement campaign settings
#[derive(Debug, Clone)]
pub struct CfgCampaign {
    pub campaign: Campaign,
    /// Percent chance that a discovered relay is considered for connection
    pub relay_disc_prob: f64,
    pub max_connection_attempts: u32,
    pub start_relay_service_time: Duration,
    /// Discovery period in ms, used to count the periods needed to discover
    pub disc_period_ms: u32,
    pub n_relays_to_discover: u32,
}

impl Default for CfgCampaign {
    fn default() -> Self {
        Self {
            campaign: Campaign::Discovery,
            relay_disc_prob: 100.0,
            max_connection_attempts: 1,
            start_relay_service_time: Duration::ZERO,
            disc_period_ms: 320,
            n_relays_to_discover: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CfgController {
    pub algorithm: RelayUeSelectionAlgorithm,
    /// Seed for the random relay selection. None seeds from the OS.
    pub rng_seed: Option<u64>,
    /// When set, the campaign controller replaces the basic one
    pub campaign: Option<CfgCampaign>,
}

#[derive(Debug, Clone, Default)]
pub struct CfgNas {
    /// Own address, used by a relay UE to tell relayed traffic from local traffic
    pub self_addr: Option<IpAddr>,
    /// Uplink data radio bearer carrying relayed traffic
    pub relay_drb_id: BearerId,
}

#[derive(Debug, Clone)]
pub struct SlStackConfig {
    pub debug_log: Option<String>,

    pub ue: CfgUe,

    pub comm_pool: Option<CfgCommPool>,
    pub preconfig_comm_pool: Option<CfgCommPool>,
    pub disc_pool: Option<CfgDiscPool>,
    pub preconfig_disc_pool: Option<CfgDiscPool>,

    pub controller: CfgController,
    pub nas: CfgNas,
}

impl SlStackConfig {
    pub fn new(imsi: Imsi, l2_id: L2Id) -> Self {
        SlStackConfig {
            debug_log: None,
            ue: CfgUe { imsi, l2_id, role: None },
            comm_pool: None,
            preconfig_comm_pool: None,
            disc_pool: None,
            preconfig_disc_pool: None,
            controller: CfgController::default(),
            nas: CfgNas::default(),
        }
    }

    /// Validate that all required configuration fields are properly set.
    /// Pool fields are checked by the pool factories when the pools are built.
    pub fn validate(&self) -> Result<(), &str> {
        if self.ue.l2_id == 0 || self.ue.l2_id > 0x00FF_FFFF {
            return Err("ue l2_id must be a nonzero 24 bit value");
        }

        if let Some(ref c) = self.controller.campaign {
            if !(0.0..=100.0).contains(&c.relay_disc_prob) {
                return Err("controller relay_disc_prob must be within 0..=100");
            }
            if c.max_connection_attempts == 0 {
                return Err("controller max_connection_attempts must be at least 1");
            }
            if c.campaign == Campaign::Discovery && c.disc_period_ms == 0 {
                return Err("controller disc_period_ms must be nonzero for the Discovery campaign");
            }
        }

        if self.ue.role == Some(RelayRole::RelayUe) && self.nas.relay_drb_id == 0 {
            return Err("nas relay_drb_id must be set for a relay UE");
        }

        Ok(())
    }
}

/// Global shared configuration, immutable after construction
#[derive(Debug, Clone)]
pub struct SharedConfig {
    cfg: Arc<SlStackConfig>,
}

impl SharedConfig {
    pub fn new(imsi: Imsi, l2_id: L2Id) -> Self {
        Self::from_config(SlStackConfig::new(imsi, l2_id))
    }

    pub fn from_config(cfg: SlStackConfig) -> Self {
        // Check config for validity before returning the SharedConfig object
        match cfg.validate() {
            Ok(_) => {}
            Err(e) => panic!("Invalid stack configuration: {}", e),
        }

        Self { cfg: Arc::new(cfg) }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<SlStackConfig> {
        Arc::clone(&self.cfg)
    }
}
