use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;

use lte_sl_config::{CfgCampaign, SharedConfig};
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{Campaign, Imsi, L2Id, RelayRole, Sap, ServiceCode};
use lte_sl_saps::trace::{TraceDiscoversAllRelays, TraceRemoteConnectionEstablished, TraceRemoteConnectionStart};
use lte_sl_saps::ue_ctrl::UeO2oRejectReason;
use lte_sl_saps::{SapMsg, SapMsgInner};

use crate::controller::basic_ue_controller::BasicUeController;
use crate::controller::ue_ctrl_sap::{UeCtrlSapProvider, dispatch_ue_ctrl};
use crate::{MessageQueue, SlEntityTrait};

const DISCOVERY_ONLY: &str = "This controller should not initiate relay communication when running the Discovery Campaign";

/// Relay controller for measurement campaigns. Discovery only records when
/// relays are heard. Connection takes the first discovered relay and measures
/// how long the link takes to come up. Communication behaves like the basic
/// controller but always takes the first relay.
pub struct CampaignUeController {
    inner: BasicUeController,
    campaign: CfgCampaign,
    l2_id: L2Id,
    /// First time each relay was discovered
    discovered: BTreeMap<L2Id, Duration>,
    connection_count: u32,
    have_connected: bool,
    remote_started_connection_time: Duration,
    now: Duration,
}

impl CampaignUeController {
    pub fn new(config: SharedConfig) -> Self {
        let cfg = config.config();
        let campaign = cfg.controller.campaign.clone().unwrap_or_default();
        tracing::info!("Relay controller running the {} campaign", campaign.campaign);
        Self {
            inner: BasicUeController::new(config),
            campaign,
            l2_id: cfg.ue.l2_id,
            discovered: BTreeMap::new(),
            connection_count: 0,
            have_connected: false,
            remote_started_connection_time: Duration::ZERO,
            now: Duration::ZERO,
        }
    }

    pub fn campaign(&self) -> Campaign {
        self.campaign.campaign
    }

    pub fn discovered_relays(&self) -> &BTreeMap<L2Id, Duration> {
        &self.discovered
    }

    pub fn connection_count(&self) -> u32 {
        self.connection_count
    }

    pub fn have_connected(&self) -> bool {
        self.have_connected
    }

    pub fn inner(&self) -> &BasicUeController {
        &self.inner
    }

    fn is_discovery(&self) -> bool {
        self.campaign.campaign == Campaign::Discovery
    }

    fn is_connection(&self) -> bool {
        self.campaign.campaign == Campaign::Connection
    }

    fn push_trace(&self, queue: &mut MessageQueue, msg: SapMsgInner) {
        tracing::debug!("-> {}", msg);
        queue.push_back(SapMsg::new(Sap::Trace, SlEntity::UeController, SlEntity::Monitor, self.now, msg));
    }

    /// Discovery periods elapsed since the relay service started, rounded up
    fn disc_periods(&self, elapsed: Duration) -> u32 {
        let period = u128::from(self.campaign.disc_period_ms.max(1));
        elapsed.as_millis().div_ceil(period) as u32
    }
}

impl UeCtrlSapProvider for CampaignUeController {
    fn recv_relay_service_discovery(&mut self, queue: &mut MessageQueue, service_code: ServiceCode, _announcer_info: u64, relay_ue_id: L2Id, _status_indicator: u8) {
        if !self.is_discovery() {
            return;
        }
        if self.discovered.contains_key(&relay_ue_id) {
            tracing::info!("Already know this Relay UE");
            return;
        }
        self.discovered.insert(relay_ue_id, self.now);

        let discovery_time = self.now.saturating_sub(self.campaign.start_relay_service_time);
        let n_disc_periods = self.disc_periods(discovery_time);
        let all_discovered = self.discovered.len() == self.campaign.n_relays_to_discover as usize;
        tracing::info!(
            "UE L2Id {:#08x} discovered relay {:#08x} for SC {}, {} discovered after {:?} ({} periods), all discovered: {}",
            self.l2_id, relay_ue_id, service_code, self.discovered.len(), discovery_time, n_disc_periods, all_discovered
        );

        if all_discovered {
            let trace = TraceDiscoversAllRelays { self_l2: self.l2_id, relay_ue_id, discovery_time, n_disc_periods };
            self.push_trace(queue, SapMsgInner::TraceDiscoversAllRelays(trace));
        }
    }

    fn pc5_connection_started(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        if self.is_discovery() {
            return;
        }
        self.inner.pc5_connection_started(queue, peer_ue_id, self_ue_id, role);
    }

    fn pc5_secured_established(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        if self.is_discovery() {
            tracing::error!("{}", DISCOVERY_ONLY);
            return;
        }

        let new_link = !self.inner.devices().contains(peer_ue_id);
        if new_link && self.is_connection() && role == RelayRole::RemoteUe {
            self.have_connected = true;
            let connection_time = self.now.saturating_sub(self.remote_started_connection_time);
            tracing::debug!("self {:#08x} peer {:#08x} attempt {} connection time {:?}", self_ue_id, peer_ue_id, self.connection_count, connection_time);
            let trace = TraceRemoteConnectionEstablished {
                self_l2: self_ue_id,
                relay_ue_id: peer_ue_id,
                attempt: self.connection_count,
                connection_time,
            };
            self.push_trace(queue, SapMsgInner::TraceRemoteConnectionEstablished(trace));
        }
        self.inner.pc5_secured_established(queue, peer_ue_id, self_ue_id, role);
    }

    fn pc5_connection_terminated(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        if self.is_discovery() {
            tracing::error!("{}", DISCOVERY_ONLY);
            return;
        }
        self.inner.pc5_connection_terminated(queue, peer_ue_id, self_ue_id, role);
    }

    fn pc5_connection_aborted(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole, reason: UeO2oRejectReason) {
        if self.is_discovery() {
            tracing::error!("{}", DISCOVERY_ONLY);
            return;
        }
        self.inner.pc5_connection_aborted(queue, peer_ue_id, self_ue_id, role, reason);
    }

    fn recv_remote_ue_report(&mut self, queue: &mut MessageQueue, local_imsi: Imsi, peer_ue_id: L2Id, remote_imsi: Imsi) {
        if self.is_discovery() {
            tracing::error!("{}", DISCOVERY_ONLY);
            return;
        }
        self.inner.recv_remote_ue_report(queue, local_imsi, peer_ue_id, remote_imsi);
    }

    fn relay_ue_selection(&mut self, queue: &mut MessageQueue, candidates: &BTreeMap<u64, f64>, _service_code: ServiceCode, current_relay_id: u64) -> u64 {
        if self.is_discovery() {
            return current_relay_id;
        }
        if self.is_connection() && (self.have_connected || self.connection_count >= self.campaign.max_connection_attempts) {
            return current_relay_id;
        }
        if current_relay_id != 0 {
            return current_relay_id;
        }

        tracing::info!("{} valid Relay UEs", candidates.len());
        let Some(&first) = candidates.keys().next() else {
            return 0;
        };
        let draw: f64 = self.inner.rng().random_range(0.0..100.0);
        if draw >= self.campaign.relay_disc_prob {
            tracing::debug!("Relay {} not considered this time ({:.1} >= {})", first, draw, self.campaign.relay_disc_prob);
            return 0;
        }

        if self.is_connection() {
            self.remote_started_connection_time = self.now;
            self.connection_count += 1;
            let trace = TraceRemoteConnectionStart { self_l2: self.l2_id, relay_ue_id: first, attempt: self.connection_count };
            self.push_trace(queue, SapMsgInner::TraceRemoteConnectionStart(trace));
        }
        tracing::info!("Current Relay ID {} Selected Relay ID {}", current_relay_id, first);
        first
    }
}

impl SlEntityTrait for CampaignUeController {
    fn entity(&self) -> SlEntity {
        SlEntity::UeController
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?}", message);
        self.now = message.time;
        self.inner.set_now(message.time);
        dispatch_ue_ctrl(self, queue, message);
    }
}
