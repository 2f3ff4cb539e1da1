use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use lte_sl_config::SharedConfig;
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{BearerId, IfIndex, Imsi, L2Id, RelayRole, Sap};
use lte_sl_saps::as_sap::*;
use lte_sl_saps::epc_tft::{EpcTft, EpcTftDirection, EpsBearer};
use lte_sl_saps::ip::IpForwardUpInd;
use lte_sl_saps::nas::{DirectLinkIpInfo, EpcUeNasState, NasConnectReq};
use lte_sl_saps::packet::IpPacket;
use lte_sl_saps::tft::{LteSlTft, SidelinkInfo, SlTftAddressType, SlTftDirection};
use lte_sl_saps::trace::{RelayLink, TraceNasStateTransition, TraceRelayRxPacket};
use lte_sl_saps::{SapMsg, SapMsgInner};

use crate::nas::tft_classifier::TftClassifier;
use crate::{MessageQueue, SlEntityTrait};

/// Highest EPS bearer id
const MAX_EPS_BEARERS: BearerId = 11;

#[derive(Debug, Clone)]
struct BearerToBeActivated {
    bearer: EpsBearer,
    tft: EpcTft,
}

/// EPC UE NAS with sidelink bearer bookkeeping and UE-to-Network relay
/// packet classification
pub struct EpcUeNas {
    config: SharedConfig,
    imsi: Imsi,
    state: EpcUeNasState,
    now: Duration,

    bid_counter: BearerId,
    tft_classifier: TftClassifier,
    bearers_to_be_activated: Vec<BearerToBeActivated>,
    bearers_for_reconnection: Vec<BearerToBeActivated>,

    pending_sl_bearers: Vec<Arc<LteSlTft>>,
    activated_sl_bearers: Vec<Arc<LteSlTft>>,
    forward_up: Vec<(Arc<LteSlTft>, IfIndex)>,

    /// Set on relay UEs once a remote UE link is configured
    relaying: bool,
    relay_drb_id: BearerId,
    self_addr: Option<IpAddr>,
}

impl EpcUeNas {
    pub fn new(config: SharedConfig) -> Self {
        let cfg = config.config();
        Self {
            imsi: cfg.ue.imsi,
            relay_drb_id: cfg.nas.relay_drb_id,
            self_addr: cfg.nas.self_addr,
            config,
            state: EpcUeNasState::Off,
            now: Duration::ZERO,
            bid_counter: 0,
            tft_classifier: TftClassifier::new(),
            bearers_to_be_activated: Vec::new(),
            bearers_for_reconnection: Vec::new(),
            pending_sl_bearers: Vec::new(),
            activated_sl_bearers: Vec::new(),
            forward_up: Vec::new(),
            relaying: false,
        }
    }

    pub fn state(&self) -> EpcUeNasState {
        self.state
    }

    pub fn is_relaying(&self) -> bool {
        self.relaying
    }

    pub fn activated_sidelink_bearers(&self) -> &[Arc<LteSlTft>] {
        &self.activated_sl_bearers
    }

    pub fn pending_sidelink_bearers(&self) -> &[Arc<LteSlTft>] {
        &self.pending_sl_bearers
    }

    /// TFTs selecting the device received packets are forwarded up to
    pub fn forward_up_tfts(&self) -> impl Iterator<Item = &LteSlTft> {
        self.forward_up.iter().map(|(tft, _)| tft.as_ref())
    }

    pub fn num_eps_bearers(&self) -> usize {
        self.tft_classifier.len()
    }

    fn as_req(&self, msg: SapMsgInner) -> SapMsg {
        SapMsg::new(Sap::AsSap, SlEntity::Nas, SlEntity::Rrc, self.now, msg)
    }

    pub fn connect(&mut self, queue: &mut MessageQueue) {
        tracing::debug!("-> AsConnectReq");
        queue.push_back(self.as_req(SapMsgInner::AsConnectReq(AsConnectReq {})));
    }

    pub fn disconnect(&mut self, queue: &mut MessageQueue) {
        self.switch_to_state(queue, EpcUeNasState::Off);
        queue.push_back(self.as_req(SapMsgInner::AsDisconnectReq(AsDisconnectReq {})));
    }

    pub fn activate_eps_bearer(&mut self, bearer: EpsBearer, tft: EpcTft) {
        match self.state {
            EpcUeNasState::Active => panic!(
                "the necessary NAS signaling to activate a bearer after the initial context has already been setup is not implemented"
            ),
            _ => {
                let btba = BearerToBeActivated { bearer, tft };
                self.bearers_to_be_activated.push(btba.clone());
                self.bearers_for_reconnection.push(btba);
            }
        }
    }

    fn do_activate_eps_bearer(&mut self, bearer: EpsBearer, tft: EpcTft) {
        assert!(self.bid_counter < MAX_EPS_BEARERS, "cannot have more than 11 EPS bearers");
        self.bid_counter += 1;
        tracing::debug!("activating EPS bearer {} qci {:?}", self.bid_counter, bearer.qci);
        self.tft_classifier.add(tft, self.bid_counter);
    }

    fn find_sidelink_bearer(list: &[Arc<LteSlTft>], local: IpAddr, remote: IpAddr) -> Option<&Arc<LteSlTft>> {
        list.iter().find(|tft| tft.matches(local, remote))
    }

    fn send_to_sidelink(&self, queue: &mut MessageQueue, dst_l2: L2Id, packet: IpPacket) {
        tracing::debug!("-> AsSendSidelinkDataReq l2 {:#08x} len {}", dst_l2, packet.len());
        queue.push_back(self.as_req(SapMsgInner::AsSendSidelinkDataReq(AsSendSidelinkDataReq { dst_l2, packet })));
    }

    fn send_to_bearer(&self, queue: &mut MessageQueue, bid: BearerId, packet: IpPacket) {
        tracing::debug!("-> AsSendDataReq bid {} len {}", bid, packet.len());
        queue.push_back(self.as_req(SapMsgInner::AsSendDataReq(AsSendDataReq { bid, packet })));
    }

    /// Sends an outgoing packet on a sidelink bearer or on the uplink.
    /// Returns false when the packet is dropped.
    pub fn send(&mut self, queue: &mut MessageQueue, packet: IpPacket) -> bool {
        match self.state {
            EpcUeNasState::Active => {
                if let Some(tft) = Self::find_sidelink_bearer(&self.activated_sl_bearers, packet.src, packet.dst) {
                    let l2 = tft.remote_l2_address();
                    self.send_to_sidelink(queue, l2, packet);
                    return true;
                }
                if Self::find_sidelink_bearer(&self.pending_sl_bearers, packet.src, packet.dst).is_some() {
                    tracing::warn!("Matching sidelink bearer still pending, discarding packet");
                    return false;
                }
                tracing::debug!("No sidelink bearer found. Use uplink");
                let bid = self.tft_classifier.classify(&packet, EpcTftDirection::Uplink);
                if bid == 0 {
                    return false;
                }
                self.send_to_bearer(queue, bid, packet);
                true
            }
            EpcUeNasState::Off => {
                if let Some(tft) = Self::find_sidelink_bearer(&self.activated_sl_bearers, packet.src, packet.dst) {
                    let l2 = tft.remote_l2_address();
                    self.send_to_sidelink(queue, l2, packet);
                    return true;
                }
                tracing::warn!("NAS neither OFF nor ACTIVE, or Sidelink bearer not found, discarding packet");
                false
            }
            _ => {
                tracing::warn!("NAS neither OFF nor ACTIVE, or Sidelink bearer not found, discarding packet");
                false
            }
        }
    }

    fn forward_up(&self, queue: &mut MessageQueue, target: Option<IfIndex>, packet: IpPacket) {
        tracing::debug!("-> IpForwardUpInd target {:?} {} -> {}", target, packet.src, packet.dst);
        let msg = SapMsg::new(Sap::IpSap, SlEntity::Nas, SlEntity::IpStack, self.now,
            SapMsgInner::IpForwardUpInd(IpForwardUpInd { target, packet }));
        queue.push_back(msg);
    }

    /// Delivers to the device whose forward-up TFT matches, else to the default device
    fn pass_up(&self, queue: &mut MessageQueue, packet: IpPacket) {
        let target = self.forward_up.iter()
            .find(|(tft, _)| tft.matches(packet.dst, packet.src))
            .map(|(_, target)| *target);
        if let Some(t) = target {
            tracing::info!("Forwarding packet from {} to {} on sidelink device {}", packet.src, packet.dst, t);
        }
        self.forward_up(queue, target, packet);
    }

    pub fn recv_data(&mut self, queue: &mut MessageQueue, packet: IpPacket) {
        if self.relaying {
            self.classify_recv_packet_for_u2n_relay(queue, packet);
        } else {
            self.pass_up(queue, packet);
        }
    }

    fn trace_relay(&self, queue: &mut MessageQueue, packet: &IpPacket, src_link: RelayLink, dst_link: RelayLink) {
        let Some(node_addr) = self.self_addr else {
            return;
        };
        tracing::debug!("relaying {} -> {} {}->{}", packet.src, packet.dst, src_link, dst_link);
        let trace = TraceRelayRxPacket {
            node_addr,
            src: packet.src,
            dst: packet.dst,
            src_link,
            dst_link,
            len: packet.len(),
        };
        queue.push_back(SapMsg::new(Sap::Trace, SlEntity::Nas, SlEntity::Monitor, self.now,
            SapMsgInner::TraceRelayRxPacket(trace)));
    }

    /// Routes a packet received by a relay UE between the sidelink and the network
    pub fn classify_recv_packet_for_u2n_relay(&mut self, queue: &mut MessageQueue, packet: IpPacket) {
        // Addressed to the relay itself, even when it sits inside a relayed prefix
        if self.self_addr == Some(packet.dst) {
            self.pass_up(queue, packet);
            return;
        }

        // Towards a remote UE
        if let Some(tft) = self.activated_sl_bearers.iter().find(|t| t.matches(packet.src, packet.dst)) {
            let l2 = tft.remote_l2_address();
            self.trace_relay(queue, &packet, RelayLink::Dl, RelayLink::Sl);
            self.send_to_sidelink(queue, l2, packet);
            return;
        }

        // From a remote UE
        if self.activated_sl_bearers.iter().any(|t| t.matches(packet.dst, packet.src)) {
            assert!(self.relay_drb_id != 0, "Relay DRB id not configured, cannot relay packet to the network");
            self.trace_relay(queue, &packet, RelayLink::Sl, RelayLink::Ul);
            let bid = self.relay_drb_id;
            self.send_to_bearer(queue, bid, packet);
            return;
        }

        panic!("Unclassifiable packet {} -> {}", packet.src, packet.dst);
    }

    pub fn notify_connection_successful(&mut self, queue: &mut MessageQueue) {
        self.switch_to_state(queue, EpcUeNasState::Active);
    }

    /// Retries right away through the event queue
    pub fn notify_connection_failed(&mut self, queue: &mut MessageQueue) {
        tracing::debug!("connection failed, retrying");
        let msg = SapMsg::new(Sap::NasSap, SlEntity::Nas, SlEntity::Nas, self.now,
            SapMsgInner::NasConnectReq(NasConnectReq {}));
        queue.push_back(msg);
    }

    pub fn notify_connection_released(&mut self, queue: &mut MessageQueue) {
        while self.bid_counter > 0 {
            self.tft_classifier.delete(self.bid_counter);
            self.bid_counter -= 1;
        }
        self.bearers_to_be_activated = self.bearers_for_reconnection.clone();
        self.disconnect(queue);
    }

    pub fn switch_to_state(&mut self, queue: &mut MessageQueue, new_state: EpcUeNasState) {
        let old_state = self.state;
        self.state = new_state;
        tracing::info!("IMSI {} NAS {} --> {}", self.imsi, old_state, new_state);
        let trace = TraceNasStateTransition { imsi: self.imsi, from: old_state, to: new_state };
        queue.push_back(SapMsg::new(Sap::Trace, SlEntity::Nas, SlEntity::Monitor, self.now,
            SapMsgInner::TraceNasStateTransition(trace)));

        if new_state == EpcUeNasState::Active {
            for btba in std::mem::take(&mut self.bearers_to_be_activated) {
                self.do_activate_eps_bearer(btba.bearer, btba.tft);
            }
        }
    }

    /// Queues the TFT until the access stratum confirms its radio bearer
    pub fn activate_sidelink_bearer(&mut self, queue: &mut MessageQueue, tft: Arc<LteSlTft>) {
        let req = AsActivateSlrbReq {
            dst_l2: tft.remote_l2_address(),
            is_transmit: tft.is_transmit(),
            is_receive: tft.is_receive(),
        };
        tracing::debug!("-> AsActivateSlrbReq {}", tft);
        self.pending_sl_bearers.push(tft);
        queue.push_back(self.as_req(SapMsgInner::AsActivateSlrbReq(req)));
    }

    /// Releases an activated bearer, or one still waiting for its radio bearer
    pub fn deactivate_sidelink_bearer(&mut self, queue: &mut MessageQueue, tft: &LteSlTft) {
        if let Some(pos) = self.activated_sl_bearers.iter().position(|t| **t == *tft) {
            self.activated_sl_bearers.remove(pos);
        } else if let Some(pos) = self.pending_sl_bearers.iter().position(|t| **t == *tft) {
            self.pending_sl_bearers.remove(pos);
        } else {
            tracing::debug!("no sidelink bearer {}", tft);
            return;
        }
        tracing::debug!("Found tft to remove for group {:#08x}", tft.remote_l2_address());
        let req = AsDeactivateSlrbReq { dst_l2: tft.remote_l2_address() };
        queue.push_back(self.as_req(SapMsgInner::AsDeactivateSlrbReq(req)));
    }

    pub fn notify_sidelink_radio_bearer_activated(&mut self, l2: L2Id) {
        let (activated, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_sl_bearers)
            .into_iter()
            .partition(|t| t.remote_l2_address() == l2);
        self.pending_sl_bearers = pending;
        tracing::debug!("{} sidelink bearers activated for l2 {:#08x}", activated.len(), l2);
        self.activated_sl_bearers.extend(activated);
    }

    pub fn set_forward_up_callback(&mut self, tft: Arc<LteSlTft>, target: IfIndex) {
        self.forward_up.push((tft, target));
    }

    pub fn remove_forward_up_callback(&mut self, tft: &LteSlTft) {
        let Some(pos) = self.forward_up.iter().position(|(t, _)| **t == *tft) else {
            panic!("TFT and associated callback not present in list!");
        };
        self.forward_up.remove(pos);
    }

    pub fn configure_sidelink_data_radio_bearers_for_u2n_relay(
        &mut self,
        queue: &mut MessageQueue,
        peer_l2: L2Id,
        role: RelayRole,
        ip_info: DirectLinkIpInfo,
        relay_drb_id: BearerId,
        sl_info: SidelinkInfo,
    ) {
        tracing::info!("configuring U2N relay bearers as {} towards {:#08x}", role, peer_l2);
        let tft = match role {
            RelayRole::RemoteUe => {
                LteSlTft::all_traffic(SlTftDirection::Bidirectional, peer_l2).with_sidelink_info(sl_info)
            }
            RelayRole::RelayUe => {
                self.relaying = true;
                self.relay_drb_id = relay_drb_id;
                self.self_addr = Some(ip_info.self_addr);
                LteSlTft::new(SlTftDirection::Bidirectional, SlTftAddressType::Remote, ip_info.peer_addr, peer_l2)
                    .with_sidelink_info(sl_info)
            }
        };
        self.activate_sidelink_bearer(queue, Arc::new(tft));
    }

    fn rx_nas_sap(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::NasActivateSlBearerReq(prim) => self.activate_sidelink_bearer(queue, prim.tft),
            SapMsgInner::NasDeactivateSlBearerReq(prim) => self.deactivate_sidelink_bearer(queue, &prim.tft),
            SapMsgInner::NasSetForwardUpReq(prim) => self.set_forward_up_callback(prim.tft, prim.target),
            SapMsgInner::NasRemoveForwardUpReq(prim) => self.remove_forward_up_callback(&prim.tft),
            SapMsgInner::NasSendReq(prim) => {
                self.send(queue, prim.packet);
            }
            SapMsgInner::NasActivateEpsBearerReq(prim) => self.activate_eps_bearer(prim.bearer, prim.tft),
            SapMsgInner::NasConnectReq(_) => self.connect(queue),
            SapMsgInner::NasConfigureU2nRelayReq(prim) => self.configure_sidelink_data_radio_bearers_for_u2n_relay(
                queue, prim.peer_l2, prim.role, prim.ip_info, prim.relay_drb_id, prim.sl_info),
            _ => panic!("Unexpected message on NasSap: {}", message.msg),
        }
    }

    fn rx_as_sap(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::AsConnectionInd(prim) => match prim.event {
                AsConnectionEvent::Successful => self.notify_connection_successful(queue),
                AsConnectionEvent::Failed => self.notify_connection_failed(queue),
                AsConnectionEvent::Released => self.notify_connection_released(queue),
            },
            SapMsgInner::AsRecvDataInd(prim) => self.recv_data(queue, prim.packet),
            SapMsgInner::AsSlrbActivatedInd(prim) => self.notify_sidelink_radio_bearer_activated(prim.dst_l2),
            _ => panic!("Unexpected message on AsSap: {}", message.msg),
        }
    }
}

impl SlEntityTrait for EpcUeNas {
    fn entity(&self) -> SlEntity {
        SlEntity::Nas
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?}", message);
        self.now = message.time;

        match message.sap {
            Sap::NasSap => self.rx_nas_sap(queue, message),
            Sap::AsSap => self.rx_as_sap(queue, message),
            _ => panic!("Unexpected SAP: {:?}", message.sap),
        }
    }

    fn tick_start(&mut self, _queue: &mut MessageQueue, now: Duration) {
        self.now = now;
    }
}
