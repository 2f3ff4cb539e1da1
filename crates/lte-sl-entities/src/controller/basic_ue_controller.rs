use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use lte_sl_config::SharedConfig;
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{IfIndex, Imsi, L2Id, NOT_CONNECTING, RelayRole, RelayUeSelectionAlgorithm, Sap, ServiceCode};
use lte_sl_saps::helper::HelperRemoteUeContextConnected;
use lte_sl_saps::ip::*;
use lte_sl_saps::nas::{NasActivateSlBearerReq, NasDeactivateSlBearerReq, NasRemoveForwardUpReq, NasSetForwardUpReq};
use lte_sl_saps::tft::{LteSlTft, SlTftAddressType, SlTftDirection};
use lte_sl_saps::trace::{TracePc5ConnectionStatus, TraceRelayUeSelection};
use lte_sl_saps::ue_ctrl::{Pc5ConnectionStatus, UeO2oRejectReason};
use lte_sl_saps::{SapMsg, SapMsgInner};

use crate::controller::components::net_device::{NET_DEVICE_IF_INDEX, RELAY_PREFIX_LEN, SlNetDeviceMap};
use crate::controller::components::relay_selection::select_relay;
use crate::controller::ue_ctrl_sap::{UeCtrlSapProvider, UeCtrlSapUser, dispatch_ue_ctrl};
use crate::{MessageQueue, SlEntityTrait};

/// TFT of one PC5 link. A remote UE matches its own address, a relay UE the
/// whole prefix it hands to the remote UE.
fn link_tft(role: RelayRole, direction: SlTftDirection, addr: IpAddr, peer: L2Id) -> LteSlTft {
    match role {
        RelayRole::RemoteUe => LteSlTft::new(direction, SlTftAddressType::Local, addr, peer),
        RelayRole::RelayUe => LteSlTft::with_prefix(direction, SlTftAddressType::Remote, addr, RELAY_PREFIX_LEN, peer),
    }
}

/// UE-to-Network relay controller. Picks a relay among the discovered ones and
/// sets up the IP plumbing of each PC5 link.
pub struct BasicUeController {
    config: SharedConfig,
    imsi: Imsi,
    algorithm: RelayUeSelectionAlgorithm,
    rng: StdRng,
    /// Relay a connection is in progress with, NOT_CONNECTING otherwise
    connecting: L2Id,
    devices: SlNetDeviceMap,
    rrc: Option<Box<dyn UeCtrlSapUser + Send>>,
    now: Duration,
}

impl BasicUeController {
    pub fn new(config: SharedConfig) -> Self {
        let cfg = config.config();
        let rng = match cfg.controller.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            imsi: cfg.ue.imsi,
            algorithm: cfg.controller.algorithm,
            rng,
            config,
            connecting: NOT_CONNECTING,
            devices: SlNetDeviceMap::new(),
            rrc: None,
            now: Duration::ZERO,
        }
    }

    pub fn set_ue_ctrl_sap_user(&mut self, user: Box<dyn UeCtrlSapUser + Send>) {
        self.rrc = Some(user);
    }

    pub fn connecting_relay(&self) -> Option<L2Id> {
        (self.connecting != NOT_CONNECTING).then_some(self.connecting)
    }

    pub fn devices(&self) -> &SlNetDeviceMap {
        &self.devices
    }

    pub fn imsi(&self) -> Imsi {
        self.imsi
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub(crate) fn set_now(&mut self, now: Duration) {
        self.now = now;
    }

    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    fn push(&self, queue: &mut MessageQueue, sap: Sap, dest: SlEntity, msg: SapMsgInner) {
        tracing::debug!("-> {}", msg);
        queue.push_back(SapMsg::new(sap, SlEntity::UeController, dest, self.now, msg));
    }

    fn push_ip(&self, queue: &mut MessageQueue, msg: SapMsgInner) {
        self.push(queue, Sap::IpSap, SlEntity::IpStack, msg);
    }

    fn push_nas(&self, queue: &mut MessageQueue, msg: SapMsgInner) {
        self.push(queue, Sap::NasSap, SlEntity::Nas, msg);
    }

    pub(crate) fn trace_status(&self, queue: &mut MessageQueue, self_ue_id: L2Id, peer_ue_id: L2Id, role: RelayRole, status: Pc5ConnectionStatus, if_index: IfIndex) {
        let trace = TracePc5ConnectionStatus { self_ue_id, peer_ue_id, role, status, if_index };
        self.push(queue, Sap::Trace, SlEntity::Monitor, SapMsgInner::TracePc5ConnectionStatus(trace));
    }

    /// Creates the device of a new link and installs its addresses, routes and TFTs
    fn setup_link(&mut self, queue: &mut MessageQueue, peer: L2Id, self_id: L2Id, role: RelayRole) -> IfIndex {
        let dev = match self.devices.add(peer, self_id, role) {
            Ok(dev) => dev.clone(),
            Err(e) => panic!("PC5 connection between {} and {} already established: {:?}", self_id, peer, e),
        };
        self.push_ip(queue, SapMsgInner::IpAddDeviceReq(IpAddDeviceReq { if_index: dev.if_index, link_addr: dev.link_addr }));
        self.push_ip(queue, SapMsgInner::IpAssignAddressReq(IpAssignAddressReq {
            if_index: dev.if_index,
            addr: dev.addr,
            prefix_len: RELAY_PREFIX_LEN,
        }));

        let addr = IpAddr::V6(dev.addr);
        match role {
            RelayRole::RemoteUe => {
                tracing::debug!("New sidelink device in remote node has interface index {}", dev.if_index);
                self.push_ip(queue, SapMsgInner::IpDefaultRouteReq(IpDefaultRouteReq { gateway: dev.relay_addr, if_index: dev.if_index }));
            }
            RelayRole::RelayUe => {
                tracing::debug!("New sidelink device in relay node has interface index {}", dev.if_index);
                self.push_ip(queue, SapMsgInner::IpSetForwardingReq(IpSetForwardingReq { if_index: dev.if_index, enabled: true }));
                self.push_ip(queue, SapMsgInner::IpSetForwardingReq(IpSetForwardingReq { if_index: NET_DEVICE_IF_INDEX, enabled: true }));
            }
        }

        let rx = link_tft(role, SlTftDirection::Receive, addr, peer);
        self.push_nas(queue, SapMsgInner::NasSetForwardUpReq(NasSetForwardUpReq { tft: Arc::new(rx), target: dev.if_index }));
        let bidir = link_tft(role, SlTftDirection::Bidirectional, addr, peer);
        self.push_nas(queue, SapMsgInner::NasActivateSlBearerReq(NasActivateSlBearerReq { tft: Arc::new(bidir) }));
        dev.if_index
    }
}

impl UeCtrlSapProvider for BasicUeController {
    fn recv_relay_service_discovery(&mut self, _queue: &mut MessageQueue, service_code: ServiceCode, announcer_info: u64, relay_ue_id: L2Id, status_indicator: u8) {
        tracing::debug!("relay discovery sc {} announcer {} relay {:#08x} status {}", service_code, announcer_info, relay_ue_id, status_indicator);
    }

    fn pc5_connection_started(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        self.trace_status(queue, self_ue_id, peer_ue_id, role, Pc5ConnectionStatus::Started, 0);
    }

    fn pc5_secured_established(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        let mut known = self.devices.contains(peer_ue_id);
        if self.connecting != NOT_CONNECTING {
            assert!(!known, "PC5 connection between {} and {} already established", self_ue_id, peer_ue_id);
            assert!(self.connecting == peer_ue_id, "PC5 connection established to a relay it was not trying to connect");
            self.connecting = NOT_CONNECTING;
        }

        // A remote UE reconnecting before the relay released the old link (TS 24.334 10.4.2.6.2)
        if known && role == RelayRole::RelayUe {
            self.pc5_connection_terminated(queue, peer_ue_id, self_ue_id, role);
            known = false;
        }

        if !known {
            let if_index = self.setup_link(queue, peer_ue_id, self_ue_id, role);
            self.trace_status(queue, self_ue_id, peer_ue_id, role, Pc5ConnectionStatus::SecureEstablished, if_index);
        }
    }

    fn pc5_connection_terminated(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole) {
        let dev = match self.devices.get(peer_ue_id) {
            Ok(dev) => dev.clone(),
            Err(_) => panic!("Could not find an associated interface"),
        };
        self.push_ip(queue, SapMsgInner::IpSetDownReq(IpSetDownReq { if_index: dev.if_index }));
        self.trace_status(queue, self_ue_id, peer_ue_id, role, Pc5ConnectionStatus::Terminated, dev.if_index);

        let addr = IpAddr::V6(dev.addr);
        let rx = link_tft(role, SlTftDirection::Receive, addr, peer_ue_id);
        self.push_nas(queue, SapMsgInner::NasRemoveForwardUpReq(NasRemoveForwardUpReq { tft: Arc::new(rx) }));
        let bidir = link_tft(role, SlTftDirection::Bidirectional, addr, peer_ue_id);
        self.push_nas(queue, SapMsgInner::NasDeactivateSlBearerReq(NasDeactivateSlBearerReq { tft: Arc::new(bidir) }));
        self.push_ip(queue, SapMsgInner::IpRemoveAddressReq(IpRemoveAddressReq { if_index: dev.if_index, addr }));

        self.push_ip(queue, SapMsgInner::IpRemoveDeviceReq(IpRemoveDeviceReq { if_index: dev.if_index }));
        if let Err(e) = self.devices.remove(peer_ue_id) {
            tracing::warn!("removing device: {:?}", e);
        }
    }

    fn pc5_connection_aborted(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole, reason: UeO2oRejectReason) {
        assert!(role == RelayRole::RemoteUe, "PC5 connection aborted on a {}", role);
        tracing::info!("PC5 connection to {:#08x} aborted: {}", peer_ue_id, reason);
        self.trace_status(queue, self_ue_id, peer_ue_id, role, Pc5ConnectionStatus::Aborted, 0);
        if self.connecting == peer_ue_id {
            // Allows a new attempt
            self.connecting = NOT_CONNECTING;
        }
    }

    fn recv_remote_ue_report(&mut self, queue: &mut MessageQueue, local_imsi: Imsi, peer_ue_id: L2Id, remote_imsi: Imsi) {
        let dev = match self.devices.get(peer_ue_id) {
            Ok(dev) => dev,
            Err(_) => panic!("Unknown remote UE id {}", peer_ue_id),
        };
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&dev.addr.octets()[..8]);
        let report = HelperRemoteUeContextConnected { relay_imsi: local_imsi, remote_imsi, prefix };
        self.push(queue, Sap::HelperSap, SlEntity::Helper, SapMsgInner::HelperRemoteUeContextConnected(report));
    }

    fn relay_ue_selection(&mut self, queue: &mut MessageQueue, candidates: &BTreeMap<u64, f64>, service_code: ServiceCode, current_relay_id: u64) -> u64 {
        tracing::debug!("UE IMSI {} Current Relay UE ID {} for SC {}", self.imsi, current_relay_id, service_code);
        if self.connecting != NOT_CONNECTING {
            tracing::debug!("Ongoing connection procedure with Relay UE ID {}. Skip (re)selection.", self.connecting);
            return current_relay_id;
        }

        let selected = select_relay(self.algorithm, candidates, current_relay_id, &mut self.rng);
        if selected != current_relay_id {
            if selected != 0 {
                self.connecting = selected as L2Id;
                tracing::debug!("Selected Relay UE for SC {} changed", service_code);
            }
            let trace = TraceRelayUeSelection {
                imsi: self.imsi,
                service_code,
                current_relay_id,
                selected_relay_id: selected,
            };
            self.push(queue, Sap::Trace, SlEntity::Monitor, SapMsgInner::TraceRelayUeSelection(trace));
        } else {
            tracing::debug!("Selected Relay UE for SC {} did not change", service_code);
        }
        selected
    }
}

impl SlEntityTrait for BasicUeController {
    fn entity(&self) -> SlEntity {
        SlEntity::UeController
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?}", message);
        self.now = message.time;
        dispatch_ue_ctrl(self, queue, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_config::SlStackConfig;
    use lte_sl_core::debug;

    fn controller(algorithm: RelayUeSelectionAlgorithm) -> BasicUeController {
        let mut cfg = SlStackConfig::new(100, 0x20);
        cfg.controller.algorithm = algorithm;
        cfg.controller.rng_seed = Some(3);
        BasicUeController::new(SharedConfig::from_config(cfg))
    }

    #[test]
    fn test_selection_sets_connecting() {
        debug::setup_logging_verbose();
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection);
        let mut queue = MessageQueue::new();
        let cands = BTreeMap::from([(0x10, -80.0), (0x11, -60.0)]);
        assert_eq!(c.relay_ue_selection(&mut queue, &cands, 1, 0), 0x11);
        assert_eq!(c.connecting_relay(), Some(0x11));
        assert_eq!(queue.len(), 1);

        // Skipped while connecting
        let better = BTreeMap::from([(0x12, -10.0)]);
        assert_eq!(c.relay_ue_selection(&mut queue, &better, 1, 0), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_secured_established_remote() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        let mut queue = MessageQueue::new();
        c.relay_ue_selection(&mut queue, &BTreeMap::from([(0x10, -80.0)]), 1, 0);
        queue.drain();

        c.pc5_secured_established(&mut queue, 0x10, 0x20, RelayRole::RemoteUe);
        assert_eq!(c.connecting_relay(), None);
        assert!(c.devices().contains(0x10));
        let msgs: Vec<SapMsgInner> = queue.drain().into_iter().map(|m| m.msg).collect();
        assert!(matches!(&msgs[0], SapMsgInner::IpAddDeviceReq(p) if p.if_index == 2));
        assert!(matches!(&msgs[2], SapMsgInner::IpDefaultRouteReq(p) if p.gateway == "7777:f00e:0:10::1".parse::<std::net::Ipv6Addr>().unwrap()));
        assert!(matches!(&msgs[3], SapMsgInner::NasSetForwardUpReq(p) if p.target == 2));
        assert!(matches!(&msgs[4], SapMsgInner::NasActivateSlBearerReq(_)));
        assert!(matches!(&msgs[5], SapMsgInner::TracePc5ConnectionStatus(t)
            if t.status == Pc5ConnectionStatus::SecureEstablished && t.if_index == 2));
    }

    #[test]
    #[should_panic(expected = "established to a relay it was not trying to connect")]
    fn test_secured_established_wrong_relay() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        let mut queue = MessageQueue::new();
        c.relay_ue_selection(&mut queue, &BTreeMap::from([(0x10, -80.0)]), 1, 0);
        c.pc5_secured_established(&mut queue, 0x11, 0x20, RelayRole::RemoteUe);
    }

    #[test]
    fn test_relay_reestablish_replaces_link() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        let mut queue = MessageQueue::new();
        c.pc5_secured_established(&mut queue, 0x30, 0x20, RelayRole::RelayUe);
        c.pc5_secured_established(&mut queue, 0x30, 0x20, RelayRole::RelayUe);
        assert_eq!(c.devices().get(0x30).map(|d| d.if_index), Ok(3));
        let statuses: Vec<Pc5ConnectionStatus> = queue.drain().into_iter()
            .filter_map(|m| match m.msg {
                SapMsgInner::TracePc5ConnectionStatus(t) => Some(t.status),
                _ => None,
            })
            .collect();
        assert_eq!(statuses, vec![
            Pc5ConnectionStatus::SecureEstablished,
            Pc5ConnectionStatus::Terminated,
            Pc5ConnectionStatus::SecureEstablished,
        ]);
    }

    #[test]
    #[should_panic(expected = "Could not find an associated interface")]
    fn test_terminate_unknown() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        c.pc5_connection_terminated(&mut MessageQueue::new(), 0x30, 0x20, RelayRole::RelayUe);
    }

    #[test]
    fn test_abort_resets_connecting() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        let mut queue = MessageQueue::new();
        c.relay_ue_selection(&mut queue, &BTreeMap::from([(0x10, -80.0)]), 1, 0);
        c.pc5_connection_aborted(&mut queue, 0x10, 0x20, RelayRole::RemoteUe, UeO2oRejectReason::LackOfResources);
        assert_eq!(c.connecting_relay(), None);
    }

    #[test]
    #[should_panic(expected = "aborted on a RelayUE")]
    fn test_abort_on_relay_is_fatal() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        c.pc5_connection_aborted(&mut MessageQueue::new(), 0x10, 0x20, RelayRole::RelayUe, UeO2oRejectReason::OtherErrors);
    }

    #[test]
    fn test_remote_ue_report_prefix() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        let mut queue = MessageQueue::new();
        c.pc5_secured_established(&mut queue, 0x30, 0x20, RelayRole::RelayUe);
        queue.drain();
        c.recv_remote_ue_report(&mut queue, 100, 0x30, 200);
        let msgs = queue.drain();
        let SapMsgInner::HelperRemoteUeContextConnected(r) = &msgs[0].msg else { panic!() };
        assert_eq!(r.prefix, [0x77, 0x77, 0xf0, 0x0e, 0, 0, 0, 0x20]);
        assert_eq!((r.relay_imsi, r.remote_imsi), (100, 200));
    }

    #[test]
    #[should_panic(expected = "Unknown remote UE id 48")]
    fn test_remote_ue_report_unknown() {
        let mut c = controller(RelayUeSelectionAlgorithm::MaxSdrsrp);
        c.recv_remote_ue_report(&mut MessageQueue::new(), 100, 0x30, 200);
    }
}
