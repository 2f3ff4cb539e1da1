use std::collections::BTreeMap;

use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{Imsi, L2Id, RelayRole, Sap, ServiceCode};
use lte_sl_saps::ue_ctrl::{Pc5ConnectionEvent, UeCtrlRelaySelectionConf, UeO2oRejectReason};
use lte_sl_saps::{SapMsg, SapMsgInner};

use crate::MessageQueue;

/// Calls from the RRC into a UE-to-Network relay controller
pub trait UeCtrlSapProvider {
    fn recv_relay_service_discovery(&mut self, queue: &mut MessageQueue, service_code: ServiceCode, announcer_info: u64, relay_ue_id: L2Id, status_indicator: u8);

    fn pc5_connection_started(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole);

    fn pc5_secured_established(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole);

    fn pc5_connection_terminated(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole);

    fn pc5_connection_aborted(&mut self, queue: &mut MessageQueue, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole, reason: UeO2oRejectReason);

    fn recv_remote_ue_report(&mut self, queue: &mut MessageQueue, local_imsi: Imsi, peer_ue_id: L2Id, remote_imsi: Imsi);

    /// Returns the relay to use, `current_relay_id` to keep the current one, 0 for none
    fn relay_ue_selection(&mut self, queue: &mut MessageQueue, candidates: &BTreeMap<u64, f64>, service_code: ServiceCode, current_relay_id: u64) -> u64;
}

/// Calls from the controller into the RRC. Nothing flows this way yet.
pub trait UeCtrlSapUser {}

/// Dispatches a UeCtrl-SAP primitive to `ctrl`. Selection requests are
/// confirmed towards the sender.
pub fn dispatch_ue_ctrl(ctrl: &mut dyn UeCtrlSapProvider, queue: &mut MessageQueue, message: SapMsg) {
    assert!(message.sap == Sap::UeCtrlSap);
    let (src, time) = (message.src, message.time);

    match message.msg {
        SapMsgInner::UeCtrlRelayDiscoveryInd(prim) => {
            ctrl.recv_relay_service_discovery(queue, prim.service_code, prim.announcer_info, prim.relay_ue_id, prim.status_indicator);
        }
        SapMsgInner::UeCtrlPc5ConnectionInd(prim) => {
            let (peer, me, role) = (prim.peer_ue_id, prim.self_ue_id, prim.role);
            match prim.event {
                Pc5ConnectionEvent::Started => ctrl.pc5_connection_started(queue, peer, me, role),
                Pc5ConnectionEvent::SecuredEstablished => ctrl.pc5_secured_established(queue, peer, me, role),
                Pc5ConnectionEvent::Terminated => ctrl.pc5_connection_terminated(queue, peer, me, role),
                Pc5ConnectionEvent::Aborted(reason) => ctrl.pc5_connection_aborted(queue, peer, me, role, reason),
            }
        }
        SapMsgInner::UeCtrlRemoteUeReportInd(prim) => {
            ctrl.recv_remote_ue_report(queue, prim.local_imsi, prim.peer_ue_id, prim.remote_imsi);
        }
        SapMsgInner::UeCtrlRelaySelectionReq(prim) => {
            let selected = ctrl.relay_ue_selection(queue, &prim.candidates, prim.service_code, prim.current_relay_id);
            let conf = UeCtrlRelaySelectionConf {
                service_code: prim.service_code,
                current_relay_id: prim.current_relay_id,
                selected_relay_id: selected,
            };
            tracing::debug!("-> {:?}", conf);
            queue.push_back(SapMsg::new(Sap::UeCtrlSap, SlEntity::UeController, src, time,
                SapMsgInner::UeCtrlRelaySelectionConf(conf)));
        }
        _ => panic!("Unexpected message on UeCtrlSap: {}", message.msg),
    }
}
