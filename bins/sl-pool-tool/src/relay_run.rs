use std::collections::BTreeMap;
use std::time::Duration;

use lte_sl_config::SharedConfig;
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{L2Id, RelayRole, Sap};
use lte_sl_entities::controller::{BasicUeController, CampaignUeController};
use lte_sl_entities::nas::EpcUeNas;
use lte_sl_entities::{MessageQueue, MessageRouter, SlEntityTrait};
use lte_sl_saps::ue_ctrl::{Pc5ConnectionEvent, UeCtrlPc5ConnectionInd, UeCtrlRelayDiscoveryInd, UeCtrlRelaySelectionReq};
use lte_sl_saps::{SapMsg, SapMsgInner};

/// Service code announced by the scripted relay
const RELAY_SERVICE_CODE: u32 = 0x7;

/// Stands in for an entity outside the stack and prints what reaches it
struct Printer {
    entity: SlEntity,
    received: Vec<SapMsg>,
}

impl Printer {
    fn new(entity: SlEntity) -> Self {
        Self { entity, received: vec![] }
    }
}

impl SlEntityTrait for Printer {
    fn entity(&self) -> SlEntity {
        self.entity
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        println!("  {:?} {:?} <- {:?}: {:?}", message.time, self.entity, message.src, message.msg);
        self.received.push(message);
    }
}

fn build_router(cfg: &SharedConfig) -> MessageRouter {
    let mut router = MessageRouter::new(cfg.clone());
    router.register_entity(Box::new(EpcUeNas::new(cfg.clone())));
    if cfg.config().controller.campaign.is_some() {
        router.register_entity(Box::new(CampaignUeController::new(cfg.clone())));
    } else {
        router.register_entity(Box::new(BasicUeController::new(cfg.clone())));
    }
    for e in [SlEntity::Rrc, SlEntity::IpStack, SlEntity::Helper, SlEntity::Monitor] {
        router.register_entity(Box::new(Printer::new(e)));
    }
    router
}

fn to_ctrl(time: Duration, msg: SapMsgInner) -> SapMsg {
    SapMsg::new(Sap::UeCtrlSap, SlEntity::Rrc, SlEntity::UeController, time, msg)
}

fn pc5(time: Duration, peer_ue_id: L2Id, self_ue_id: L2Id, role: RelayRole, event: Pc5ConnectionEvent) -> SapMsg {
    to_ctrl(time, SapMsgInner::UeCtrlPc5ConnectionInd(UeCtrlPc5ConnectionInd { peer_ue_id, self_ue_id, role, event }))
}

/// Last relay the controller picked, as confirmed towards the RRC
fn selected_relay(router: &mut MessageRouter) -> u64 {
    router
        .get_entity(SlEntity::Rrc)
        .and_then(|e| e.as_any_mut().downcast_mut::<Printer>())
        .and_then(|p| {
            p.received.iter().rev().find_map(|m| match &m.msg {
                SapMsgInner::UeCtrlRelaySelectionConf(conf) => Some(conf.selected_relay_id),
                _ => None,
            })
        })
        .unwrap_or(0)
}

/// Drives the relay controller and NAS through one PC5 link setup. A relay UE
/// accepts `peer`; any other UE discovers `peer` as a relay and connects to it.
pub fn run(cfg: &SharedConfig, peer: L2Id) {
    let config = cfg.config();
    let me = config.ue.l2_id;
    let mut router = build_router(cfg);
    let mut now = Duration::from_millis(100);

    if config.ue.role == Some(RelayRole::RelayUe) {
        println!("[relay] relay UE {:#08x} accepting remote UE {:#08x}", me, peer);
        router.set_time(now);
        router.submit_message(pc5(now, peer, me, RelayRole::RelayUe, Pc5ConnectionEvent::Started));
        router.submit_message(pc5(now, peer, me, RelayRole::RelayUe, Pc5ConnectionEvent::SecuredEstablished));
        router.deliver_all_messages();
        return;
    }

    println!("[relay] remote UE {:#08x} looking for relay {:#08x}", me, peer);
    router.set_time(now);
    router.submit_message(to_ctrl(now, SapMsgInner::UeCtrlRelayDiscoveryInd(UeCtrlRelayDiscoveryInd {
        service_code: RELAY_SERVICE_CODE,
        announcer_info: 0,
        relay_ue_id: peer,
        status_indicator: 0,
    })));
    router.submit_message(to_ctrl(now, SapMsgInner::UeCtrlRelaySelectionReq(UeCtrlRelaySelectionReq {
        candidates: BTreeMap::from([(u64::from(peer), -80.0)]),
        service_code: RELAY_SERVICE_CODE,
        current_relay_id: 0,
    })));
    router.deliver_all_messages();

    let selected = selected_relay(&mut router);
    if selected == 0 {
        tracing::warn!("Controller did not select a relay, stopping");
        return;
    }
    let Ok(relay) = L2Id::try_from(selected) else {
        tracing::warn!("Selected relay id {} is not a layer 2 id", selected);
        return;
    };

    now += Duration::from_millis(40);
    router.set_time(now);
    router.submit_message(pc5(now, relay, me, RelayRole::RemoteUe, Pc5ConnectionEvent::Started));
    router.submit_message(pc5(now, relay, me, RelayRole::RemoteUe, Pc5ConnectionEvent::SecuredEstablished));
    router.deliver_all_messages();
}
