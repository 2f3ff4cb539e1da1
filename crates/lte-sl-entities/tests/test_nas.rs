mod common;

use std::net::IpAddr;
use std::time::Duration;

use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{RelayRole, Sap, debug};
use lte_sl_entities::nas::EpcUeNas;
use lte_sl_saps::as_sap::{AsConnectionEvent, AsConnectionInd};
use lte_sl_saps::epc_tft::{EpcTft, EpsBearer, Qci};
use lte_sl_saps::nas::{EpcUeNasState, NasActivateEpsBearerReq, NasSendReq};
use lte_sl_saps::packet::IpPacket;
use lte_sl_saps::{SapMsg, SapMsgInner};
use common::{ComponentTest, default_test_config};

fn as_ind(event: AsConnectionEvent) -> SapMsg {
    SapMsg::new(Sap::AsSap, SlEntity::Rrc, SlEntity::Nas, Duration::ZERO,
        SapMsgInner::AsConnectionInd(AsConnectionInd { event }))
}

fn nas_req(msg: SapMsgInner) -> SapMsg {
    SapMsg::new(Sap::NasSap, SlEntity::User, SlEntity::Nas, Duration::ZERO, msg)
}

fn setup() -> ComponentTest {
    let config = default_test_config(1001, 0x31, RelayRole::RemoteUe);
    let mut test = ComponentTest::new(config, None);
    test.populate_entities(vec![SlEntity::Nas], vec![SlEntity::Rrc, SlEntity::IpStack, SlEntity::Monitor]);
    test
}

fn nas_state(test: &mut ComponentTest) -> EpcUeNasState {
    test.entity_mut::<EpcUeNas>(SlEntity::Nas).map(|nas| nas.state()).unwrap()
}

#[test]
fn test_connect_activates_pending_bearers() {
    debug::setup_logging_verbose();
    let mut test = setup();

    test.submit_message(nas_req(SapMsgInner::NasActivateEpsBearerReq(NasActivateEpsBearerReq {
        bearer: EpsBearer::new(Qci::NgbrVideoTcpDefault),
        tft: EpcTft::default_tft(),
    })));
    test.submit_message(as_ind(AsConnectionEvent::Successful));
    test.deliver_all_messages();
    assert_eq!(nas_state(&mut test), EpcUeNasState::Active);
    assert_eq!(test.entity_mut::<EpcUeNas>(SlEntity::Nas).unwrap().num_eps_bearers(), 1);

    let traces = test.take_sink(SlEntity::Monitor);
    assert!(matches!(&traces[0].msg, SapMsgInner::TraceNasStateTransition(t)
        if t.from == EpcUeNasState::Off && t.to == EpcUeNasState::Active));

    // No sidelink bearer, so the packet goes on the default EPS bearer
    let src: IpAddr = "7777:f00e:0:1::2".parse().unwrap();
    let dst: IpAddr = "1::1".parse().unwrap();
    test.submit_message(nas_req(SapMsgInner::NasSendReq(NasSendReq {
        packet: IpPacket::udp(src, 1000, dst, 2000, vec![0; 20]),
    })));
    test.deliver_all_messages();
    let rrc = test.take_sink(SlEntity::Rrc);
    assert_eq!(rrc.len(), 1);
    assert!(matches!(&rrc[0].msg, SapMsgInner::AsSendDataReq(p) if p.bid == 1 && p.packet.len() == 20));
}

#[test]
fn test_connection_failure_retries() {
    let mut test = setup();
    test.submit_message(as_ind(AsConnectionEvent::Failed));
    test.deliver_all_messages();

    let rrc = test.take_sink(SlEntity::Rrc);
    assert_eq!(rrc.len(), 1);
    assert!(matches!(rrc[0].msg, SapMsgInner::AsConnectReq(_)));
    assert_eq!(nas_state(&mut test), EpcUeNasState::Off);
}

#[test]
fn test_release_restores_bearers_for_reconnection() {
    let mut test = setup();
    test.submit_message(nas_req(SapMsgInner::NasActivateEpsBearerReq(NasActivateEpsBearerReq {
        bearer: EpsBearer::new(Qci::NgbrMcData),
        tft: EpcTft::default_tft(),
    })));
    test.submit_message(as_ind(AsConnectionEvent::Successful));
    test.submit_message(as_ind(AsConnectionEvent::Released));
    test.deliver_all_messages();
    assert_eq!(nas_state(&mut test), EpcUeNasState::Off);
    assert_eq!(test.entity_mut::<EpcUeNas>(SlEntity::Nas).unwrap().num_eps_bearers(), 0);
    let rrc = test.take_sink(SlEntity::Rrc);
    assert!(matches!(rrc.last().map(|m| &m.msg), Some(SapMsgInner::AsDisconnectReq(_))));

    // The bearer comes back with the next connection
    test.submit_message(as_ind(AsConnectionEvent::Successful));
    test.deliver_all_messages();
    assert_eq!(test.entity_mut::<EpcUeNas>(SlEntity::Nas).unwrap().num_eps_bearers(), 1);
}

#[test]
fn test_send_without_bearer_is_dropped() {
    let mut test = setup();
    test.submit_message(nas_req(SapMsgInner::NasSendReq(NasSendReq {
        packet: IpPacket::udp("1::2".parse().unwrap(), 1, "1::1".parse().unwrap(), 2, vec![1, 2, 3]),
    })));
    test.deliver_all_messages();
    assert!(test.take_sink(SlEntity::Rrc).is_empty());
}
