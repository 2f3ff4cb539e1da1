//! AS-SAP: primitives between the NAS and the access stratum (RRC)

use lte_sl_core::{BearerId, L2Id};

use crate::packet::IpPacket;

/// Uplink data on an EPS bearer
#[derive(Debug, Clone)]
pub struct AsSendDataReq {
    pub bid: BearerId,
    pub packet: IpPacket,
}

/// Data on the sidelink radio bearer towards `dst_l2`
#[derive(Debug, Clone)]
pub struct AsSendSidelinkDataReq {
    pub dst_l2: L2Id,
    pub packet: IpPacket,
}

#[derive(Debug, Clone)]
pub struct AsActivateSlrbReq {
    pub dst_l2: L2Id,
    pub is_transmit: bool,
    pub is_receive: bool,
}

#[derive(Debug, Clone)]
pub struct AsDeactivateSlrbReq {
    pub dst_l2: L2Id,
}

/// Start the RRC connection towards the EPC
#[derive(Debug, Clone)]
pub struct AsConnectReq {}

#[derive(Debug, Clone)]
pub struct AsDisconnectReq {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsConnectionEvent {
    Successful,
    Failed,
    Released,
}

#[derive(Debug, Clone)]
pub struct AsConnectionInd {
    pub event: AsConnectionEvent,
}

/// Data received from the access stratum, uplink or sidelink
#[derive(Debug, Clone)]
pub struct AsRecvDataInd {
    pub packet: IpPacket,
}

#[derive(Debug, Clone)]
pub struct AsSlrbActivatedInd {
    pub dst_l2: L2Id,
}
