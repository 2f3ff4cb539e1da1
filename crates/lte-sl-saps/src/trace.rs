//! Trace events emitted towards the monitor entity

use std::net::IpAddr;
use std::time::Duration;

use lte_sl_core::{IfIndex, Imsi, L2Id, RelayRole, ServiceCode};

use crate::nas::EpcUeNasState;
use crate::ue_ctrl::Pc5ConnectionStatus;

/// PC5 connection progress. `if_index` is 0 while no interface exists.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePc5ConnectionStatus {
    pub self_ue_id: L2Id,
    pub peer_ue_id: L2Id,
    pub role: RelayRole,
    pub status: Pc5ConnectionStatus,
    pub if_index: IfIndex,
}

/// Relay selection changed
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRelayUeSelection {
    pub imsi: Imsi,
    pub service_code: ServiceCode,
    pub current_relay_id: u64,
    pub selected_relay_id: u64,
}

/// Every expected relay was discovered
#[derive(Debug, Clone, PartialEq)]
pub struct TraceDiscoversAllRelays {
    pub self_l2: L2Id,
    pub relay_ue_id: L2Id,
    pub discovery_time: Duration,
    pub n_disc_periods: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRemoteConnectionStart {
    pub self_l2: L2Id,
    pub relay_ue_id: u64,
    pub attempt: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRemoteConnectionEstablished {
    pub self_l2: L2Id,
    pub relay_ue_id: L2Id,
    pub attempt: u32,
    pub connection_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayLink {
    Sl,
    Ul,
    Dl,
}

impl core::fmt::Display for RelayLink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RelayLink::Sl => write!(f, "SL"),
            RelayLink::Ul => write!(f, "UL"),
            RelayLink::Dl => write!(f, "DL"),
        }
    }
}

/// A relay UE moved a packet from one link to another
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRelayRxPacket {
    pub node_addr: IpAddr,
    pub src: IpAddr,
    pub dst: IpAddr,
    pub src_link: RelayLink,
    pub dst_link: RelayLink,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceNasStateTransition {
    pub imsi: Imsi,
    pub from: EpcUeNasState,
    pub to: EpcUeNasState,
}
