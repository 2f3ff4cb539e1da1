//! NAS-SAP: requests from the UE controller, the applications and the IP stack
//! towards the NAS

use std::net::IpAddr;
use std::sync::Arc;

use lte_sl_core::{BearerId, IfIndex, L2Id, RelayRole};

use crate::epc_tft::{EpcTft, EpsBearer};
use crate::packet::IpPacket;
use crate::tft::{LteSlTft, SidelinkInfo};

/// EPC UE NAS state, TS 24.301 simplified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EpcUeNasState {
    #[default]
    Off = 0,
    Attaching = 1,
    IdleRegistered = 2,
    ConnectingToEpc = 3,
    Active = 4,
}

impl std::convert::TryFrom<u64> for EpcUeNasState {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(EpcUeNasState::Off),
            1 => Ok(EpcUeNasState::Attaching),
            2 => Ok(EpcUeNasState::IdleRegistered),
            3 => Ok(EpcUeNasState::ConnectingToEpc),
            4 => Ok(EpcUeNasState::Active),
            _ => Err(()),
        }
    }
}

impl EpcUeNasState {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<EpcUeNasState> for u64 {
    fn from(e: EpcUeNasState) -> Self { e.into_raw() }
}

impl core::fmt::Display for EpcUeNasState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EpcUeNasState::Off => write!(f, "OFF"),
            EpcUeNasState::Attaching => write!(f, "ATTACHING"),
            EpcUeNasState::IdleRegistered => write!(f, "IDLE_REGISTERED"),
            EpcUeNasState::ConnectingToEpc => write!(f, "CONNECTING_TO_EPC"),
            EpcUeNasState::Active => write!(f, "ACTIVE"),
        }
    }
}

/// Addresses of both ends of a relay link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectLinkIpInfo {
    pub self_addr: IpAddr,
    pub peer_addr: IpAddr,
}

#[derive(Debug, Clone)]
pub struct NasActivateSlBearerReq {
    pub tft: Arc<LteSlTft>,
}

#[derive(Debug, Clone)]
pub struct NasDeactivateSlBearerReq {
    pub tft: Arc<LteSlTft>,
}

/// Packets matching `tft` on reception go up through interface `target`
#[derive(Debug, Clone)]
pub struct NasSetForwardUpReq {
    pub tft: Arc<LteSlTft>,
    pub target: IfIndex,
}

#[derive(Debug, Clone)]
pub struct NasRemoveForwardUpReq {
    pub tft: Arc<LteSlTft>,
}

/// Outgoing IP packet handed down by the IP stack
#[derive(Debug, Clone)]
pub struct NasSendReq {
    pub packet: IpPacket,
}

#[derive(Debug, Clone)]
pub struct NasActivateEpsBearerReq {
    pub bearer: EpsBearer,
    pub tft: EpcTft,
}

/// Start (or retry) the connection to the EPC
#[derive(Debug, Clone)]
pub struct NasConnectReq {}

#[derive(Debug, Clone)]
pub struct NasConfigureU2nRelayReq {
    pub peer_l2: L2Id,
    pub role: RelayRole,
    pub ip_info: DirectLinkIpInfo,
    pub relay_drb_id: BearerId,
    pub sl_info: SidelinkInfo,
}
