//! UeCtrl-SAP: RRC towards the UE-to-Network relay controller
//!
//! The RRC reports discovery and PC5 signalling events. Relay UE selection is a
//! request/confirm pair, the confirm carries the relay the RRC should connect to.

use std::collections::BTreeMap;

use lte_sl_core::{Imsi, L2Id, RelayRole, ServiceCode};

/// Status reported in the PC5 connection status trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Pc5ConnectionStatus {
    Started = 1,
    SecureEstablished = 2,
    Aborted = 3,
    Terminated = 4,
}

impl std::convert::TryFrom<u64> for Pc5ConnectionStatus {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            1 => Ok(Pc5ConnectionStatus::Started),
            2 => Ok(Pc5ConnectionStatus::SecureEstablished),
            3 => Ok(Pc5ConnectionStatus::Aborted),
            4 => Ok(Pc5ConnectionStatus::Terminated),
            _ => Err(()),
        }
    }
}

impl Pc5ConnectionStatus {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<Pc5ConnectionStatus> for u64 {
    fn from(e: Pc5ConnectionStatus) -> Self { e.into_raw() }
}

impl core::fmt::Display for Pc5ConnectionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Pc5ConnectionStatus::Started => write!(f, "STARTED"),
            Pc5ConnectionStatus::SecureEstablished => write!(f, "SECURE_ESTABLISHED"),
            Pc5ConnectionStatus::Aborted => write!(f, "ABORTED"),
            Pc5ConnectionStatus::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// PC5 signalling reject cause, TS 24.334 clause 10.4.2.4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UeO2oRejectReason {
    CommNotAllowed = 1,
    AuthFailure = 2,
    ConflictL2Id = 3,
    LackOfResources = 4,
    IpMismatch = 5,
    OtherErrors = 6,
}

impl std::convert::TryFrom<u64> for UeO2oRejectReason {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            1 => Ok(UeO2oRejectReason::CommNotAllowed),
            2 => Ok(UeO2oRejectReason::AuthFailure),
            3 => Ok(UeO2oRejectReason::ConflictL2Id),
            4 => Ok(UeO2oRejectReason::LackOfResources),
            5 => Ok(UeO2oRejectReason::IpMismatch),
            6 => Ok(UeO2oRejectReason::OtherErrors),
            _ => Err(()),
        }
    }
}

impl UeO2oRejectReason {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<UeO2oRejectReason> for u64 {
    fn from(e: UeO2oRejectReason) -> Self { e.into_raw() }
}

impl core::fmt::Display for UeO2oRejectReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UeO2oRejectReason::CommNotAllowed => write!(f, "COMM_NOT_ALLOWED"),
            UeO2oRejectReason::AuthFailure => write!(f, "AUTH_FAILURE"),
            UeO2oRejectReason::ConflictL2Id => write!(f, "CONFLICT_L2_ID"),
            UeO2oRejectReason::LackOfResources => write!(f, "LACK_OF_RESOURCES"),
            UeO2oRejectReason::IpMismatch => write!(f, "IP_MISMATCH"),
            UeO2oRejectReason::OtherErrors => write!(f, "OTHER_ERRORS"),
        }
    }
}

/// A relay discovery announcement or response was received
#[derive(Debug, Clone)]
pub struct UeCtrlRelayDiscoveryInd {
    pub service_code: ServiceCode,
    pub announcer_info: u64,
    pub relay_ue_id: L2Id,
    pub status_indicator: u8,
}

/// Progress of a PC5 one-to-one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pc5ConnectionEvent {
    Started,
    SecuredEstablished,
    Terminated,
    Aborted(UeO2oRejectReason),
}

#[derive(Debug, Clone)]
pub struct UeCtrlPc5ConnectionInd {
    pub peer_ue_id: L2Id,
    pub self_ue_id: L2Id,
    pub role: RelayRole,
    pub event: Pc5ConnectionEvent,
}

/// A remote UE identified itself to this relay
#[derive(Debug, Clone)]
pub struct UeCtrlRemoteUeReportInd {
    pub local_imsi: Imsi,
    pub peer_ue_id: L2Id,
    pub remote_imsi: Imsi,
}

/// Relay (re)selection request. Candidates map relay id to SD-RSRP in dBm.
#[derive(Debug, Clone)]
pub struct UeCtrlRelaySelectionReq {
    pub candidates: BTreeMap<u64, f64>,
    pub service_code: ServiceCode,
    pub current_relay_id: u64,
}

/// Relay picked by the controller, 0 when none
#[derive(Debug, Clone)]
pub struct UeCtrlRelaySelectionConf {
    pub service_code: ServiceCode,
    pub current_relay_id: u64,
    pub selected_relay_id: u64,
}
