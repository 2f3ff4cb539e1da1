use core::fmt::Display;
use std::time::Duration;

use lte_sl_core::Sap;
use lte_sl_core::sl_entities::SlEntity;

use super::as_sap::*;
use super::helper::*;
use super::ip::*;
use super::nas::*;
use super::trace::*;
use super::ue_ctrl::*;


/// Exhaustive list of primitive structs for use in the SapMsg struct
#[derive(Debug)]
pub enum SapMsgInner {

    // UeCtrl-SAP (RRC -> controller)
    UeCtrlRelayDiscoveryInd(UeCtrlRelayDiscoveryInd),
    UeCtrlPc5ConnectionInd(UeCtrlPc5ConnectionInd),
    UeCtrlRemoteUeReportInd(UeCtrlRemoteUeReportInd),
    UeCtrlRelaySelectionReq(UeCtrlRelaySelectionReq),
    UeCtrlRelaySelectionConf(UeCtrlRelaySelectionConf),

    // AS-SAP (NAS -> RRC)
    AsSendDataReq(AsSendDataReq),
    AsSendSidelinkDataReq(AsSendSidelinkDataReq),
    AsActivateSlrbReq(AsActivateSlrbReq),
    AsDeactivateSlrbReq(AsDeactivateSlrbReq),
    AsConnectReq(AsConnectReq),
    AsDisconnectReq(AsDisconnectReq),

    // AS-SAP (RRC -> NAS)
    AsConnectionInd(AsConnectionInd),
    AsRecvDataInd(AsRecvDataInd),
    AsSlrbActivatedInd(AsSlrbActivatedInd),

    // NAS-SAP
    NasActivateSlBearerReq(NasActivateSlBearerReq),
    NasDeactivateSlBearerReq(NasDeactivateSlBearerReq),
    NasSetForwardUpReq(NasSetForwardUpReq),
    NasRemoveForwardUpReq(NasRemoveForwardUpReq),
    NasSendReq(NasSendReq),
    NasActivateEpsBearerReq(NasActivateEpsBearerReq),
    NasConnectReq(NasConnectReq),
    NasConfigureU2nRelayReq(NasConfigureU2nRelayReq),

    // IP-SAP
    IpAddDeviceReq(IpAddDeviceReq),
    IpAssignAddressReq(IpAssignAddressReq),
    IpDefaultRouteReq(IpDefaultRouteReq),
    IpSetForwardingReq(IpSetForwardingReq),
    IpSetDownReq(IpSetDownReq),
    IpRemoveAddressReq(IpRemoveAddressReq),
    IpRemoveDeviceReq(IpRemoveDeviceReq),
    IpForwardUpInd(IpForwardUpInd),

    // Helper-SAP
    HelperRemoteUeContextConnected(HelperRemoteUeContextConnected),

    // Traces
    TracePc5ConnectionStatus(TracePc5ConnectionStatus),
    TraceRelayUeSelection(TraceRelayUeSelection),
    TraceDiscoversAllRelays(TraceDiscoversAllRelays),
    TraceRemoteConnectionStart(TraceRemoteConnectionStart),
    TraceRemoteConnectionEstablished(TraceRemoteConnectionEstablished),
    TraceRelayRxPacket(TraceRelayRxPacket),
    TraceNasStateTransition(TraceNasStateTransition),
}

impl Display for SapMsgInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // UeCtrl-SAP
            SapMsgInner::UeCtrlRelayDiscoveryInd(_) => write!(f, "UeCtrlRelayDiscoveryInd"),
            SapMsgInner::UeCtrlPc5ConnectionInd(_) => write!(f, "UeCtrlPc5ConnectionInd"),
            SapMsgInner::UeCtrlRemoteUeReportInd(_) => write!(f, "UeCtrlRemoteUeReportInd"),
            SapMsgInner::UeCtrlRelaySelectionReq(_) => write!(f, "UeCtrlRelaySelectionReq"),
            SapMsgInner::UeCtrlRelaySelectionConf(_) => write!(f, "UeCtrlRelaySelectionConf"),

            // AS-SAP
            SapMsgInner::AsSendDataReq(_) => write!(f, "AsSendDataReq"),
            SapMsgInner::AsSendSidelinkDataReq(_) => write!(f, "AsSendSidelinkDataReq"),
            SapMsgInner::AsActivateSlrbReq(_) => write!(f, "AsActivateSlrbReq"),
            SapMsgInner::AsDeactivateSlrbReq(_) => write!(f, "AsDeactivateSlrbReq"),
            SapMsgInner::AsConnectReq(_) => write!(f, "AsConnectReq"),
            SapMsgInner::AsDisconnectReq(_) => write!(f, "AsDisconnectReq"),
            SapMsgInner::AsConnectionInd(_) => write!(f, "AsConnectionInd"),
            SapMsgInner::AsRecvDataInd(_) => write!(f, "AsRecvDataInd"),
            SapMsgInner::AsSlrbActivatedInd(_) => write!(f, "AsSlrbActivatedInd"),

            // NAS-SAP
            SapMsgInner::NasActivateSlBearerReq(_) => write!(f, "NasActivateSlBearerReq"),
            SapMsgInner::NasDeactivateSlBearerReq(_) => write!(f, "NasDeactivateSlBearerReq"),
            SapMsgInner::NasSetForwardUpReq(_) => write!(f, "NasSetForwardUpReq"),
            SapMsgInner::NasRemoveForwardUpReq(_) => write!(f, "NasRemoveForwardUpReq"),
            SapMsgInner::NasSendReq(_) => write!(f, "NasSendReq"),
            SapMsgInner::NasActivateEpsBearerReq(_) => write!(f, "NasActivateEpsBearerReq"),
            SapMsgInner::NasConnectReq(_) => write!(f, "NasConnectReq"),
            SapMsgInner::NasConfigureU2nRelayReq(_) => write!(f, "NasConfigureU2nRelayReq"),

            // IP-SAP
            SapMsgInner::IpAddDeviceReq(_) => write!(f, "IpAddDeviceReq"),
            SapMsgInner::IpAssignAddressReq(_) => write!(f, "IpAssignAddressReq"),
            SapMsgInner::IpDefaultRouteReq(_) => write!(f, "IpDefaultRouteReq"),
            SapMsgInner::IpSetForwardingReq(_) => write!(f, "IpSetForwardingReq"),
            SapMsgInner::IpSetDownReq(_) => write!(f, "IpSetDownReq"),
            SapMsgInner::IpRemoveAddressReq(_) => write!(f, "IpRemoveAddressReq"),
            SapMsgInner::IpRemoveDeviceReq(_) => write!(f, "IpRemoveDeviceReq"),
            SapMsgInner::IpForwardUpInd(_) => write!(f, "IpForwardUpInd"),

            SapMsgInner::HelperRemoteUeContextConnected(_) => write!(f, "HelperRemoteUeContextConnected"),

            // Traces
            SapMsgInner::TracePc5ConnectionStatus(_) => write!(f, "TracePc5ConnectionStatus"),
            SapMsgInner::TraceRelayUeSelection(_) => write!(f, "TraceRelayUeSelection"),
            SapMsgInner::TraceDiscoversAllRelays(_) => write!(f, "TraceDiscoversAllRelays"),
            SapMsgInner::TraceRemoteConnectionStart(_) => write!(f, "TraceRemoteConnectionStart"),
            SapMsgInner::TraceRemoteConnectionEstablished(_) => write!(f, "TraceRemoteConnectionEstablished"),
            SapMsgInner::TraceRelayRxPacket(_) => write!(f, "TraceRelayRxPacket"),
            SapMsgInner::TraceNasStateTransition(_) => write!(f, "TraceNasStateTransition"),
        }
    }
}

#[derive(Debug)]
pub struct SapMsg {
    pub sap: Sap,
    pub src: SlEntity,
    pub dest: SlEntity,
    /// Simulation time at which the message was created
    pub time: Duration,

    pub msg: SapMsgInner
}

impl SapMsg {
    pub fn new(
        sap: Sap,
        src: SlEntity,
        dest: SlEntity,
        time: Duration,
        msg: SapMsgInner
    ) -> Self {
        Self {
            sap,
            src,
            dest,
            time,
            msg
        }
    }

    pub fn get_source(&self) -> &SlEntity {
        &self.src
    }
    pub fn get_dest(&self) -> &SlEntity {
        &self.dest
    }
    pub fn get_sap(&self) -> &Sap {
        &self.sap
    }
}
