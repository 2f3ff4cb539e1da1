//! IP-SAP: configuration of the node IP stack and packets delivered to it

use std::net::{IpAddr, Ipv6Addr};

use lte_sl_core::IfIndex;

use crate::packet::IpPacket;

/// A sidelink net device was created for a relay link
#[derive(Debug, Clone)]
pub struct IpAddDeviceReq {
    pub if_index: IfIndex,
    pub link_addr: u64,
}

#[derive(Debug, Clone)]
pub struct IpAssignAddressReq {
    pub if_index: IfIndex,
    pub addr: Ipv6Addr,
    pub prefix_len: u8,
}

#[derive(Debug, Clone)]
pub struct IpDefaultRouteReq {
    pub gateway: Ipv6Addr,
    pub if_index: IfIndex,
}

#[derive(Debug, Clone)]
pub struct IpSetForwardingReq {
    pub if_index: IfIndex,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct IpSetDownReq {
    pub if_index: IfIndex,
}

#[derive(Debug, Clone)]
pub struct IpRemoveAddressReq {
    pub if_index: IfIndex,
    pub addr: IpAddr,
}

#[derive(Debug, Clone)]
pub struct IpRemoveDeviceReq {
    pub if_index: IfIndex,
}

/// Received packet passed up by the NAS. `target` is None for the default
/// (network) device.
#[derive(Debug, Clone)]
pub struct IpForwardUpInd {
    pub target: Option<IfIndex>,
    pub packet: IpPacket,
}
