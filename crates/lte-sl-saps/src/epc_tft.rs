use std::net::{IpAddr, Ipv4Addr};

use crate::packet::prefix_match;

/// Direction a packet filter applies to (TS 24.008 10.5.6.12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EpcTftDirection {
    Downlink = 1,
    Uplink = 2,
    Bidirectional = 3,
}

impl EpcTftDirection {
    fn covers(self, d: EpcTftDirection) -> bool {
        (self as u8) & (d as u8) != 0
    }
}

/// One packet filter of an EPC TFT. A zero prefix length matches any address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketFilter {
    pub precedence: u8,
    pub direction: EpcTftDirection,
    pub remote_address: IpAddr,
    pub remote_prefix_len: u8,
    pub local_address: IpAddr,
    pub local_prefix_len: u8,
    pub remote_port_start: u16,
    pub remote_port_end: u16,
    pub local_port_start: u16,
    pub local_port_end: u16,
    pub type_of_service: u8,
    pub type_of_service_mask: u8,
}

impl Default for PacketFilter {
    fn default() -> Self {
        Self {
            precedence: 255,
            direction: EpcTftDirection::Bidirectional,
            remote_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            remote_prefix_len: 0,
            local_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            local_prefix_len: 0,
            remote_port_start: 0,
            remote_port_end: u16::MAX,
            local_port_start: 0,
            local_port_end: u16::MAX,
            type_of_service: 0,
            type_of_service_mask: 0,
        }
    }
}

fn addr_ok(filter_addr: IpAddr, prefix_len: u8, addr: IpAddr) -> bool {
    prefix_len == 0 || prefix_match(filter_addr, addr, prefix_len)
}

impl PacketFilter {
    pub fn matches(
        &self,
        direction: EpcTftDirection,
        remote: IpAddr,
        local: IpAddr,
        remote_port: u16,
        local_port: u16,
        tos: u8,
    ) -> bool {
        self.direction.covers(direction)
            && addr_ok(self.remote_address, self.remote_prefix_len, remote)
            && addr_ok(self.local_address, self.local_prefix_len, local)
            && (self.remote_port_start..=self.remote_port_end).contains(&remote_port)
            && (self.local_port_start..=self.local_port_end).contains(&local_port)
            && (tos & self.type_of_service_mask) == (self.type_of_service & self.type_of_service_mask)
    }
}

/// EPC traffic flow template: an ordered set of packet filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpcTft {
    filters: Vec<PacketFilter>,
}

impl EpcTft {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// TFT with a single match-all bidirectional filter
    pub fn default_tft() -> Self {
        Self { filters: vec![PacketFilter::default()] }
    }

    /// Adds a filter, keeping the list sorted by precedence. At most 16 filters.
    pub fn add(&mut self, filter: PacketFilter) -> usize {
        assert!(self.filters.len() < 16, "cannot have more than 16 packet filters in a TFT");
        let pos = self.filters.iter().position(|f| f.precedence > filter.precedence).unwrap_or(self.filters.len());
        self.filters.insert(pos, filter);
        pos
    }

    pub fn matches(
        &self,
        direction: EpcTftDirection,
        remote: IpAddr,
        local: IpAddr,
        remote_port: u16,
        local_port: u16,
        tos: u8,
    ) -> bool {
        self.filters.iter().any(|f| f.matches(direction, remote, local, remote_port, local_port, tos))
    }

    pub fn filters(&self) -> &[PacketFilter] {
        &self.filters
    }
}

impl Default for EpcTft {
    fn default() -> Self {
        Self::default_tft()
    }
}

/// QoS class identifiers used by the stack (TS 23.203 table 6.1.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Qci {
    GbrConvVoice = 1,
    GbrMcPushToTalk = 65,
    NgbrMcDelaySignal = 69,
    NgbrMcData = 70,
    #[default]
    NgbrVideoTcpDefault = 9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EpsBearer {
    pub qci: Qci,
}

impl EpsBearer {
    pub fn new(qci: Qci) -> Self {
        Self { qci }
    }
}
