use std::collections::BTreeMap;
use std::net::Ipv6Addr;

use lte_sl_core::{IfIndex, L2Id, RelayRole};

/// Interface index of the device facing the network
pub const NET_DEVICE_IF_INDEX: IfIndex = 1;

/// Prefix length of the subnet behind a relay UE
pub const RELAY_PREFIX_LEN: u8 = 64;

#[derive(Debug, PartialEq, Eq)]
pub enum ControllerErr {
    DeviceNotFound { peer: L2Id },
    DeviceExists { peer: L2Id },
}

/// /64 served by the relay with layer 2 id `relay_l2`
pub fn relay_prefix(relay_l2: L2Id) -> Ipv6Addr {
    Ipv6Addr::new(0x7777, 0xf00e, (relay_l2 >> 16) as u16, (relay_l2 & 0xffff) as u16, 0, 0, 0, 0)
}

/// Address of the relay itself within its prefix
pub fn relay_address(relay_l2: L2Id) -> Ipv6Addr {
    let p = relay_prefix(relay_l2).segments();
    Ipv6Addr::new(p[0], p[1], p[2], p[3], 0, 0, 0, 1)
}

/// Address of a remote UE within the prefix of its relay
pub fn remote_address(relay_l2: L2Id, remote_l2: L2Id) -> Ipv6Addr {
    let p = relay_prefix(relay_l2).segments();
    let iid = (2u64 << 32) | u64::from(remote_l2);
    Ipv6Addr::new(
        p[0], p[1], p[2], p[3],
        (iid >> 48) as u16,
        (iid >> 32) as u16,
        (iid >> 16) as u16,
        iid as u16,
    )
}

/// Sidelink net device created for one relay link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlNetDevice {
    pub peer: L2Id,
    pub role: RelayRole,
    pub if_index: IfIndex,
    pub link_addr: u64,
    /// Own address on this link
    pub addr: Ipv6Addr,
    /// Address of the relay end of the link
    pub relay_addr: Ipv6Addr,
}

/// Devices by peer layer 2 id. Interface indices and link addresses are never reused.
#[derive(Debug)]
pub struct SlNetDeviceMap {
    devices: BTreeMap<L2Id, SlNetDevice>,
    next_if_index: IfIndex,
    next_link_addr: u64,
}

impl Default for SlNetDeviceMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SlNetDeviceMap {
    pub fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
            next_if_index: NET_DEVICE_IF_INDEX + 1,
            next_link_addr: 1,
        }
    }

    /// Creates the device for a link between `self_id` and `peer`
    pub fn add(&mut self, peer: L2Id, self_id: L2Id, role: RelayRole) -> Result<&SlNetDevice, ControllerErr> {
        if self.devices.contains_key(&peer) {
            return Err(ControllerErr::DeviceExists { peer });
        }
        let (relay_l2, addr) = match role {
            RelayRole::RemoteUe => (peer, remote_address(peer, self_id)),
            RelayRole::RelayUe => (self_id, relay_address(self_id)),
        };
        let dev = SlNetDevice {
            peer,
            role,
            if_index: self.next_if_index,
            link_addr: self.next_link_addr,
            addr,
            relay_addr: relay_address(relay_l2),
        };
        self.next_if_index += 1;
        self.next_link_addr += 1;
        tracing::debug!("Created new sidelink device {} for peer {:#08x} with address {}", dev.if_index, peer, dev.addr);
        Ok(self.devices.entry(peer).or_insert(dev))
    }

    pub fn get(&self, peer: L2Id) -> Result<&SlNetDevice, ControllerErr> {
        self.devices.get(&peer).ok_or(ControllerErr::DeviceNotFound { peer })
    }

    pub fn remove(&mut self, peer: L2Id) -> Result<SlNetDevice, ControllerErr> {
        self.devices.remove(&peer).ok_or(ControllerErr::DeviceNotFound { peer })
    }

    pub fn contains(&self, peer: L2Id) -> bool {
        self.devices.contains_key(&peer)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_plan() {
        assert_eq!(relay_prefix(0x123456), "7777:f00e:12:3456::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(relay_address(0x10), "7777:f00e:0:10::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(remote_address(0x10, 0xabcdef), "7777:f00e:0:10:0:2:ab:cdef".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_device_lifecycle() {
        let mut map = SlNetDeviceMap::new();
        let dev = map.add(0x10, 0x20, RelayRole::RemoteUe).cloned().unwrap();
        assert_eq!(dev.if_index, 2);
        assert_eq!(dev.relay_addr, relay_address(0x10));
        assert_eq!(map.add(0x10, 0x20, RelayRole::RemoteUe), Err(ControllerErr::DeviceExists { peer: 0x10 }));

        assert!(map.remove(0x10).is_ok());
        assert_eq!(map.get(0x10), Err(ControllerErr::DeviceNotFound { peer: 0x10 }));
        // Indices keep counting up
        assert_eq!(map.add(0x10, 0x20, RelayRole::RemoteUe).unwrap().if_index, 3);
    }

    #[test]
    fn test_relay_device_uses_own_prefix() {
        let mut map = SlNetDeviceMap::new();
        let dev = map.add(0x20, 0x10, RelayRole::RelayUe).unwrap();
        assert_eq!(dev.addr, relay_address(0x10));
        assert_eq!(&dev.addr.octets()[..8], &relay_prefix(0x10).octets()[..8]);
    }
}
