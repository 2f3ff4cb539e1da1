use std::net::IpAddr;

/// IP protocol numbers used by the packet filters
pub const PROTO_UDP: u8 = 17;
pub const PROTO_TCP: u8 = 6;

/// The parts of an IP packet the NAS looks at when classifying it.
/// Ports are only meaningful for UDP and TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpPacket {
    pub src: IpAddr,
    pub dst: IpAddr,
    pub protocol: u8,
    pub src_port: u16,
    pub dst_port: u16,
    pub tos: u8,
    pub payload: Vec<u8>,
}

impl IpPacket {
    /// UDP packet with the given payload
    pub fn udp(src: IpAddr, src_port: u16, dst: IpAddr, dst_port: u16, payload: Vec<u8>) -> Self {
        Self { src, dst, protocol: PROTO_UDP, src_port, dst_port, tos: 0, payload }
    }

    pub fn is_ipv6(&self) -> bool {
        self.dst.is_ipv6()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Returns whether the first `prefix_len` bits of `a` and `b` are equal.
/// Addresses of different families never match.
pub fn prefix_match(a: IpAddr, b: IpAddr, prefix_len: u8) -> bool {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V4(b)) => {
            let len = prefix_len.min(32) as u32;
            let mask = if len == 0 { 0 } else { u32::MAX << (32 - len) };
            (u32::from(a) & mask) == (u32::from(b) & mask)
        }
        (IpAddr::V6(a), IpAddr::V6(b)) => {
            let len = prefix_len.min(128) as u32;
            let mask = if len == 0 { 0 } else { u128::MAX << (128 - len) };
            (u128::from(a) & mask) == (u128::from(b) & mask)
        }
        _ => false,
    }
}

/// Full-length prefix for the address family of `addr`
pub fn host_prefix_len(addr: IpAddr) -> u8 {
    if addr.is_ipv4() { 32 } else { 128 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let a: IpAddr = "7777:f00e:0:1::1".parse().unwrap();
        let b: IpAddr = "7777:f00e:0:1::2".parse().unwrap();
        let c: IpAddr = "7777:f00e:0:2::1".parse().unwrap();
        assert!(prefix_match(a, b, 64));
        assert!(!prefix_match(a, b, 128));
        assert!(!prefix_match(a, c, 64));
        assert!(prefix_match(a, c, 0));

        let v4a: IpAddr = "10.0.0.1".parse().unwrap();
        let v4b: IpAddr = "10.0.0.200".parse().unwrap();
        assert!(prefix_match(v4a, v4b, 24));
        assert!(!prefix_match(v4a, v4b, 32));
        assert!(!prefix_match(v4a, a, 0));
    }
}
