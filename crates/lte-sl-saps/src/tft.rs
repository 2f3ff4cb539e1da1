use std::net::IpAddr;
use std::time::Duration;

use lte_sl_core::L2Id;

use crate::packet::{host_prefix_len, prefix_match};

/// Direction of the traffic a sidelink TFT applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlTftDirection {
    Transmit,
    Receive,
    Bidirectional,
}

/// Whether the address of a TFT is matched against the local or the remote end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlTftAddressType {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CastType {
    #[default]
    Invalid,
    Unicast,
    Groupcast,
    Broadcast,
}

impl core::fmt::Display for CastType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CastType::Invalid => write!(f, "Invalid"),
            CastType::Unicast => write!(f, "Unicast"),
            CastType::Groupcast => write!(f, "Groupcast"),
            CastType::Broadcast => write!(f, "Broadcast"),
        }
    }
}

/// Traffic profile of a sidelink radio bearer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SidelinkInfo {
    pub cast_type: CastType,
    pub src_l2_id: L2Id,
    pub dst_l2_id: L2Id,
    pub harq_enabled: bool,
    /// Packet delay budget
    pub pdb: Duration,
    /// Resource reservation interval, zero for dynamic grants
    pub rri: Duration,
    pub dynamic: bool,
    pub priority: u8,
    pub lc_id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AddrFilter {
    addr: IpAddr,
    prefix_len: u8,
}

impl AddrFilter {
    fn matches(&self, addr: IpAddr) -> bool {
        prefix_match(self.addr, addr, self.prefix_len)
    }
}

/// Sidelink traffic flow template. Binds IP flows to the sidelink bearer
/// towards `remote_l2`.
///
/// Equality is structural over every field, so two TFTs built from the same
/// parameters are interchangeable when adding and removing them from lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LteSlTft {
    direction: SlTftDirection,
    local: Option<AddrFilter>,
    remote: Option<AddrFilter>,
    remote_l2: L2Id,
    sl_info: Option<SidelinkInfo>,
}

fn check_l2(remote_l2: L2Id) {
    assert!(
        remote_l2 != 0 && remote_l2 & 0xFF00_0000 == 0,
        "Remote L2 ID {:#x} must be a nonzero 24 bit value",
        remote_l2
    );
}

impl LteSlTft {
    /// TFT matching a single host address
    pub fn new(direction: SlTftDirection, addr_type: SlTftAddressType, addr: IpAddr, remote_l2: L2Id) -> Self {
        Self::with_prefix(direction, addr_type, addr, host_prefix_len(addr), remote_l2)
    }

    /// TFT matching every address sharing the first `prefix_len` bits with `addr`
    pub fn with_prefix(
        direction: SlTftDirection,
        addr_type: SlTftAddressType,
        addr: IpAddr,
        prefix_len: u8,
        remote_l2: L2Id,
    ) -> Self {
        check_l2(remote_l2);
        let filter = Some(AddrFilter { addr, prefix_len });
        let (local, remote) = match addr_type {
            SlTftAddressType::Local => (filter, None),
            SlTftAddressType::Remote => (None, filter),
        };
        Self { direction, local, remote, remote_l2, sl_info: None }
    }

    /// TFT matching all traffic, used by a remote UE towards its relay
    pub fn all_traffic(direction: SlTftDirection, remote_l2: L2Id) -> Self {
        check_l2(remote_l2);
        Self { direction, local: None, remote: None, remote_l2, sl_info: None }
    }

    /// Attaches the traffic profile of the bearer. The cast type must be set.
    pub fn with_sidelink_info(mut self, info: SidelinkInfo) -> Self {
        assert!(info.cast_type != CastType::Invalid, "Invalid cast type for sidelink TFT");
        self.sl_info = Some(info);
        self
    }

    /// Returns whether a packet between `local` and `remote` is covered
    pub fn matches(&self, local: IpAddr, remote: IpAddr) -> bool {
        let local_ok = self.local.map_or(true, |f| f.matches(local));
        let remote_ok = self.remote.map_or(true, |f| f.matches(remote));
        local_ok && remote_ok
    }

    pub fn remote_l2_address(&self) -> L2Id {
        self.remote_l2
    }

    pub fn direction(&self) -> SlTftDirection {
        self.direction
    }

    pub fn sidelink_info(&self) -> Option<&SidelinkInfo> {
        self.sl_info.as_ref()
    }

    pub fn is_receive(&self) -> bool {
        self.direction != SlTftDirection::Transmit
    }

    pub fn is_transmit(&self) -> bool {
        self.direction != SlTftDirection::Receive
    }
}

impl core::fmt::Display for LteSlTft {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SlTft[{:?} l2 {:#08x}", self.direction, self.remote_l2)?;
        if let Some(l) = self.local {
            write!(f, " local {}/{}", l.addr, l.prefix_len)?;
        }
        if let Some(r) = self.remote {
            write!(f, " remote {}/{}", r.addr, r.prefix_len)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_local_and_remote_both_checked() {
        let mut tft = LteSlTft::new(SlTftDirection::Bidirectional, SlTftAddressType::Local, addr("10.0.0.1"), 5);
        tft.remote = Some(AddrFilter { addr: addr("10.0.0.2"), prefix_len: 32 });
        assert!(tft.matches(addr("10.0.0.1"), addr("10.0.0.2")));
        // A local mismatch is not hidden by a remote match
        assert!(!tft.matches(addr("10.0.0.9"), addr("10.0.0.2")));
        assert!(!tft.matches(addr("10.0.0.1"), addr("10.0.0.9")));
    }

    #[test]
    fn test_prefix_tft() {
        let tft = LteSlTft::with_prefix(
            SlTftDirection::Receive,
            SlTftAddressType::Remote,
            addr("7777:f00e:0:3::"),
            64,
            0x10,
        );
        assert!(tft.matches(addr("::1"), addr("7777:f00e:0:3::42")));
        assert!(!tft.matches(addr("::1"), addr("7777:f00e:0:4::42")));
        assert!(tft.is_receive());
        assert!(!tft.is_transmit());
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = LteSlTft::new(SlTftDirection::Receive, SlTftAddressType::Local, addr("::2"), 7);
        let b = LteSlTft::new(SlTftDirection::Receive, SlTftAddressType::Local, addr("::2"), 7);
        assert_eq!(a, b);

        // Differing in a single field is enough to be unequal
        let c = LteSlTft::new(SlTftDirection::Receive, SlTftAddressType::Local, addr("::2"), 8);
        let d = LteSlTft::new(SlTftDirection::Bidirectional, SlTftAddressType::Local, addr("::2"), 7);
        let e = LteSlTft::new(SlTftDirection::Receive, SlTftAddressType::Remote, addr("::2"), 7);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(a, e);
    }

    #[test]
    fn test_all_traffic_matches_anything() {
        let tft = LteSlTft::all_traffic(SlTftDirection::Bidirectional, 0xABCDEF);
        assert!(tft.matches(addr("1.2.3.4"), addr("5.6.7.8")));
        assert!(tft.matches(addr("::1"), addr("::2")));
    }

    #[test]
    #[should_panic(expected = "must be a nonzero 24 bit value")]
    fn test_zero_l2_rejected() {
        LteSlTft::all_traffic(SlTftDirection::Bidirectional, 0);
    }

    #[test]
    #[should_panic(expected = "must be a nonzero 24 bit value")]
    fn test_wide_l2_rejected() {
        LteSlTft::new(SlTftDirection::Transmit, SlTftAddressType::Remote, addr("::1"), 0x0100_0000);
    }

    #[test]
    #[should_panic(expected = "Invalid cast type")]
    fn test_invalid_cast_type() {
        LteSlTft::all_traffic(SlTftDirection::Bidirectional, 1).with_sidelink_info(SidelinkInfo::default());
    }
}
