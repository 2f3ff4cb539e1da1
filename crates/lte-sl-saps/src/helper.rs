//! Notifications from a relay UE towards the core network side helper

use lte_sl_core::Imsi;

/// A remote UE is reachable through `relay_imsi` using the /64 in `prefix`
#[derive(Debug, Clone)]
pub struct HelperRemoteUeContextConnected {
    pub relay_imsi: Imsi,
    pub remote_imsi: Imsi,
    pub prefix: [u8; 8],
}
