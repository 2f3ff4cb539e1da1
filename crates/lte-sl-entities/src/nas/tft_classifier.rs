use std::collections::BTreeMap;

use lte_sl_core::BearerId;
use lte_sl_saps::epc_tft::{EpcTft, EpcTftDirection};
use lte_sl_saps::packet::{IpPacket, PROTO_TCP, PROTO_UDP};

/// Maps packets to the EPS bearer whose TFT matches them
#[derive(Debug, Default)]
pub struct TftClassifier {
    tfts: BTreeMap<BearerId, EpcTft>,
}

impl TftClassifier {
    pub fn new() -> Self {
        Self { tfts: BTreeMap::new() }
    }

    pub fn add(&mut self, tft: EpcTft, bid: BearerId) {
        tracing::debug!("add tft for bid {}", bid);
        self.tfts.insert(bid, tft);
    }

    pub fn delete(&mut self, bid: BearerId) {
        self.tfts.remove(&bid);
    }

    pub fn len(&self) -> usize {
        self.tfts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tfts.is_empty()
    }

    /// Returns the bearer for `packet`, 0 when no TFT matches.
    /// Bearers added last take precedence.
    pub fn classify(&self, packet: &IpPacket, direction: EpcTftDirection) -> BearerId {
        let (local, remote) = match direction {
            EpcTftDirection::Uplink => (packet.src, packet.dst),
            _ => (packet.dst, packet.src),
        };
        let (local_port, remote_port) = if packet.protocol == PROTO_UDP || packet.protocol == PROTO_TCP {
            match direction {
                EpcTftDirection::Uplink => (packet.src_port, packet.dst_port),
                _ => (packet.dst_port, packet.src_port),
            }
        } else {
            (0, 0)
        };

        for (bid, tft) in self.tfts.iter().rev() {
            if tft.matches(direction, remote, local, remote_port, local_port, packet.tos) {
                tracing::trace!("packet {} -> {} matches bid {}", packet.src, packet.dst, bid);
                return *bid;
            }
        }
        0
    }
}
