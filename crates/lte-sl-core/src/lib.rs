//! Core utilities for the LTE Sidelink stack
//!
//! This crate provides fundamental types and utilities used across the sidelink crates:
//! - SubframeInfo for frame/subframe timing with SFN wrap-around
//! - Entity and SAP identifiers used by the message router
//! - Relay roles and identifier aliases
//! - Common macros and debug utilities

pub mod debug;
pub mod relay_policy;
pub mod relay_role;
pub mod sl_common;
pub mod sl_entities;
pub mod subframe;

// Re-export commonly used items
pub use relay_policy::{Campaign, RelayUeSelectionAlgorithm};
pub use relay_role::RelayRole;
pub use sl_common::*;
pub use subframe::{SFN_WRAP, SUBFRAMES_PER_SFN_CYCLE, SubframeInfo};

/// Layer 2 identifier of a sidelink peer, 24 bits
pub type L2Id = u32;

/// International Mobile Subscriber Identity
pub type Imsi = u64;

/// ProSe relay service code
pub type ServiceCode = u32;

/// EPS bearer identifier, 1..=11
pub type BearerId = u8;

/// IP interface index on the UE node
pub type IfIndex = u32;

/// Sentinel used for "no relay connection in progress"
pub const NOT_CONNECTING: L2Id = u32::MAX;
