//! Sidelink resource pools: derivation of the usable subframes and PRBs of a
//! communication or discovery pool, and the mapping of logical resource
//! indices to physical transmissions (TS 36.213 14).

pub mod comm_pool;
pub mod disc_pool;
pub mod gold;
pub mod itrp;
pub mod period;
pub mod tx_comm_pool;
pub mod tx_disc_pool;

pub use comm_pool::{PoolRole, SidelinkCommResourcePool};
pub use disc_pool::{DiscPoolType, SidelinkDiscResourcePool};
pub use period::SidelinkTransmissionInfo;
pub use tx_comm_pool::SidelinkTxCommResourcePool;
pub use tx_disc_pool::SidelinkTxDiscResourcePool;

/// Pools monitored for reception carry no extra state
pub type SidelinkRxCommResourcePool = SidelinkCommResourcePool;
pub type SidelinkRxDiscResourcePool = SidelinkDiscResourcePool;
