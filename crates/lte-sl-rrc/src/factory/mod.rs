//! Builders producing pool IEs from named configuration values.
//!
//! Setters store raw tokens and numbers as given. All validation happens in
//! `create_pool()`, which panics on anything it cannot map.

pub mod comm_pool_factory;
pub mod disc_pool_factory;

pub use comm_pool_factory::{CommPoolSettings, SlCommPoolFactory, SlPoolFactory, SlPreconfigCommPoolFactory};
pub use disc_pool_factory::{SlDiscPoolFactory, SlPreconfigDiscPoolFactory};

use crate::enums::sl_cp_len::SlCpLen;
use crate::enums::sl_tx_alpha::SlTxAlpha;

pub(crate) fn parse_cp_len(token: &str, err: &str) -> SlCpLen {
    SlCpLen::from_token(token).unwrap_or_else(|| panic!("{}", err))
}

pub(crate) fn parse_alpha(token: &str, err: &str) -> SlTxAlpha {
    SlTxAlpha::from_token(token).unwrap_or_else(|| panic!("{}", err))
}
