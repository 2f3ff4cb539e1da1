//! Sidelink RRC information elements
//!
//! Plain data definitions for sidelink communication and discovery pool
//! configuration (TS 36.331), the conversions between 3GPP enumerations and
//! their physical meaning, and factories that build pool IEs from named
//! configuration values.

pub mod converters;
pub mod enums;
pub mod factory;
pub mod ies;

pub use ies::*;
