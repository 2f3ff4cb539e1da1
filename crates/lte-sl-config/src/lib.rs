//! Sidelink stack configuration management
//!
//! This crate provides configuration loading and parsing for the sidelink UE stack:
//! - TOML configuration file parsing
//! - Stack configuration structures
//! - Pool configuration patches applied on top of the pool factory defaults

pub mod stack_config;
pub mod stack_config_pool;
pub mod toml_config;

pub use stack_config::*;
pub use stack_config_pool::*;
pub use toml_config::*;
