#![allow(dead_code)]

pub mod controller;
pub mod entity_trait;
pub mod messagerouter;
pub mod nas;
pub mod pool;

// Re-export commonly used items from router
pub use entity_trait::SlEntityTrait;
pub use messagerouter::{MessageQueue, MessageRouter};
