use std::time::Duration;

use as_any::AsAny;
use lte_sl_config::SharedConfig;
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_saps::SapMsg;
use crate::MessageQueue;

/// Trait for sidelink UE entities
/// Used by MessageRouter for passing messages between entities
pub trait SlEntityTrait: Send + AsAny {
    /// Returns the entity type identifier
    fn entity(&self) -> SlEntity;

    /// Handle incoming SAP primitive
    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg);

    /// Update configuration (optional)
    #[allow(dead_code)]
    fn set_config(&mut self, _config: SharedConfig) {}

    /// Called at the start of each subframe tick
    fn tick_start(&mut self, _queue: &mut MessageQueue, _now: Duration) { }

    /// Called at the end of each subframe tick
    fn tick_end(&mut self, _queue: &mut MessageQueue, _now: Duration) -> bool { false }
}
