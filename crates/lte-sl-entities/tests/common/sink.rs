use lte_sl_core::sl_entities::SlEntity;
use lte_sl_entities::{MessageQueue, SlEntityTrait};
use lte_sl_saps::SapMsg;

/// A sidelink entity sink for testing purposes
/// Collects all received SapMsg messages for later inspection
pub struct Sink {
    component: SlEntity,
    msgqueue: Vec<SapMsg>,
}

impl Sink {
    pub fn new(component: SlEntity) -> Self {
        Self {
            component,
            msgqueue: vec![],
        }
    }

    pub fn take_msgqueue(&mut self) -> Vec<SapMsg> {
        std::mem::take(&mut self.msgqueue)
    }
}

impl SlEntityTrait for Sink {

    fn entity(&self) -> SlEntity {
        self.component
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?}", message);
        self.msgqueue.push(message);
    }
}
