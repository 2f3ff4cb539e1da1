use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use lte_sl_config::SharedConfig;
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_saps::SapMsg;

use crate::SlEntityTrait;

/// One sidelink subframe
pub const TICK: Duration = Duration::from_millis(1);

/// FIFO of primitives waiting for delivery. Entities only ever append; a
/// primitive posted while handling another one is delivered after everything
/// queued before it.
#[derive(Default)]
pub struct MessageQueue {
    pending: VecDeque<SapMsg>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, message: SapMsg) {
        self.pending.push_back(message);
    }

    pub fn pop_front(&mut self) -> Option<SapMsg> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns all queued messages, in order
    pub fn drain(&mut self) -> Vec<SapMsg> {
        self.pending.drain(..).collect()
    }
}

/// Owns the UE entities and hands each primitive to its destination, one
/// subframe at a time.
pub struct MessageRouter {
    config: SharedConfig,
    entities: HashMap<SlEntity, Box<dyn SlEntityTrait>>,
    queue: MessageQueue,
    now: Duration,
}

impl MessageRouter {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            entities: HashMap::new(),
            queue: MessageQueue::new(),
            now: Duration::ZERO,
        }
    }

    /// Moves simulation time, e.g. to jump to a scripted event
    pub fn set_time(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Registers an entity, replacing any earlier one of the same kind. The
    /// entity gets the router's configuration.
    pub fn register_entity(&mut self, mut entity: Box<dyn SlEntityTrait>) {
        let kind = entity.entity();
        if self.entities.contains_key(&kind) {
            tracing::warn!("register_entity: replacing {:?}", kind);
        } else {
            tracing::debug!("register_entity {:?}", kind);
        }
        entity.set_config(self.config.clone());
        self.entities.insert(kind, entity);
    }

    pub fn get_entity(&mut self, kind: SlEntity) -> Option<&mut dyn SlEntityTrait> {
        self.entities.get_mut(&kind).map(|e| e.as_mut())
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        tracing::debug!("submit {:?}: {:?} -> {:?}", message.get_sap(), message.get_source(), message.get_dest());
        self.queue.push_back(message);
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    /// Delivers the oldest queued primitive. Returns false when the queue was empty.
    pub fn deliver_message(&mut self) -> bool {
        let Some(message) = self.queue.pop_front() else {
            return false;
        };
        let dest = *message.get_dest();
        match self.entities.get_mut(&dest) {
            Some(entity) => {
                tracing::trace!("deliver {:?}: {:?} -> {:?} {}", message.get_sap(), message.get_source(), dest, message.msg);
                entity.rx_prim(&mut self.queue, message);
            }
            None => {
                tracing::warn!("deliver: no {:?} registered, dropping {} from {:?}", dest, message.msg, message.get_source());
            }
        }
        true
    }

    /// Delivers until the queue is empty, including whatever the deliveries post
    pub fn deliver_all_messages(&mut self) {
        while self.deliver_message() {}
    }

    fn tick_start(&mut self) {
        tracing::debug!("--- subframe {:?} ---", self.now);
        for entity in self.entities.values_mut() {
            entity.tick_start(&mut self.queue, self.now);
        }
    }

    fn tick_end(&mut self) {
        for entity in self.entities.values_mut() {
            entity.tick_end(&mut self.queue, self.now);
        }
        self.deliver_all_messages();
        self.now += TICK;
    }

    /// Runs `num_ticks` subframes, or forever when `None`
    pub fn run_stack(&mut self, num_ticks: Option<usize>) {
        let mut ticks = 0;
        while num_ticks.is_none_or(|n| ticks < n) {
            self.tick_start();
            self.deliver_all_messages();
            self.tick_end();
            ticks += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_core::Sap;
    use lte_sl_saps::SapMsgInner;
    use lte_sl_saps::as_sap::AsConnectReq;

    /// Records arrival times and bounces NAS primitives back to itself once
    struct Echo {
        seen: Vec<Duration>,
    }

    impl SlEntityTrait for Echo {
        fn entity(&self) -> SlEntity {
            SlEntity::Rrc
        }

        fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
            self.seen.push(message.time);
            if message.get_source() == &SlEntity::Nas {
                queue.push_back(SapMsg::new(Sap::AsSap, SlEntity::Rrc, SlEntity::Rrc, message.time, message.msg));
            }
        }
    }

    fn req(time: Duration) -> SapMsg {
        SapMsg::new(Sap::AsSap, SlEntity::Nas, SlEntity::Rrc, time, SapMsgInner::AsConnectReq(AsConnectReq {}))
    }

    #[test]
    fn test_delivers_follow_ups_and_drops_unrouted() {
        let mut router = MessageRouter::new(SharedConfig::new(1, 0x10));
        router.register_entity(Box::new(Echo { seen: vec![] }));
        router.submit_message(req(Duration::from_millis(3)));
        router.submit_message(SapMsg::new(Sap::AsSap, SlEntity::Rrc, SlEntity::Nas, Duration::ZERO,
            SapMsgInner::AsConnectReq(AsConnectReq {})));
        router.deliver_all_messages();
        assert_eq!(router.pending_messages(), 0);

        let echo = router.get_entity(SlEntity::Rrc).and_then(|e| e.as_any_mut().downcast_mut::<Echo>());
        assert_eq!(echo.map(|e| e.seen.len()), Some(2));
    }

    #[test]
    fn test_run_stack_advances_time() {
        let mut router = MessageRouter::new(SharedConfig::new(1, 0x10));
        router.set_time(Duration::from_millis(10));
        router.run_stack(Some(5));
        assert_eq!(router.now(), Duration::from_millis(15));
    }
}
