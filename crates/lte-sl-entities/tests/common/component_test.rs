use std::time::Duration;

use lte_sl_config::{SharedConfig, SlStackConfig};
use lte_sl_core::sl_entities::SlEntity;
use lte_sl_core::{Imsi, L2Id, RelayRole};
use lte_sl_entities::controller::{BasicUeController, CampaignUeController};
use lte_sl_entities::nas::EpcUeNas;
use lte_sl_entities::{MessageRouter, SlEntityTrait};
use lte_sl_saps::SapMsg;

use super::sink::Sink;

/// Creates a default config for testing. It can still be modified as needed
/// before passing it to the ComponentTest constructor
pub fn default_test_config(imsi: Imsi, l2_id: L2Id, role: RelayRole) -> SlStackConfig {
    let mut cfg = SlStackConfig::new(imsi, l2_id);
    cfg.ue.role = Some(role);
    cfg.controller.rng_seed = Some(1);
    if role == RelayRole::RelayUe {
        cfg.nas.relay_drb_id = 3;
    }
    cfg
}

/// Infrastructure for testing sidelink entities
/// Quick setup of the NAS and relay controller behind a router
/// Supports optional sinks for collecting messages for later inspection
pub struct ComponentTest {
    pub config: SharedConfig,
    pub router: MessageRouter,
    pub sinks: Vec<SlEntity>,
}

impl ComponentTest {

    pub fn new(config: SlStackConfig, start_time: Option<Duration>) -> Self {
        let shared_config = SharedConfig::from_config(config);
        let mut mr = MessageRouter::new(shared_config.clone());
        mr.set_time(start_time.unwrap_or_default());

        Self {
            config: shared_config,
            router: mr,
            sinks: vec![],
        }
    }

    pub fn populate_entities(&mut self, components: Vec<SlEntity>, sinks: Vec<SlEntity>) {
        self.create_components(components);
        self.create_sinks(sinks);
    }

    fn create_components(&mut self, components: Vec<SlEntity>) {
        for component in components.iter() {
            match component {
                SlEntity::Nas => {
                    let nas = EpcUeNas::new(self.config.clone());
                    self.register_entity(nas);
                }
                SlEntity::UeController => {
                    // Campaign configs get the campaign controller
                    if self.config.config().controller.campaign.is_some() {
                        let ctrl = CampaignUeController::new(self.config.clone());
                        self.register_entity(ctrl);
                    } else {
                        let ctrl = BasicUeController::new(self.config.clone());
                        self.register_entity(ctrl);
                    }
                }
                _ => {
                    panic!("Component not implemented: {:?}", component);
                }
            }
        }
    }

    fn create_sinks(&mut self, sinks: Vec<SlEntity>) {
        for sink in sinks.iter() {
            assert!(!self.sinks.contains(sink), "Sink already exists: {:?}", sink);
            assert!(self.router.get_entity(*sink).is_none(), "Sink already registered as entity: {:?}", sink);

            self.sinks.push(*sink);
            let sink = Sink::new(*sink);
            self.router.register_entity(Box::new(sink));
        }
    }

    pub fn register_entity<T: 'static + SlEntityTrait>(&mut self, entity: T) {
        self.router.register_entity(Box::new(entity));
    }

    pub fn run_stack(&mut self, num_ticks: Option<usize>) {
        self.router.run_stack(num_ticks);
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        self.router.submit_message(message);
    }

    pub fn deliver_all_messages(&mut self) {
        self.router.deliver_all_messages();
    }

    /// Takes the messages collected by one sink
    pub fn take_sink(&mut self, sink: SlEntity) -> Vec<SapMsg> {
        self.router
            .get_entity(sink)
            .and_then(|component| component.as_any_mut().downcast_mut::<Sink>())
            .map(|sink| sink.take_msgqueue())
            .unwrap_or_default()
    }

    pub fn dump_sinks(&mut self) -> Vec<SapMsg> {
        let mut msgs = vec![];
        for sink in self.sinks.clone() {
            msgs.append(&mut self.take_sink(sink));
        }
        msgs
    }

    /// Returns the registered entity of the given concrete type
    pub fn entity_mut<T: 'static>(&mut self, entity: SlEntity) -> Option<&mut T> {
        self.router.get_entity(entity).and_then(|e| e.as_any_mut().downcast_mut::<T>())
    }
}
