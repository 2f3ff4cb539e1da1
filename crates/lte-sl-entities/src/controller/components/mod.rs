pub mod net_device;
pub mod relay_selection;
