pub mod comm_resource_pool;
pub mod disc_resource_pool;
pub mod disc_scheduled;
pub mod hopping_config_comm;
pub mod mac_main_config_sl;
pub mod preconfig_comm_pool;
pub mod preconfig_disc_pool;
pub mod relay_config;
pub mod tf_resource_config;
pub mod trpt_subset;
pub mod tx_parameters;

pub use comm_resource_pool::*;
pub use disc_resource_pool::*;
pub use disc_scheduled::*;
pub use hopping_config_comm::*;
pub use mac_main_config_sl::*;
pub use preconfig_comm_pool::*;
pub use preconfig_disc_pool::*;
pub use relay_config::*;
pub use tf_resource_config::*;
pub use trpt_subset::*;
pub use tx_parameters::*;
