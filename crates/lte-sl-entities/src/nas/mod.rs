pub mod epc_ue_nas;
pub mod tft_classifier;

pub use epc_ue_nas::EpcUeNas;
