pub mod basic_ue_controller;
pub mod campaign_ue_controller;
pub mod components;
pub mod ue_ctrl_sap;

pub use basic_ue_controller::BasicUeController;
pub use campaign_ue_controller::CampaignUeController;
pub use ue_ctrl_sap::{UeCtrlSapProvider, UeCtrlSapUser};
