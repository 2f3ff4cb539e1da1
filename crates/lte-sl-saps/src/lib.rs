#![allow(dead_code)]

pub mod as_sap;
pub mod epc_tft;
pub mod helper;
pub mod ip;
pub mod nas;
pub mod packet;
pub mod sapmsg;
pub mod tft;
pub mod trace;
pub mod ue_ctrl;

pub use sapmsg::*;
