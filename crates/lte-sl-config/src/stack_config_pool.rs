//! Pool configuration as read from the configuration file. Every field is
//! optional and overrides the factory default when present. Tokens and ranges
//! are validated by the factory on build.

use lte_sl_rrc::factory::{
    SlCommPoolFactory, SlDiscPoolFactory, SlPoolFactory, SlPreconfigCommPoolFactory, SlPreconfigDiscPoolFactory,
};
use lte_sl_rrc::{SlCommResourcePool, SlDiscResourcePool, SlPreconfigCommPool, SlPreconfigDiscPool};

#[derive(Debug, Clone, Default)]
pub struct CfgCommPool {
    pub control_cp_len: Option<String>,
    pub control_period: Option<String>,
    pub control_prb_num: Option<u8>,
    pub control_prb_start: Option<u8>,
    pub control_prb_end: Option<u8>,
    pub control_offset: Option<u16>,
    pub control_bitmap: Option<u64>,

    pub data_cp_len: Option<String>,
    pub hopping_parameter: Option<u16>,
    pub hopping_subbands: Option<String>,
    pub hopping_rb_offset: Option<i32>,
    pub hopping_info: Option<u8>,

    pub ue_selected: Option<bool>,
    pub have_trpt_subset: Option<bool>,
    pub trpt_subset: Option<u8>,
    pub data_prb_num: Option<u8>,
    pub data_prb_start: Option<u8>,
    pub data_prb_end: Option<u8>,
    pub data_offset: Option<u16>,
    pub data_bitmap: Option<u64>,

    pub tx_parameters: Option<bool>,
    pub control_tx_alpha: Option<String>,
    pub control_tx_p0: Option<i16>,
    pub data_tx_alpha: Option<String>,
    pub data_tx_p0: Option<i16>,
}

impl CfgCommPool {
    pub fn apply<F: SlPoolFactory>(&self, f: &mut F) {
        if let Some(ref v) = self.control_cp_len {
            f.set_control_cp_len(v);
        }
        if let Some(ref v) = self.control_period {
            f.set_control_period(v);
        }
        if let Some(v) = self.control_prb_num {
            f.set_control_prb_num(v);
        }
        if let Some(v) = self.control_prb_start {
            f.set_control_prb_start(v);
        }
        if let Some(v) = self.control_prb_end {
            f.set_control_prb_end(v);
        }
        if let Some(v) = self.control_offset {
            f.set_control_offset(v);
        }
        if let Some(v) = self.control_bitmap {
            f.set_control_bitmap(v);
        }
        if let Some(ref v) = self.data_cp_len {
            f.set_data_cp_len(v);
        }
        if let Some(v) = self.hopping_parameter {
            f.set_data_hopping_parameter(v);
        }
        if let Some(ref v) = self.hopping_subbands {
            f.set_data_hopping_subbands(v);
        }
        if let Some(v) = self.hopping_rb_offset {
            f.set_data_hopping_offset(v);
        }
        if let Some(v) = self.hopping_info {
            f.set_data_hopping_info(v);
        }
        if let Some(v) = self.ue_selected {
            f.set_have_ue_selected_resource_config(v);
        }
        if let Some(v) = self.have_trpt_subset {
            f.set_have_trpt_subset(v);
        }
        if let Some(v) = self.trpt_subset {
            f.set_trpt_subset(v);
        }
        if let Some(v) = self.data_prb_num {
            f.set_data_prb_num(v);
        }
        if let Some(v) = self.data_prb_start {
            f.set_data_prb_start(v);
        }
        if let Some(v) = self.data_prb_end {
            f.set_data_prb_end(v);
        }
        if let Some(v) = self.data_offset {
            f.set_data_offset(v);
        }
        if let Some(v) = self.data_bitmap {
            f.set_data_bitmap(v);
        }
        if let Some(v) = self.tx_parameters {
            f.set_have_tx_parameters(v);
        }
        if let Some(ref v) = self.control_tx_alpha {
            f.set_control_tx_alpha(v);
        }
        if let Some(v) = self.control_tx_p0 {
            f.set_control_tx_p0(v);
        }
        if let Some(ref v) = self.data_tx_alpha {
            f.set_data_tx_alpha(v);
        }
        if let Some(v) = self.data_tx_p0 {
            f.set_data_tx_p0(v);
        }
    }

    /// Builds the pool IE. Panics on invalid tokens, as the factory does.
    pub fn build(&self) -> SlCommResourcePool {
        let mut f = SlCommPoolFactory::new();
        self.apply(&mut f);
        f.create_pool()
    }

    pub fn build_preconfig(&self) -> SlPreconfigCommPool {
        let mut f = SlPreconfigCommPoolFactory::new();
        self.apply(&mut f);
        f.create_pool()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CfgDiscPool {
    pub cp_len: Option<String>,
    pub period: Option<String>,
    pub num_retx: Option<u8>,
    pub num_repetition: Option<u32>,
    pub prb_num: Option<u8>,
    pub prb_start: Option<u8>,
    pub prb_end: Option<u8>,
    pub offset: Option<u16>,
    pub bitmap: Option<u64>,

    pub tx_parameters: Option<bool>,
    pub tx_alpha: Option<String>,
    pub tx_p0: Option<i16>,
    pub tx_probability: Option<String>,

    pub pool_selection: Option<String>,
    pub rsrp_based: Option<bool>,
    pub rsrp_thresh_low: Option<u8>,
    pub rsrp_thresh_high: Option<u8>,
    pub rx_parameters: Option<bool>,
}

impl CfgDiscPool {
    pub fn build(&self) -> SlDiscResourcePool {
        let mut f = SlDiscPoolFactory::new();
        if let Some(ref v) = self.cp_len {
            f.set_disc_cp_len(v);
        }
        if let Some(ref v) = self.period {
            f.set_disc_period(v);
        }
        if let Some(v) = self.num_retx {
            f.set_num_retx(v);
        }
        if let Some(v) = self.num_repetition {
            f.set_num_repetition(v);
        }
        if let Some(v) = self.prb_num {
            f.set_disc_prb_num(v);
        }
        if let Some(v) = self.prb_start {
            f.set_disc_prb_start(v);
        }
        if let Some(v) = self.prb_end {
            f.set_disc_prb_end(v);
        }
        if let Some(v) = self.offset {
            f.set_disc_offset(v);
        }
        if let Some(v) = self.bitmap {
            f.set_disc_bitmap(v);
        }
        if let Some(v) = self.tx_parameters {
            f.set_have_tx_parameters(v);
        }
        if let Some(ref v) = self.tx_alpha {
            f.set_disc_tx_alpha(v);
        }
        if let Some(v) = self.tx_p0 {
            f.set_disc_tx_p0(v);
        }
        if let Some(ref v) = self.tx_probability {
            f.set_disc_tx_probability(v);
        }
        if let Some(ref v) = self.pool_selection {
            f.set_disc_pool_selection(v);
        }
        if let Some(v) = self.rsrp_based {
            f.set_have_rsrp_based_pool_selection(v);
        }
        if let Some(v) = self.rsrp_thresh_low {
            f.set_rsrp_thresh_low(v);
        }
        if let Some(v) = self.rsrp_thresh_high {
            f.set_rsrp_thresh_high(v);
        }
        if let Some(v) = self.rx_parameters {
            f.set_have_rx_parameters(v);
        }
        f.create_pool()
    }

    /// Preconfigured pools carry no pool selection or rx parameters, those
    /// fields are ignored here
    pub fn build_preconfig(&self) -> SlPreconfigDiscPool {
        let mut f = SlPreconfigDiscPoolFactory::new();
        if let Some(ref v) = self.cp_len {
            f.set_disc_cp_len(v);
        }
        if let Some(ref v) = self.period {
            f.set_disc_period(v);
        }
        if let Some(v) = self.num_retx {
            f.set_num_retx(v);
        }
        if let Some(v) = self.num_repetition {
            f.set_num_repetition(v);
        }
        if let Some(v) = self.prb_num {
            f.set_disc_prb_num(v);
        }
        if let Some(v) = self.prb_start {
            f.set_disc_prb_start(v);
        }
        if let Some(v) = self.prb_end {
            f.set_disc_prb_end(v);
        }
        if let Some(v) = self.offset {
            f.set_disc_offset(v);
        }
        if let Some(v) = self.bitmap {
            f.set_disc_bitmap(v);
        }
        if let Some(ref v) = self.tx_alpha {
            f.set_disc_tx_alpha(v);
        }
        if let Some(v) = self.tx_p0 {
            f.set_disc_tx_p0(v);
        }
        if let Some(ref v) = self.tx_probability {
            f.set_disc_tx_probability(v);
        }
        f.create_pool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_rrc::enums::sl_period_comm::SlPeriodComm;

    #[test]
    fn test_empty_patch_keeps_factory_defaults() {
        let pool = CfgCommPool::default().build();
        assert_eq!(pool, SlCommPoolFactory::new().create_pool());
    }

    #[test]
    fn test_patch_overrides() {
        let cfg = CfgCommPool {
            control_period: Some("sf120".to_string()),
            control_bitmap: Some(0x3),
            ..Default::default()
        };
        let pool = cfg.build();
        assert_eq!(pool.sc_period, SlPeriodComm::Sf120);
        assert_eq!(pool.sc_tf_resource_config.subframe_bitmap.value(), 0x3);
    }

    #[test]
    #[should_panic(expected = "UNSUPPORTED DISCOVERY PERIOD")]
    fn test_disc_patch_validated_by_factory() {
        let cfg = CfgDiscPool { period: Some("rf2048".to_string()), ..Default::default() };
        cfg.build();
    }
}
