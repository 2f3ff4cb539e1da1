use crate::enums::sl_num_subbands::SlNumSubbands;
use crate::enums::sl_period_comm::SlPeriodComm;
use crate::ies::{
    SlCommResourcePool, SlCommTxParameters, SlHoppingConfigComm, SlPreconfigCommPool, SlSubframeBitmap,
    NO_HOPPING, SlTfResourceConfig, SlTrptSubset, SlTxParameters, SlUeSelectedResourceConfig,
};

use super::{parse_alpha, parse_cp_len};

/// Hopping parameters at or above this value select the reserved value 510
const HOPPING_PARAMETER_LIMIT: u16 = 504;
const HOPPING_PARAMETER_RESERVED: u16 = 510;
const MAX_RB_OFFSET: i32 = 110;

/// Raw configuration of a communication pool, shared by the dedicated and the
/// preconfigured factory
#[derive(Debug, Clone)]
pub struct CommPoolSettings {
    sc_cp_len: String,
    period: String,
    sc_prb_num: u8,
    sc_prb_start: u8,
    sc_prb_end: u8,
    sc_offset: u16,
    sc_bitmap: u64,
    data_cp_len: String,
    hopping_parameter: u16,
    subbands: String,
    rb_offset: i32,
    hopping_info: u8,
    ue_selected: bool,
    have_trpt_subset: bool,
    trpt_subset: u8,
    data_prb_num: u8,
    data_prb_start: u8,
    data_prb_end: u8,
    data_offset: u16,
    data_bitmap: u64,
    tx_param: bool,
    tx_alpha: String,
    tx_p0: i16,
    data_alpha: String,
    data_p0: i16,
}

impl Default for CommPoolSettings {
    fn default() -> Self {
        Self {
            sc_cp_len: "NORMAL".to_string(),
            period: "sf40".to_string(),
            sc_prb_num: 22,
            sc_prb_start: 0,
            sc_prb_end: 49,
            sc_offset: 0,
            sc_bitmap: 0x00000000FF,
            data_cp_len: "NORMAL".to_string(),
            hopping_parameter: 0,
            subbands: "ns4".to_string(),
            rb_offset: 0,
            hopping_info: NO_HOPPING,
            ue_selected: true,
            have_trpt_subset: false,
            trpt_subset: 0x7,
            data_prb_num: 25,
            data_prb_start: 0,
            data_prb_end: 49,
            data_offset: 8,
            data_bitmap: 0xFFFFFFFFFF,
            tx_param: true,
            tx_alpha: "al09".to_string(),
            tx_p0: -40,
            data_alpha: "al09".to_string(),
            data_p0: -40,
        }
    }
}

/// Validated pieces common to both communication pool IEs
struct ResolvedComm {
    sc_cp_len: crate::enums::sl_cp_len::SlCpLen,
    sc_period: SlPeriodComm,
    sc_tf: SlTfResourceConfig,
    data_cp_len: crate::enums::sl_cp_len::SlCpLen,
    hopping: SlHoppingConfigComm,
    data_tf: SlTfResourceConfig,
    sc_tx: SlTxParameters,
    data_tx: SlTxParameters,
}

impl CommPoolSettings {
    fn resolve(&self) -> ResolvedComm {
        let sc_cp_len = parse_cp_len(&self.sc_cp_len, "UNSUPPORTED CONTROL CP LENGTH");
        let sc_period = SlPeriodComm::from_token(&self.period)
            .unwrap_or_else(|| panic!("UNSUPPORTED CONTROL PERIOD LENGTH"));
        let sc_tf = SlTfResourceConfig {
            prb_num: self.sc_prb_num,
            prb_start: self.sc_prb_start,
            prb_end: self.sc_prb_end,
            offset: self.sc_offset,
            subframe_bitmap: SlSubframeBitmap::from_value(self.sc_bitmap),
        };

        let data_cp_len = parse_cp_len(&self.data_cp_len, "UNSUPPORTED DATA CP LENGTH");
        let hopping_parameter = if self.hopping_parameter >= HOPPING_PARAMETER_LIMIT {
            HOPPING_PARAMETER_RESERVED
        } else {
            self.hopping_parameter
        };
        let num_subbands = SlNumSubbands::from_token(&self.subbands)
            .unwrap_or_else(|| panic!("UNSUPPORTED NUMBER OF SUBBANDS"));
        assert!((0..=MAX_RB_OFFSET).contains(&self.rb_offset), "UNSUPPORTED RB OFFSET");
        let hopping = SlHoppingConfigComm {
            hopping_parameter,
            num_subbands,
            rb_offset: self.rb_offset as u8,
            hopping_info: self.hopping_info,
        };

        let data_tf = SlTfResourceConfig {
            prb_num: self.data_prb_num,
            prb_start: self.data_prb_start,
            prb_end: self.data_prb_end,
            offset: self.data_offset,
            subframe_bitmap: SlSubframeBitmap::from_value(self.data_bitmap),
        };

        let sc_tx = SlTxParameters {
            alpha: parse_alpha(&self.tx_alpha, "UNSUPPORTED CONTROL TX ALPHA"),
            p0: self.tx_p0,
        };
        let data_tx = SlTxParameters {
            alpha: parse_alpha(&self.data_alpha, "UNSUPPORTED DATA TX ALPHA"),
            p0: self.data_p0,
        };

        ResolvedComm { sc_cp_len, sc_period, sc_tf, data_cp_len, hopping, data_tf, sc_tx, data_tx }
    }
}

/// Getters and setters over the raw settings of a communication pool factory
pub trait SlPoolFactory {
    fn settings(&self) -> &CommPoolSettings;
    fn settings_mut(&mut self) -> &mut CommPoolSettings;

    // Control
    fn set_control_cp_len(&mut self, cp_len: &str) { self.settings_mut().sc_cp_len = cp_len.to_string(); }
    fn control_cp_len(&self) -> &str { &self.settings().sc_cp_len }
    fn set_control_period(&mut self, period: &str) { self.settings_mut().period = period.to_string(); }
    fn control_period(&self) -> &str { &self.settings().period }
    fn set_control_prb_num(&mut self, prb_num: u8) { self.settings_mut().sc_prb_num = prb_num; }
    fn control_prb_num(&self) -> u8 { self.settings().sc_prb_num }
    fn set_control_prb_start(&mut self, prb_start: u8) { self.settings_mut().sc_prb_start = prb_start; }
    fn control_prb_start(&self) -> u8 { self.settings().sc_prb_start }
    fn set_control_prb_end(&mut self, prb_end: u8) { self.settings_mut().sc_prb_end = prb_end; }
    fn control_prb_end(&self) -> u8 { self.settings().sc_prb_end }
    fn set_control_offset(&mut self, offset: u16) { self.settings_mut().sc_offset = offset; }
    fn control_offset(&self) -> u16 { self.settings().sc_offset }
    fn set_control_bitmap(&mut self, value: u64) { self.settings_mut().sc_bitmap = value; }
    fn control_bitmap(&self) -> u64 { self.settings().sc_bitmap }

    // Data
    fn set_data_cp_len(&mut self, cp_len: &str) { self.settings_mut().data_cp_len = cp_len.to_string(); }
    fn data_cp_len(&self) -> &str { &self.settings().data_cp_len }
    fn set_data_hopping_parameter(&mut self, p: u16) { self.settings_mut().hopping_parameter = p; }
    fn data_hopping_parameter(&self) -> u16 { self.settings().hopping_parameter }
    fn set_data_hopping_subbands(&mut self, subbands: &str) { self.settings_mut().subbands = subbands.to_string(); }
    fn data_hopping_subbands(&self) -> &str { &self.settings().subbands }
    fn set_data_hopping_offset(&mut self, rb_offset: i32) { self.settings_mut().rb_offset = rb_offset; }
    fn data_hopping_offset(&self) -> i32 { self.settings().rb_offset }
    fn set_data_hopping_info(&mut self, info: u8) { self.settings_mut().hopping_info = info; }
    fn data_hopping_info(&self) -> u8 { self.settings().hopping_info }

    // UE selected
    fn set_have_ue_selected_resource_config(&mut self, v: bool) { self.settings_mut().ue_selected = v; }
    fn have_ue_selected_resource_config(&self) -> bool { self.settings().ue_selected }
    fn set_have_trpt_subset(&mut self, v: bool) { self.settings_mut().have_trpt_subset = v; }
    fn have_trpt_subset(&self) -> bool { self.settings().have_trpt_subset }
    fn set_trpt_subset(&mut self, value: u8) { self.settings_mut().trpt_subset = value; }
    fn trpt_subset(&self) -> u8 { self.settings().trpt_subset }
    fn set_data_prb_num(&mut self, prb_num: u8) { self.settings_mut().data_prb_num = prb_num; }
    fn data_prb_num(&self) -> u8 { self.settings().data_prb_num }
    fn set_data_prb_start(&mut self, prb_start: u8) { self.settings_mut().data_prb_start = prb_start; }
    fn data_prb_start(&self) -> u8 { self.settings().data_prb_start }
    fn set_data_prb_end(&mut self, prb_end: u8) { self.settings_mut().data_prb_end = prb_end; }
    fn data_prb_end(&self) -> u8 { self.settings().data_prb_end }
    fn set_data_offset(&mut self, offset: u16) { self.settings_mut().data_offset = offset; }
    fn data_offset(&self) -> u16 { self.settings().data_offset }
    fn set_data_bitmap(&mut self, value: u64) { self.settings_mut().data_bitmap = value; }
    fn data_bitmap(&self) -> u64 { self.settings().data_bitmap }

    // Tx parameters
    fn set_have_tx_parameters(&mut self, v: bool) { self.settings_mut().tx_param = v; }
    fn have_tx_parameters(&self) -> bool { self.settings().tx_param }
    fn set_control_tx_alpha(&mut self, alpha: &str) { self.settings_mut().tx_alpha = alpha.to_string(); }
    fn control_tx_alpha(&self) -> &str { &self.settings().tx_alpha }
    fn set_control_tx_p0(&mut self, p0: i16) { self.settings_mut().tx_p0 = p0; }
    fn control_tx_p0(&self) -> i16 { self.settings().tx_p0 }
    fn set_data_tx_alpha(&mut self, alpha: &str) { self.settings_mut().data_alpha = alpha.to_string(); }
    fn data_tx_alpha(&self) -> &str { &self.settings().data_alpha }
    fn set_data_tx_p0(&mut self, p0: i16) { self.settings_mut().data_p0 = p0; }
    fn data_tx_p0(&self) -> i16 { self.settings().data_p0 }
}

/// Builds SL-CommResourcePool IEs for dedicated or broadcast configuration
#[derive(Debug, Clone, Default)]
pub struct SlCommPoolFactory {
    settings: CommPoolSettings,
}

impl SlCommPoolFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_pool(&self) -> SlCommResourcePool {
        let r = self.settings.resolve();
        let s = &self.settings;

        let ue_selected_resource_config = s.ue_selected.then(|| SlUeSelectedResourceConfig {
            data_tf_resource_config: r.data_tf,
            trpt_subset: s.have_trpt_subset.then(|| SlTrptSubset::from_value(s.trpt_subset)),
        });
        let tx_parameters = s.tx_param.then_some(SlCommTxParameters {
            sc_tx_parameters: r.sc_tx,
            data_tx_parameters: r.data_tx,
        });

        SlCommResourcePool {
            sc_cp_len: r.sc_cp_len,
            sc_period: r.sc_period,
            sc_tf_resource_config: r.sc_tf,
            data_cp_len: r.data_cp_len,
            data_hopping_config: r.hopping,
            ue_selected_resource_config,
            tx_parameters,
        }
    }
}

impl SlPoolFactory for SlCommPoolFactory {
    fn settings(&self) -> &CommPoolSettings { &self.settings }
    fn settings_mut(&mut self) -> &mut CommPoolSettings { &mut self.settings }
}

/// Builds SL-PreconfigCommPool IEs for out of coverage operation
#[derive(Debug, Clone)]
pub struct SlPreconfigCommPoolFactory {
    settings: CommPoolSettings,
}

impl Default for SlPreconfigCommPoolFactory {
    fn default() -> Self {
        let settings = CommPoolSettings {
            have_trpt_subset: true,
            data_p0: -4,
            ..Default::default()
        };
        Self { settings }
    }
}

impl SlPreconfigCommPoolFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_pool(&self) -> SlPreconfigCommPool {
        let r = self.settings.resolve();
        SlPreconfigCommPool {
            sc_cp_len: r.sc_cp_len,
            sc_period: r.sc_period,
            sc_tf_resource_config: r.sc_tf,
            sc_tx_parameters: r.sc_tx,
            data_cp_len: r.data_cp_len,
            data_hopping_config: r.hopping,
            data_tf_resource_config: r.data_tf,
            trpt_subset: SlTrptSubset::from_value(self.settings.trpt_subset),
            data_tx_parameters: r.data_tx,
        }
    }
}

impl SlPoolFactory for SlPreconfigCommPoolFactory {
    fn settings(&self) -> &CommPoolSettings { &self.settings }
    fn settings_mut(&mut self) -> &mut CommPoolSettings { &mut self.settings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::sl_cp_len::SlCpLen;
    use crate::enums::sl_tx_alpha::SlTxAlpha;

    #[test]
    fn test_defaults() {
        let pool = SlCommPoolFactory::new().create_pool();
        assert_eq!(pool.sc_period, SlPeriodComm::Sf40);
        assert_eq!(pool.sc_tf_resource_config.prb_num, 22);
        assert_eq!(pool.sc_tf_resource_config.subframe_bitmap.value(), 0xFF);
        assert_eq!(pool.data_hopping_config.hopping_info, NO_HOPPING);
        assert_eq!(pool.data_hopping_config.num_subbands, SlNumSubbands::Ns4);
        let ue_sel = pool.ue_selected_resource_config.unwrap();
        assert_eq!(ue_sel.data_tf_resource_config.offset, 8);
        assert_eq!(ue_sel.trpt_subset, None);
        let tx = pool.tx_parameters.unwrap();
        assert_eq!(tx.sc_tx_parameters.alpha, SlTxAlpha::Al09);
        assert_eq!(tx.data_tx_parameters.p0, -40);
    }

    #[test]
    fn test_scenario_pool() {
        let mut f = SlCommPoolFactory::new();
        f.set_control_period("sf120");
        f.set_control_bitmap(0x00000000FF);
        f.set_control_prb_num(1);
        f.set_control_prb_start(10);
        f.set_control_prb_end(40);
        f.set_control_offset(80);
        f.set_data_cp_len("EXTENDED");
        f.set_have_trpt_subset(true);
        f.set_trpt_subset(0x5);
        let pool = f.create_pool();
        assert_eq!(pool.sc_period, SlPeriodComm::Sf120);
        assert_eq!(pool.sc_tf_resource_config.offset, 80);
        assert_eq!(pool.data_cp_len, SlCpLen::Extended);
        assert_eq!(pool.ue_selected_resource_config.unwrap().trpt_subset, Some(SlTrptSubset::from_value(5)));
    }

    #[test]
    fn test_scheduled_pool_has_no_ue_selected_block() {
        let mut f = SlCommPoolFactory::new();
        f.set_have_ue_selected_resource_config(false);
        f.set_have_tx_parameters(false);
        let pool = f.create_pool();
        assert!(pool.ue_selected_resource_config.is_none());
        assert!(pool.tx_parameters.is_none());
    }

    #[test]
    fn test_hopping_parameter_clamped() {
        let mut f = SlCommPoolFactory::new();
        f.set_data_hopping_parameter(503);
        assert_eq!(f.create_pool().data_hopping_config.hopping_parameter, 503);
        f.set_data_hopping_parameter(504);
        assert_eq!(f.create_pool().data_hopping_config.hopping_parameter, 510);
        assert_eq!(f.data_hopping_parameter(), 504);
    }

    #[test]
    fn test_preconfig_defaults() {
        let f = SlPreconfigCommPoolFactory::new();
        assert!(f.have_trpt_subset());
        let pool = f.create_pool();
        assert_eq!(pool.data_tx_parameters.p0, -4);
        assert_eq!(pool.trpt_subset, SlTrptSubset::all());
    }

    #[test]
    #[should_panic(expected = "UNSUPPORTED CONTROL PERIOD LENGTH")]
    fn test_bad_period() {
        let mut f = SlCommPoolFactory::new();
        f.set_control_period("sf50");
        f.create_pool();
    }

    #[test]
    #[should_panic(expected = "UNSUPPORTED RB OFFSET")]
    fn test_bad_rb_offset() {
        let mut f = SlCommPoolFactory::new();
        f.set_data_hopping_offset(111);
        f.create_pool();
    }

    #[test]
    #[should_panic(expected = "UNSUPPORTED DATA TX ALPHA")]
    fn test_bad_data_alpha() {
        let mut f = SlPreconfigCommPoolFactory::new();
        f.set_data_tx_alpha("al03");
        f.create_pool();
    }

    #[test]
    #[should_panic(expected = "UNSUPPORTED NUMBER OF SUBBANDS")]
    fn test_bad_subbands() {
        let mut f = SlCommPoolFactory::new();
        f.set_data_hopping_subbands("ns3");
        f.create_pool();
    }
}
