use crate::enums::sl_period_disc::SlPeriodDisc;
use crate::enums::sl_pool_selection::SlPoolSelection;
use crate::enums::sl_tx_probability::SlTxProbability;
use crate::ies::{
    SlDiscResourcePool, SlDiscRxParameters, SlDiscTxParameters, SlDiscUeSelectedResourceConfig,
    SlPoolSelectionRsrpBased, SlPreconfigDiscPool, SlPreconfigDiscTxParameters, SlSubframeBitmap,
    SlTfResourceConfig, SlTxParameters,
};

use super::{parse_alpha, parse_cp_len};

const MAX_RSRP_RANGE: u8 = 7;

fn parse_period(token: &str) -> SlPeriodDisc {
    SlPeriodDisc::from_token(token).unwrap_or_else(|| panic!("UNSUPPORTED DISCOVERY PERIOD"))
}

fn parse_tx_probability(token: &str) -> SlTxProbability {
    SlTxProbability::from_token(token).unwrap_or_else(|| panic!("UNSUPPORTED DISCOVERY PROBABILITY"))
}

/// Builds SL-DiscResourcePool IEs
#[derive(Debug, Clone)]
pub struct SlDiscPoolFactory {
    disc_cp_len: String,
    period: String,
    num_retx: u8,
    num_rep: u32,
    disc_prb_num: u8,
    disc_prb_start: u8,
    disc_prb_end: u8,
    disc_offset: u16,
    disc_bitmap: u64,
    tx_param: bool,
    tx_alpha: String,
    disc_p0: i16,
    pool_selection: String,
    rsrp_based: bool,
    rsrp_thresh_low: u8,
    rsrp_thresh_high: u8,
    disc_tx_prob: String,
    rx_param: bool,
}

impl Default for SlDiscPoolFactory {
    fn default() -> Self {
        Self {
            disc_cp_len: "NORMAL".to_string(),
            period: "rf32".to_string(),
            num_retx: 0,
            num_rep: 1,
            disc_prb_num: 10,
            disc_prb_start: 10,
            disc_prb_end: 40,
            disc_offset: 0,
            disc_bitmap: 0x11111,
            tx_param: true,
            tx_alpha: "al09".to_string(),
            disc_p0: -40,
            pool_selection: "RSRPBASED".to_string(),
            rsrp_based: true,
            rsrp_thresh_low: 0,
            rsrp_thresh_high: 7,
            disc_tx_prob: "p100".to_string(),
            rx_param: false,
        }
    }
}

impl SlDiscPoolFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_pool(&self) -> SlDiscResourcePool {
        let cp_len = parse_cp_len(&self.disc_cp_len, "UNSUPPORTED DISCOVERY CP LENGTH");
        let disc_period = parse_period(&self.period);
        let tf_resource_config = SlTfResourceConfig {
            prb_num: self.disc_prb_num,
            prb_start: self.disc_prb_start,
            prb_end: self.disc_prb_end,
            offset: self.disc_offset,
            subframe_bitmap: SlSubframeBitmap::from_value(self.disc_bitmap),
        };

        let tx_parameters_general = SlTxParameters {
            alpha: parse_alpha(&self.tx_alpha, "UNSUPPORTED DISCOVERY TX ALPHA"),
            p0: self.disc_p0,
        };
        let pool_selection = SlPoolSelection::from_token(&self.pool_selection)
            .unwrap_or_else(|| panic!("UNSUPPORTED POOL SELECTION"));
        let pool_selection_rsrp_based = if self.rsrp_based {
            assert!(
                self.rsrp_thresh_low <= MAX_RSRP_RANGE
                    && self.rsrp_thresh_high <= MAX_RSRP_RANGE
                    && self.rsrp_thresh_low <= self.rsrp_thresh_high,
                "INVALID RSRP THRESHOLDS"
            );
            Some(SlPoolSelectionRsrpBased {
                thresh_low: self.rsrp_thresh_low,
                thresh_high: self.rsrp_thresh_high,
            })
        } else {
            None
        };
        let tx_probability = parse_tx_probability(&self.disc_tx_prob);

        let tx_parameters = self.tx_param.then_some(SlDiscTxParameters {
            tx_parameters_general,
            ue_selected_resource_config: SlDiscUeSelectedResourceConfig {
                pool_selection,
                pool_selection_rsrp_based,
                tx_probability,
            },
        });

        SlDiscResourcePool {
            cp_len,
            disc_period,
            num_retx: self.num_retx,
            num_repetition: self.num_rep,
            tf_resource_config,
            tx_parameters,
            rx_parameters: self.rx_param.then(SlDiscRxParameters::default),
        }
    }

    pub fn set_disc_cp_len(&mut self, cp_len: &str) { self.disc_cp_len = cp_len.to_string(); }
    pub fn disc_cp_len(&self) -> &str { &self.disc_cp_len }
    pub fn set_disc_period(&mut self, period: &str) { self.period = period.to_string(); }
    pub fn disc_period(&self) -> &str { &self.period }
    pub fn set_num_retx(&mut self, num_retx: u8) { self.num_retx = num_retx; }
    pub fn num_retx(&self) -> u8 { self.num_retx }
    pub fn set_num_repetition(&mut self, num_rep: u32) { self.num_rep = num_rep; }
    pub fn num_repetition(&self) -> u32 { self.num_rep }
    pub fn set_disc_prb_num(&mut self, prb_num: u8) { self.disc_prb_num = prb_num; }
    pub fn disc_prb_num(&self) -> u8 { self.disc_prb_num }
    pub fn set_disc_prb_start(&mut self, prb_start: u8) { self.disc_prb_start = prb_start; }
    pub fn disc_prb_start(&self) -> u8 { self.disc_prb_start }
    pub fn set_disc_prb_end(&mut self, prb_end: u8) { self.disc_prb_end = prb_end; }
    pub fn disc_prb_end(&self) -> u8 { self.disc_prb_end }
    pub fn set_disc_offset(&mut self, offset: u16) { self.disc_offset = offset; }
    pub fn disc_offset(&self) -> u16 { self.disc_offset }
    pub fn set_disc_bitmap(&mut self, value: u64) { self.disc_bitmap = value; }
    pub fn disc_bitmap(&self) -> u64 { self.disc_bitmap }
    pub fn set_have_tx_parameters(&mut self, v: bool) { self.tx_param = v; }
    pub fn have_tx_parameters(&self) -> bool { self.tx_param }
    pub fn set_disc_tx_alpha(&mut self, alpha: &str) { self.tx_alpha = alpha.to_string(); }
    pub fn disc_tx_alpha(&self) -> &str { &self.tx_alpha }
    pub fn set_disc_tx_p0(&mut self, p0: i16) { self.disc_p0 = p0; }
    pub fn disc_tx_p0(&self) -> i16 { self.disc_p0 }
    pub fn set_disc_pool_selection(&mut self, sel: &str) { self.pool_selection = sel.to_string(); }
    pub fn disc_pool_selection(&self) -> &str { &self.pool_selection }
    pub fn set_have_rsrp_based_pool_selection(&mut self, v: bool) { self.rsrp_based = v; }
    pub fn have_rsrp_based_pool_selection(&self) -> bool { self.rsrp_based }
    pub fn set_rsrp_thresh_low(&mut self, v: u8) { self.rsrp_thresh_low = v; }
    pub fn rsrp_thresh_low(&self) -> u8 { self.rsrp_thresh_low }
    pub fn set_rsrp_thresh_high(&mut self, v: u8) { self.rsrp_thresh_high = v; }
    pub fn rsrp_thresh_high(&self) -> u8 { self.rsrp_thresh_high }
    pub fn set_disc_tx_probability(&mut self, p: &str) { self.disc_tx_prob = p.to_string(); }
    pub fn disc_tx_probability(&self) -> &str { &self.disc_tx_prob }
    pub fn set_have_rx_parameters(&mut self, v: bool) { self.rx_param = v; }
    pub fn have_rx_parameters(&self) -> bool { self.rx_param }
}

/// Builds SL-PreconfigDiscPool IEs for out of coverage operation
#[derive(Debug, Clone)]
pub struct SlPreconfigDiscPoolFactory {
    disc_cp_len: String,
    period: String,
    num_retx: u8,
    num_rep: u32,
    disc_prb_num: u8,
    disc_prb_start: u8,
    disc_prb_end: u8,
    disc_offset: u16,
    disc_bitmap: u64,
    tx_alpha: String,
    disc_p0: i16,
    disc_tx_prob: String,
}

impl Default for SlPreconfigDiscPoolFactory {
    fn default() -> Self {
        Self {
            disc_cp_len: "NORMAL".to_string(),
            period: "rf32".to_string(),
            num_retx: 0,
            num_rep: 1,
            disc_prb_num: 10,
            disc_prb_start: 10,
            disc_prb_end: 40,
            disc_offset: 0,
            disc_bitmap: 0x11111,
            tx_alpha: "al09".to_string(),
            disc_p0: -40,
            disc_tx_prob: "p100".to_string(),
        }
    }
}

impl SlPreconfigDiscPoolFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_pool(&self) -> SlPreconfigDiscPool {
        SlPreconfigDiscPool {
            cp_len: parse_cp_len(&self.disc_cp_len, "UNSUPPORTED DISCOVERY CP LENGTH"),
            disc_period: parse_period(&self.period),
            num_retx: self.num_retx,
            num_repetition: self.num_rep,
            tf_resource_config: SlTfResourceConfig {
                prb_num: self.disc_prb_num,
                prb_start: self.disc_prb_start,
                prb_end: self.disc_prb_end,
                offset: self.disc_offset,
                subframe_bitmap: SlSubframeBitmap::from_value(self.disc_bitmap),
            },
            tx_parameters: SlPreconfigDiscTxParameters {
                tx_parameters_general: SlTxParameters {
                    alpha: parse_alpha(&self.tx_alpha, "UNSUPPORTED DISCOVERY TX ALPHA"),
                    p0: self.disc_p0,
                },
                tx_probability: parse_tx_probability(&self.disc_tx_prob),
            },
        }
    }

    pub fn set_disc_cp_len(&mut self, cp_len: &str) { self.disc_cp_len = cp_len.to_string(); }
    pub fn disc_cp_len(&self) -> &str { &self.disc_cp_len }
    pub fn set_disc_period(&mut self, period: &str) { self.period = period.to_string(); }
    pub fn disc_period(&self) -> &str { &self.period }
    pub fn set_num_retx(&mut self, num_retx: u8) { self.num_retx = num_retx; }
    pub fn num_retx(&self) -> u8 { self.num_retx }
    pub fn set_num_repetition(&mut self, num_rep: u32) { self.num_rep = num_rep; }
    pub fn num_repetition(&self) -> u32 { self.num_rep }
    pub fn set_disc_prb_num(&mut self, prb_num: u8) { self.disc_prb_num = prb_num; }
    pub fn disc_prb_num(&self) -> u8 { self.disc_prb_num }
    pub fn set_disc_prb_start(&mut self, prb_start: u8) { self.disc_prb_start = prb_start; }
    pub fn disc_prb_start(&self) -> u8 { self.disc_prb_start }
    pub fn set_disc_prb_end(&mut self, prb_end: u8) { self.disc_prb_end = prb_end; }
    pub fn disc_prb_end(&self) -> u8 { self.disc_prb_end }
    pub fn set_disc_offset(&mut self, offset: u16) { self.disc_offset = offset; }
    pub fn disc_offset(&self) -> u16 { self.disc_offset }
    pub fn set_disc_bitmap(&mut self, value: u64) { self.disc_bitmap = value; }
    pub fn disc_bitmap(&self) -> u64 { self.disc_bitmap }
    pub fn set_disc_tx_alpha(&mut self, alpha: &str) { self.tx_alpha = alpha.to_string(); }
    pub fn disc_tx_alpha(&self) -> &str { &self.tx_alpha }
    pub fn set_disc_tx_p0(&mut self, p0: i16) { self.disc_p0 = p0; }
    pub fn disc_tx_p0(&self) -> i16 { self.disc_p0 }
    pub fn set_disc_tx_probability(&mut self, p: &str) { self.disc_tx_prob = p.to_string(); }
    pub fn disc_tx_probability(&self) -> &str { &self.disc_tx_prob }
}
