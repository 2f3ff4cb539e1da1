use std::collections::BTreeSet;

use lte_sl_core::SubframeInfo;
use lte_sl_rrc::enums::sl_cp_len::SlCpLen;
use lte_sl_rrc::enums::sl_period_disc::SlPeriodDisc;
use lte_sl_rrc::{SL_SUBFRAME_BITMAP_LEN, SlDiscResourcePool, SlPreconfigDiscPool, SlTfResourceConfig, SlTxParameters};

use super::comm_pool::edge_prbs;
use super::period::{SidelinkTransmissionInfo, abs_subframe, current_period_start, next_period_start, period_index};

/// Highest number of retransmissions of a discovery message
pub const MAX_DISC_RETX: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscPoolType {
    #[default]
    Scheduled,
    UeSelected,
}

impl core::fmt::Display for DiscPoolType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DiscPoolType::Scheduled => write!(f, "SCHEDULED"),
            DiscPoolType::UeSelected => write!(f, "UE_SELECTED"),
        }
    }
}

/// Sidelink discovery pool with its PSDCH resources (TS 36.213 14.3)
#[derive(Debug, Clone, Default)]
pub struct SidelinkDiscResourcePool {
    pool_type: DiscPoolType,
    preconfigured: bool,
    cp_len: SlCpLen,
    disc_period: SlPeriodDisc,
    num_retx: u8,
    num_repetition: u32,
    tf: SlTfResourceConfig,
    have_tx_parameters: bool,
    tx_parameters_general: SlTxParameters,

    /// Period relative subframes usable for PSDCH
    lpsdch: Vec<u32>,
    /// PRBs usable for PSDCH, in adjacent pairs
    rbpsdch: Vec<u32>,
    n_psdch: u32,
    /// For every resource, the resources sharing one of its subframes (itself included)
    conflicts: Vec<BTreeSet<u32>>,
}

impl SidelinkDiscResourcePool {
    pub fn from_ie(pool: &SlDiscResourcePool) -> Self {
        let mut p = Self::default();
        p.set_pool(pool);
        p
    }

    pub fn from_preconfig(pool: &SlPreconfigDiscPool) -> Self {
        let mut p = Self::default();
        p.set_preconfig_pool(pool);
        p
    }

    pub fn set_pool(&mut self, pool: &SlDiscResourcePool) {
        assert!(pool.num_retx <= MAX_DISC_RETX,
            "For discovery maximum number of retransmissions should be less than {}", pool.num_retx);
        self.cp_len = pool.cp_len;
        self.disc_period = pool.disc_period;
        self.num_retx = pool.num_retx;
        self.num_repetition = pool.num_repetition;
        self.tf = pool.tf_resource_config;
        self.preconfigured = false;
        self.have_tx_parameters = pool.tx_parameters.is_some();
        match pool.tx_parameters {
            Some(tx) => {
                self.pool_type = DiscPoolType::UeSelected;
                self.tx_parameters_general = tx.tx_parameters_general;
            }
            None => self.pool_type = DiscPoolType::Scheduled,
        }
        self.initialize();
    }

    /// Preconfigured pools are always UE selected
    pub fn set_preconfig_pool(&mut self, pool: &SlPreconfigDiscPool) {
        assert!(pool.num_retx <= MAX_DISC_RETX,
            "For discovery maximum number of retransmissions should be less than {}", pool.num_retx);
        self.pool_type = DiscPoolType::UeSelected;
        self.preconfigured = true;
        self.cp_len = pool.cp_len;
        self.disc_period = pool.disc_period;
        self.num_retx = pool.num_retx;
        self.num_repetition = pool.num_repetition;
        self.tf = pool.tf_resource_config;
        self.have_tx_parameters = true;
        self.tx_parameters_general = pool.tx_parameters.tx_parameters_general;
        self.initialize();
    }

    fn initialize(&mut self) {
        self.lpsdch.clear();
        self.rbpsdch.clear();
        self.conflicts.clear();
        self.compute_psdch_resources();
        self.build_conflicts();
    }

    /// TS 36.213 14.3.3
    fn compute_psdch_resources(&mut self) {
        if self.pool_type == DiscPoolType::UeSelected {
            let bitmap = self.tf.subframe_bitmap;
            self.lpsdch = (0..self.num_repetition * SL_SUBFRAME_BITMAP_LEN)
                .filter(|&j| bitmap.bit(j % SL_SUBFRAME_BITMAP_LEN))
                .collect();
            self.rbpsdch = edge_prbs(&self.tf);
            for pair in self.rbpsdch.chunks_exact(2) {
                assert!(pair[1] == pair[0] + 1,
                    "Non contiguous Rbs for Sidelink Discovery pool ({} and {})", pair[0], pair[1]);
            }
        }
        self.n_psdch = (self.lpsdch.len() as u32 / (u32::from(self.num_retx) + 1)) * (self.rbpsdch.len() as u32 / 2);
        tracing::debug!("L_psdch = {}, M_rb = {}, N_psdch = {}", self.lpsdch.len(), self.rbpsdch.len(), self.n_psdch);
    }

    fn build_conflicts(&mut self) {
        let txs: Vec<Vec<SidelinkTransmissionInfo>> = (0..self.n_psdch).map(|i| self.psdch_transmissions(i)).collect();
        self.conflicts = vec![BTreeSet::new(); txs.len()];
        for i in 0..txs.len() {
            self.conflicts[i].insert(i as u32);
            for j in 0..i {
                let shared = txs[i].iter().any(|a| txs[j].iter().any(|b| a.subframe == b.subframe));
                if shared {
                    tracing::trace!("PSDCH resources {} and {} share a subframe", i, j);
                    self.conflicts[i].insert(j as u32);
                    self.conflicts[j].insert(i as u32);
                }
            }
        }
    }

    /// The numRetx + 1 transmissions of resource `n`, period relative (TS 36.213 14.3.1)
    pub fn psdch_transmissions(&self, n: u32) -> Vec<SidelinkTransmissionInfo> {
        let retx = u32::from(self.num_retx) + 1;
        let l = self.lpsdch.len() as u32;
        assert!(l >= retx, "No subframe available for retransmission. Check the discovery bitmap");
        if self.pool_type == DiscPoolType::Scheduled {
            return Vec::new();
        }

        let nf = self.rbpsdch.len() as u32 / 2;
        let nt = l / retx;
        (1..=retx)
            .map(|j| {
                let aj = ((j - 1) * (nf / retx) + n / nt) % nf;
                let b1 = n % nt;
                let subframe = retx * b1 + j - 1;
                self.translate_psdch(subframe, 2 * aj)
            })
            .collect()
    }

    fn translate_psdch(&self, sf_index: u32, rb_index: u32) -> SidelinkTransmissionInfo {
        let mapped = self.lpsdch[sf_index as usize];
        SidelinkTransmissionInfo {
            subframe: SubframeInfo::from_offset(mapped),
            rb_start: self.rbpsdch[rb_index as usize] as u8,
            nb_rb: 2,
        }
    }

    /// All PSDCH PRBs if (frame_no, subframe_no) is a discovery subframe of its period
    pub fn psdch_opportunities(&self, frame_no: u32, subframe_no: u32) -> Vec<u32> {
        let s = abs_subframe(frame_no, subframe_no);
        let period = self.disc_period.as_subframes();
        let offset = u32::from(self.tf.offset);
        let start = i64::from(offset) + period_index(s, offset, period) * i64::from(period);
        let rel = s - start;
        if rel < i64::from(SL_SUBFRAME_BITMAP_LEN) && self.tf.subframe_bitmap.bit(rel as u32) {
            self.rbpsdch.clone()
        } else {
            Vec::new()
        }
    }

    pub fn conflicting_resources(&self, res: u32) -> &BTreeSet<u32> {
        assert!(res < self.n_psdch, "PSDCH resource {} out of range, pool has {}", res, self.n_psdch);
        &self.conflicts[res as usize]
    }

    pub fn current_disc_period(&self, frame_no: u32, subframe_no: u32) -> SubframeInfo {
        current_period_start(frame_no, subframe_no, u32::from(self.tf.offset), self.disc_period.as_subframes())
    }

    pub fn next_disc_period(&self, frame_no: u32, subframe_no: u32) -> SubframeInfo {
        let next = next_period_start(frame_no, subframe_no, u32::from(self.tf.offset), self.disc_period.as_subframes());
        tracing::debug!("next discovery period after {}/{}: {}", frame_no, subframe_no, next);
        next
    }

    pub fn pool_type(&self) -> DiscPoolType {
        self.pool_type
    }

    pub fn is_preconfigured(&self) -> bool {
        self.preconfigured
    }

    pub fn cp_len(&self) -> SlCpLen {
        self.cp_len
    }

    pub fn disc_period(&self) -> SlPeriodDisc {
        self.disc_period
    }

    /// Discovery period length in subframes
    pub fn disc_period_subframes(&self) -> u32 {
        self.disc_period.as_subframes()
    }

    pub fn tf_resource_config(&self) -> SlTfResourceConfig {
        self.tf
    }

    pub fn have_tx_parameters(&self) -> bool {
        self.have_tx_parameters
    }

    pub fn tx_parameters_general(&self) -> SlTxParameters {
        self.tx_parameters_general
    }

    pub fn n_psdch(&self) -> u32 {
        self.n_psdch
    }

    pub fn n_subframes(&self) -> u32 {
        self.lpsdch.len() as u32
    }

    pub fn n_rb_pairs(&self) -> u32 {
        self.rbpsdch.len() as u32 / 2
    }

    pub fn num_retx(&self) -> u8 {
        self.num_retx
    }

    pub fn num_repetition(&self) -> u32 {
        self.num_repetition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_core::debug;
    use lte_sl_rrc::factory::SlDiscPoolFactory;

    fn factory() -> SlDiscPoolFactory {
        let mut f = SlDiscPoolFactory::new();
        f.set_disc_period("rf32");
        f.set_disc_bitmap(0x3);
        f.set_disc_prb_num(1);
        f.set_disc_prb_start(10);
        f.set_disc_prb_end(11);
        f.set_disc_offset(80);
        f
    }

    #[test]
    fn test_resource_counts() {
        debug::setup_logging_verbose();
        let pool = SidelinkDiscResourcePool::from_ie(&factory().create_pool());
        assert_eq!(pool.pool_type(), DiscPoolType::UeSelected);
        assert_eq!(pool.n_subframes(), 2);
        assert_eq!(pool.n_rb_pairs(), 1);
        assert_eq!(pool.n_psdch(), 2);
    }

    #[test]
    fn test_repetitions_extend_subframes() {
        let mut f = SlDiscPoolFactory::new();
        f.set_num_repetition(3);
        f.set_num_retx(1);
        // 0x11111 sets 5 bits per 40 subframes, PRBs 10..19 and 31..40
        let pool = SidelinkDiscResourcePool::from_ie(&f.create_pool());
        assert_eq!(pool.n_subframes(), 15);
        assert_eq!(pool.n_rb_pairs(), 10);
        assert_eq!(pool.n_psdch(), 7 * 10);
        for n in 0..pool.n_psdch() {
            let tx = pool.psdch_transmissions(n);
            assert_eq!(tx.len(), 2);
            assert!(tx.iter().all(|t| t.nb_rb == 2));
        }
    }

    #[test]
    fn test_conflicts_symmetric_and_reflexive() {
        let mut f = SlDiscPoolFactory::new();
        f.set_num_retx(2);
        f.set_disc_bitmap(0xFFFFF);
        let pool = SidelinkDiscResourcePool::from_ie(&f.create_pool());
        assert!(pool.n_psdch() > 0);
        for i in 0..pool.n_psdch() {
            let ci = pool.conflicting_resources(i);
            assert!(ci.contains(&i));
            for &j in ci {
                assert!(pool.conflicting_resources(j).contains(&i));
            }
        }
    }

    #[test]
    fn test_conflicts_match_shared_subframes() {
        let mut f = SlDiscPoolFactory::new();
        f.set_num_retx(1);
        let pool = SidelinkDiscResourcePool::from_ie(&f.create_pool());
        for i in 0..pool.n_psdch() {
            for j in 0..pool.n_psdch() {
                let a = pool.psdch_transmissions(i);
                let b = pool.psdch_transmissions(j);
                let shared = a.iter().any(|x| b.iter().any(|y| x.subframe == y.subframe));
                assert_eq!(pool.conflicting_resources(i).contains(&j), shared, "resources {} and {}", i, j);
            }
        }
    }

    #[test]
    #[should_panic(expected = "maximum number of retransmissions")]
    fn test_num_retx_above_three_is_fatal() {
        let mut f = SlDiscPoolFactory::new();
        f.set_num_retx(4);
        SidelinkDiscResourcePool::from_ie(&f.create_pool());
    }

    #[test]
    #[should_panic(expected = "Non contiguous Rbs")]
    fn test_non_adjacent_prb_pairs_are_fatal() {
        let mut f = SlDiscPoolFactory::new();
        // PRBs 10..12 and 38..40 pair up as (10,11), (12,38), (39,40)
        f.set_disc_prb_num(3);
        SidelinkDiscResourcePool::from_ie(&f.create_pool());
    }

    #[test]
    fn test_scheduled_pool_has_no_resources() {
        let mut f = factory();
        f.set_have_tx_parameters(false);
        let pool = SidelinkDiscResourcePool::from_ie(&f.create_pool());
        assert_eq!(pool.pool_type(), DiscPoolType::Scheduled);
        assert_eq!(pool.n_psdch(), 0);
    }
}
