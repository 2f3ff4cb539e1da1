use std::collections::BTreeMap;

use lte_sl_core::{SUBFRAMES_PER_SFN_CYCLE, SubframeInfo};
use lte_sl_rrc::enums::sl_cp_len::SlCpLen;
use lte_sl_rrc::enums::sl_period_comm::SlPeriodComm;
use lte_sl_rrc::{SlCommResourcePool, SlHoppingConfigComm, SlPreconfigCommPool, SlTfResourceConfig, SlTrptSubset};

use super::gold::{gold_sequence, hop_sequence};
use super::itrp;
use super::period::{SidelinkTransmissionInfo, abs_subframe, current_period_start, next_period_start, period_index};

/// Number of subframes covered by the control subframe bitmap
const PSCCH_BITMAP_LEN: i64 = 40;

/// How the UE obtains its grants from the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolRole {
    /// Resources are assigned by the eNodeB
    #[default]
    Scheduled,
    /// The UE picks resources itself within the data TF config
    UeSelected {
        data_tf: SlTfResourceConfig,
        trpt_subset: SlTrptSubset,
    },
}

impl core::fmt::Display for PoolRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PoolRole::Scheduled => write!(f, "SCHEDULED"),
            PoolRole::UeSelected { .. } => write!(f, "UE_SELECTED"),
        }
    }
}

/// Sidelink communication pool with its usable PSCCH and PSSCH resources
/// (TS 36.213 14.1 and 14.2)
#[derive(Debug, Clone, Default)]
pub struct SidelinkCommResourcePool {
    role: PoolRole,
    preconfigured: bool,
    sc_cp_len: SlCpLen,
    sc_period: SlPeriodComm,
    sc_tf: SlTfResourceConfig,
    data_cp_len: SlCpLen,
    data_hopping: SlHoppingConfigComm,

    /// Pool relative subframes usable for PSCCH
    lpscch: Vec<u32>,
    /// PRBs usable for PSCCH
    rbpscch: Vec<u32>,
    n_pscch: u32,

    /// Pool relative subframes usable for PSSCH
    lpssch: Vec<u32>,
    /// PRBs usable for PSSCH (UE selected only)
    rbpssch: Vec<u32>,
    /// PSSCH PRB to its index in `rbpssch`
    prb_to_vrb: BTreeMap<u32, u32>,

    /// Type 2 hopping only
    gold: Vec<u8>,
    hop: Vec<u8>,
}

/// Two pools are equal when built from the same configuration
impl PartialEq for SidelinkCommResourcePool {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role
            && self.sc_cp_len == other.sc_cp_len
            && self.sc_period == other.sc_period
            && self.sc_tf == other.sc_tf
            && self.data_cp_len == other.data_cp_len
            && self.data_hopping == other.data_hopping
    }
}

impl SidelinkCommResourcePool {
    pub fn from_ie(pool: &SlCommResourcePool) -> Self {
        let mut p = Self::default();
        p.set_pool(pool);
        p
    }

    pub fn from_preconfig(pool: &SlPreconfigCommPool) -> Self {
        let mut p = Self::default();
        p.set_preconfig_pool(pool);
        p
    }

    pub fn set_pool(&mut self, pool: &SlCommResourcePool) {
        self.sc_cp_len = pool.sc_cp_len;
        self.sc_period = pool.sc_period;
        self.sc_tf = pool.sc_tf_resource_config;
        self.data_cp_len = pool.data_cp_len;
        self.data_hopping = pool.data_hopping_config;
        self.preconfigured = false;
        self.role = match pool.ue_selected_resource_config {
            Some(ue_sel) => PoolRole::UeSelected {
                data_tf: ue_sel.data_tf_resource_config,
                trpt_subset: ue_sel.trpt_subset.unwrap_or_else(SlTrptSubset::all),
            },
            None => PoolRole::Scheduled,
        };
        self.initialize();
    }

    /// Preconfigured pools are always UE selected
    pub fn set_preconfig_pool(&mut self, pool: &SlPreconfigCommPool) {
        self.sc_cp_len = pool.sc_cp_len;
        self.sc_period = pool.sc_period;
        self.sc_tf = pool.sc_tf_resource_config;
        self.data_cp_len = pool.data_cp_len;
        self.data_hopping = pool.data_hopping_config;
        self.preconfigured = true;
        self.role = PoolRole::UeSelected {
            data_tf: pool.data_tf_resource_config,
            trpt_subset: pool.trpt_subset,
        };
        self.initialize();
    }

    fn initialize(&mut self) {
        self.lpscch.clear();
        self.rbpscch.clear();
        self.lpssch.clear();
        self.rbpssch.clear();
        self.prb_to_vrb.clear();
        self.gold.clear();
        self.hop.clear();

        self.compute_pscch_resources();
        self.compute_pssch_resources();
    }

    /// TS 36.213 14.2.1.1
    fn compute_pscch_resources(&mut self) {
        let bitmap = self.sc_tf.subframe_bitmap;
        self.lpscch = (0..PSCCH_BITMAP_LEN as u32).filter(|&i| bitmap.bit(i)).collect();
        self.rbpscch = edge_prbs(&self.sc_tf);
        self.n_pscch = (self.lpscch.len() * self.rbpscch.len() / 2) as u32;
        tracing::debug!("L_pscch = {}, M_rb = {}, N_pscch = {}", self.lpscch.len(), self.rbpscch.len(), self.n_pscch);
    }

    /// TS 36.213 14.1.3 and 14.1.4
    fn compute_pssch_resources(&mut self) {
        let period = self.sc_period.as_subframes();
        match self.role {
            PoolRole::Scheduled => {
                let first = self.lpscch.last().map_or(0, |&l| l + 1);
                self.lpssch = (first..period).collect();
            }
            PoolRole::UeSelected { data_tf, .. } => {
                let offset = u32::from(data_tf.offset);
                let bitmap = data_tf.subframe_bitmap;
                self.lpssch = (offset..period)
                    .filter(|&i| bitmap.bit((i - offset) % PSCCH_BITMAP_LEN as u32))
                    .collect();

                for i in u32::from(data_tf.prb_start)..=u32::from(data_tf.prb_end) {
                    if self.is_in_pool(i, 1, 0) {
                        self.prb_to_vrb.insert(i, self.rbpssch.len() as u32);
                        self.rbpssch.push(i);
                    }
                }

                if self.data_hopping.is_type2() {
                    self.gold = gold_sequence(self.data_hopping.hopping_parameter);
                    self.hop = hop_sequence(&self.gold, self.data_hopping.num_subbands.count());
                }
            }
        }
        tracing::debug!("PSSCH subframes = {}, RBs = {}", self.lpssch.len(), self.rbpssch.len());
    }

    pub fn role(&self) -> PoolRole {
        self.role
    }

    pub fn is_ue_selected(&self) -> bool {
        matches!(self.role, PoolRole::UeSelected { .. })
    }

    pub fn is_preconfigured(&self) -> bool {
        self.preconfigured
    }

    pub fn sc_cp_len(&self) -> SlCpLen {
        self.sc_cp_len
    }

    pub fn data_cp_len(&self) -> SlCpLen {
        self.data_cp_len
    }

    pub fn sc_period(&self) -> SlPeriodComm {
        self.sc_period
    }

    pub fn sc_tf_resource_config(&self) -> SlTfResourceConfig {
        self.sc_tf
    }

    /// Data TF config of UE selected pools. Scheduled pools have an all-zero config.
    pub fn data_tf_resource_config(&self) -> SlTfResourceConfig {
        match self.role {
            PoolRole::UeSelected { data_tf, .. } => data_tf,
            PoolRole::Scheduled => SlTfResourceConfig::default(),
        }
    }

    /// TRPT subset of UE selected pools. Scheduled pools have an empty subset.
    pub fn trpt_subset(&self) -> SlTrptSubset {
        match self.role {
            PoolRole::UeSelected { trpt_subset, .. } => trpt_subset,
            PoolRole::Scheduled => SlTrptSubset::from_value(0),
        }
    }

    pub fn data_hopping_config(&self) -> SlHoppingConfigComm {
        self.data_hopping
    }

    pub fn n_pscch(&self) -> u32 {
        self.n_pscch
    }

    pub fn pscch_subframes(&self) -> &[u32] {
        &self.lpscch
    }

    pub fn pscch_rb_list(&self) -> &[u32] {
        &self.rbpscch
    }

    pub fn all_pssch_subframes(&self) -> &[u32] {
        &self.lpssch
    }

    pub fn pssch_rb_list(&self) -> &[u32] {
        &self.rbpssch
    }

    /// Number of PRBs usable for PSSCH
    pub fn pssch_bandwidth(&self) -> u32 {
        self.rbpssch.len() as u32
    }

    pub fn current_sc_period(&self, frame_no: u32, subframe_no: u32) -> SubframeInfo {
        current_period_start(frame_no, subframe_no, u32::from(self.sc_tf.offset), self.sc_period.as_subframes())
    }

    pub fn next_sc_period(&self, frame_no: u32, subframe_no: u32) -> SubframeInfo {
        let next = next_period_start(frame_no, subframe_no, u32::from(self.sc_tf.offset), self.sc_period.as_subframes());
        tracing::debug!("next SC period after {}/{}: {}", frame_no, subframe_no, next);
        next
    }

    /// The two PSCCH transmissions of resource `n`, pool relative (TS 36.213 14.2.1.1)
    pub fn pscch_transmissions(&self, n: u32) -> Vec<SidelinkTransmissionInfo> {
        assert!(n < self.n_pscch, "Requesting resource {} but max is {}", n, self.n_pscch);
        let l = self.lpscch.len() as u32;
        let rb = self.rbpscch.len() as u32;
        assert!(l >= 2, "PSCCH pool needs at least two subframes, has {}", l);

        let a1 = n % l;
        let b1 = n / l;
        let a2 = (n + 1 + (n / l) % (l - 1)) % l;
        let b2 = n / l + rb / 2;

        let mut pairs = [(a1, b1), (a2, b2)];
        pairs.sort_by_key(|&(a, _)| a);

        pairs
            .iter()
            .map(|&(a, b)| self.translate_pscch(a, b))
            .collect()
    }

    fn translate_pscch(&self, sf_index: u32, rb_index: u32) -> SidelinkTransmissionInfo {
        let mapped = self.lpscch[sf_index as usize];
        let info = SidelinkTransmissionInfo {
            subframe: SubframeInfo::from_offset(mapped),
            rb_start: self.rbpscch[rb_index as usize] as u8,
            nb_rb: 1,
        };
        tracing::trace!("mapped PSCCH opportunity {}/{} to {}", sf_index, rb_index, info);
        info
    }

    /// All PSCCH PRBs if (frame_no, subframe_no) is a control subframe of its period
    pub fn pscch_opportunities(&self, frame_no: u32, subframe_no: u32) -> Vec<u8> {
        let s = abs_subframe(frame_no, subframe_no);
        let period = self.sc_period.as_subframes();
        let offset = u32::from(self.sc_tf.offset);
        let start = i64::from(offset) + period_index(s, offset, period) * i64::from(period);
        let rel = s - start;
        if rel < PSCCH_BITMAP_LEN && self.sc_tf.subframe_bitmap.bit(rel as u32) {
            self.rbpscch.iter().map(|&rb| rb as u8).collect()
        } else {
            Vec::new()
        }
    }

    /// PRBs used by PSCCH resource `n` at (frame_no, subframe_no)
    pub fn pscch_rbs(&self, frame_no: u32, subframe_no: u32, n: u32) -> Vec<u8> {
        let current = SubframeInfo::new(frame_no, subframe_no) + SubframeInfo::default();
        let period_start = self.current_sc_period(frame_no, subframe_no);
        let mut rbs = Vec::new();
        for tx in self.pscch_transmissions(n) {
            if period_start + tx.subframe == current {
                rbs.extend(tx.rb_start..tx.rb_start + tx.nb_rb);
            }
        }
        rbs
    }

    /// PSSCH transmissions for a grant in the period starting at `period_start`
    /// (TS 36.213 14.1.1.1.1 and 8.4)
    pub fn pssch_transmissions(&self, period_start: SubframeInfo, itrp: u8, rb_start: u8, rb_len: u8) -> Vec<SidelinkTransmissionInfo> {
        if let PoolRole::UeSelected { data_tf, trpt_subset } = self.role {
            let k = itrp::ktrp(itrp);
            assert!(
                (k == 1 && trpt_subset.bit(0)) || (k == 2 && trpt_subset.bit(1)) || (k == 4 && trpt_subset.bit(2)) || k == 8,
                "I_TRP {} (k_TRP {}) not allowed by TRPT subset {:#05b}", itrp, k, trpt_subset.value()
            );
            let start = i32::from(data_tf.prb_start);
            let end = i32::from(data_tf.prb_end);
            let num = i32::from(data_tf.prb_num);
            for i in i32::from(rb_start)..i32::from(rb_start) + i32::from(rb_len) {
                assert!(i < start + num || i > end - num,
                    "Rb = {} not within range: prbStart = {}, prbStop = {}, prbNum = {}", i, start, end, num);
            }
        }

        let period_subframe = period_start.to_int();
        let mut subframes: Vec<u32> = self
            .lpssch
            .iter()
            .enumerate()
            .filter(|&(i, &off)| itrp::pattern_bit(itrp, i) && period_subframe + off < SUBFRAMES_PER_SFN_CYCLE)
            .map(|(_, &off)| period_subframe + off)
            .collect();
        // Whole HARQ processes only
        subframes.truncate(subframes.len() - subframes.len() % 4);

        let hopping = self.data_hopping;
        let mut n_sl0 = rb_start;
        let mut n_sl1 = rb_start;
        let mut type2_prbs = Vec::new();
        if hopping.is_type1() {
            let off = even_rb_offset(hopping.rb_offset);
            n_sl0 = (u32::from(rb_start) + off / 2) as u8;
            n_sl1 = (self.nprb_type1(rb_start) + off / 2) as u8;
        } else if hopping.is_type2() {
            type2_prbs = self.nprb_type2(rb_start, rb_len, &subframes);
        }

        subframes
            .iter()
            .enumerate()
            .map(|(idx, &sf)| {
                let tx_counter = idx + 1;
                let rb = if hopping.is_type1() {
                    if tx_counter % 2 == 0 { n_sl1 } else { n_sl0 }
                } else if hopping.is_type2() {
                    type2_prbs[idx][0] as u8
                } else {
                    rb_start
                };
                SidelinkTransmissionInfo {
                    subframe: SubframeInfo::new(sf / 10, sf % 10),
                    rb_start: rb,
                    nb_rb: rb_len,
                }
            })
            .collect()
    }

    /// Type 1 PUSCH hopping, second slot PRB (TS 36.213 8.4.1)
    fn nprb_type1(&self, rb_start: u8) -> u32 {
        assert!(self.data_hopping.is_type1(), "only Type 1 frequency hopping is allowed, hoppingInfo {}",
            self.data_hopping.hopping_info);
        let rbpssch = self.rbpssch.len() as i32;
        let off = even_rb_offset(self.data_hopping.rb_offset) as i32;
        let n_rb = rbpssch - off - rbpssch % 2;
        assert!(n_rb > 0, "INVALID HOPPING RB OFFSET {} for {} PSSCH PRBs", self.data_hopping.rb_offset, rbpssch);
        let rb_start = i32::from(rb_start);
        let nprb = match self.data_hopping.hopping_info {
            0 => (n_rb / 4 + rb_start) % n_rb,
            1 => (-(n_rb / 4) + rb_start).rem_euclid(n_rb),
            _ => (n_rb / 2 + rb_start) % n_rb,
        };
        tracing::trace!("hoppingInfo {} nPrb {}", self.data_hopping.hopping_info, nprb);
        nprb as u32
    }

    /// Type 2 PUSCH hopping (TS 36.213 8.4.2): PRBs of every transmission of the grant
    fn nprb_type2(&self, rb_start: u8, rb_len: u8, subframes: &[u32]) -> Vec<Vec<u32>> {
        let nsb = i64::from(self.data_hopping.num_subbands.count());
        let rb_offset = i64::from(self.data_hopping.rb_offset);
        let rbpssch = self.rbpssch.len() as i64;
        let Some(&vrb) = self.prb_to_vrb.get(&u32::from(rb_start)) else {
            panic!("PRB {} is not part of the PSSCH pool", rb_start);
        };

        let (v_start, sb_size) = if nsb == 1 {
            (i64::from(vrb), rbpssch)
        } else {
            (i64::from(vrb) - rb_offset / 2, (rbpssch - rb_offset - rb_offset % 2) / nsb)
        };
        assert!(sb_size > 0, "INVALID HOPPING RB OFFSET {} for {} PSSCH PRBs in {} subbands", rb_offset, rbpssch, nsb);
        tracing::trace!("numSubbands {}, sbSize {}", nsb, sb_size);

        let len = rb_len as usize;
        subframes
            .iter()
            .enumerate()
            .map(|(k, &x)| {
                let hop = i64::from(self.hop[x as usize]);
                let mirror = if nsb == 1 {
                    ((k + 1) % 2) as i64
                } else {
                    i64::from(self.gold[10 * x as usize])
                };
                let mut row = vec![0u32; len];
                for j in 0..len {
                    let v = v_start + j as i64;
                    let mut nprb = (v + hop * sb_size + ((sb_size - 1) - 2 * v.rem_euclid(sb_size)) * mirror)
                        .rem_euclid(sb_size * nsb);
                    if nsb > 1 {
                        nprb += rb_offset / 2;
                    }
                    let prb = self.rbpssch[nprb as usize];
                    // Mirrored grants keep their PRBs in ascending order
                    if mirror == 1 {
                        row[len - 1 - j] = prb;
                    } else {
                        row[j] = prb;
                    }
                }
                row
            })
            .collect()
    }

    /// Whether PRBs [rb_start, rb_start + rb_len) are all PSSCH PRBs, excluding
    /// rb_offset/2 PRBs at each edge of the data PRB range
    pub fn is_in_pool(&self, rb_start: u32, rb_len: u32, rb_offset: u32) -> bool {
        let tf = self.data_tf_resource_config();
        let start = i64::from(tf.prb_start);
        let end = i64::from(tf.prb_end);
        let num = i64::from(tf.prb_num);
        let half = i64::from(rb_offset / 2);
        (i64::from(rb_start)..i64::from(rb_start) + i64::from(rb_len))
            .all(|i| !((i >= start + num && i <= end - num) || i < start + half || i > end - half))
    }

    /// Width y of the resource allocation field once the hopping bits are taken out
    fn allocation_field_bits(&self) -> i32 {
        let rb = self.rbpssch.len() as u64;
        let n_sl_hop = match rb {
            6..=49 => 1,
            50..=110 => 2,
            _ => 0,
        };
        let combos = rb * (rb + 1) / 2;
        if combos == 0 {
            return 0;
        }
        (combos as f64).log2().ceil() as i32 - n_sl_hop
    }

    /// Maximum grant length under Type 1 hopping
    fn type1_max_lcrbs(&self) -> u32 {
        let rb = self.rbpssch.len() as f64;
        if rb == 0.0 {
            return 0;
        }
        (2f64.powi(self.allocation_field_bits()) / rb).floor() as u32
    }

    /// First PRBs from which a grant of `rb_len` PRBs stays in the pool
    pub fn valid_rb_start(&self, rb_len: u8) -> Vec<u8> {
        let hopping = self.data_hopping;
        let tf = self.data_tf_resource_config();
        let prbs = u32::from(tf.prb_start)..=u32::from(tf.prb_end);
        let len = u32::from(rb_len);
        let mut starts = Vec::new();

        if hopping.is_type1() {
            let off = even_rb_offset(hopping.rb_offset);
            let max_l = self.type1_max_lcrbs();
            assert!(len <= max_l, "INVALID rbLen {} must be <= {}", rb_len, max_l);
            for i in prbs {
                if self.is_in_pool(i, 1, 0) {
                    let n_sl0 = i + off / 2;
                    let n_sl1 = self.nprb_type1(i as u8) + off / 2;
                    if self.is_in_pool(n_sl0, len, 0) && self.is_in_pool(n_sl1, len, 0) {
                        starts.push(i as u8);
                    }
                }
            }
        } else if hopping.is_type2() {
            let off = even_rb_offset(hopping.rb_offset);
            let rb = self.rbpssch.len() as u32;
            let nsb = hopping.num_subbands.count();
            let n_rb = if nsb == 1 { rb } else { rb.saturating_sub(off) };
            let sb_size = n_rb / nsb;
            assert!(sb_size > 0, "INVALID HOPPING RB OFFSET {} for {} PSSCH PRBs in {} subbands", hopping.rb_offset, rb, nsb);
            let max_l = self.type1_max_lcrbs().min(sb_size);
            assert!(len <= max_l, "INVALID rbLen {} must be <= {}", rb_len, max_l);

            let per_subband = sb_size - len + 1;
            let effective_offset = rb - n_rb;
            let mut i_vrb = 0;
            let mut j_alloc = 0;
            for i in prbs {
                if self.is_in_pool(i, 1, effective_offset) {
                    if i_vrb % sb_size == 0 {
                        j_alloc = 0;
                    }
                    if j_alloc < per_subband && self.is_in_pool(i, len, effective_offset) {
                        starts.push(i as u8);
                        j_alloc += 1;
                    }
                    i_vrb += 1;
                }
            }
        } else {
            starts.extend(prbs.filter(|&i| self.is_in_pool(i, len, 0)).map(|i| i as u8));
        }
        starts
    }

    /// Valid first PRBs for every grant length 1..=maxL under Type 1 hopping
    pub fn valid_allocations(&self) -> Vec<Vec<u8>> {
        tracing::debug!("HoppingInfo = {}", self.data_hopping.hopping_info);
        if self.data_hopping.is_type1() {
            let max_l = self.type1_max_lcrbs();
            tracing::debug!("maxLcrbs = {}", max_l);
            (1..=max_l).map(|m| self.valid_rb_start(m as u8)).collect()
        } else if self.data_hopping.is_type2() {
            panic!("TYPE 2 FREQUENCY HOPPING IS NOT IMPLEMENTED");
        } else {
            Vec::new()
        }
    }

    /// Transport blocks per SC period for k_TRP = 1, 2, 4, 8 (N_TRP 8, 4 HARQ transmissions)
    pub fn tb_per_sl_period(&self) -> [u32; 4] {
        let subset = self.trpt_subset();
        let lpssch = self.lpssch.len() as u32;
        let mut tb = [0u32; 4];
        for i in 0..3u8 {
            if subset.bit(i) {
                tb[i as usize] = (1 << i) * lpssch / 32;
            }
        }
        if subset.none() {
            tb[3] = 8 * lpssch / 32;
        }
        tb
    }
}

/// PRBs i of [prb_start, prb_end] with i < prb_start + prb_num or i > prb_end - prb_num
pub(super) fn edge_prbs(tf: &SlTfResourceConfig) -> Vec<u32> {
    let start = i32::from(tf.prb_start);
    let end = i32::from(tf.prb_end);
    let num = i32::from(tf.prb_num);
    (start..=end)
        .filter(|&i| i < start + num || i > end - num)
        .map(|i| i as u32)
        .collect()
}

fn even_rb_offset(rb_offset: u8) -> u32 {
    let off = u32::from(rb_offset);
    off + off % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_sl_core::debug;
    use lte_sl_rrc::factory::{SlCommPoolFactory, SlPoolFactory};

    fn factory() -> SlCommPoolFactory {
        let mut f = SlCommPoolFactory::default();
        f.set_control_period("sf120");
        f.set_control_bitmap(0x3);
        f.set_control_prb_num(1);
        f.set_control_prb_start(10);
        f.set_control_prb_end(40);
        f.set_control_offset(80);
        f.set_data_bitmap(0xCCCCCCCCCC);
        f.set_data_prb_num(10);
        f.set_data_prb_start(0);
        f.set_data_prb_end(49);
        f.set_data_offset(8);
        f
    }

    #[test]
    fn test_pscch_resources() {
        debug::setup_logging_verbose();
        let pool = SidelinkCommResourcePool::from_ie(&factory().create_pool());
        assert_eq!(pool.pscch_subframes(), &[0, 1]);
        assert_eq!(pool.pscch_rb_list(), &[10, 40]);
        assert_eq!(pool.n_pscch(), 2);
        assert_eq!(pool.pssch_bandwidth(), 20);
        assert!(pool.is_ue_selected());
    }

    #[test]
    fn test_pscch_transmissions_are_distinct_and_ordered() {
        let mut f = factory();
        f.set_control_bitmap(0xFF);
        f.set_control_prb_num(4);
        let pool = SidelinkCommResourcePool::from_ie(&f.create_pool());
        assert_eq!(pool.n_pscch(), 32);

        let mut seen = std::collections::HashSet::new();
        for n in 0..pool.n_pscch() {
            let tx = pool.pscch_transmissions(n);
            assert_eq!(tx.len(), 2);
            assert!(tx[0].subframe < tx[1].subframe);
            assert!(seen.insert((tx[0].subframe, tx[0].rb_start, tx[1].subframe, tx[1].rb_start)));
        }
    }

    #[test]
    #[should_panic(expected = "Requesting resource 2 but max is 2")]
    fn test_pscch_resource_out_of_range() {
        SidelinkCommResourcePool::from_ie(&factory().create_pool()).pscch_transmissions(2);
    }

    #[test]
    fn test_scheduled_pool_data_subframes() {
        let mut f = factory();
        f.set_have_ue_selected_resource_config(false);
        let pool = SidelinkCommResourcePool::from_ie(&f.create_pool());
        assert_eq!(pool.role(), PoolRole::Scheduled);
        assert_eq!(pool.all_pssch_subframes().len(), 118);
        assert_eq!(pool.all_pssch_subframes()[0], 2);
        assert_eq!(pool.pssch_bandwidth(), 0);
    }

    #[test]
    fn test_type1_alternates_between_slots() {
        let mut f = factory();
        f.set_data_hopping_info(0);
        let pool = SidelinkCommResourcePool::from_ie(&f.create_pool());
        let start = pool.next_sc_period(0, 5);
        let tx = pool.pssch_transmissions(start, 5, 2, 3);
        assert_eq!(tx.len(), 4);
        for (i, t) in tx.iter().enumerate() {
            assert_eq!(t.rb_start, if i % 2 == 0 { 2 } else { 7 });
        }
    }

    #[test]
    fn test_valid_rb_start_without_hopping() {
        let pool = SidelinkCommResourcePool::from_ie(&factory().create_pool());
        let starts = pool.valid_rb_start(6);
        assert_eq!(starts, vec![0, 1, 2, 3, 4, 40, 41, 42, 43, 44]);
        assert!(pool.valid_allocations().is_empty());
    }

    #[test]
    fn test_valid_allocations_type1() {
        let mut f = factory();
        f.set_data_hopping_info(0);
        let pool = SidelinkCommResourcePool::from_ie(&f.create_pool());
        // 20 PRBs: y = ceil(log2(210)) - 1 = 7, maxL = 128 / 20 = 6
        let allocs = pool.valid_allocations();
        assert_eq!(allocs.len(), 6);
        for (m, starts) in allocs.iter().enumerate() {
            let len = m as u32 + 1;
            for &s in starts {
                assert!(pool.is_in_pool(u32::from(s), len, 0));
            }
        }
    }

    #[test]
    #[should_panic(expected = "INVALID rbLen 7 must be <= 6")]
    fn test_valid_rb_start_rejects_long_grants() {
        let mut f = factory();
        f.set_data_hopping_info(1);
        SidelinkCommResourcePool::from_ie(&f.create_pool()).valid_rb_start(7);
    }

    #[test]
    #[should_panic(expected = "TYPE 2 FREQUENCY HOPPING IS NOT IMPLEMENTED")]
    fn test_valid_allocations_type2_is_fatal() {
        let mut f = factory();
        f.set_data_hopping_info(3);
        SidelinkCommResourcePool::from_ie(&f.create_pool()).valid_allocations();
    }

    #[test]
    fn test_valid_rb_start_type2_respects_subbands() {
        let mut f = factory();
        f.set_data_hopping_info(3);
        f.set_data_hopping_subbands("ns2");
        let pool = SidelinkCommResourcePool::from_ie(&f.create_pool());
        // Two subbands of 10 PRBs, 8 starts each for a 3 PRB grant
        assert_eq!(pool.valid_rb_start(3), vec![0, 1, 2, 3, 4, 5, 6, 7, 40, 41, 42, 43, 44, 45, 46, 47]);
    }

    #[test]
    fn test_tb_per_sl_period() {
        let pool = SidelinkCommResourcePool::from_ie(&factory().create_pool());
        // 56 PSSCH subframes in [8, 120)
        assert_eq!(pool.all_pssch_subframes().len(), 56);
        assert_eq!(pool.tb_per_sl_period(), [1, 3, 7, 0]);
    }

    #[test]
    fn test_equality_follows_configuration() {
        let a = SidelinkCommResourcePool::from_ie(&factory().create_pool());
        let b = SidelinkCommResourcePool::from_ie(&factory().create_pool());
        assert_eq!(a, b);
        let mut f = factory();
        f.set_data_offset(9);
        assert_ne!(a, SidelinkCommResourcePool::from_ie(&f.create_pool()));
    }
}
