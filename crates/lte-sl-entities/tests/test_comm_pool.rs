use lte_sl_core::{SubframeInfo, debug};
use lte_sl_entities::pool::{SidelinkTransmissionInfo, SidelinkTxCommResourcePool};
use lte_sl_rrc::factory::{SlCommPoolFactory, SlPoolFactory};

/// sf120 pool with two control subframes at PRB 10 and 40
fn pool_factory() -> SlCommPoolFactory {
    let mut f = SlCommPoolFactory::default();
    f.set_control_period("sf120");
    f.set_control_bitmap(0x0000000003);
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

fn tx(frame: u32, subframe: u32, rb_start: u8, nb_rb: u8) -> SidelinkTransmissionInfo {
    SidelinkTransmissionInfo { subframe: SubframeInfo::new(frame, subframe), rb_start, nb_rb }
}

/// The first four PSSCH transmissions of an itrp 5 grant at PRB 2
fn pssch_first_four(f: &SlCommPoolFactory, rb_len: u8) -> Vec<SidelinkTransmissionInfo> {
    let pool = SidelinkTxCommResourcePool::from_ie(&f.create_pool());
    let period = pool.next_sc_period(0, 5);
    let txs = pool.pssch_transmissions(period, 5, 2, rb_len);
    assert!(txs.len() >= 4);
    txs[..4].to_vec()
}

#[test]
fn test_next_sc_period() {
    debug::setup_logging_verbose();
    let pool = SidelinkTxCommResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.next_sc_period(0, 5), SubframeInfo::new(8, 0));
    assert_eq!(pool.next_sc_period(1023, 0), SubframeInfo::new(8, 0));
    assert_eq!(pool.next_sc_period(1002, 0), SubframeInfo::new(1004, 0));

    // Stable when queried again
    assert_eq!(pool.next_sc_period(1002, 0), pool.next_sc_period(1002, 0));
}

#[test]
fn test_pscch_resource_mapping() {
    let pool = SidelinkTxCommResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.n_pscch(), 2);
    assert_eq!(pool.pscch_transmissions(0), vec![tx(0, 0, 10, 1), tx(0, 1, 40, 1)]);
    assert_eq!(pool.pscch_transmissions(1), vec![tx(0, 0, 40, 1), tx(0, 1, 10, 1)]);
}

#[test]
fn test_pscch_subframe_opportunities() {
    let pool = SidelinkTxCommResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.pscch_opportunities(8, 0), vec![10, 40]);
    assert_eq!(pool.pscch_opportunities(8, 1), vec![10, 40]);
    assert!(pool.pscch_opportunities(8, 2).is_empty());
}

#[test]
fn test_pssch_without_hopping() {
    let txs = pssch_first_four(&pool_factory(), 6);
    assert_eq!(txs, vec![tx(9, 9, 2, 6), tx(11, 5, 2, 6), tx(13, 1, 2, 6), tx(14, 7, 2, 6)]);
}

#[test]
fn test_pssch_type1_hopping() {
    // Second slot start for each hopping info value
    for (info, hopped) in [(0u8, 7u8), (1, 17), (2, 12)] {
        let mut f = pool_factory();
        f.set_data_hopping_info(info);
        let txs = pssch_first_four(&f, 3);
        assert_eq!(txs, vec![tx(9, 9, 2, 3), tx(11, 5, hopped, 3), tx(13, 1, 2, 3), tx(14, 7, hopped, 3)],
            "hopping info {}", info);
    }
}

#[test]
fn test_pssch_type2_hopping() {
    let mut f = pool_factory();
    f.set_data_hopping_info(3);
    f.set_data_hopping_parameter(0);

    f.set_data_hopping_subbands("ns2");
    let txs = pssch_first_four(&f, 3);
    assert_eq!(txs, vec![tx(9, 9, 42, 3), tx(11, 5, 45, 3), tx(13, 1, 5, 3), tx(14, 7, 5, 3)]);

    f.set_data_hopping_subbands("ns4");
    let txs = pssch_first_four(&f, 3);
    assert_eq!(txs, vec![tx(9, 9, 47, 3), tx(11, 5, 45, 3), tx(13, 1, 5, 3), tx(14, 7, 0, 3)]);
}

#[test]
fn test_pscch_rbs_follow_resource() {
    let pool = SidelinkTxCommResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.pscch_rbs(8, 0, 0), vec![10]);
    assert_eq!(pool.pscch_rbs(8, 1, 0), vec![40]);
    assert_eq!(pool.pscch_rbs(8, 0, 1), vec![40]);
    assert!(pool.pscch_rbs(8, 2, 1).is_empty());
}

#[test]
#[should_panic(expected = "INVALID HOPPING RB OFFSET")]
fn test_type1_offset_covering_pssch_is_fatal() {
    // 20 PSSCH PRBs, all taken by the hopping offset
    let mut f = pool_factory();
    f.set_data_hopping_info(0);
    f.set_data_hopping_offset(20);
    let pool = SidelinkTxCommResourcePool::from_ie(&f.create_pool());
    pool.valid_rb_start(1);
}

#[test]
#[should_panic(expected = "INVALID HOPPING RB OFFSET")]
fn test_type2_offset_covering_pssch_is_fatal() {
    let mut f = pool_factory();
    f.set_data_hopping_info(3);
    f.set_data_hopping_subbands("ns4");
    f.set_data_hopping_offset(20);
    let pool = SidelinkTxCommResourcePool::from_ie(&f.create_pool());
    pool.valid_rb_start(1);
}
