use lte_sl_core::{SubframeInfo, debug};
use lte_sl_entities::pool::{DiscPoolType, SidelinkTransmissionInfo, SidelinkTxDiscResourcePool};
use lte_sl_rrc::SlPoolSelectionRsrpBased;
use lte_sl_rrc::enums::sl_pool_selection::SlPoolSelection;
use lte_sl_rrc::factory::SlDiscPoolFactory;

/// rf32 pool with two discovery subframes and a single PRB pair
fn pool_factory() -> SlDiscPoolFactory {
    let mut f = SlDiscPoolFactory::new();
    f.set_disc_cp_len("NORMAL");
    f.set_disc_period("rf32");
    f.set_num_retx(0);
    f.set_num_repetition(1);
    f.set_disc_prb_num(1);
    f.set_disc_prb_start(10);
    f.set_disc_prb_end(11);
    f.set_disc_offset(80);
    f.set_disc_bitmap(0x0000000003);
    f.set_have_tx_parameters(true);
    f.set_disc_tx_alpha("al09");
    f.set_disc_tx_p0(-40);
    f.set_disc_pool_selection("RSRPBASED");
    f.set_have_rsrp_based_pool_selection(true);
    f.set_rsrp_thresh_low(0);
    f.set_rsrp_thresh_high(7);
    f.set_disc_tx_probability("p100");
    f
}

#[test]
fn test_next_disc_period() {
    debug::setup_logging_verbose();
    let pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.next_disc_period(0, 5), SubframeInfo::new(8, 0));
    assert_eq!(pool.next_disc_period(8, 0), SubframeInfo::new(40, 0));
    assert_eq!(pool.next_disc_period(40, 0), SubframeInfo::new(72, 0));
    assert_eq!(pool.next_disc_period(1023, 0), SubframeInfo::new(8, 0));
    assert_eq!(pool.next_disc_period(800, 0), SubframeInfo::new(808, 0));
}

#[test]
fn test_psdch_resource_mapping() {
    let pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.pool_type(), DiscPoolType::UeSelected);
    assert_eq!(pool.n_psdch(), 2);

    let expected = |sf| vec![SidelinkTransmissionInfo { subframe: SubframeInfo::new(0, sf), rb_start: 10, nb_rb: 2 }];
    assert_eq!(pool.psdch_transmissions(0), expected(0));
    assert_eq!(pool.psdch_transmissions(1), expected(1));
}

#[test]
fn test_psdch_opportunities() {
    let pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.psdch_opportunities(8, 0), vec![10, 11]);
    assert_eq!(pool.psdch_opportunities(8, 1), vec![10, 11]);
    assert!(pool.psdch_opportunities(8, 2).is_empty());
    // Next period starts at frame 40
    assert_eq!(pool.psdch_opportunities(40, 1), vec![10, 11]);
}

#[test]
fn test_tx_parameters() {
    let pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    assert_eq!(pool.tx_probability(), 100);
    assert_eq!(pool.pool_selection(), SlPoolSelection::RsrpBased);
    assert_eq!(pool.rsrp_thresholds(), Some(SlPoolSelectionRsrpBased { thresh_low: 0, thresh_high: 7 }));
}

#[test]
fn test_tx_probability_update() {
    let mut pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    pool.set_tx_probability(50);
    assert_eq!(pool.tx_probability(), 50);
}

#[test]
fn test_resources_do_not_conflict_across_subframes() {
    let pool = SidelinkTxDiscResourcePool::from_ie(&pool_factory().create_pool());
    assert!(pool.conflicting_resources(0).contains(&0));
    assert!(!pool.conflicting_resources(0).contains(&1));
}
