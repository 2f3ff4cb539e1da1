pub mod bsr_timers;
pub mod sl_cp_len;
pub mod sl_hopping_disc_c;
pub mod sl_num_subbands;
pub mod sl_period_comm;
pub mod sl_period_disc;
pub mod sl_pool_selection;
pub mod sl_tdd_config;
pub mod sl_tx_alpha;
pub mod sl_tx_probability;
