use clap::Parser;

use lte_sl_config::{SharedConfig, toml_config};
use lte_sl_core::{L2Id, SubframeInfo, debug};
use lte_sl_entities::pool::{SidelinkCommResourcePool, SidelinkDiscResourcePool, SidelinkTxDiscResourcePool};

mod relay_run;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "LTE Sidelink pool inspector",
    long_about = "Builds the sidelink resource pools from a TOML configuration and prints their subframe and PRB mapping"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with UE and pool parameters")]
    config: String,

    #[arg(short = 'f', long = "frame", default_value_t = 0, help = "Frame number the query starts from")]
    frame: u32,

    #[arg(short = 's', long = "subframe", default_value_t = 0, help = "Subframe number the query starts from")]
    subframe: u32,

    #[arg(long = "itrp", help = "Time resource pattern index; prints the PSSCH mapping when set")]
    itrp: Option<u8>,

    #[arg(long = "rb-start", default_value_t = 0, help = "First PSSCH PRB of the allocation")]
    rb_start: u8,

    #[arg(long = "rb-len", default_value_t = 2, help = "Number of PSSCH PRBs of the allocation")]
    rb_len: u8,

    #[arg(
        long = "relay-peer",
        value_parser = parse_l2_id,
        help = "Also run a scripted PC5 relay link setup with this peer layer 2 id (hex with 0x, or decimal)"
    )]
    relay_peer: Option<L2Id>,
}

fn parse_l2_id(s: &str) -> Result<L2Id, String> {
    let v = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    }
    .map_err(|e| format!("invalid layer 2 id {}: {}", s, e))?;
    if v == 0 || v > 0x00FF_FFFF {
        return Err(format!("layer 2 id {:#x} is not a nonzero 24 bit value", v));
    }
    Ok(v)
}

fn dump_comm_pool(name: &str, pool: &SidelinkCommResourcePool, args: &Args) {
    println!("[{}] {} pool, period {}, {} PSCCH resources", name, pool.role(), pool.sc_period(), pool.n_pscch());
    println!("  PSCCH subframes: {:?}", pool.pscch_subframes());
    println!("  PSCCH PRBs:      {:?}", pool.pscch_rb_list());
    println!("  PSSCH subframes: {:?}", pool.all_pssch_subframes());
    println!("  PSSCH PRBs:      {:?}", pool.pssch_rb_list());

    let period = pool.next_sc_period(args.frame, args.subframe);
    println!("  next SC period after {}: {}", SubframeInfo::new(args.frame, args.subframe), period);

    for n in 0..pool.n_pscch() {
        let tx: Vec<String> = pool.pscch_transmissions(n).iter().map(|t| t.to_string()).collect();
        println!("  PSCCH {:>3}: {}", n, tx.join(", "));
    }

    if let Some(itrp) = args.itrp {
        let tx: Vec<String> = pool
            .pssch_transmissions(period, itrp, args.rb_start, args.rb_len)
            .iter()
            .map(|t| t.to_string())
            .collect();
        println!("  PSSCH itrp {} rb {}+{}: {}", itrp, args.rb_start, args.rb_len, tx.join(", "));
    }
}

fn dump_disc_pool(name: &str, pool: &SidelinkDiscResourcePool, args: &Args) {
    println!(
        "[{}] {} pool, period {}, {} PSDCH resources, {} retransmissions",
        name,
        pool.pool_type(),
        pool.disc_period(),
        pool.n_psdch(),
        pool.num_retx()
    );
    let period = pool.next_disc_period(args.frame, args.subframe);
    println!("  next discovery period after {}: {}", SubframeInfo::new(args.frame, args.subframe), period);

    for n in 0..pool.n_psdch() {
        let tx: Vec<String> = pool.psdch_transmissions(n).iter().map(|t| t.to_string()).collect();
        println!("  PSDCH {:>3}: {} (conflicts {:?})", n, tx.join(", "), pool.conflicting_resources(n));
    }
}

fn main() {
    eprintln!("[+] LTE Sidelink pool inspector");

    let args = Args::parse();
    let shared = load_config_from_toml(&args.config);
    let cfg = shared.config();
    let _log_guard = debug::setup_logging_default(cfg.debug_log.clone());

    tracing::info!("UE imsi {} l2 id {:#08x}", cfg.ue.imsi, cfg.ue.l2_id);

    let mut dumped = 0;
    if let Some(ref p) = cfg.comm_pool {
        dump_comm_pool("comm_pool", &SidelinkCommResourcePool::from_ie(&p.build()), &args);
        dumped += 1;
    }
    if let Some(ref p) = cfg.preconfig_comm_pool {
        dump_comm_pool("preconfig_comm_pool", &SidelinkCommResourcePool::from_preconfig(&p.build_preconfig()), &args);
        dumped += 1;
    }
    if let Some(ref p) = cfg.disc_pool {
        let tx = SidelinkTxDiscResourcePool::from_ie(&p.build());
        dump_disc_pool("disc_pool", &tx, &args);
        println!("  tx probability {}%", tx.tx_probability());
        dumped += 1;
    }
    if let Some(ref p) = cfg.preconfig_disc_pool {
        dump_disc_pool("preconfig_disc_pool", &SidelinkDiscResourcePool::from_preconfig(&p.build_preconfig()), &args);
        dumped += 1;
    }

    if dumped == 0 {
        tracing::warn!("No pools configured in {}", args.config);
    }

    if let Some(peer) = args.relay_peer {
        relay_run::run(&shared, peer);
    }
}
