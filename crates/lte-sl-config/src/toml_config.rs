use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use lte_sl_core::{Campaign, RelayRole, RelayUeSelectionAlgorithm};
use serde::Deserialize;
use toml::Value;

use super::stack_config::{CfgCampaign, CfgController, CfgNas, CfgUe, SharedConfig, SlStackConfig};
use super::stack_config_pool::{CfgCommPool, CfgDiscPool};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.ue.extra.is_empty() {
        return Err(format!("Unrecognized fields in ue: {:?}", sorted_keys(&root.ue.extra)).into());
    }
    for (name, pool) in [("comm_pool", &root.comm_pool), ("preconfig_comm_pool", &root.preconfig_comm_pool)] {
        if let Some(p) = pool {
            if !p.extra.is_empty() {
                return Err(format!("Unrecognized fields in {}: {:?}", name, sorted_keys(&p.extra)).into());
            }
        }
    }
    for (name, pool) in [("disc_pool", &root.disc_pool), ("preconfig_disc_pool", &root.preconfig_disc_pool)] {
        if let Some(p) = pool {
            if !p.extra.is_empty() {
                return Err(format!("Unrecognized fields in {}: {:?}", name, sorted_keys(&p.extra)).into());
            }
        }
    }
    if let Some(ref c) = root.controller {
        if !c.extra.is_empty() {
            return Err(format!("Unrecognized fields in controller: {:?}", sorted_keys(&c.extra)).into());
        }
    }
    if let Some(ref n) = root.nas {
        if !n.extra.is_empty() {
            return Err(format!("Unrecognized fields in nas: {:?}", sorted_keys(&n.extra)).into());
        }
    }

    // Build config from required and optional values
    let mut cfg = SlStackConfig {
        debug_log: root.debug_log,
        ue: CfgUe {
            imsi: root.ue.imsi,
            l2_id: root.ue.l2_id,
            role: root.ue.role,
        },
        comm_pool: root.comm_pool.map(comm_pool_from_dto),
        preconfig_comm_pool: root.preconfig_comm_pool.map(comm_pool_from_dto),
        disc_pool: root.disc_pool.map(disc_pool_from_dto),
        preconfig_disc_pool: root.preconfig_disc_pool.map(disc_pool_from_dto),
        controller: CfgController::default(),
        nas: CfgNas::default(),
    };

    if let Some(c) = root.controller {
        apply_controller_patch(&mut cfg.controller, c)?;
    }

    if let Some(n) = root.nas {
        cfg.nas.self_addr = n.self_addr;
        if let Some(v) = n.relay_drb_id {
            cfg.nas.relay_drb_id = v;
        }
    }

    // SharedConfig panics on an invalid config, report it as an error instead
    cfg.validate().map_err(|e| format!("Invalid stack configuration: {}", e))?;

    Ok(SharedConfig::from_config(cfg))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_controller_patch(dst: &mut CfgController, src: ControllerDto) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(v) = src.algorithm {
        dst.algorithm = v;
    }
    dst.rng_seed = src.rng_seed;

    let Some(name) = src.campaign else {
        return Ok(());
    };
    let Some(campaign) = Campaign::from_name(&name) else {
        return Err(format!("The campaign {} does not exist.", name).into());
    };

    let mut c = CfgCampaign { campaign, ..Default::default() };
    if let Some(v) = src.relay_disc_prob {
        c.relay_disc_prob = v;
    }
    if let Some(v) = src.max_connection_attempts {
        c.max_connection_attempts = v;
    }
    if let Some(v) = src.start_relay_service_ms {
        c.start_relay_service_time = Duration::from_millis(v);
    }
    if let Some(v) = src.disc_period_ms {
        c.disc_period_ms = v;
    }
    if let Some(v) = src.n_relays_to_discover {
        c.n_relays_to_discover = v;
    }
    dst.campaign = Some(c);
    Ok(())
}

fn comm_pool_from_dto(p: CommPoolDto) -> CfgCommPool {
    CfgCommPool {
        control_cp_len: p.control_cp_len,
        control_period: p.control_period,
        control_prb_num: p.control_prb_num,
        control_prb_start: p.control_prb_start,
        control_prb_end: p.control_prb_end,
        control_offset: p.control_offset,
        control_bitmap: p.control_bitmap,
        data_cp_len: p.data_cp_len,
        hopping_parameter: p.hopping_parameter,
        hopping_subbands: p.hopping_subbands,
        hopping_rb_offset: p.hopping_rb_offset,
        hopping_info: p.hopping_info,
        ue_selected: p.ue_selected,
        have_trpt_subset: p.have_trpt_subset,
        trpt_subset: p.trpt_subset,
        data_prb_num: p.data_prb_num,
        data_prb_start: p.data_prb_start,
        data_prb_end: p.data_prb_end,
        data_offset: p.data_offset,
        data_bitmap: p.data_bitmap,
        tx_parameters: p.tx_parameters,
        control_tx_alpha: p.control_tx_alpha,
        control_tx_p0: p.control_tx_p0,
        data_tx_alpha: p.data_tx_alpha,
        data_tx_p0: p.data_tx_p0,
    }
}

fn disc_pool_from_dto(p: DiscPoolDto) -> CfgDiscPool {
    CfgDiscPool {
        cp_len: p.cp_len,
        period: p.period,
        num_retx: p.num_retx,
        num_repetition: p.num_repetition,
        prb_num: p.prb_num,
        prb_start: p.prb_start,
        prb_end: p.prb_end,
        offset: p.offset,
        bitmap: p.bitmap,
        tx_parameters: p.tx_parameters,
        tx_alpha: p.tx_alpha,
        tx_p0: p.tx_p0,
        tx_probability: p.tx_probability,
        pool_selection: p.pool_selection,
        rsrp_based: p.rsrp_based,
        rsrp_thresh_low: p.rsrp_thresh_low,
        rsrp_thresh_high: p.rsrp_thresh_high,
        rx_parameters: p.rx_parameters,
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    ue: UeDto,

    #[serde(default)]
    comm_pool: Option<CommPoolDto>,
    #[serde(default)]
    preconfig_comm_pool: Option<CommPoolDto>,
    #[serde(default)]
    disc_pool: Option<DiscPoolDto>,
    #[serde(default)]
    preconfig_disc_pool: Option<DiscPoolDto>,

    #[serde(default)]
    controller: Option<ControllerDto>,

    #[serde(default)]
    nas: Option<NasDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct UeDto {
    pub imsi: u64,
    pub l2_id: u32,
    pub role: Option<RelayRole>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct CommPoolDto {
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

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct DiscPoolDto {
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

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct ControllerDto {
    pub algorithm: Option<RelayUeSelectionAlgorithm>,
    pub rng_seed: Option<u64>,

    pub campaign: Option<String>,
    pub relay_disc_prob: Option<f64>,
    pub max_connection_attempts: Option<u32>,
    pub start_relay_service_ms: Option<u64>,
    pub disc_period_ms: Option<u32>,
    pub n_relays_to_discover: Option<u32>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct NasDto {
    pub self_addr: Option<IpAddr>,
    pub relay_drb_id: Option<u8>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
config_version = "0.1"

[ue]
imsi = 1001
l2_id = 0x11
"#;

    #[test]
    fn test_minimal_config() {
        let cfg = from_toml_str(MINIMAL).unwrap().config();
        assert_eq!(cfg.ue.imsi, 1001);
        assert_eq!(cfg.ue.l2_id, 0x11);
        assert!(cfg.comm_pool.is_none());
        assert!(cfg.controller.campaign.is_none());
        assert_eq!(cfg.controller.algorithm, RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
config_version = "0.1"

[ue]
imsi = 2
l2_id = 0x22
role = "RelayUe"

[comm_pool]
control_period = "sf120"
control_bitmap = 0x3
data_bitmap = 0xCCCCCCCCCC

[disc_pool]
period = "rf32"
prb_num = 1

[controller]
algorithm = "RANDOM_NO_RESELECTION"
rng_seed = 7
campaign = "Connection"
max_connection_attempts = 3

[nas]
self_addr = "7.0.0.2"
relay_drb_id = 3
"#;
        let cfg = from_toml_str(toml).unwrap().config();
        assert_eq!(cfg.ue.role, Some(RelayRole::RelayUe));
        let comm = cfg.comm_pool.as_ref().unwrap();
        assert_eq!(comm.control_bitmap, Some(0x3));
        assert_eq!(comm.data_bitmap, Some(0xCC_CCCC_CCCC));
        assert_eq!(cfg.disc_pool.as_ref().unwrap().prb_num, Some(1));
        assert_eq!(cfg.controller.algorithm, RelayUeSelectionAlgorithm::RandomNoReselection);
        let campaign = cfg.controller.campaign.as_ref().unwrap();
        assert_eq!(campaign.campaign, Campaign::Connection);
        assert_eq!(campaign.max_connection_attempts, 3);
        assert_eq!(campaign.relay_disc_prob, 100.0);
        assert_eq!(cfg.nas.relay_drb_id, 3);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let toml = format!("{}\n[comm_pool]\ncontrol_perod = \"sf40\"\n", MINIMAL);
        let err = from_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("control_perod"), "{}", err);

        let toml = MINIMAL.replace("[ue]", "foo = 2\n[ue]");
        let err = from_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("Unrecognized top-level fields"), "{}", err);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let toml = MINIMAL.replace("0.1", "0.2");
        let err = from_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("Unrecognized config_version"));
    }

    #[test]
    fn test_rejects_unknown_campaign() {
        let toml = format!("{}\n[controller]\ncampaign = \"Mobility\"\n", MINIMAL);
        let err = from_toml_str(&toml).unwrap_err().to_string();
        assert_eq!(err, "The campaign Mobility does not exist.");
    }

    #[test]
    fn test_shipped_example_config() {
        let cfg = from_toml_str(include_str!("../../../configs/example.toml")).unwrap().config();
        assert_eq!(cfg.ue.role, Some(RelayRole::RelayUe));
        assert_eq!(cfg.nas.self_addr, Some("7777:f00e:0:10::1".parse().unwrap()));
        let pool = cfg.comm_pool.as_ref().unwrap().build();
        assert_eq!(pool.sc_tf_resource_config.prb_num, 1);
        cfg.disc_pool.as_ref().unwrap().build();
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let toml = MINIMAL.replace("0x11", "0");
        assert!(from_toml_str(&toml).is_err());
    }
}
