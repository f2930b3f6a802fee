use anyhow::{Context, Result};
use mesh_influx::InfluxConfig;
use mesh_report::MeshConfig;

/// Overrides `influx.password` so it can stay out of the config file.
pub const PASSWORD_ENV: &str = "MESHFLUX_INFLUX_PASSWORD";

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub mesh: MeshConfig,
    pub influx: InfluxConfig,
    #[serde(default)]
    pub filter: FilterCfg,
}

#[derive(Debug, serde::Deserialize)]
pub struct FilterCfg {
    /// Upload only nodes heard in the last N seconds.
    #[serde(default = "default_time_offset_s")]
    pub time_offset_s: i64,
}

impl Default for FilterCfg {
    fn default() -> Self {
        Self { time_offset_s: default_time_offset_s() }
    }
}

fn default_time_offset_s() -> i64 {
    900
}

pub fn load_config(path: &str) -> Result<Config> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path))?;
    let mut cfg = parse_config(&s)?;
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        cfg.influx.password = pw;
    }
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config toml")
}
