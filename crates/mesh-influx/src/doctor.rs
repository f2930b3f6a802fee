use anyhow::Result;

use crate::InfluxConfig;

pub fn check_influx(cfg: &InfluxConfig) -> Result<()> {
    anyhow::ensure!(!cfg.host.trim().is_empty(), "influx.host missing");
    anyhow::ensure!(cfg.port > 0, "influx.port invalid");
    anyhow::ensure!(!cfg.database.trim().is_empty(), "influx.database missing");
    anyhow::ensure!(cfg.timeout_s >= 1, "influx.timeout_s should be >= 1");
    Ok(())
}
