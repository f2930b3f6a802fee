use anyhow::Result;

use crate::MeshConfig;

pub fn check_mesh(cfg: &MeshConfig) -> Result<()> {
    anyhow::ensure!(!cfg.host.trim().is_empty(), "mesh.host missing");
    anyhow::ensure!(!cfg.tool.trim().is_empty(), "mesh.tool missing");
    anyhow::ensure!(cfg.timeout_s >= 1, "mesh.timeout_s should be >= 1");
    Ok(())
}

pub fn check_window(time_offset_s: i64) -> Result<()> {
    anyhow::ensure!(time_offset_s > 0, "filter.time_offset_s must be positive");
    Ok(())
}
