use mesh_proto::{PipelineError, ToolFailure};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::MeshConfig;

/// Anything that can hand back the raw `--info` text for a host.
#[allow(async_fn_in_trait)]
pub trait ReportSource {
    async fn fetch(&self, host: &str) -> Result<String, PipelineError>;
}

/// Runs `<tool> --host <host> --info` and captures stdout.
#[derive(Debug, Clone)]
pub struct MeshtasticCli {
    tool: String,
    timeout: Duration,
}

impl MeshtasticCli {
    pub fn new(cfg: &MeshConfig) -> Self {
        Self {
            tool: cfg.tool.clone(),
            timeout: Duration::from_secs(cfg.timeout_s),
        }
    }

    fn failure(reason: ToolFailure) -> PipelineError {
        PipelineError::ExternalTool { reason }
    }
}

impl ReportSource for MeshtasticCli {
    async fn fetch(&self, host: &str) -> Result<String, PipelineError> {
        if host.trim().is_empty() {
            return Err(Self::failure(ToolFailure::EmptyHost));
        }

        let mut cmd = Command::new(&self.tool);
        cmd.args(["--host", host, "--info"]).kill_on_drop(true);

        debug!("fetch: {} --host {} --info", self.tool, host);
        let out = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                return Err(Self::failure(ToolFailure::TimedOut {
                    tool: self.tool.clone(),
                    secs: self.timeout.as_secs(),
                }))
            }
            Ok(Err(source)) => {
                return Err(Self::failure(ToolFailure::Spawn { tool: self.tool.clone(), source }))
            }
            Ok(Ok(out)) => out,
        };

        if !out.status.success() {
            return Err(Self::failure(ToolFailure::NonZeroExit {
                tool: self.tool.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            }));
        }

        debug!("fetch: {} bytes of report", out.stdout.len());
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
