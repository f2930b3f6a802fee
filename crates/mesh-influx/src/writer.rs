use anyhow::{Context, Result};
use mesh_proto::{PipelineError, WriteFailure};
use std::time::Duration;
use tracing::info;

use crate::InfluxConfig;

/// Destination for a batch of encoded lines. One call per run.
#[allow(async_fn_in_trait)]
pub trait LineSink {
    async fn submit(&self, lines: &[String]) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    NothingToWrite,
    Written(usize),
}

/// Submit the whole batch or nothing; an empty batch never reaches the sink.
pub async fn write_batch<S: LineSink>(sink: &S, lines: &[String]) -> Result<WriteOutcome, PipelineError> {
    if lines.is_empty() {
        info!("write: no recent nodes to write");
        return Ok(WriteOutcome::NothingToWrite);
    }
    sink.submit(lines).await?;
    info!("write: wrote {} points", lines.len());
    Ok(WriteOutcome::Written(lines.len()))
}

/// InfluxDB 1.x `/write` endpoint.
pub struct InfluxHttp {
    client: reqwest::Client,
    base_url: String,
    database: String,
    username: String,
    password: String,
}

impl InfluxHttp {
    pub fn new(cfg: &InfluxConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_s))
            .build()
            .context("build influx http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url(),
            database: cfg.database.clone(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.username.is_empty() {
            req
        } else {
            req.basic_auth(&self.username, Some(&self.password))
        }
    }

    /// `GET /ping`; influx answers 204 when up.
    pub async fn ping(&self) -> Result<()> {
        let resp = self
            .authed(self.client.get(format!("{}/ping", self.base_url)))
            .send()
            .await
            .with_context(|| format!("ping {}", self.base_url))?;
        anyhow::ensure!(resp.status().is_success(), "influx ping answered {}", resp.status());
        Ok(())
    }
}

impl LineSink for InfluxHttp {
    async fn submit(&self, lines: &[String]) -> Result<(), PipelineError> {
        let req = self
            .client
            .post(format!("{}/write", self.base_url))
            .query(&[("db", self.database.as_str()), ("precision", "ns")])
            .body(lines.join("\n"));

        let resp = self
            .authed(req)
            .send()
            .await
            .map_err(|e| PipelineError::Write(WriteFailure::Transport(e.to_string())))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(PipelineError::Write(WriteFailure::Rejected { status: status.as_u16(), body }))
    }
}
