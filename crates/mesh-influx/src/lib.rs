pub mod doctor;
pub mod line;
pub mod writer;

use serde::Deserialize;

pub use line::{encode_nodes, encode_point, escape_tag};
pub use writer::{write_batch, InfluxHttp, LineSink, WriteOutcome};

#[derive(Debug, Clone, Deserialize)]
pub struct InfluxConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

fn default_timeout_s() -> u64 {
    10
}

impl InfluxConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
