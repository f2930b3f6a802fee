pub mod doctor;
pub mod extract;
pub mod normalize;
pub mod source;

use serde::Deserialize;

pub use extract::{extract_node_block, parse_node_table};
pub use normalize::{normalize, retain_recent};
pub use source::{MeshtasticCli, ReportSource};

#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    /// Address of the radio gateway, passed as `--host`.
    pub host: String,

    /// Query tool binary. Default `meshtastic`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Upper bound for one `--info` dump.
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

fn default_tool() -> String {
    "meshtastic".into()
}

fn default_timeout_s() -> u64 {
    60
}
