use serde_json::Number;

use crate::node::NormalizedNode;

pub const MEASUREMENT: &str = "nodeinfo";

/// A single `nodeinfo` point ready for line-protocol rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub short_name: String,
    /// Present fields only, in output order.
    pub fields: Vec<(&'static str, Number)>,
    pub timestamp_ns: i128,
}

impl MetricPoint {
    pub fn from_node(node: &NormalizedNode) -> Self {
        let candidates = [
            ("batteryLevel", &node.battery_level),
            ("voltage", &node.voltage),
            ("channelUtilization", &node.channel_utilization),
            ("airUtilTx", &node.air_util_tx),
            ("uptime", &node.uptime),
            ("snr", &node.snr),
        ];
        let fields = candidates
            .into_iter()
            .filter_map(|(name, v)| v.clone().map(|v| (name, v)))
            .collect();

        Self {
            short_name: node.short_name.clone(),
            fields,
            timestamp_ns: i128::from(node.last_heard) * 1_000_000_000,
        }
    }
}
