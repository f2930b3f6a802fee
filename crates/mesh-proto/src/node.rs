use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Node identifier (e.g. `!a1b2c3d4`) to its reported record.
pub type NodeTable = BTreeMap<String, NodeRecord>;

/// One entry of the "Nodes in mesh" block as the radio tool prints it.
/// Keys the tool adds over time (position, hopsAway, ...) are ignored, and a
/// value of the wrong type reads as absent instead of failing the table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(default, deserialize_with = "lenient_object")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub snr: Option<Number>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub last_heard: Option<i64>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub device_metrics: Option<DeviceMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetrics {
    #[serde(default, deserialize_with = "lenient_number")]
    pub battery_level: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub voltage: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub channel_utilization: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub air_util_tx: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub uptime_seconds: Option<Number>,
}

impl DeviceMetrics {
    pub fn is_empty(&self) -> bool {
        self.battery_level.is_none()
            && self.voltage.is_none()
            && self.channel_utilization.is_none()
            && self.air_util_tx.is_none()
            && self.uptime_seconds.is_none()
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Number>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

/// Whole seconds; floats truncate toward zero.
fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Flattened per-node view. `None` means unset and is never rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedNode {
    pub id: String,
    pub short_name: String,
    pub snr: Option<Number>,
    /// Unix seconds; 0 when the tool never heard the node.
    pub last_heard: i64,
    pub battery_level: Option<Number>,
    pub voltage: Option<Number>,
    pub channel_utilization: Option<Number>,
    pub air_util_tx: Option<Number>,
    pub uptime: Option<Number>,
}
