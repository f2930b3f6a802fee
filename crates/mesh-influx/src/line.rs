//! InfluxDB line protocol rendering for `nodeinfo` points.
//!
//! Values are written exactly as the radio tool reported them: no `i` suffix
//! for integers, so every field lands as a float in the database.

use mesh_proto::point::MEASUREMENT;
use mesh_proto::{MetricPoint, NormalizedNode};
use serde_json::Number;
use tracing::{info, warn};

/// Escape a tag value. Backslash goes first so later escapes are not doubled.
pub fn escape_tag(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(' ', "\\ ")
        .replace(',', "\\,")
        .replace('=', "\\=")
}

fn field_set(fields: &[(&'static str, Number)]) -> String {
    fields
        .iter()
        .map(|(name, v)| format!("{name}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `nodeinfo,shortName=<tag> <fields> <ns>`.
///
/// A point without fields still renders as `nodeinfo,shortName=X  <ns>`.
/// Influx rejects such a line, but that is what gets written today.
pub fn encode_point(point: &MetricPoint) -> String {
    format!(
        "{MEASUREMENT},shortName={} {} {}",
        escape_tag(&point.short_name),
        field_set(&point.fields),
        point.timestamp_ns
    )
}

pub fn encode_nodes(nodes: &[NormalizedNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            let point = MetricPoint::from_node(node);
            if point.fields.is_empty() {
                warn!("encode: node {} ({}) has no fields; line will be rejected by influx", node.id, node.short_name);
            }
            let line = encode_point(&point);
            info!("encode: {}", line);
            line
        })
        .collect()
}
