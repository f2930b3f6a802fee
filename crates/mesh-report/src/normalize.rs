use mesh_proto::{NodeRecord, NodeTable, NormalizedNode};
use tracing::debug;

/// Flatten every record independently; one output per node, same ids.
pub fn normalize(table: &NodeTable) -> Vec<NormalizedNode> {
    table.iter().map(|(id, rec)| normalize_record(id, rec)).collect()
}

pub fn normalize_record(id: &str, rec: &NodeRecord) -> NormalizedNode {
    let mut node = NormalizedNode {
        id: id.to_string(),
        short_name: rec
            .user
            .as_ref()
            .and_then(|u| u.short_name.clone())
            .unwrap_or_default(),
        snr: rec.snr.clone(),
        last_heard: rec.last_heard.unwrap_or(0),
        ..Default::default()
    };

    if let Some(dm) = rec.device_metrics.as_ref().filter(|dm| !dm.is_empty()) {
        node.battery_level = dm.battery_level.clone();
        node.voltage = dm.voltage.clone();
        node.channel_utilization = dm.channel_utilization.clone();
        node.air_util_tx = dm.air_util_tx.clone();
        node.uptime = dm.uptime_seconds.clone();
    }
    node
}

/// Keep nodes heard strictly within the last `time_offset_s` seconds of `now`.
pub fn retain_recent(nodes: Vec<NormalizedNode>, now: i64, time_offset_s: i64) -> Vec<NormalizedNode> {
    let cutoff = now.saturating_sub(time_offset_s);
    nodes
        .into_iter()
        .filter(|n| {
            let fresh = n.last_heard > cutoff;
            if !fresh {
                debug!("filter: drop {} ({}) heard {}s ago", n.id, n.short_name, now.saturating_sub(n.last_heard));
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_node_table;
    use serde_json::Number;

    fn node(last_heard: i64) -> NormalizedNode {
        NormalizedNode { id: "!n".into(), last_heard, ..Default::default() }
    }

    #[test]
    fn defaults_for_missing_fields() {
        let table = parse_node_table(r#"{"!a": {}}"#).unwrap();
        let n = &normalize(&table)[0];
        assert_eq!(n.id, "!a");
        assert_eq!(n.short_name, "");
        assert_eq!(n.last_heard, 0);
        assert!(n.snr.is_none());
    }

    #[test]
    fn device_metrics_do_not_leak_between_records() {
        // "!a" sorts first, so its metrics are seen before "!b".
        let table = parse_node_table(
            r#"{
                "!a": {"deviceMetrics": {"batteryLevel": 99, "voltage": 4.1, "channelUtilization": 7.5,
                                         "airUtilTx": 1.2, "uptimeSeconds": 1000}},
                "!b": {"user": {"shortName": "B"}, "lastHeard": 10}
            }"#,
        )
        .unwrap();
        let out = normalize(&table);
        assert_eq!(out[0].battery_level, Some(Number::from(99u64)));
        assert_eq!(out[0].uptime, Some(Number::from(1000u64)));

        let b = &out[1];
        assert_eq!(b.id, "!b");
        assert!(b.battery_level.is_none());
        assert!(b.voltage.is_none());
        assert!(b.channel_utilization.is_none());
        assert!(b.air_util_tx.is_none());
        assert!(b.uptime.is_none());
    }

    #[test]
    fn partial_device_metrics_stay_partial() {
        let table = parse_node_table(r#"{"!a": {"deviceMetrics": {"voltage": 3.9}}}"#).unwrap();
        let n = &normalize(&table)[0];
        assert!(n.battery_level.is_none());
        assert_eq!(n.voltage.as_ref().map(ToString::to_string).as_deref(), Some("3.9"));
    }

    #[test]
    fn recency_boundary_is_exclusive() {
        let now = 1_700_000_000;
        let kept = retain_recent(vec![node(now), node(now - 900), node(now - 899)], now, 900);
        let heard: Vec<_> = kept.iter().map(|n| n.last_heard).collect();
        assert_eq!(heard, [now, now - 899]);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let kept = retain_recent(vec![node(i64::MIN), node(i64::MAX)], 1_700_000_000, i64::MAX);
        let heard: Vec<_> = kept.iter().map(|n| n.last_heard).collect();
        assert_eq!(heard, [i64::MAX]);

        let kept = retain_recent(vec![node(i64::MIN)], i64::MIN, 900);
        assert!(kept.is_empty());
    }

    #[test]
    fn heard_now_is_kept_for_any_positive_window() {
        let now = 1_700_000_000;
        for offset in [1, 60, 600, 900] {
            assert_eq!(retain_recent(vec![node(now)], now, offset).len(), 1);
        }
    }
}
