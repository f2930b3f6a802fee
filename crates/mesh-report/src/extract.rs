use mesh_proto::{NodeTable, PipelineError};

pub const START_MARKER: &str = "Nodes in mesh: ";
pub const END_MARKER: &str = "Preferences:";

/// Slice the node JSON out of the human-oriented `--info` dump.
///
/// Returns the trimmed text between the first `Nodes in mesh: ` and the first
/// `Preferences:`. One trailing comma is dropped since some tool versions
/// print one after the closing brace.
pub fn extract_node_block(report: &str) -> Result<&str, PipelineError> {
    let (Some(start), Some(end)) = (report.find(START_MARKER), report.find(END_MARKER)) else {
        return Err(PipelineError::MalformedReport { raw: report.to_string() });
    };

    let start = start + START_MARKER.len();
    // Markers out of order leave nothing to parse.
    let chunk = report.get(start..end).unwrap_or("").trim();

    Ok(match chunk.strip_suffix(',') {
        Some(rest) => rest.trim_end(),
        None => chunk,
    })
}

pub fn parse_node_table(block: &str) -> Result<NodeTable, PipelineError> {
    serde_json::from_str(block).map_err(|e| PipelineError::parse(e.to_string(), block))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Connected to radio\nOwner: base (B1)\nMy info: {}\n\
        Nodes in mesh: {\"!abc\": {\"user\": {\"shortName\": \"N1\"}}}\n\nPreferences: {}\n";

    #[test]
    fn slices_between_markers() {
        assert_eq!(
            extract_node_block(REPORT).unwrap(),
            "{\"!abc\": {\"user\": {\"shortName\": \"N1\"}}}"
        );
    }

    #[test]
    fn strips_exactly_one_trailing_comma() {
        let r = "Nodes in mesh: {\"a\": {}},\r\n Preferences:";
        assert_eq!(extract_node_block(r).unwrap(), "{\"a\": {}}");

        let r = "Nodes in mesh: {},,  Preferences:";
        assert_eq!(extract_node_block(r).unwrap(), "{},");
    }

    #[test]
    fn missing_marker_keeps_raw_text() {
        let r = "Nodes in mesh: {}\nChannels:";
        match extract_node_block(r) {
            Err(PipelineError::MalformedReport { raw }) => assert_eq!(raw, r),
            other => panic!("unexpected {other:?}"),
        }
        assert!(extract_node_block("Preferences: {}").is_err());
    }

    #[test]
    fn reversed_markers_yield_empty_block() {
        let r = "Preferences: {} Nodes in mesh: {}";
        assert_eq!(extract_node_block(r).unwrap(), "");
        assert!(matches!(parse_node_table(""), Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn parse_keeps_every_key_and_ignores_unknown_fields() {
        let table = parse_node_table(
            r#"{"!a": {"num": 1, "position": {"altitude": 3}}, "!b": {"lastHeard": 5}, "!c": {}}"#,
        )
        .unwrap();
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, ["!a", "!b", "!c"]);
        assert_eq!(table["!b"].last_heard, Some(5));
    }

    #[test]
    fn one_odd_node_does_not_sink_the_table() {
        let table = parse_node_table(
            r#"{"!a": {"user": {"shortName": "A"}, "lastHeard": 1700000000.0, "snr": 4},
                "!b": {"user": {"shortName": "B"}, "lastHeard": 1700000000, "snr": "n/a"}}"#,
        )
        .unwrap();
        assert_eq!(table["!a"].last_heard, Some(1_700_000_000));
        assert!(table["!a"].snr.is_some());
        assert!(table["!b"].snr.is_none());
    }

    #[test]
    fn parse_failure_carries_message_and_excerpt() {
        let bad = format!("{{\"!a\": {}", "x".repeat(2000));
        match parse_node_table(&bad) {
            Err(PipelineError::Parse { message, excerpt }) => {
                assert!(!message.is_empty());
                assert_eq!(excerpt.len(), 1000);
                assert!(excerpt.starts_with("{\"!a\""));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
