use mesh_influx::{encode_nodes, write_batch, LineSink, WriteOutcome};
use mesh_proto::PipelineError;
use mesh_report::{extract_node_block, normalize, parse_node_table, retain_recent, ReportSource};
use tracing::info;

/// fetch -> extract -> parse -> normalize -> filter -> encode.
pub async fn collect_lines<R: ReportSource>(
    source: &R,
    host: &str,
    now: i64,
    time_offset_s: i64,
) -> Result<Vec<String>, PipelineError> {
    let report = source.fetch(host).await?;
    let block = extract_node_block(&report)?;
    let table = parse_node_table(block)?;
    info!("pipeline: {} nodes in mesh", table.len());

    let recent = retain_recent(normalize(&table), now, time_offset_s);
    info!("pipeline: {} heard in the last {}s", recent.len(), time_offset_s);
    Ok(encode_nodes(&recent))
}

/// One full run. Nothing reaches the sink unless every earlier stage succeeded.
pub async fn run_once<R: ReportSource, S: LineSink>(
    source: &R,
    sink: &S,
    host: &str,
    now: i64,
    time_offset_s: i64,
) -> Result<WriteOutcome, PipelineError> {
    let lines = collect_lines(source, host, now, time_offset_s).await?;
    write_batch(sink, &lines).await
}
