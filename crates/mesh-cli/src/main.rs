mod config;
mod pipeline;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use config::{load_config, Config};
use mesh_influx::{doctor as influx_doctor, InfluxHttp, WriteOutcome};
use mesh_report::{doctor as mesh_doctor, MeshtasticCli};

#[derive(Debug, Parser)]
#[command(name = "meshflux", version, about = "meshflux - Meshtastic node telemetry to InfluxDB")]
struct Cli {
    #[arg(long)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the config and ping the database.
    Doctor,
    /// Fetch recent nodes and write them to InfluxDB.
    Run,
    /// Print the lines a run would write, without writing.
    Dump,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    let res = match cli.cmd {
        Command::Doctor => doctor(&cfg).await,
        Command::Run => run(&cfg).await,
        Command::Dump => dump(&cfg).await,
    };
    if let Err(e) = &res {
        error!("{:#}", e);
    }
    res
}

fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

async fn doctor(cfg: &Config) -> Result<()> {
    info!("doctor: starting");

    mesh_doctor::check_mesh(&cfg.mesh)?;
    mesh_doctor::check_window(cfg.filter.time_offset_s)?;
    influx_doctor::check_influx(&cfg.influx)?;

    let influx = InfluxHttp::new(&cfg.influx)?;
    influx.ping().await.or_else(|e| {
        warn!("influx unreachable: {:#}", e);
        Ok::<(), anyhow::Error>(())
    })?;

    info!("doctor: OK");
    Ok(())
}

async fn run(cfg: &Config) -> Result<()> {
    let now = now_unix();
    let source = MeshtasticCli::new(&cfg.mesh);
    let influx = InfluxHttp::new(&cfg.influx)?;

    let outcome = pipeline::run_once(&source, &influx, &cfg.mesh.host, now, cfg.filter.time_offset_s)
        .await
        .context("harvest run")?;

    match outcome {
        WriteOutcome::Written(n) => info!("run: success, {} points in '{}'", n, cfg.influx.database),
        WriteOutcome::NothingToWrite => info!("run: nothing to write"),
    }
    Ok(())
}

async fn dump(cfg: &Config) -> Result<()> {
    let now = now_unix();
    let source = MeshtasticCli::new(&cfg.mesh);

    let lines = pipeline::collect_lines(&source, &cfg.mesh.host, now, cfg.filter.time_offset_s)
        .await
        .context("collect lines")?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
