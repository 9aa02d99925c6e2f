//! Trade Reconciler Binary
//!
//! Reconciles a JSON trade file and prints the dispute report.
//!
//! # Usage
//!
//! ```bash
//! trade-reconciler trades.json --config config.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `TRADE_RECONCILER_CONFIG`: config path when `--config` is absent
//!   (default: config.yaml; a missing default file means built-in defaults)
//! - `RUST_LOG`: overrides the configured log level

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use tokio_util::sync::CancellationToken;
use trade_reconciler::ReconcileTradesUseCase;
use trade_reconciler::application::ports::BatchProgress;
use trade_reconciler::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use trade_reconciler::infrastructure::{InMemoryResultSink, JsonFileTradeSource};
use trade_reconciler::telemetry::init_telemetry;

const USAGE: &str = "usage: trade-reconciler <trades.json> [--config <path>]";

/// Parsed command line.
struct Args {
    trades_path: String,
    config_path: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut trades_path = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                config_path = Some(args.next().context("--config requires a path")?);
            }
            "--help" | "-h" => bail!(USAGE),
            _ if trades_path.is_none() => trades_path = Some(arg),
            _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }

    Ok(Args {
        trades_path: trades_path.context(USAGE)?,
        config_path,
    })
}

fn resolve_config(explicit: Option<&str>) -> anyhow::Result<Config> {
    let env_path = std::env::var("TRADE_RECONCILER_CONFIG").ok();
    match explicit.or(env_path.as_deref()) {
        Some(path) => {
            load_config(Some(path)).with_context(|| format!("loading config from {path}"))
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_config(None).context("loading config.yaml")
        }
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = resolve_config(args.config_path.as_deref())?;

    init_telemetry(&config.observability.logging).context("initializing tracing")?;
    tracing::info!(trades = %args.trades_path, "Starting trade reconciler");

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after current chunk");
            ctrl_c.cancel();
        }
    });

    let use_case = ReconcileTradesUseCase::new(
        Arc::new(JsonFileTradeSource::new(&args.trades_path)),
        Arc::new(InMemoryResultSink::new()),
        config.reconciliation.batch_reconciler(),
    );

    let progress = |p: BatchProgress| {
        tracing::info!(
            processed = p.processed,
            total = p.total,
            percentage = p.percentage(),
            "Reconciliation progress"
        );
    };

    let output = use_case
        .execute_until_cancelled(&progress, &cancel)
        .await
        .with_context(|| format!("reconciling {}", args.trades_path))?;

    println!("{}", serde_json::to_string_pretty(&output.report)?);

    if !output.outcome.completed {
        bail!(
            "reconciliation cancelled after {} of {} trades",
            output.outcome.progress.processed,
            output.outcome.progress.total
        );
    }

    tracing::info!(run_id = %output.outcome.run_id, "Trade reconciler finished");
    Ok(())
}
