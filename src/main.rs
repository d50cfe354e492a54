//! slircd-stats - answer one STATS request against a server snapshot.
//!
//! Usage: `slircd-stats <config.toml> <snapshot.toml> <uid> <letter> [target]`
//!
//! The reply lines are written to stdout in wire format.

use slircd_stats::config::Config;
use slircd_stats::handlers::{Context, Handler, ResponseMiddleware, StatsHandler};
use slircd_stats::metrics;
use slircd_stats::state::{Matrix, Snapshot};
use slirc_proto::{Command, Message, Prefix};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only IRC lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        return Err(anyhow::anyhow!(
            "usage: {} <config.toml> <snapshot.toml> <uid> <letter> [target]",
            args.first().map_or("slircd-stats", String::as_str)
        ));
    }
    let (config_path, snapshot_path, uid, letter) = (&args[1], &args[2], &args[3], &args[4]);
    let target = args.get(5).cloned();

    let config = Config::load(config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    let snapshot = Snapshot::load(snapshot_path).map_err(|e| {
        error!(path = %snapshot_path, error = %e, "Failed to load snapshot");
        e
    })?;

    info!(
        server = %config.server.name,
        sid = %config.server.sid,
        "Starting slircd-stats"
    );

    metrics::init();
    let matrix = Arc::new(Matrix::from_snapshot(config, snapshot));

    let msg = Message {
        prefix: Some(Prefix::Id(uid.clone())),
        command: Command::STATS(letter.clone(), target),
    };

    let (tx, mut rx) = mpsc::channel::<Message>(64);
    let printer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            print!("{}", line);
        }
    });

    {
        let mut ctx = Context::new(uid, &matrix, ResponseMiddleware::Direct(&tx));
        StatsHandler.handle(&mut ctx, &msg).await?;
    }
    drop(tx);
    printer.await?;

    debug!(metrics = %metrics::gather_metrics(), "Final metrics");
    Ok(())
}
