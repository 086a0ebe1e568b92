// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod net;
pub mod render;
pub mod selftest;
pub mod server;
pub mod task;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::engine::{JobQueue, Lifecycle, Runtime, RuntimeEvent};
use crate::render::ResourceController;
use crate::task::{AssetCatalog, Priority, Task};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (with CLI overrides)
/// - driver / resource controller / job queue / runtime
/// - the TCP listener
/// - the startup banner
/// - Ctrl-C handling
/// - (optional) the dry-run self-test client
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(&args.config)?;

    if let Some(port) = args.port {
        cfg.server.port = port;
    }
    if let Some(width) = args.width {
        cfg.matrix.width = width;
    }
    if let Some(height) = args.height {
        cfg.matrix.height = height;
    }

    let catalog = AssetCatalog::new(&cfg.assets);
    let driver = render::build_driver(&cfg.matrix, args.dry_run)?;

    // Runtime event channel: submissions, render completions, stop, Ctrl-C
    // all arrive here and are handled one at a time.
    let (events_tx, events_rx) = mpsc::channel::<RuntimeEvent>(64);
    let (lifecycle_tx, _) = broadcast::channel::<Lifecycle>(16);

    let controller = ResourceController::new(driver, events_tx.clone());
    let queue = JobQueue::new(cfg.queue.max_pending);

    // Ctrl-C → graceful shutdown.
    {
        let tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let listener = TcpListener::bind(("0.0.0.0", cfg.server.port))
        .await
        .with_context(|| format!("binding TCP listener on port {}", cfg.server.port))?;
    info!(port = cfg.server.port, "listening for display clients");

    let _server = server::spawn_server(
        listener,
        events_tx.clone(),
        lifecycle_tx.clone(),
        catalog.clone(),
    );

    // Show where we are reachable before serving anything else.
    let banner = Task::text(net::banner_text(), None, &catalog);
    events_tx
        .send(RuntimeEvent::Submitted {
            task: banner,
            priority: Priority::Normal,
        })
        .await?;

    let _self_test = if args.dry_run {
        Some(selftest::spawn_self_test(cfg.server.port))
    } else {
        None
    };

    let runtime = Runtime::new(queue, controller, lifecycle_tx, events_rx);
    runtime.run().await
}
