// src/server/listener.rs

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::engine::{Lifecycle, RuntimeEvent};
use crate::server::protocol::{Request, ServerEvent, Submission};
use crate::task::AssetCatalog;

/// Spawn the accept loop.
///
/// Each connection gets its own handler task and its own subscription to
/// the lifecycle channel, so a slow client only ever lags its own relay.
pub fn spawn_server(
    listener: TcpListener,
    events_tx: mpsc::Sender<RuntimeEvent>,
    lifecycle_tx: broadcast::Sender<Lifecycle>,
    catalog: AssetCatalog,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    info!(%peer, "client connected");
                    let events_tx = events_tx.clone();
                    let lifecycle_rx = lifecycle_tx.subscribe();
                    let catalog = catalog.clone();
                    tokio::spawn(async move {
                        handle_client(stream, peer, events_tx, lifecycle_rx, catalog).await;
                        info!(%peer, "client disconnected");
                    });
                }
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                }
            }
        }
    })
}

async fn handle_client(
    stream: TcpStream,
    peer: SocketAddr,
    events_tx: mpsc::Sender<RuntimeEvent>,
    mut lifecycle_rx: broadcast::Receiver<Lifecycle>,
    catalog: AssetCatalog,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    handle_line(&line, peer, &events_tx, &catalog).await;
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(%peer, error = %err, "read error, closing connection");
                    break;
                }
            },
            event = lifecycle_rx.recv() => match event {
                Ok(Lifecycle::Idle) => {
                    if !relay_idle(&mut write_half, peer).await {
                        break;
                    }
                }
                Ok(Lifecycle::Busy) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(%peer, missed, "client lagged behind lifecycle events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

async fn handle_line(
    line: &str,
    peer: SocketAddr,
    events_tx: &mpsc::Sender<RuntimeEvent>,
    catalog: &AssetCatalog,
) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let submission: Submission = match serde_json::from_str(line) {
        Ok(sub) => sub,
        Err(err) => {
            warn!(%peer, error = %err, line, "ignoring malformed command");
            return;
        }
    };

    match submission.into_request(catalog) {
        Request::Submit { task, priority } => {
            debug!(%peer, kind = task.kind(), ?priority, "submission accepted");
            let _ = events_tx
                .send(RuntimeEvent::Submitted { task, priority })
                .await;
        }
        Request::Stop => {
            let _ = events_tx.send(RuntimeEvent::StopRequested).await;
        }
        Request::Hello => {
            info!(%peer, "hello");
        }
    }
}

async fn relay_idle(write_half: &mut OwnedWriteHalf, peer: SocketAddr) -> bool {
    if let Err(err) = write_half
        .write_all(ServerEvent::Idle.to_line().as_bytes())
        .await
    {
        warn!(%peer, error = %err, "write error, closing connection");
        return false;
    }
    true
}
