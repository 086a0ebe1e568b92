// src/selftest.rs

//! Synthetic client for `--dry-run`.
//!
//! Connects to the daemon's own port like any external client would,
//! submits one random request, and every time the daemon reports idle,
//! submits one to four more. Exercises the whole submission path
//! (transport, parsing, defaulting, queueing, dispatch) without hardware.

use std::io;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const KINDS: [&str; 5] = ["text", "animation", "emoji", "rain", "perlin"];

/// Spawn the self-test client against the local daemon.
pub fn spawn_self_test(port: u16) -> JoinHandle<()> {
    tokio::spawn(async move {
        match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(stream) => {
                info!(port, "self-test client connected");
                if let Err(err) = drive(stream).await {
                    warn!(error = %err, "self-test client stopped");
                }
            }
            Err(err) => {
                warn!(port, error = %err, "self-test client failed to connect");
            }
        }
    })
}

async fn drive(stream: TcpStream) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();

    send_random(&mut write_half, 1).await?;

    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        if !is_idle_event(&line) {
            continue;
        }

        let count = rand::thread_rng().gen_range(1..=4);
        debug!(count, "daemon idle, submitting more requests");
        send_random(&mut write_half, count).await?;
    }

    info!("self-test client disconnected");
    Ok(())
}

fn is_idle_event(line: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|v| v.get("event").and_then(|e| e.as_str()).map(|e| e == "idle"))
        .unwrap_or(false)
}

async fn send_random(
    write_half: &mut tokio::net::tcp::OwnedWriteHalf,
    count: u32,
) -> io::Result<()> {
    // The rng is not Send; build all lines before the first await.
    let lines: Vec<String> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| random_command(&mut rng)).collect()
    };

    for line in lines {
        write_half.write_all(line.as_bytes()).await?;
    }
    Ok(())
}

fn random_command(rng: &mut impl Rng) -> String {
    let kind = KINDS.choose(rng).copied().unwrap_or("text");

    let value = match kind {
        "text" => serde_json::json!({"cmd": "text", "text": "matrixd self-test"}),
        // Deliberately over-shoots the valid id range now and then to
        // exercise the clamping path.
        "emoji" => serde_json::json!({"cmd": "emoji", "id": rng.gen_range(0..900)}),
        "animation" => serde_json::json!({"cmd": "animation"}),
        "rain" => serde_json::json!({"cmd": "rain", "duration": 2}),
        _ => serde_json::json!({"cmd": "perlin", "duration": 2}),
    };

    format!("{value}\n")
}
