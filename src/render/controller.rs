// src/render/controller.rs

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info};

use crate::engine::RuntimeEvent;
use crate::render::driver::Driver;
use crate::task::Task;

/// How a render ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The driver finished naturally.
    Completed,
    /// The render was cancelled via [`ResourceController::stop`] or
    /// [`ResourceController::preempt`].
    Stopped,
    /// The driver returned an error (e.g. a missing asset).
    Failed(String),
}

struct ActiveRender {
    seq: u64,
    /// Consumed on the first stop/preempt; `None` afterwards makes both
    /// idempotent.
    stop_tx: Option<oneshot::Sender<()>>,
}

/// Exclusive owner of the shared output device.
///
/// Exactly one render may be in flight at a time. Each started render is
/// tagged with a sequence number; the spawned render task reports
/// [`RuntimeEvent::RenderFinished`] with that tag back on the runtime
/// channel, the executor-reports-completion pattern. After a preemption the
/// superseded render's finish event no longer matches and is ignored by the
/// runtime.
///
/// The driver itself sits behind an async mutex, so even in the window
/// where a preempted render has not yet observed its cancellation, the next
/// render cannot touch the device before the previous one has let go.
pub struct ResourceController {
    driver: Arc<Mutex<Box<dyn Driver>>>,
    events_tx: mpsc::Sender<RuntimeEvent>,
    next_seq: u64,
    active: Option<ActiveRender>,
}

impl ResourceController {
    pub fn new(driver: Box<dyn Driver>, events_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self {
            driver: Arc::new(Mutex::new(driver)),
            events_tx,
            next_seq: 0,
            active: None,
        }
    }

    /// Begin rendering a task.
    ///
    /// Precondition: no render is in flight. A correct dispatcher never
    /// violates this; the error exists so a buggy caller fails loudly
    /// instead of overlapping renders.
    pub fn start(&mut self, task: Task) -> Result<u64> {
        if self.active.is_some() {
            bail!("start called while a render is in flight");
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        info!(seq, kind = task.kind(), task = %task, "render started");

        self.active = Some(ActiveRender {
            seq,
            stop_tx: Some(stop_tx),
        });

        let driver = Arc::clone(&self.driver);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = {
                let mut driver = driver.lock().await;
                tokio::select! {
                    res = driver.render(&task) => match res {
                        Ok(()) => RenderOutcome::Completed,
                        Err(err) => RenderOutcome::Failed(format!("{err:#}")),
                    },
                    // A dropped sender also lands here, which only happens
                    // when the whole runtime is going away.
                    _ = stop_rx => RenderOutcome::Stopped,
                }
            };

            let _ = events_tx
                .send(RuntimeEvent::RenderFinished { seq, outcome })
                .await;
        });

        Ok(seq)
    }

    /// Forcibly end the current render.
    ///
    /// The render's finish event still arrives (with a `Stopped` outcome)
    /// and drives the normal completion path. Idempotent when nothing is
    /// running.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if let Some(tx) = active.stop_tx.take() {
                debug!(seq = active.seq, "stopping in-flight render");
                let _ = tx.send(());
            }
        }
    }

    /// Cancel the current render and forget it, so a new `start` may begin
    /// immediately. The superseded render's finish event becomes stale.
    pub fn preempt(&mut self) {
        if let Some(mut active) = self.active.take() {
            debug!(seq = active.seq, "preempting in-flight render");
            if let Some(tx) = active.stop_tx.take() {
                let _ = tx.send(());
            }
        }
    }

    /// Whether a render is in flight (including one that has been asked to
    /// stop but has not yet reported back).
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// Match a finish event against the active render.
    ///
    /// Returns `true` and clears the busy state when the sequence number
    /// matches; returns `false` for stale events from preempted renders.
    pub fn acknowledge(&mut self, seq: u64) -> bool {
        match self.active {
            Some(ref active) if active.seq == seq => {
                self.active = None;
                true
            }
            _ => false,
        }
    }
}
