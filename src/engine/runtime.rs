// src/engine/runtime.rs

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::engine::queue::{Admission, JobQueue};
use crate::render::{RenderOutcome, ResourceController};
use crate::task::{Priority, Task};

/// Events sent into the runtime from the transport layer, the resource
/// controller's render tasks, and the Ctrl-C handler.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// A client (or the startup banner) submitted a job.
    Submitted { task: Task, priority: Priority },
    /// A render task reported back. `seq` identifies which render; events
    /// from preempted renders no longer match and are ignored.
    RenderFinished { seq: u64, outcome: RenderOutcome },
    /// Explicit stop command: flush the queue, cancel the current render.
    StopRequested,
    /// Ctrl-C: abandon whatever is in flight and exit the loop.
    ShutdownRequested,
}

/// Lifecycle notifications for observers.
///
/// `Busy` fires on the idle-to-running edge, `Idle` exactly when the queue
/// drains and the last render has finished. The transport layer relays
/// `Idle` to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Busy,
    Idle,
}

/// The single-consumer dispatch loop.
///
/// Owns the job queue and the resource controller; all mutations of either
/// happen inside this loop, one event at a time, so no further locking is
/// needed. Lives for the process lifetime.
pub struct Runtime {
    queue: JobQueue,
    controller: ResourceController,
    lifecycle_tx: broadcast::Sender<Lifecycle>,
    events_rx: mpsc::Receiver<RuntimeEvent>,
    /// Whether observers have been told the device is busy; gates `Busy`
    /// to the idle-to-running edge only.
    notified_busy: bool,
}

impl Runtime {
    pub fn new(
        queue: JobQueue,
        controller: ResourceController,
        lifecycle_tx: broadcast::Sender<Lifecycle>,
        events_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        Self {
            queue,
            controller,
            lifecycle_tx,
            events_rx,
            notified_busy: false,
        }
    }

    /// Main event loop.
    ///
    /// Nothing a render does can break out of this loop: driver failures
    /// are logged and treated as ordinary completions.
    pub async fn run(mut self) -> Result<()> {
        info!("matrixd runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                RuntimeEvent::Submitted { task, priority } => {
                    self.handle_submitted(task, priority);
                    true
                }
                RuntimeEvent::RenderFinished { seq, outcome } => {
                    self.handle_render_finished(seq, outcome);
                    true
                }
                RuntimeEvent::StopRequested => {
                    self.handle_stop();
                    true
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    self.controller.stop();
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        info!("matrixd runtime exiting");
        Ok(())
    }

    fn handle_submitted(&mut self, task: Task, priority: Priority) {
        debug!(kind = task.kind(), ?priority, "job submitted");

        match self.queue.admit(task, priority, self.controller.is_busy()) {
            Admission::Preempt => self.controller.preempt(),
            Admission::Enqueued | Admission::DroppedBusy | Admission::Overflowed => {}
        }

        self.try_dispatch();
    }

    fn handle_render_finished(&mut self, seq: u64, outcome: RenderOutcome) {
        if !self.controller.acknowledge(seq) {
            debug!(seq, "ignoring finish event from superseded render");
            return;
        }

        match outcome {
            RenderOutcome::Completed => debug!(seq, "render finished"),
            RenderOutcome::Stopped => debug!(seq, "render stopped"),
            RenderOutcome::Failed(ref err) => {
                warn!(seq, error = %err, "render failed, continuing with next job");
            }
        }

        if self.queue.is_empty() {
            self.notify_idle();
        } else {
            self.try_dispatch();
        }
    }

    fn handle_stop(&mut self) {
        info!("stop requested, flushing queue and cancelling current render");
        self.queue.clear();
        self.controller.stop();
    }

    /// Start the next queued task if the device is free.
    ///
    /// A no-op while a render is in flight: single-consumer discipline.
    fn try_dispatch(&mut self) {
        if self.controller.is_busy() {
            return;
        }

        let Some(task) = self.queue.pop_next() else {
            return;
        };

        if !self.notified_busy {
            self.notified_busy = true;
            let _ = self.lifecycle_tx.send(Lifecycle::Busy);
        }

        if let Err(err) = self.controller.start(task) {
            // Unreachable with the is_busy guard above; a bug here must not
            // kill the loop.
            error!(error = %err, "failed to start render, dropping task");
        }
    }

    fn notify_idle(&mut self) {
        info!("queue drained, device idle");
        self.notified_busy = false;
        let _ = self.lifecycle_tx.send(Lifecycle::Idle);
    }
}
