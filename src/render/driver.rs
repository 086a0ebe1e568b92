// src/render/driver.rs

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::info;

use crate::config::MatrixSection;
use crate::task::Task;

/// Backend seam for the output device.
///
/// A driver renders exactly one task at a time; serialization is enforced
/// above it by the [`ResourceController`](crate::render::ResourceController),
/// which also cancels renders by dropping the future. Implementations must
/// therefore be cancel-safe: a dropped `render` future leaves the device in
/// a state from which the next render can start.
#[async_trait]
pub trait Driver: Send + 'static {
    /// Render the task to completion.
    async fn render(&mut self, task: &Task) -> Result<()>;
}

/// Hardware-less driver used for `hardware = "none"` and `--dry-run`.
///
/// Honors the full driver contract so the dispatcher behaves identically
/// with or without a panel: each task "renders" for a nominal duration and
/// then completes. Asset paths are never touched.
pub struct DryDriver {
    width: u32,
    height: u32,
}

impl DryDriver {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn nominal_duration(task: &Task) -> Duration {
        match task {
            Task::Text(p) => Duration::from_millis(500 + 100 * p.text.chars().count() as u64),
            Task::Animation(_) => Duration::from_secs(2),
            Task::Emoji(_) => Duration::from_secs(1),
            Task::Rain(p) | Task::Perlin(p) => Duration::from_secs(p.duration.unwrap_or(3)),
        }
    }
}

#[async_trait]
impl Driver for DryDriver {
    async fn render(&mut self, task: &Task) -> Result<()> {
        info!(
            width = self.width,
            height = self.height,
            task = %task,
            "dry render"
        );
        sleep(Self::nominal_duration(task)).await;
        Ok(())
    }
}

/// Build the driver selected by `[matrix].hardware`.
///
/// `--dry-run` forces the dry driver regardless of configuration. Real
/// hardware backends plug in here behind the [`Driver`] trait.
pub fn build_driver(matrix: &MatrixSection, dry_run: bool) -> Result<Box<dyn Driver>> {
    if dry_run || matrix.hardware == "none" {
        return Ok(Box::new(DryDriver::new(matrix.width, matrix.height)));
    }

    Err(anyhow!(
        "unsupported hardware backend {:?} (only \"none\" is built in)",
        matrix.hardware
    ))
}
