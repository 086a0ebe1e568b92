// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - matrix dimensions are non-zero
/// - the listen port is non-zero
/// - `max_pending >= 1`
///
/// It does **not** check that asset directories exist: a missing animation
/// catalog only matters once an animation without a name is submitted, and
/// that case degrades to a logged render failure rather than a refusal to
/// start.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.matrix.width == 0 || cfg.matrix.height == 0 {
        return Err(anyhow!(
            "[matrix] width and height must be non-zero (got {}x{})",
            cfg.matrix.width,
            cfg.matrix.height
        ));
    }

    if cfg.server.port == 0 {
        return Err(anyhow!("[server] port must be non-zero"));
    }

    if cfg.queue.max_pending == 0 {
        return Err(anyhow!("[queue] max_pending must be >= 1 (got 0)"));
    }

    Ok(())
}
