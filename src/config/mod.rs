// src/config/mod.rs

//! Configuration loading and validation for matrixd.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, tolerating its absence (`loader.rs`).
//! - Validate basic invariants like non-zero dimensions (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_or_default, load_from_path};
pub use model::{AssetsSection, ConfigFile, MatrixSection, QueueSection, ServerSection};
pub use validate::validate_config;
