// src/errors.rs

//! Crate-wide error aliases.
//!
//! Everything currently flows through `anyhow`; this module gives a single
//! place to introduce structured error types later.

pub use anyhow::{Error, Result};
