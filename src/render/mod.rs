// src/render/mod.rs

//! Device ownership and rendering.
//!
//! - [`driver`] defines the backend seam (`Driver`) plus the hardware-less
//!   `DryDriver`.
//! - [`controller`] owns the single shared device and enforces the
//!   start/stop/is_busy contract the runtime drives.

pub mod controller;
pub mod driver;

pub use controller::{RenderOutcome, ResourceController};
pub use driver::{build_driver, Driver, DryDriver};
