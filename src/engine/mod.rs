// src/engine/mod.rs

//! Job queue and dispatch engine.
//!
//! This module ties together:
//! - the priority-aware pending-job queue
//! - the main runtime event loop that reacts to:
//!   - job submissions from the transport layer
//!   - render completion events from the resource controller
//!   - explicit stop commands
//!   - shutdown signals

pub mod queue;
pub mod runtime;

pub use queue::{Admission, JobQueue};
pub use runtime::{Lifecycle, Runtime, RuntimeEvent};
