// src/server/mod.rs

//! TCP transport for display submissions.
//!
//! Clients speak line-delimited JSON: each inbound line is one command
//! (`protocol.rs`), each outbound line one event. The listener maps
//! commands 1:1 onto runtime submissions and relays idle notifications
//! back to every connected client.

pub mod listener;
pub mod protocol;

pub use listener::spawn_server;
pub use protocol::{Command, Request, ServerEvent, Submission};
