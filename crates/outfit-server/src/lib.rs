//! outfit-server
//!
//! Async extension service for the outfit interceptor.

pub mod config;
pub mod types;
pub mod server;
pub mod replay;

// these are internal modules, not re-exported
mod host;
mod session_task;
