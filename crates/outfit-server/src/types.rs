//! Shared types for the interceptor service.
//!
//! This module defines:
//! - `SessionRequest`: what the host link hands to the session task
//! - channel aliases between the host link and the session task

use outfit_protocol::{Direction, HostFrame, Packet};
use tokio::sync::mpsc;

/// Message flowing from the host link into the session task.
#[derive(Debug)]
pub enum SessionRequest {
    /// A packet the host is holding until it gets a verdict.
    Intercept {
        seq: u32,
        direction: Direction,
        packet: Packet,
    },

    /// The extension button was clicked.
    Click,
}

/// Channel from host link → session task.
pub type SessionTx = mpsc::UnboundedSender<SessionRequest>;
pub type SessionRx = mpsc::UnboundedReceiver<SessionRequest>;

/// Frames from session task → host link writer.
pub type OutboundTx = mpsc::UnboundedSender<HostFrame>;
pub type OutboundRx = mpsc::UnboundedReceiver<HostFrame>;
