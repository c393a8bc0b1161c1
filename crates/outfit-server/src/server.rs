//! Top-level service wiring.
//!
//! This module:
//! - Connects to the extension host at the configured address.
//! - Spawns the single session task that owns the `Session`.
//! - Runs the host link on the connection until the host goes away.
//!
//! The per-link I/O and the session loop live in `host` and
//! `session_task` respectively.

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::host;
use crate::session_task;
use crate::types::{OutboundRx, OutboundTx, SessionRx, SessionTx};

/// Connect to the host and serve until it disconnects.
pub async fn run(config: Config) -> Result<()> {
    let stream = TcpStream::connect(&config.host_addr)
        .await
        .with_context(|| format!("connecting to host at {}", config.host_addr))?;
    stream.set_nodelay(true)?;
    info!("connected to host at {}", config.host_addr);

    serve_stream(stream, &config).await?;

    info!("host link closed");
    Ok(())
}

/// Serve one host link over an already-established stream.
pub async fn serve_stream<S>(stream: S, config: &Config) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    // Channel from host link → session task.
    let (session_tx, session_rx): (SessionTx, SessionRx) = mpsc::unbounded_channel();

    // Channel from session task → host link writer.
    let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();

    let session = config.new_session();
    let headers = config.headers.clone();
    let session_handle = tokio::spawn(async move {
        session_task::run_session_loop(session_rx, out_tx, headers, session).await;
    });

    let result = host::run_host_link(stream, session_tx, out_rx).await;

    session_handle.await.context("session task panicked")?;
    result
}
