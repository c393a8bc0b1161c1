//! Extension-host link I/O.
//!
//! Reads length-prefixed [`HostFrame`]s from the host and forwards
//! intercepts and clicks to the session task; a writer task drains the
//! outbound channel back onto the stream.

use anyhow::{bail, Result};
use bytes::BytesMut;
use outfit_protocol::host_frame::MAX_FRAME_LEN;
use outfit_protocol::HostFrame;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use crate::types::{OutboundRx, SessionRequest, SessionTx};

/// Run the host link until the host disconnects.
pub async fn run_host_link<S>(stream: S, session_tx: SessionTx, out_rx: OutboundRx) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);

    let writer = tokio::spawn(run_writer(write_half, out_rx));
    let result = run_reader(read_half, session_tx).await;

    // The session task drops its sender once `session_tx` is gone,
    // which ends the writer.
    match writer.await {
        Ok(Err(e)) => warn!("host writer error: {:#}", e),
        Err(e) => error!("host writer task failed: {}", e),
        Ok(Ok(())) => {}
    }

    result
}

async fn run_reader<R>(mut read_half: R, session_tx: SessionTx) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    loop {
        // Read length prefix (u32 BE)
        let mut len_buf = [0u8; 4];
        match read_half.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                debug!("host closed the link");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        let frame_len = u32::from_be_bytes(len_buf) as usize;
        if frame_len == 0 {
            continue;
        }
        if frame_len > MAX_FRAME_LEN {
            bail!("host frame too large: {} bytes", frame_len);
        }

        let mut payload = vec![0u8; frame_len];
        read_half.read_exact(&mut payload).await?;

        let req = match HostFrame::decode(&payload) {
            Ok(HostFrame::Intercept {
                seq,
                direction,
                packet,
            }) => SessionRequest::Intercept {
                seq,
                direction,
                packet,
            },
            Ok(HostFrame::Click) => SessionRequest::Click,
            Ok(other) => {
                warn!(?other, "unexpected frame from host");
                continue;
            }
            Err(err) => {
                warn!(%err, "undecodable host frame");
                continue;
            }
        };

        if session_tx.send(req).is_err() {
            bail!("session task is gone");
        }
    }
}

async fn run_writer<W>(mut write_half: W, mut out_rx: OutboundRx) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = BytesMut::with_capacity(4096);

    while let Some(frame) = out_rx.recv().await {
        buf.clear();
        frame.encode(&mut buf);
        write_half.write_all(&buf).await?;
        write_half.flush().await?;
    }

    Ok(())
}
