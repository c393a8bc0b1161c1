//! Central session loop.
//!
//! This task owns the `Session` and is the only place session state is
//! touched. It waits on two things at once:
//! - requests from the host link (intercepted packets, clicks),
//! - the pending outfit-cycle step, if any.
//!
//! A cycle step is a single re-armable `Sleep`. Each outcome that
//! schedules a step replaces whatever was pending; a step that fires
//! for a retired cycle is a no-op inside the session.

use outfit_core::{CycleTick, InboundEvent, Outcome, Session};
use outfit_protocol::{decode_event, encode_message, Direction, HeaderMap, HostFrame, Packet};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::types::{OutboundTx, SessionRequest, SessionRx};

/// Run the session processing loop until the host link goes away.
pub async fn run_session_loop(
    mut session_rx: SessionRx,
    out_tx: OutboundTx,
    headers: HeaderMap,
    mut session: Session,
) {
    let sleep = time::sleep(session.cycle().interval());
    tokio::pin!(sleep);
    let mut pending: Option<CycleTick> = None;

    loop {
        tokio::select! {
            req = session_rx.recv() => {
                let Some(req) = req else { break };

                let (outcome, verdict) = match req {
                    SessionRequest::Intercept { seq, direction, packet } => {
                        let outcome = handle_intercept(&mut session, direction, &packet, &headers);
                        let verdict = HostFrame::Verdict { seq, blocked: outcome.block, packet };
                        (outcome, Some(verdict))
                    }
                    SessionRequest::Click => {
                        let outcome = session.handle(InboundEvent::Toggle);
                        info!(enabled = session.is_enabled(), "extension toggled");
                        (outcome, None)
                    }
                };

                if let Some(next) = outcome.schedule {
                    sleep.as_mut().reset(Instant::now() + next.after);
                    pending = Some(next.tick);
                }

                if !send_outputs(&outcome, &headers, &out_tx) {
                    break;
                }
                if let Some(frame) = verdict {
                    if out_tx.send(frame).is_err() {
                        break;
                    }
                }
            }

            () = &mut sleep, if pending.is_some() => {
                let Some(tick) = pending.take() else { continue };
                debug!(generation = tick.generation, cursor = tick.cursor, "cycle tick");

                let outcome = session.on_tick(tick);
                if let Some(next) = outcome.schedule {
                    sleep.as_mut().reset(Instant::now() + next.after);
                    pending = Some(next.tick);
                }

                if !send_outputs(&outcome, &headers, &out_tx) {
                    break;
                }
            }
        }
    }

    info!("session loop shutting down (host link closed)");
}

/// Decode one intercepted packet and feed it to the session.
///
/// Packets we can't decode are logged and passed through untouched.
fn handle_intercept(
    session: &mut Session,
    direction: Direction,
    packet: &Packet,
    headers: &HeaderMap,
) -> Outcome {
    match decode_event(direction, packet, headers) {
        Ok(Some(event)) => {
            debug!(?direction, header = packet.header, ?event, "intercepted");
            let outcome = session.handle(event);
            if outcome.block {
                debug!(header = packet.header, "blocking packet");
            }
            outcome
        }
        Ok(None) => Outcome::pass(),
        Err(err) => {
            warn!(?direction, header = packet.header, %err, "failed to decode packet");
            Outcome::pass()
        }
    }
}

/// Encode and queue every output of `outcome`.
///
/// Returns `false` once the host link writer is gone.
fn send_outputs(outcome: &Outcome, headers: &HeaderMap, out_tx: &OutboundTx) -> bool {
    for msg in &outcome.outputs {
        let routed = match encode_message(msg, headers) {
            Ok(routed) => routed,
            Err(err) => {
                warn!(%err, ?msg, "dropping unencodable message");
                continue;
            }
        };

        debug!(direction = ?routed.direction, header = routed.packet.header, "sending");
        if out_tx
            .send(HostFrame::send(routed.direction, routed.packet))
            .is_err()
        {
            return false;
        }
    }
    true
}
