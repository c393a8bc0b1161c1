//! Extension-host link framing.
//!
//! The host (the proxy sitting between game client and server) talks to
//! the interceptor over a byte stream of length-prefixed frames:
//!
//! ```text
//! [0..4] payload length (u32 BE)
//! [4]    kind
//! [5..]  kind-specific body
//!
//! Intercept    (0x01, host → ext)  seq:u32 direction:u8 packet-frame
//! Verdict      (0x02, ext → host)  seq:u32 blocked:u8  packet-frame
//! Click        (0x03, host → ext)  [no body]
//! SendToServer (0x04, ext → host)  packet-frame
//! SendToClient (0x05, ext → host)  packet-frame
//! ```
//!
//! `packet-frame` is a complete game packet as described in
//! [`crate::packet`]. Every intercept must be answered by exactly one
//! verdict carrying the same `seq`.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::ProtocolError;
use crate::packet::Packet;
use crate::wire_types::Direction;

const KIND_INTERCEPT: u8 = 0x01;
const KIND_VERDICT: u8 = 0x02;
const KIND_CLICK: u8 = 0x03;
const KIND_SEND_TO_SERVER: u8 = 0x04;
const KIND_SEND_TO_CLIENT: u8 = 0x05;

/// Upper bound on a single host frame payload.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFrame {
    Intercept {
        seq: u32,
        direction: Direction,
        packet: Packet,
    },
    Verdict {
        seq: u32,
        blocked: bool,
        packet: Packet,
    },
    Click,
    SendToServer(Packet),
    SendToClient(Packet),
}

impl HostFrame {
    /// Decode one frame payload (length prefix already stripped).
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        let mut buf = payload;
        if buf.is_empty() {
            return Err(ProtocolError::Truncated { need: 1, got: 0 });
        }

        match buf.get_u8() {
            KIND_INTERCEPT => {
                need(buf, 5)?;
                let seq = buf.get_u32();
                let direction = Direction::from_u8(buf.get_u8())?;
                let packet = Packet::decode(buf)?;
                Ok(HostFrame::Intercept {
                    seq,
                    direction,
                    packet,
                })
            }
            KIND_VERDICT => {
                need(buf, 5)?;
                let seq = buf.get_u32();
                let blocked = buf.get_u8() != 0;
                let packet = Packet::decode(buf)?;
                Ok(HostFrame::Verdict {
                    seq,
                    blocked,
                    packet,
                })
            }
            KIND_CLICK => Ok(HostFrame::Click),
            KIND_SEND_TO_SERVER => Ok(HostFrame::SendToServer(Packet::decode(buf)?)),
            KIND_SEND_TO_CLIENT => Ok(HostFrame::SendToClient(Packet::decode(buf)?)),
            other => Err(ProtocolError::UnknownFrameKind(other)),
        }
    }

    /// Encode this frame, length prefix included, appended to `out`.
    pub fn encode(&self, out: &mut BytesMut) {
        let mut payload = BytesMut::with_capacity(64);

        match self {
            HostFrame::Intercept {
                seq,
                direction,
                packet,
            } => {
                payload.put_u8(KIND_INTERCEPT);
                payload.put_u32(*seq);
                payload.put_u8(*direction as u8);
                packet.encode(&mut payload);
            }
            HostFrame::Verdict {
                seq,
                blocked,
                packet,
            } => {
                payload.put_u8(KIND_VERDICT);
                payload.put_u32(*seq);
                payload.put_u8(u8::from(*blocked));
                packet.encode(&mut payload);
            }
            HostFrame::Click => payload.put_u8(KIND_CLICK),
            HostFrame::SendToServer(packet) => {
                payload.put_u8(KIND_SEND_TO_SERVER);
                packet.encode(&mut payload);
            }
            HostFrame::SendToClient(packet) => {
                payload.put_u8(KIND_SEND_TO_CLIENT);
                packet.encode(&mut payload);
            }
        }

        out.put_u32(payload.len() as u32);
        out.extend_from_slice(&payload);
    }

    /// Outbound frame for a packet headed in `direction`.
    pub fn send(direction: Direction, packet: Packet) -> Self {
        match direction {
            Direction::ToServer => HostFrame::SendToServer(packet),
            Direction::ToClient => HostFrame::SendToClient(packet),
        }
    }
}

fn need(buf: &[u8], n: usize) -> Result<(), ProtocolError> {
    if buf.len() < n {
        return Err(ProtocolError::Truncated {
            need: n,
            got: buf.len(),
        });
    }
    Ok(())
}
