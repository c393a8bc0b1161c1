//! outfit-protocol
//!
//! Wire-level encoding/decoding for the outfit interceptor.
//!
//! This crate is responsible for turning game packets into logical
//! session events (`outfit_core::InboundEvent`) and session messages
//! (`outfit_core::OutboundMessage`) back into packets.
//!
//! - [`packet`]         : game packet framing and typed fields
//! - [`bridge`]         : packet ⇄ event/message translation
//! - [`host_frame`]     : framing of the link to the extension host
//! - [`scenario_codec`] : line-based scenarios (for replay / tests)

pub mod error;
pub mod wire_types;
pub mod packet;
pub mod bridge;
pub mod host_frame;
pub mod scenario_codec;

pub use error::ProtocolError;
pub use wire_types::{Direction, HeaderMap};
pub use packet::{Packet, PacketReader, PacketWriter};
pub use bridge::{decode_event, encode_message, Routed};
pub use host_frame::HostFrame;
