//! Packet bridge: game packets ⇄ session events/messages.
//!
//! Inbound (intercepted) packets we understand:
//!
//! ```text
//! Users       (to client)  count:int, then `count` unit records
//! UserChange  (to client)  index:int, figure:str, gender:str, ...
//! UserRemove  (to client)  index:str (decimal)
//! RoomReady   (to client)  [ignored body]
//! Chat        (to server)  text:str, ...
//! Quit        (to server)  [no body]
//!
//! unit record:
//!   id:int name:str motto:str figure:str index:int x:int y:int z:str
//!   direction:int kind:int, then a kind-specific tail:
//!     player      gender:str int int group:str str score:int bool
//!     pet         int int str int bool bool bool bool bool bool int str
//!     legacy bot  (nothing)
//!     bot         gender:str owner_id:int owner:str n:int short * n
//! ```
//!
//! Outbound messages we produce:
//!
//! ```text
//! UpdateFigureData (to server)  gender:str figure:str
//! Chat / Shout     (to client)  index:int text:str gesture:int bubble:int 0:int 0:int
//! ```

use outfit_core::{
    EntityKind, FeedbackStyle, Gender, InboundEvent, OutboundMessage, RoomEntity,
};

use crate::error::ProtocolError;
use crate::packet::{Packet, PacketReader, PacketWriter};
use crate::wire_types::{
    Direction, HeaderMap, FEEDBACK_BUBBLE, FEEDBACK_GESTURE, UNKNOWN_INDEX,
};

/// An encoded outbound packet and where it has to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub direction: Direction,
    pub packet: Packet,
}

/// Decode an intercepted packet into a session event.
///
/// Returns `Ok(None)` for headers the interceptor doesn't care about.
pub fn decode_event(
    direction: Direction,
    packet: &Packet,
    headers: &HeaderMap,
) -> Result<Option<InboundEvent>, ProtocolError> {
    let h = packet.header;
    let mut r = packet.reader();

    let event = match direction {
        Direction::ToClient if h == headers.users => {
            InboundEvent::RoomUsers(decode_room_entities(&mut r)?)
        }
        Direction::ToClient if h == headers.user_change => {
            let index = r.read_int()?;
            let figure = r.read_string()?;
            let gender_code = r.read_string()?;
            InboundEvent::UserChange {
                index,
                figure,
                gender_code,
            }
        }
        Direction::ToClient if h == headers.user_remove => {
            let raw = r.read_string()?;
            let index = raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ProtocolError::InvalidField("user_remove.index"))?;
            InboundEvent::UserRemove { index }
        }
        Direction::ToClient if h == headers.room_ready => InboundEvent::RoomReady,
        Direction::ToServer if h == headers.chat_out => InboundEvent::Chat {
            text: r.read_string()?,
        },
        Direction::ToServer if h == headers.quit => InboundEvent::Logout,
        _ => return Ok(None),
    };

    Ok(Some(event))
}

/// Encode a session message as a packet plus its destination.
pub fn encode_message(msg: &OutboundMessage, headers: &HeaderMap) -> Result<Routed, ProtocolError> {
    match msg {
        OutboundMessage::UpdateFigure { gender, figure } => {
            let packet = PacketWriter::new()
                .string(gender.as_code())?
                .string(figure)?
                .finish(headers.update_figure_data);
            Ok(Routed {
                direction: Direction::ToServer,
                packet,
            })
        }
        OutboundMessage::Feedback {
            self_index,
            text,
            style,
        } => {
            let header = match style {
                FeedbackStyle::Shout => headers.shout_in,
                FeedbackStyle::Talk => headers.chat_in,
            };
            let packet = PacketWriter::new()
                .int(self_index.unwrap_or(UNKNOWN_INDEX))
                .string(text)?
                .int(FEEDBACK_GESTURE)
                .int(FEEDBACK_BUBBLE)
                .int(0)
                .int(0)
                .finish(header);
            Ok(Routed {
                direction: Direction::ToClient,
                packet,
            })
        }
    }
}

/// Decode the unit list of a `Users` packet.
pub fn decode_room_entities(r: &mut PacketReader) -> Result<Vec<RoomEntity>, ProtocolError> {
    let count = r.read_int()?;
    if count < 0 {
        return Err(ProtocolError::InvalidField("users.count"));
    }

    let mut entities = Vec::with_capacity((count as usize).min(256));
    for _ in 0..count {
        entities.push(decode_room_entity(r)?);
    }
    Ok(entities)
}

fn decode_room_entity(r: &mut PacketReader) -> Result<RoomEntity, ProtocolError> {
    let id = r.read_int()?;
    let name = r.read_string()?;
    let motto = r.read_string()?;
    let figure = r.read_string()?;
    let index = r.read_int()?;
    let _x = r.read_int()?;
    let _y = r.read_int()?;
    let _z = r.read_string()?;
    let _direction = r.read_int()?;
    let kind = EntityKind::from_i32(r.read_int()?);

    let gender = match kind {
        EntityKind::Player => {
            let gender = Gender::from_code(&r.read_string()?);
            r.read_int()?; // group id
            r.read_int()?; // group status
            r.read_string()?; // group name
            r.read_string()?;
            r.read_int()?; // achievement score
            r.read_bool()?; // moderator
            gender
        }
        EntityKind::Pet => {
            r.read_int()?; // sub type
            r.read_int()?; // owner id
            r.read_string()?; // owner name
            r.read_int()?; // rarity
            for _ in 0..6 {
                r.read_bool()?;
            }
            r.read_int()?; // level
            r.read_string()?; // posture
            Gender::Female
        }
        EntityKind::Bot => {
            let gender = Gender::from_code(&r.read_string()?);
            r.read_int()?; // owner id
            r.read_string()?; // owner name
            let skills = r.read_int()?;
            for _ in 0..skills.max(0) {
                r.read_short()?;
            }
            gender
        }
        EntityKind::LegacyBot | EntityKind::Other(_) => Gender::Female,
    };

    Ok(RoomEntity {
        id,
        name,
        motto,
        index,
        gender,
        kind,
        figure,
    })
}

/// Encode a `Users` packet. Used to build fixtures and by replay tooling.
pub fn encode_room_entities(
    entities: &[RoomEntity],
    headers: &HeaderMap,
) -> Result<Packet, ProtocolError> {
    let mut w = PacketWriter::new().int(entities.len() as i32);

    for e in entities {
        w = w
            .int(e.id)
            .string(&e.name)?
            .string(&e.motto)?
            .string(&e.figure)?
            .int(e.index)
            .int(0)
            .int(0)
            .string("0.0")?
            .int(2)
            .int(e.kind.as_i32());

        w = match e.kind {
            EntityKind::Player => w
                .string(e.gender.as_code())?
                .int(-1)
                .int(-1)
                .string("")?
                .string("")?
                .int(0)
                .boolean(false),
            EntityKind::Pet => {
                let mut w = w.int(0).int(0).string("")?.int(0);
                for _ in 0..6 {
                    w = w.boolean(false);
                }
                w.int(1).string("")?
            }
            EntityKind::Bot => w.string(e.gender.as_code())?.int(0).string("")?.int(0),
            EntityKind::LegacyBot | EntityKind::Other(_) => w,
        };
    }

    Ok(w.finish(headers.users))
}
