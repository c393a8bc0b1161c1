//! Low-level wire types and constants.
//!
//! This module defines:
//! - [`Direction`]: which way an intercepted packet was travelling.
//! - [`HeaderMap`]: numeric header ids of the packets we care about.
//! - The fixed trailing fields of feedback chat bubbles.
//!
//! Header ids change between client releases, so they are configuration
//! rather than constants. The defaults match one recent release and are
//! meant to be overridden from a TOML file.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Direction an intercepted packet travels.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Server → client.
    ToClient = 0,
    /// Client → server.
    ToServer = 1,
}

impl Direction {
    pub fn from_u8(v: u8) -> Result<Self, ProtocolError> {
        match v {
            0 => Ok(Direction::ToClient),
            1 => Ok(Direction::ToServer),
            other => Err(ProtocolError::InvalidDirection(other)),
        }
    }
}

/// Header ids for every packet the interceptor reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderMap {
    /// `Users` – room-membership snapshot (to client).
    pub users: u16,
    /// `UserChange` – figure/gender change of one unit (to client).
    pub user_change: u16,
    /// `UserRemove` – unit left the room (to client).
    pub user_remove: u16,
    /// `RoomReady` – room finished loading (to client).
    pub room_ready: u16,
    /// `Chat` – local player talks (to server).
    pub chat_out: u16,
    /// `Quit` – local player leaves (to server).
    pub quit: u16,
    /// `UpdateFigureData` – change own outfit (to server).
    pub update_figure_data: u16,
    /// `Chat` bubble (to client).
    pub chat_in: u16,
    /// `Shout` bubble (to client).
    pub shout_in: u16,
}

impl Default for HeaderMap {
    fn default() -> Self {
        HeaderMap {
            users: 374,
            user_change: 3920,
            user_remove: 2661,
            room_ready: 2031,
            chat_out: 1314,
            quit: 105,
            update_figure_data: 2730,
            chat_in: 1446,
            shout_in: 1036,
        }
    }
}

/// Bubble gesture sent with feedback lines.
pub const FEEDBACK_GESTURE: i32 = 1;

/// Bubble style sent with feedback lines.
pub const FEEDBACK_BUBBLE: i32 = 33;

/// Maximum byte length of a string field (`u16` length prefix).
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Own slot index sent on the wire while it is still unknown.
pub const UNKNOWN_INDEX: i32 = -1;
