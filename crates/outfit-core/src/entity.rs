//! Room entities and the figure-update target.
//!
//! - [`EntityKind`]: what a room unit is (player, pet, bot, ...).
//! - [`RoomEntity`]: one raw record from a room-membership broadcast.
//! - [`UserEntity`]: the record the roster keeps for another player.
//! - [`UpdateTarget`]: the minimal `{gender, figure}` pair the emission
//!   step consumes; combined outfits are built as bare targets with no
//!   identity attached.

use crate::gender::Gender;

/// Kind of room unit, as reported in the membership broadcast.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A real user.
    Player,
    Pet,
    /// Old-style public room bot.
    LegacyBot,
    /// User-owned bot.
    Bot,
    /// Anything the client reports that we don't know about.
    Other(i32),
}

impl EntityKind {
    pub fn from_i32(v: i32) -> Self {
        match v {
            1 => EntityKind::Player,
            2 => EntityKind::Pet,
            3 => EntityKind::LegacyBot,
            4 => EntityKind::Bot,
            other => EntityKind::Other(other),
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            EntityKind::Player => 1,
            EntityKind::Pet => 2,
            EntityKind::LegacyBot => 3,
            EntityKind::Bot => 4,
            EntityKind::Other(v) => v,
        }
    }
}

/// One unit as delivered by a room-membership broadcast.
///
/// Only [`EntityKind::Player`] records ever make it into the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntity {
    pub id: i32,
    pub name: String,
    pub motto: String,
    /// Per-room slot number. Reassigned on every room entry.
    pub index: i32,
    pub gender: Gender,
    pub kind: EntityKind,
    pub figure: String,
}

impl RoomEntity {
    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }
}

/// Another player known to the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    /// Stable identity; unique within a roster tier.
    pub id: i32,
    /// Display name, looked up case-insensitively.
    pub name: String,
    /// Slot in the current room only. Never a cross-room key.
    pub index: i32,
    pub gender: Gender,
    pub figure: String,
}

impl UserEntity {
    /// Case-insensitive name comparison used for command lookups.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl From<&RoomEntity> for UserEntity {
    fn from(raw: &RoomEntity) -> Self {
        UserEntity {
            id: raw.id,
            name: raw.name.clone(),
            index: raw.index,
            gender: raw.gender,
            figure: raw.figure.clone(),
        }
    }
}

/// What the figure-update emission step needs.
///
/// Either field may be missing; a target with a missing field produces
/// no outbound message at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateTarget {
    pub gender: Option<Gender>,
    pub figure: Option<String>,
}

impl UpdateTarget {
    pub fn new(gender: Gender, figure: impl Into<String>) -> Self {
        UpdateTarget {
            gender: Some(gender),
            figure: Some(figure.into()),
        }
    }
}

impl From<&UserEntity> for UpdateTarget {
    fn from(user: &UserEntity) -> Self {
        UpdateTarget::new(user.gender, user.figure.clone())
    }
}
