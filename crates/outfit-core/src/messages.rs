//! Message types used by the interceptor core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InboundEvent`]: what the session consumes (decoded game packets
//!   plus the host's toggle click).
//! - [`OutboundMessage`]: what the session produces.
//! - [`Outcome`]: the full answer to one event, including whether the
//!   intercepted packet must be blocked and whether a cycle step has to
//!   be scheduled.
//!
//! Note: packet encoders live in the `outfit-protocol` crate;
//! this module is purely logical.

use crate::cycle::ScheduledTick;
use crate::entity::RoomEntity;
use crate::gender::Gender;

/// A high-level event fed into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Room-membership snapshot (server → client).
    RoomUsers(Vec<RoomEntity>),

    /// Figure/gender change of the unit at `index` (server → client).
    UserChange {
        index: i32,
        figure: String,
        gender_code: String,
    },

    /// Unit at `index` left the room (server → client).
    UserRemove { index: i32 },

    /// Chat line typed by the local player (client → server).
    Chat { text: String },

    /// The local player is logging out (client → server).
    Logout,

    /// A new room finished loading (server → client).
    RoomReady,

    /// The host's extension button was clicked.
    Toggle,
}

/// Which chat bubble a feedback line is shown in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FeedbackStyle {
    Shout,
    Talk,
}

/// A high-level message emitted by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Change our own outfit (client → server).
    UpdateFigure { gender: Gender, figure: String },

    /// Local-only chat bubble shown on our own avatar (server → client).
    Feedback {
        /// Our slot in the room; `None` until the first broadcast.
        self_index: Option<i32>,
        text: String,
        style: FeedbackStyle,
    },
}

impl OutboundMessage {
    /// Convenience constructor for a figure update.
    pub fn update_figure(gender: Gender, figure: impl Into<String>) -> Self {
        OutboundMessage::UpdateFigure {
            gender,
            figure: figure.into(),
        }
    }

    /// Convenience constructor for a shouted feedback line.
    pub fn shout(self_index: Option<i32>, text: impl Into<String>) -> Self {
        OutboundMessage::Feedback {
            self_index,
            text: text.into(),
            style: FeedbackStyle::Shout,
        }
    }

    /// Convenience constructor for a talk-bubble feedback line.
    pub fn talk(self_index: Option<i32>, text: impl Into<String>) -> Self {
        OutboundMessage::Feedback {
            self_index,
            text: text.into(),
            style: FeedbackStyle::Talk,
        }
    }
}

/// Everything the session decided in response to one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Drop the intercepted packet instead of forwarding it.
    pub block: bool,

    /// Messages to send, in order.
    pub outputs: Vec<OutboundMessage>,

    /// Next cycle step to deliver, if a cycle is running.
    pub schedule: Option<ScheduledTick>,
}

impl Outcome {
    /// Forward the packet untouched, do nothing else.
    pub fn pass() -> Self {
        Outcome::default()
    }

    /// Swallow the packet.
    pub fn blocked() -> Self {
        Outcome {
            block: true,
            ..Outcome::default()
        }
    }

    pub fn push(&mut self, msg: OutboundMessage) {
        self.outputs.push(msg);
    }
}
