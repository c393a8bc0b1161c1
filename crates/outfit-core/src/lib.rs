//! outfit-core
//!
//! Pure interceptor logic:
//! - entities and genders
//! - figure-code combining
//! - two-tier roster (current room + bounded seen cache)
//! - chat command parsing
//! - outfit cycle state machine
//! - session coordinator tying it all together

pub mod gender;
pub mod entity;
pub mod figure;
pub mod roster;
pub mod command;
pub mod cycle;
pub mod messages;
pub mod session;

pub use gender::Gender;
pub use entity::{EntityKind, RoomEntity, UpdateTarget, UserEntity};
pub use figure::CombineMode;

pub use messages::{FeedbackStyle, InboundEvent, OutboundMessage, Outcome};

pub use roster::{Roster, MAX_USERS};
pub use cycle::{CycleController, CycleTick, ScheduledTick, CYCLE_INTERVAL};
pub use session::Session;
