//! Session coordinator.
//!
//! One [`Session`] exists per process run. It owns all mutable state
//! (enable flag, roster, own slot index, cycle controller) and is the
//! single entry point for everything that happens:
//! - [`Session::handle`] for decoded packets and host clicks,
//! - [`Session::on_tick`] for cycle steps coming due.
//!
//! Nothing here blocks or sleeps; every call runs to completion and
//! returns an [`Outcome`] describing what to send and what to schedule.
//!
//! Ordering rules:
//! - The own slot index is captured from a membership broadcast even
//!   while disabled, so feedback lands on the right avatar once the
//!   extension is switched back on.
//! - Room transitions (room ready, logout) are always applied; leaving
//!   the previous room's slots in place would break `index` lookups.
//! - Every other mutation and every chat command is ignored while
//!   disabled, and the chat packet is forwarded untouched.
//! - A cycle that is already running keeps stepping while disabled.

use std::time::Duration;

use crate::command::{self, Command, Parsed};
use crate::cycle::{CycleController, CycleTick, Step, CYCLE_INTERVAL};
use crate::entity::{RoomEntity, UpdateTarget};
use crate::figure::{self, CombineMode};
use crate::messages::{InboundEvent, OutboundMessage, Outcome};
use crate::roster::{Roster, MAX_USERS};

/// Feedback when a command needs users and we know none.
pub const REENTER_ROOM: &str = "Please, reenter the room";

#[derive(Debug)]
pub struct Session {
    enabled: bool,
    roster: Roster,
    self_index: Option<i32>,
    cycle: CycleController,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// Enabled session with default cache bound and cycle interval.
    pub fn new() -> Self {
        Session::with_settings(MAX_USERS, CYCLE_INTERVAL)
    }

    pub fn with_settings(seen_capacity: usize, cycle_interval: Duration) -> Self {
        Session {
            enabled: true,
            roster: Roster::with_capacity(seen_capacity),
            self_index: None,
            cycle: CycleController::new(cycle_interval),
        }
    }

    /// Process a single inbound event.
    pub fn handle(&mut self, event: InboundEvent) -> Outcome {
        match event {
            InboundEvent::RoomUsers(entities) => self.on_room_users(&entities),
            InboundEvent::UserChange {
                index,
                figure,
                gender_code,
            } => self.on_user_change(index, &figure, &gender_code),
            InboundEvent::UserRemove { index } => self.on_user_remove(index),
            InboundEvent::Chat { text } => self.on_chat(&text),
            InboundEvent::Logout | InboundEvent::RoomReady => self.on_room_transition(),
            InboundEvent::Toggle => self.on_toggle(),
        }
    }

    /// Deliver a cycle step that has come due.
    pub fn on_tick(&mut self, tick: CycleTick) -> Outcome {
        let mut out = Outcome::pass();
        self.step_cycle(tick, &mut out);
        out
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn self_index(&self) -> Option<i32> {
        self.self_index
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn cycle(&self) -> &CycleController {
        &self.cycle
    }

    // -------------------------------------------------------------------------
    // Protocol events
    // -------------------------------------------------------------------------

    fn on_room_users(&mut self, entities: &[RoomEntity]) -> Outcome {
        if self.self_index.is_none() {
            self.self_index = entities.first().map(|e| e.index);
        }

        if self.enabled {
            self.roster.upsert_from_room_broadcast(entities);
        }
        Outcome::pass()
    }

    fn on_user_change(&mut self, index: i32, figure: &str, gender_code: &str) -> Outcome {
        if self.enabled {
            self.roster.apply_incremental_change(index, figure, gender_code);
        }
        Outcome::pass()
    }

    fn on_user_remove(&mut self, index: i32) -> Outcome {
        if self.enabled {
            self.roster.remove_by_index(index);
        }
        Outcome::pass()
    }

    fn on_room_transition(&mut self) -> Outcome {
        self.roster.on_room_transition();
        self.self_index = None;
        self.cycle.stop();
        Outcome::pass()
    }

    fn on_toggle(&mut self) -> Outcome {
        self.enabled = !self.enabled;
        let state = if self.enabled { "on" } else { "off" };

        let mut out = Outcome::pass();
        out.push(OutboundMessage::shout(
            self.self_index,
            format!("Extension is now {}", state),
        ));
        out
    }

    // -------------------------------------------------------------------------
    // Chat commands
    // -------------------------------------------------------------------------

    fn on_chat(&mut self, text: &str) -> Outcome {
        if !self.enabled {
            return Outcome::pass();
        }

        match command::parse(text) {
            Parsed::Chat | Parsed::Unrecognized(_) => Outcome::pass(),
            Parsed::Command(cmd) => {
                let mut out = Outcome::blocked();
                self.dispatch(cmd, &mut out);
                out
            }
        }
    }

    fn dispatch(&mut self, cmd: Command, out: &mut Outcome) {
        match cmd {
            Command::Copy { name } => self.copy(&name, out),
            Command::OutfitCombine {
                names,
                mode,
                too_few,
            } => {
                if !too_few {
                    self.outfit_combine(&names, mode, out);
                }
            }
            Command::OutfitCycle => self.outfit_cycle(out),
            Command::OutfitStop => self.cycle.stop(),
        }
    }

    fn copy(&self, name: &str, out: &mut Outcome) {
        match self.roster.lookup_by_name(name) {
            Some(user) => emit_update(UpdateTarget::from(user), out),
            None if self.roster.is_empty() => {
                out.push(OutboundMessage::shout(self.self_index, REENTER_ROOM));
            }
            None => {
                out.push(OutboundMessage::talk(
                    self.self_index,
                    format!("{} not found.", name),
                ));
            }
        }
    }

    fn outfit_combine(&self, names: &[String], mode: CombineMode, out: &mut Outcome) {
        if self.roster.is_empty() {
            out.push(OutboundMessage::shout(self.self_index, REENTER_ROOM));
            return;
        }

        let users: Vec<_> = names
            .iter()
            .filter_map(|name| self.roster.lookup_by_name(name))
            .collect();

        if let [base, overlay, ..] = users.as_slice() {
            emit_update(figure::combine(base, overlay, mode), out);
        }
    }

    fn outfit_cycle(&mut self, out: &mut Outcome) {
        let present = self.roster.current_len();
        if present == 0 {
            out.push(OutboundMessage::shout(self.self_index, REENTER_ROOM));
            return;
        }
        if present < 2 {
            return;
        }

        let tick = self.cycle.start();
        self.step_cycle(tick, out);
    }

    fn step_cycle(&mut self, tick: CycleTick, out: &mut Outcome) {
        match self.cycle.advance(tick, self.roster.current_len()) {
            Step::Halt => {}
            Step::Emit { cursor, next } => {
                if let Some(user) = self.roster.current().get(cursor) {
                    emit_update(UpdateTarget::from(user), out);
                }
                out.schedule = Some(next);
            }
        }
    }
}

/// Turn a target into a figure update; targets missing a field send nothing.
fn emit_update(target: UpdateTarget, out: &mut Outcome) {
    if let UpdateTarget {
        gender: Some(gender),
        figure: Some(figure),
    } = target
    {
        out.push(OutboundMessage::update_figure(gender, figure));
    }
}
