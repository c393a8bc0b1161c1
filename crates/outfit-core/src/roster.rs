//! Two-tier roster of other players.
//!
//! - **current room**: everyone reported in the room we are in right now.
//!   Authoritative for `index`-based updates; unbounded.
//! - **seen cache**: players from rooms we have left, kept so `:copy` can
//!   still find them by name. Bounded to `capacity` entries with FIFO
//!   eviction (the longest-resident entry goes first).
//!
//! On a room transition the current room is folded into the seen cache
//! and then emptied.

use std::collections::VecDeque;

use crate::entity::{RoomEntity, UserEntity};
use crate::gender::Gender;

/// Default seen-cache bound.
pub const MAX_USERS: usize = 400;

#[derive(Debug)]
pub struct Roster {
    current: Vec<UserEntity>,

    /// Front = oldest insertion.
    seen: VecDeque<UserEntity>,

    capacity: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}

impl Roster {
    /// Empty roster with a [`MAX_USERS`] seen cache.
    pub fn new() -> Self {
        Roster::with_capacity(MAX_USERS)
    }

    /// Empty roster with a custom seen-cache bound (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Roster {
            current: Vec::new(),
            seen: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Apply a room-membership broadcast.
    ///
    /// Non-player units are skipped. A player already present (by `id`) is
    /// overwritten with the fresh record, anyone else is appended. A
    /// different user still holding the same `index` lost that slot
    /// without us seeing the removal; it is moved to the seen cache.
    pub fn upsert_from_room_broadcast(&mut self, entities: &[RoomEntity]) {
        for raw in entities.iter().filter(|e| e.is_player()) {
            let user = UserEntity::from(raw);

            if let Some(pos) = self.position_by_index(user.index) {
                if self.current[pos].id != user.id {
                    let displaced = self.current.remove(pos);
                    self.remember(displaced);
                }
            }

            match self.current.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user,
                None => self.current.push(user),
            }
        }
    }

    /// Apply an incremental figure change to the user at `index`.
    ///
    /// Returns `false` when no such user is in the current room; that is
    /// not an error, the change may be for someone we haven't learned yet.
    pub fn apply_incremental_change(&mut self, index: i32, figure: &str, gender_code: &str) -> bool {
        let Some(pos) = self.position_by_index(index) else {
            return false;
        };

        let user = &mut self.current[pos];
        user.figure = figure.to_string();
        user.gender = Gender::from_code(gender_code);
        true
    }

    /// Drop the current-room user at `index`, if any.
    pub fn remove_by_index(&mut self, index: i32) -> Option<UserEntity> {
        let pos = self.position_by_index(index)?;
        Some(self.current.remove(pos))
    }

    /// Case-insensitive exact lookup: current room first, then seen cache.
    pub fn lookup_by_name(&self, name: &str) -> Option<&UserEntity> {
        self.current
            .iter()
            .find(|u| u.name_matches(name))
            .or_else(|| self.seen.iter().find(|u| u.name_matches(name)))
    }

    /// Exact slot lookup in the current room only.
    pub fn lookup_by_index(&self, index: i32) -> Option<&UserEntity> {
        self.position_by_index(index).map(|pos| &self.current[pos])
    }

    // `index` is unique within the current room.
    fn position_by_index(&self, index: i32) -> Option<usize> {
        self.current.iter().position(|u| u.index == index)
    }

    /// Fold the current room into the seen cache and empty it.
    pub fn on_room_transition(&mut self) {
        let outgoing = std::mem::take(&mut self.current);
        for user in outgoing {
            self.remember(user);
        }
    }

    /// Insert into the seen cache: update in place by `id`, else append
    /// and evict from the front while over capacity.
    pub fn remember(&mut self, user: UserEntity) {
        if let Some(existing) = self.seen.iter_mut().find(|u| u.id == user.id) {
            *existing = user;
            return;
        }

        self.seen.push_back(user);
        while self.seen.len() > self.capacity {
            self.seen.pop_front();
        }
    }

    /// Current-room users in broadcast order.
    pub fn current(&self) -> &[UserEntity] {
        &self.current
    }

    /// Seen-cache users, oldest first.
    pub fn seen(&self) -> impl Iterator<Item = &UserEntity> {
        self.seen.iter()
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when neither tier knows anybody.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.seen.is_empty()
    }
}
