//! Line-based scenario codec.
//!
//! Scenario files drive a session without a live host, for replay and
//! regression tests. One step per line, fields separated by commas:
//!
//! - Room-membership broadcast with one unit:
//!   `U, id(int), name, index(int), gender(M/F), kind(int), figure`
//!
//! - Figure change:
//!   `X, index(int), figure, gender`
//!
//! - Unit removed:
//!   `R, index(int)`
//!
//! - Outgoing chat (everything after the first comma, trimmed):
//!   `S, text`
//!
//! - Logout / room ready / toggle click:
//!   `L` / `N` / `T`
//!
//! - Fire the pending cycle tick:
//!   `W`
//!
//! Output format (`OutboundMessage` → line):
//!
//! - Figure update:
//!   `F, gender(M/F), figure`
//!
//! - Feedback (`S` = shout, `T` = talk; index `-1` while unknown):
//!   `M, selfIndex, style, text`

use std::num::ParseIntError;

use outfit_core::{EntityKind, FeedbackStyle, Gender, InboundEvent, OutboundMessage, RoomEntity};

use crate::wire_types::UNKNOWN_INDEX;

/// One parsed scenario line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioStep {
    Event(InboundEvent),
    /// Deliver whatever cycle tick is pending right now.
    FireTick,
}

/// Parse a single scenario line.
///
/// Returns `None` for blank lines, comments (starting with `#`) and
/// malformed lines.
pub fn parse_step_line(line: &str) -> Option<ScenarioStep> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (tag, rest) = match trimmed.split_once(',') {
        Some((tag, rest)) => (tag.trim(), rest.trim()),
        None => (trimmed, ""),
    };

    let event = match tag {
        "U" => parse_user(rest)?,
        "X" => parse_change(rest)?,
        "R" => InboundEvent::UserRemove {
            index: parse_i32(rest).ok()?,
        },
        "S" => InboundEvent::Chat {
            text: rest.to_string(),
        },
        "L" if rest.is_empty() => InboundEvent::Logout,
        "N" if rest.is_empty() => InboundEvent::RoomReady,
        "T" if rest.is_empty() => InboundEvent::Toggle,
        "W" if rest.is_empty() => return Some(ScenarioStep::FireTick),
        _ => return None,
    };

    Some(ScenarioStep::Event(event))
}

fn parse_user(rest: &str) -> Option<InboundEvent> {
    // id, name, index, gender, kind, figure
    let tokens = split_and_trim(rest, ',');
    if tokens.len() != 6 {
        return None;
    }

    let entity = RoomEntity {
        id: parse_i32(&tokens[0]).ok()?,
        name: tokens[1].clone(),
        motto: String::new(),
        index: parse_i32(&tokens[2]).ok()?,
        gender: Gender::from_code(&tokens[3]),
        kind: EntityKind::from_i32(parse_i32(&tokens[4]).ok()?),
        figure: tokens[5].clone(),
    };

    Some(InboundEvent::RoomUsers(vec![entity]))
}

fn parse_change(rest: &str) -> Option<InboundEvent> {
    // index, figure, gender
    let tokens = split_and_trim(rest, ',');
    if tokens.len() != 3 {
        return None;
    }

    Some(InboundEvent::UserChange {
        index: parse_i32(&tokens[0]).ok()?,
        figure: tokens[1].clone(),
        gender_code: tokens[2].clone(),
    })
}

/// Format an `OutboundMessage` as a scenario output line.
pub fn format_output(msg: &OutboundMessage) -> String {
    match msg {
        OutboundMessage::UpdateFigure { gender, figure } => {
            format!("F, {}, {}", gender.as_code(), figure)
        }
        OutboundMessage::Feedback {
            self_index,
            text,
            style,
        } => {
            let style_char = match style {
                FeedbackStyle::Shout => 'S',
                FeedbackStyle::Talk => 'T',
            };
            format!(
                "M, {}, {}, {}",
                self_index.unwrap_or(UNKNOWN_INDEX),
                style_char,
                text
            )
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn parse_i32(s: &str) -> Result<i32, ParseIntError> {
    s.trim().parse::<i32>()
}
