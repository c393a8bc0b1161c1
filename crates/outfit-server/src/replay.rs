//! Offline replay of scenario files.
//!
//! Runs every step of a scenario through a `Session` synchronously.
//! Cycle steps are not timed: a `W` line delivers whatever step is
//! pending at that point, as if its delay had elapsed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use outfit_core::{CycleTick, Session};
use outfit_protocol::scenario_codec::{format_output, parse_step_line, ScenarioStep};
use tracing::debug;

/// Replay scenario text, returning one output line per emitted message.
pub fn replay_str(input: &str, session: &mut Session) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<CycleTick> = None;

    for (lineno, raw_line) in input.lines().enumerate() {
        let Some(step) = parse_step_line(raw_line) else {
            continue;
        };

        let outcome = match step {
            ScenarioStep::Event(event) => session.handle(event),
            ScenarioStep::FireTick => match pending.take() {
                Some(tick) => session.on_tick(tick),
                None => continue,
            },
        };

        debug!(line = lineno + 1, block = outcome.block, outputs = outcome.outputs.len(), "replayed");

        if let Some(next) = outcome.schedule {
            pending = Some(next.tick);
        }
        lines.extend(outcome.outputs.iter().map(format_output));
    }

    lines
}

/// Replay a scenario file.
pub fn replay_file(path: impl AsRef<Path>, session: &mut Session) -> Result<Vec<String>> {
    let path = path.as_ref();
    let input = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    Ok(replay_str(&input, session))
}
