// crates/outfit-core/tests/regression_scenarios.rs
use outfit_core::{CycleTick, Session};
use outfit_protocol::scenario_codec::{format_output, parse_step_line, ScenarioStep};

const INPUT: &str = include_str!("data/scenarios.txt");

fn run(input: &str) -> Vec<String> {
    let mut session = Session::new();
    let mut pending: Option<CycleTick> = None;
    let mut lines = Vec::new();

    for raw_line in input.lines() {
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

        if let Some(next) = outcome.schedule {
            pending = Some(next.tick);
        }
        lines.extend(outcome.outputs.iter().map(format_output));
    }

    lines
}

#[test]
fn full_input_matches_reference_output() {
    let actual = run(INPUT);

    let expected = [
        // copy and combine
        "F, F, hr-100.hd-200.lg-300.ch-400",
        "M, 0, T, Rex not found.",
        "F, F, hr-100.hd-200.lg-700.ch-800",
        "F, M, hr-500.hd-600.lg-700.ch-400",
        "F, F, hr-555.ch-888",
        // cycle: first step immediately, second on the tick, stop fizzles the third
        "F, F, hr-100.hd-200.lg-300.ch-400",
        "F, F, hr-555.ch-888",
        // new room
        "F, F, hr-100.hd-200.lg-300.ch-400",
        "M, 4, T, Carol not found.",
        // toggle
        "M, 4, S, Extension is now off",
        "M, 4, S, Extension is now on",
    ];

    assert_eq!(actual, expected);
}

#[test]
fn test_individual_scenarios() {
    let mut scenarios: Vec<(String, Vec<&str>)> = Vec::new();

    for line in INPUT.lines() {
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push((name.trim().to_string(), Vec::new()));
        } else if let Some((_, lines)) = scenarios.last_mut() {
            lines.push(line);
        }
    }

    assert_eq!(scenarios.len(), 4);

    // Each scenario also runs on a fresh session.
    let expected_counts = [
        ("copy and combine in one room", 5),
        ("cycle through the room, then stop", 1),
        ("previous room is remembered", 2),
        ("toggled off", 2),
    ];

    for ((name, lines), (expected_name, expected_count)) in scenarios.iter().zip(expected_counts) {
        assert_eq!(name, expected_name);
        let outputs = run(&lines.join("\n"));
        assert_eq!(outputs.len(), expected_count, "scenario {}: {:?}", name, outputs);
    }

    // On its own, the cycle scenario has no room to cycle through.
    let cycle_alone = run(&scenarios[1].1.join("\n"));
    assert_eq!(cycle_alone, vec!["M, -1, S, Please, reenter the room"]);
}
