// crates/outfit-protocol/tests/scenario_codec.rs
use outfit_core::{EntityKind, Gender, InboundEvent, OutboundMessage};
use outfit_protocol::scenario_codec::{format_output, parse_step_line, ScenarioStep};

#[test]
fn parses_every_step_kind() {
    match parse_step_line("U, 11, Alice, 1, F, 1, hr-100.hd-200") {
        Some(ScenarioStep::Event(InboundEvent::RoomUsers(units))) => {
            assert_eq!(units.len(), 1);
            assert_eq!(units[0].id, 11);
            assert_eq!(units[0].name, "Alice");
            assert_eq!(units[0].index, 1);
            assert_eq!(units[0].gender, Gender::Female);
            assert_eq!(units[0].kind, EntityKind::Player);
            assert_eq!(units[0].figure, "hr-100.hd-200");
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(
        parse_step_line("X, 2, hr-1, m"),
        Some(ScenarioStep::Event(InboundEvent::UserChange {
            index: 2,
            figure: "hr-1".to_string(),
            gender_code: "m".to_string(),
        }))
    );
    assert_eq!(
        parse_step_line("R, 4"),
        Some(ScenarioStep::Event(InboundEvent::UserRemove { index: 4 }))
    );
    assert_eq!(
        parse_step_line("S, :ofc Alice, Bob"),
        Some(ScenarioStep::Event(InboundEvent::Chat {
            text: ":ofc Alice, Bob".to_string()
        }))
    );
    assert_eq!(parse_step_line("L"), Some(ScenarioStep::Event(InboundEvent::Logout)));
    assert_eq!(parse_step_line("N"), Some(ScenarioStep::Event(InboundEvent::RoomReady)));
    assert_eq!(parse_step_line("T"), Some(ScenarioStep::Event(InboundEvent::Toggle)));
    assert_eq!(parse_step_line("W"), Some(ScenarioStep::FireTick));
}

#[test]
fn skips_blank_comment_and_malformed_lines() {
    assert_eq!(parse_step_line(""), None);
    assert_eq!(parse_step_line("   "), None);
    assert_eq!(parse_step_line("# a comment"), None);
    assert_eq!(parse_step_line("U, 1, Alice"), None);
    assert_eq!(parse_step_line("R, x"), None);
    assert_eq!(parse_step_line("W, 3"), None);
    assert_eq!(parse_step_line("Z"), None);
}

#[test]
fn formats_outputs() {
    assert_eq!(
        format_output(&OutboundMessage::update_figure(Gender::Male, "hr-1")),
        "F, M, hr-1"
    );
    assert_eq!(
        format_output(&OutboundMessage::shout(None, "Please, reenter the room")),
        "M, -1, S, Please, reenter the room"
    );
    assert_eq!(
        format_output(&OutboundMessage::talk(Some(3), "Bob not found.")),
        "M, 3, T, Bob not found."
    );
}
