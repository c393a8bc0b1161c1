// crates/outfit-core/tests/commands.rs
use outfit_core::command::{parse, Command, Parsed};
use outfit_core::session::REENTER_ROOM;
use outfit_core::{
    CombineMode, EntityKind, FeedbackStyle, Gender, InboundEvent, OutboundMessage, RoomEntity,
    Session,
};

fn player(id: i32, name: &str, index: i32, gender: Gender, figure: &str) -> RoomEntity {
    RoomEntity {
        id,
        name: name.to_string(),
        motto: String::new(),
        index,
        gender,
        kind: EntityKind::Player,
        figure: figure.to_string(),
    }
}

fn chat(text: &str) -> InboundEvent {
    InboundEvent::Chat {
        text: text.to_string(),
    }
}

/// Session in a room with ourselves (slot 0), Alice and Bob.
fn session_in_room() -> Session {
    let mut session = Session::new();
    session.handle(InboundEvent::RoomUsers(vec![
        player(10, "Me", 0, Gender::Male, "hr-1.hd-1.ch-1"),
        player(11, "Alice", 1, Gender::Female, "hr-100.hd-200.lg-300.ch-400"),
        player(12, "Bob", 2, Gender::Male, "hr-500.hd-600.lg-700.ch-800"),
    ]));
    session
}

#[test]
fn parse_classifies_lines() {
    assert_eq!(parse("hello there"), Parsed::Chat);
    assert_eq!(parse(" :copy Alice"), Parsed::Chat);
    assert_eq!(parse(":sit"), Parsed::Unrecognized(":sit".to_string()));
    assert_eq!(
        parse(":copy  Alice "),
        Parsed::Command(Command::Copy {
            name: "Alice".to_string()
        })
    );
    assert_eq!(parse(":outfitcycle"), Parsed::Command(Command::OutfitCycle));
    assert_eq!(parse(":outfitstop"), Parsed::Command(Command::OutfitStop));
}

#[test]
fn parse_combine_mode_argument() {
    let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    assert_eq!(
        parse(":ofc Alice Bob 1"),
        Parsed::Command(Command::OutfitCombine {
            names: names(&["Alice", "Bob"]),
            mode: CombineMode::HairLegsHead,
            too_few: false,
        })
    );
    assert_eq!(
        parse(":outfitcombine Alice Bob"),
        Parsed::Command(Command::OutfitCombine {
            names: names(&["Alice", "Bob"]),
            mode: CombineMode::Headwear,
            too_few: false,
        })
    );
    // Out-of-range numbers are consumed and fall back to the default.
    assert_eq!(
        parse(":ofc Alice Bob 9"),
        Parsed::Command(Command::OutfitCombine {
            names: names(&["Alice", "Bob"]),
            mode: CombineMode::Headwear,
            too_few: false,
        })
    );
    assert_eq!(
        parse(":ofc Alice"),
        Parsed::Command(Command::OutfitCombine {
            names: names(&["Alice"]),
            mode: CombineMode::Headwear,
            too_few: true,
        })
    );
}

#[test]
fn ordinary_and_foreign_commands_pass_through() {
    let mut session = session_in_room();

    let out = session.handle(chat("hi all"));
    assert!(!out.block);
    assert!(out.outputs.is_empty());

    let out = session.handle(chat(":sit"));
    assert!(!out.block);
    assert!(out.outputs.is_empty());
}

#[test]
fn copy_known_user_sends_their_figure() {
    let mut session = session_in_room();

    let out = session.handle(chat(":copy alice"));

    assert!(out.block);
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(
            Gender::Female,
            "hr-100.hd-200.lg-300.ch-400"
        )]
    );
}

#[test]
fn copy_unknown_user_reports_not_found() {
    let mut session = session_in_room();

    let out = session.handle(chat(":copy Nobody"));

    assert!(out.block);
    assert_eq!(out.outputs.len(), 1);
    match &out.outputs[0] {
        OutboundMessage::Feedback {
            self_index,
            text,
            style,
        } => {
            assert_eq!(*self_index, Some(0));
            assert!(text.contains("Nobody"));
            assert!(text.contains("not found"));
            assert_eq!(*style, FeedbackStyle::Talk);
        }
        other => panic!("expected feedback, got {:?}", other),
    }
}

#[test]
fn copy_with_empty_roster_asks_to_reenter() {
    let mut session = Session::new();

    let out = session.handle(chat(":copy Alice"));

    assert!(out.block);
    assert_eq!(out.outputs, vec![OutboundMessage::shout(None, REENTER_ROOM)]);
}

#[test]
fn copy_finds_users_from_previous_rooms() {
    let mut session = session_in_room();
    session.handle(InboundEvent::RoomReady);

    let out = session.handle(chat(":copy Bob"));

    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(
            Gender::Male,
            "hr-500.hd-600.lg-700.ch-800"
        )]
    );
}

#[test]
fn copy_follows_incremental_changes() {
    let mut session = session_in_room();
    session.handle(InboundEvent::UserChange {
        index: 1,
        figure: "hr-9.ch-9".to_string(),
        gender_code: "M".to_string(),
    });

    let out = session.handle(chat(":copy Alice"));
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(Gender::Male, "hr-9.ch-9")]
    );
}

#[test]
fn removed_user_is_no_longer_found() {
    let mut session = session_in_room();
    session.handle(InboundEvent::UserRemove { index: 2 });

    let out = session.handle(chat(":copy Bob"));
    assert!(matches!(
        &out.outputs[..],
        [OutboundMessage::Feedback { style: FeedbackStyle::Talk, .. }]
    ));
}

#[test]
fn combine_two_users_with_explicit_mode() {
    let mut session = session_in_room();

    let out = session.handle(chat(":outfitcombine Alice Bob 2"));

    assert!(out.block);
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(
            Gender::Female,
            "hr-100.hd-200.lg-700.ch-800"
        )]
    );
}

#[test]
fn combine_alias_defaults_to_headwear_mode() {
    let mut session = session_in_room();

    let out = session.handle(chat(":ofc bob alice"));

    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(
            Gender::Male,
            "hr-500.hd-600.lg-300.ch-400"
        )]
    );
}

#[test]
fn combine_skips_unresolved_names() {
    let mut session = session_in_room();

    let out = session.handle(chat(":ofc Ghost Alice Bob 2"));
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(
            Gender::Female,
            "hr-100.hd-200.lg-700.ch-800"
        )]
    );

    let out = session.handle(chat(":ofc Ghost Alice"));
    assert!(out.block);
    assert!(out.outputs.is_empty());
}

#[test]
fn combine_with_too_few_arguments_is_silent() {
    let mut session = session_in_room();

    for line in [":ofc", ":ofc Alice", ":outfitcombine Alice 2"] {
        let out = session.handle(chat(line));
        assert!(out.block, "{} should be swallowed", line);
        assert!(out.outputs.is_empty(), "{} should do nothing", line);
    }
}

#[test]
fn combine_with_empty_roster_asks_to_reenter() {
    let mut session = Session::new();

    let out = session.handle(chat(":ofc Alice Bob"));
    assert_eq!(out.outputs, vec![OutboundMessage::shout(None, REENTER_ROOM)]);
}

#[test]
fn toggle_disables_commands_and_reports_state() {
    let mut session = session_in_room();

    let out = session.handle(InboundEvent::Toggle);
    assert!(!session.is_enabled());
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::shout(Some(0), "Extension is now off")]
    );

    let out = session.handle(chat(":copy Alice"));
    assert!(!out.block);
    assert!(out.outputs.is_empty());

    let out = session.handle(InboundEvent::Toggle);
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::shout(Some(0), "Extension is now on")]
    );
    assert!(session.handle(chat(":copy Alice")).block);
}

#[test]
fn disabled_session_ignores_roster_events_but_tracks_own_slot() {
    let mut session = Session::new();
    session.handle(InboundEvent::Toggle);

    session.handle(InboundEvent::RoomUsers(vec![player(
        10,
        "Me",
        5,
        Gender::Male,
        "hr-1",
    )]));

    assert_eq!(session.self_index(), Some(5));
    assert!(session.roster().is_empty());
}

#[test]
fn own_slot_is_captured_once_per_room() {
    let mut session = session_in_room();
    assert_eq!(session.self_index(), Some(0));

    session.handle(InboundEvent::RoomUsers(vec![player(
        13,
        "Carol",
        3,
        Gender::Female,
        "hr-3",
    )]));
    assert_eq!(session.self_index(), Some(0));

    session.handle(InboundEvent::Logout);
    assert_eq!(session.self_index(), None);
    assert_eq!(session.roster().current_len(), 0);
}

#[test]
fn copy_after_missed_removal_uses_new_slot_occupant() {
    let mut session = session_in_room();

    session.handle(InboundEvent::Toggle);
    session.handle(InboundEvent::UserRemove { index: 2 });
    session.handle(InboundEvent::Toggle);

    session.handle(InboundEvent::RoomUsers(vec![player(
        13,
        "Carol",
        2,
        Gender::Male,
        "hr-3",
    )]));
    session.handle(InboundEvent::UserChange {
        index: 2,
        figure: "hr-NEW".to_string(),
        gender_code: "f".to_string(),
    });

    let out = session.handle(chat(":copy Carol"));
    assert!(out.block);
    assert_eq!(
        out.outputs,
        vec![OutboundMessage::update_figure(Gender::Female, "hr-NEW")]
    );
}
