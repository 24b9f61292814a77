//! Session lifecycle: start, pause, commands, snapshots, event log.

use std::time::Duration;
use world_runner_core::{
    clock::DayPhase,
    command::PlayerCommand,
    config::GameConfig,
    engine::{GameSession, EVENT_LOG_CAPACITY},
    error::SimError,
    event::SimEvent,
    location::Location,
    player::Character,
};

fn lisbon() -> Option<Character> {
    Some(Character::new("woman", "Lisbon"))
}

/// A new session starts in the apartment without paying for it.
#[test]
fn starts_in_apartment_free_of_charge() {
    let session = GameSession::start(GameConfig::default(), lisbon()).unwrap();

    assert_eq!(session.location(), Location::Apartment);
    assert_eq!(session.state().money, 10_000);
    assert_eq!(session.state().total_spent, 0);
    assert_eq!(session.state().last_tax_day, session.state().time.day);
    assert_eq!(session.pending(), Duration::ZERO);
}

/// Each session gets its own id and a clean time buffer.
#[test]
fn restart_gets_fresh_session() {
    let mut first = GameSession::start(GameConfig::default(), lisbon()).unwrap();
    first.advance_ms(5);
    assert!(first.pending() > Duration::ZERO);

    let second = GameSession::start(first.config().clone(), lisbon()).unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_eq!(second.pending(), Duration::ZERO);
    assert_eq!(second.units_elapsed(), 0);
}

/// Invalid config is refused up front.
#[test]
fn invalid_config_is_refused() {
    let config = GameConfig { tax_hour: 30, ..GameConfig::default() };

    let result = GameSession::start(config, None);

    assert!(matches!(result, Err(SimError::InvalidConfig { .. })));
}

/// Time fed while paused is dropped, not banked.
#[test]
fn paused_session_ignores_time() {
    let mut session = GameSession::start(GameConfig::default(), None).unwrap();
    let before = session.state().clone();

    session.pause();
    assert!(session.advance_ms(60_000).is_idle());
    assert!(session.advance_units(100).is_idle());
    assert_eq!(session.state(), &before);

    session.resume();
    let outcome = session.advance_ms(500);
    assert_eq!(outcome.units, 60);
}

/// Pausing goes through the session, so the flag and the log agree.
#[test]
fn pause_state_matches_the_log() {
    let mut session = GameSession::start(GameConfig::default(), None).unwrap();
    session.advance_ms(500);
    session.advance_units(40);
    assert_eq!(session.units_elapsed(), 100);

    session.pause();
    assert!(session.is_paused());
    assert!(session.snapshot().paused);
    let last = session.event_log().last().map(|e| e.event.clone());
    assert_eq!(last, Some(SimEvent::ClockPaused));

    session.resume();
    assert!(!session.is_paused());
    let last = session.event_log().last().map(|e| e.event.clone());
    assert_eq!(last, Some(SimEvent::ClockResumed));
    assert_eq!(session.units_elapsed(), 100);
}

/// Commands dispatch and report the events they caused.
#[test]
fn commands_dispatch() {
    let mut session = GameSession::start(GameConfig::default(), None).unwrap();

    let events = session.apply_command(PlayerCommand::Pause);
    assert_eq!(events, vec![SimEvent::ClockPaused]);
    assert!(session.apply_command(PlayerCommand::Pause).is_empty(), "already paused");

    let events = session.apply_command(PlayerCommand::Travel { location: Location::Work });
    assert_eq!(events.len(), 1);
    assert_eq!(session.state().money, 10_010);

    let events = session.apply_command(PlayerCommand::Resume);
    assert_eq!(events, vec![SimEvent::ClockResumed]);
}

/// The snapshot carries everything the renderer needs.
#[test]
fn snapshot_for_rendering() {
    let mut session = GameSession::start(GameConfig::default(), lisbon()).unwrap();
    session.advance_units(11 * 3_600 + 5 * 60);

    let snap = session.snapshot();

    assert_eq!(snap.time_of_day, "19:05");
    assert_eq!(snap.phase, DayPhase::Nighttime);
    assert_eq!(snap.city(), Some("Lisbon"));
    assert_eq!(snap.location_name, "Your Apartment");
    assert_eq!(snap.location_description, "A small starter apartment in Lisbon.");
    assert_eq!(snap.player.hunger, 110);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["hour"], 19);
    assert_eq!(json["money"], 10_000);
    assert_eq!(json["location"], "apartment");
    assert_eq!(json["phase"], "Nighttime");
}

/// The event log keeps the newest entries in sequence order.
#[test]
fn event_log_is_bounded() {
    let mut config = GameConfig::default();
    config.start.hunger = 100;
    let mut session = GameSession::start(config, None).unwrap();

    // An energy event every five seconds for two hours.
    session.advance_units(2 * 3_600);

    let seqs: Vec<u64> = session.event_log().map(|e| e.seq).collect();
    assert_eq!(seqs.len(), EVENT_LOG_CAPACITY);
    assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(session.event_log().last().unwrap().at, session.state().time);
}
