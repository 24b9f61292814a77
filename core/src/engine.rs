//! The game clock engine: the heart of World Runner.
//!
//! EXECUTION ORDER per in-game unit (fixed, never reordered):
//!   0. Calendar step     (engine: second/minute/hour/day rollover)
//!   1. Vitals subsystem  (hunger on the hour, energy refill on a new day)
//!   2. Tax subsystem     (daily charge at TAX_HOUR:00:00)
//!   3. Fatigue subsystem (energy drain while hungry)
//!
//! RULES:
//!   - Units are applied one at a time; every subsystem sees every unit.
//!   - Subsystems react to the calendar through events, never by
//!     re-deriving boundaries themselves.
//!   - The session owns all state. Nothing is global.

use crate::{
    clock::{GameTime, SimClock},
    command::PlayerCommand,
    config::GameConfig,
    error::SimResult,
    event::{EventLogEntry, Notification, SimEvent},
    fatigue_subsystem::FatigueSubsystem,
    location::Location,
    player::{Character, PlayerState},
    snapshot::SessionSnapshot,
    subsystem::SimSubsystem,
    tax_subsystem::TaxSubsystem,
    types::{Money, SessionId, Unit},
    vitals_subsystem::VitalsSubsystem,
};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Oldest entries are dropped past this many.
pub const EVENT_LOG_CAPACITY: usize = 1_024;

/// Result of feeding elapsed time to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub units:         Unit,
    pub events:        Vec<SimEvent>,
    pub notifications: Vec<Notification>,
}

impl AdvanceOutcome {
    pub fn is_idle(&self) -> bool {
        self.units == 0
    }
}

/// Result of moving to a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelOutcome {
    pub location:    Location,
    pub delta:       Money,
    pub name:        &'static str,
    pub description: String,
}

pub struct GameSession {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    clock:          SimClock,
    config:         GameConfig,
    state:          PlayerState,
    character:      Option<Character>,
    location:       Location,
    subsystems:     Vec<Box<dyn SimSubsystem>>,
    event_log:      VecDeque<EventLogEntry>,
    next_seq:       u64,
}

impl GameSession {
    /// Start a fresh session: default player state, empty time buffer,
    /// standing in the apartment. Arriving there at start is free.
    pub fn start(config: GameConfig, character: Option<Character>) -> SimResult<Self> {
        config.validate()?;

        let mut session = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            clock:      SimClock::new(&config),
            state:      PlayerState::new(&config),
            character,
            location:   Location::Apartment,
            subsystems: Vec::new(),
            event_log:  VecDeque::new(),
            next_seq:   0,
            config,
        };

        // EXECUTION ORDER: fixed, documented, never reordered.
        session.register(Box::new(VitalsSubsystem::new(&session.config)));
        session.register(Box::new(TaxSubsystem::new(&session.config)));
        session.register(Box::new(FatigueSubsystem::new(&session.config)));

        log::info!(
            "Session {} started at {} ({})",
            session.session_id,
            session.state.time,
            session.character.as_ref().map_or("no character", |c| c.city.as_str()),
        );
        let started = SimEvent::SessionStarted {
            session_id: session.session_id.clone(),
            day:        session.state.time.day,
        };
        session.record("engine", &started);

        Ok(session)
    }

    fn register(&mut self, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push(subsystem);
    }

    /// Feed elapsed real time. Whole units that have accumulated are
    /// applied one by one; the fractional rest is banked for the next call.
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceOutcome {
        let units = self.clock.feed(elapsed);
        self.apply_units(units)
    }

    pub fn advance_ms(&mut self, elapsed_ms: u64) -> AdvanceOutcome {
        self.advance(Duration::from_millis(elapsed_ms))
    }

    /// Apply `n` units directly, bypassing the real-time buffer.
    pub fn advance_units(&mut self, n: Unit) -> AdvanceOutcome {
        if self.clock.is_paused() {
            return AdvanceOutcome::default();
        }
        self.clock.count(n);
        self.apply_units(n)
    }

    fn apply_units(&mut self, units: Unit) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome { units, ..AdvanceOutcome::default() };
        for _ in 0..units {
            self.step_unit(&mut outcome);
        }
        outcome
    }

    /// One unit: calendar first, then each subsystem in order.
    fn step_unit(&mut self, outcome: &mut AdvanceOutcome) {
        let rollover = self.state.time.step(self.config.granularity);

        let mut unit_events = Vec::new();
        if rollover.hour_passed {
            unit_events.push(SimEvent::HourPassed {
                day:  self.state.time.day,
                hour: self.state.time.hour,
            });
        }
        if rollover.day_started {
            unit_events.push(SimEvent::DayStarted { day: self.state.time.day });
        }
        for event in &unit_events {
            self.record("clock", event);
        }

        for subsystem in &mut self.subsystems {
            let new_events = subsystem.update(&mut self.state, &unit_events);
            for event in &new_events {
                Self::push_log(
                    &mut self.event_log,
                    &mut self.next_seq,
                    self.state.time,
                    subsystem.name(),
                    event,
                );
            }
            unit_events.extend(new_events);
        }

        outcome.notifications.extend(
            unit_events.iter().filter_map(|e| Notification::for_event(e, &self.config)),
        );
        outcome.events.extend(unit_events);
    }

    /// Move to `location` and settle its money change. Money has no floor.
    pub fn apply_travel(&mut self, location: Location) -> TravelOutcome {
        self.location = location;

        let delta = location.money_delta(&self.config);
        if delta >= 0 {
            self.state.earn(delta);
        } else {
            self.state.spend(delta.abs());
        }

        log::debug!("travel to {location}: delta={delta} money={}", self.state.money);
        let event = SimEvent::Travelled { location, delta, money: self.state.money };
        self.record("travel", &event);

        TravelOutcome {
            location,
            delta,
            name: location.name(),
            description: location.description(self.city()),
        }
    }

    pub fn pause(&mut self) {
        if !self.clock.is_paused() {
            self.clock.pause();
            self.record("engine", &SimEvent::ClockPaused);
        }
    }

    pub fn resume(&mut self) {
        if self.clock.is_paused() {
            self.clock.resume();
            self.record("engine", &SimEvent::ClockResumed);
        }
    }

    /// Dispatch a player command. Returns the events it produced.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Vec<SimEvent> {
        let before = self.next_seq;
        match command {
            PlayerCommand::Travel { location } => {
                self.apply_travel(location);
            }
            PlayerCommand::Pause  => self.pause(),
            PlayerCommand::Resume => self.resume(),
        }
        self.event_log
            .iter()
            .filter(|e| e.seq >= before)
            .map(|e| e.event.clone())
            .collect()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Real time banked towards the next unit.
    pub fn pending(&self) -> Duration {
        self.clock.pending()
    }

    /// Units applied since the session started.
    pub fn units_elapsed(&self) -> Unit {
        self.clock.units_elapsed()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn city(&self) -> Option<&str> {
        self.character.as_ref().map(|c| c.city.as_str())
    }

    /// Most recent events, oldest first.
    pub fn event_log(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.event_log.iter()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            character:  self.character.clone(),
            location:   self.location,
            location_name: self.location.name().to_string(),
            location_description: self.location.description(self.city()),
            player:     self.state.clone(),
            time_of_day: self.state.time.hh_mm(),
            phase:      self.state.time.phase(),
            paused:     self.clock.is_paused(),
        }
    }

    fn record(&mut self, subsystem: &str, event: &SimEvent) {
        Self::push_log(
            &mut self.event_log,
            &mut self.next_seq,
            self.state.time,
            subsystem,
            event,
        );
    }

    fn push_log(
        entries: &mut VecDeque<EventLogEntry>,
        next_seq: &mut u64,
        at: GameTime,
        subsystem: &str,
        event: &SimEvent,
    ) {
        if entries.len() == EVENT_LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(EventLogEntry {
            seq: *next_seq,
            at,
            subsystem: subsystem.to_string(),
            event: event.clone(),
        });
        *next_seq += 1;
    }
}
