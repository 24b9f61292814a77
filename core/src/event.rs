//! Events: everything the engine did, in order.
//!
//! Subsystems communicate through events: the clock announces boundaries,
//! later subsystems in the same unit react to them. The shell only ever
//! sees events and the notifications derived from them.

use crate::clock::GameTime;
use crate::config::GameConfig;
use crate::location::Location;
use crate::types::{Day, Money, SessionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Session ────────────────────────────────────
    SessionStarted {
        session_id: SessionId,
        day: Day,
    },
    ClockPaused,
    ClockResumed,

    // ── Clock ──────────────────────────────────────
    HourPassed {
        day: Day,
        hour: u32,
    },
    DayStarted {
        day: Day,
    },

    // ── Vitals ─────────────────────────────────────
    HungerIncreased {
        amount: i64,
        hunger: i64,
    },
    EnergyRestored {
        day: Day,
        energy: i64,
    },
    EnergyLost {
        energy: i64,
    },

    // ── Tax ────────────────────────────────────────
    TaxCharged {
        day: Day,
        amount: Money,
        money: Money,
    },

    // ── Travel ─────────────────────────────────────
    Travelled {
        location: Location,
        delta: Money,
        money: Money,
    },
}

impl SimEvent {
    /// Stable name for the event variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }  => "session_started",
            Self::ClockPaused            => "clock_paused",
            Self::ClockResumed           => "clock_resumed",
            Self::HourPassed { .. }      => "hour_passed",
            Self::DayStarted { .. }      => "day_started",
            Self::HungerIncreased { .. } => "hunger_increased",
            Self::EnergyRestored { .. }  => "energy_restored",
            Self::EnergyLost { .. }      => "energy_lost",
            Self::TaxCharged { .. }      => "tax_charged",
            Self::Travelled { .. }       => "travelled",
        }
    }
}

/// A transient message for the shell to show and later expire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub message:    String,
    /// Suggested time on screen.
    pub display_ms: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, display_ms: u64) -> Self {
        Self { message: message.into(), display_ms }
    }

    /// The player-facing message for an event, if it warrants one.
    pub fn for_event(event: &SimEvent, config: &GameConfig) -> Option<Self> {
        let d = &config.notifications;
        match event {
            SimEvent::TaxCharged { amount, .. } => Some(Self::new(
                format!("Taxes paid at {:02}:00: ${amount}", config.tax_hour),
                d.tax_ms,
            )),
            SimEvent::HungerIncreased { amount, hunger } => Some(Self::new(
                format!("Hour passed: hunger +{amount} -> {hunger}"),
                d.hour_ms,
            )),
            SimEvent::EnergyLost { energy } => Some(Self::new(
                format!("Energy -1 due to hunger. Energy={energy}"),
                d.energy_ms,
            )),
            _ => None,
        }
    }
}

/// One entry of the session's in-memory event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventLogEntry {
    pub seq:       u64,
    pub at:        GameTime,
    pub subsystem: String,
    pub event:     SimEvent,
}
