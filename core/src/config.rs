use crate::error::{SimError, SimResult};
use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The atomic in-game unit the clock advances by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Second,
    Minute,
}

impl Granularity {
    pub fn units_per_minute(&self) -> u64 {
        match self {
            Self::Second => 60,
            Self::Minute => 1,
        }
    }
}

impl FromStr for Granularity {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(Self::Second),
            "minute" | "minutes" => Ok(Self::Minute),
            other => Err(SimError::UnknownGranularity { name: other.to_string() }),
        }
    }
}

/// How long the shell should keep each kind of notification on screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationDurations {
    pub tax_ms:     u64,
    pub hour_ms:    u64,
    pub energy_ms:  u64,
    pub default_ms: u64,
}

impl Default for NotificationDurations {
    fn default() -> Self {
        Self {
            tax_ms:     5_000,
            hour_ms:    3_000,
            energy_ms:  2_500,
            default_ms: 5_000,
        }
    }
}

/// Where the clock and the purse stand when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StartingState {
    pub money:  Money,
    pub hunger: i64,
    /// Defaults to `max_energy`.
    pub energy: Option<i64>,
    pub day:    Day,
    pub hour:   u32,
    pub minute: u32,
    pub second: u32,
}

impl Default for StartingState {
    fn default() -> Self {
        Self {
            money:  10_000,
            hunger: 0,
            energy: None,
            day:    1,
            hour:   8,
            minute: 0,
            second: 0,
        }
    }
}

/// Engine configuration. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Flat charge deducted once per day.
    pub tax_amount: Money,
    /// Hour of day (0..24) at which the tax falls due, on the dot.
    pub tax_hour: u32,

    pub granularity: Granularity,
    /// Real milliseconds per in-game minute. 500 means 30 real seconds
    /// per in-game hour.
    pub real_ms_per_game_minute: u64,

    pub hunger_per_hour: i64,
    pub hunger_penalty_threshold: i64,
    /// Units spent at or above the hunger threshold per point of energy lost.
    pub penalty_interval_units: u32,
    pub max_energy: i64,

    pub work_pay: Money,
    pub travel_cost: Money,

    /// Period of the shell's refresh timer.
    pub tick_interval_ms: u64,

    pub start: StartingState,
    pub notifications: NotificationDurations,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tax_amount: 1_000,
            tax_hour: 8,
            granularity: Granularity::Second,
            real_ms_per_game_minute: 500,
            hunger_per_hour: 10,
            hunger_penalty_threshold: 50,
            penalty_interval_units: 5,
            max_energy: 100,
            work_pay: 10,
            travel_cost: 20,
            tick_interval_ms: 250,
            start: StartingState::default(),
            notifications: NotificationDurations::default(),
        }
    }
}

impl GameConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!("Loaded config from {path}");
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        let invalid = |reason: String| -> SimResult<()> {
            Err(SimError::InvalidConfig { reason })
        };

        if self.tax_hour >= 24 {
            return invalid(format!("tax_hour must be below 24, got {}", self.tax_hour));
        }
        if self.real_ms_per_game_minute == 0 {
            return invalid("real_ms_per_game_minute must be positive".into());
        }
        if self.penalty_interval_units == 0 {
            return invalid("penalty_interval_units must be positive".into());
        }
        if self.max_energy < 0 {
            return invalid(format!("max_energy must not be negative, got {}", self.max_energy));
        }
        let s = &self.start;
        if let Some(energy) = s.energy {
            if !(0..=self.max_energy).contains(&energy) {
                return invalid(format!(
                    "start.energy must be within 0..={}, got {energy}",
                    self.max_energy
                ));
            }
        }
        if s.hunger < 0 {
            return invalid(format!("start.hunger must not be negative, got {}", s.hunger));
        }
        if s.day == 0 || s.hour >= 24 || s.minute >= 60 || s.second >= 60 {
            return invalid(format!(
                "start clock out of range: day {} {:02}:{:02}:{:02}",
                s.day, s.hour, s.minute, s.second
            ));
        }
        if self.granularity == Granularity::Minute && s.second != 0 {
            return invalid("minute granularity requires start.second = 0".into());
        }
        Ok(())
    }

    /// Real milliseconds per in-game unit as an exact fraction
    /// `(numerator, denominator)`.
    pub fn ms_per_unit(&self) -> (u64, u64) {
        (self.real_ms_per_game_minute, self.granularity.units_per_minute())
    }

    /// Smallest whole number of real milliseconds that covers `units`.
    pub fn real_ms_for_units(&self, units: u64) -> u64 {
        let (num, den) = self.ms_per_unit();
        (units * num).div_ceil(den)
    }
}
