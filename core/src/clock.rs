//! Simulation clock. Converts real elapsed time into whole in-game units
//! and owns the in-game calendar.

use crate::config::{GameConfig, Granularity};
use crate::types::{Day, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const NANOS_PER_MS: u128 = 1_000_000;

/// Real-time side of the clock: a remainder buffer carried across calls
/// plus the pause flag.
///
/// The rate is held as an exact fraction (`ms_num / ms_den` real ms per
/// unit) and the remainder in nanoseconds scaled by `ms_den`, so splitting
/// elapsed time across many short ticks never loses or gains a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    ms_num:        u64,
    ms_den:        u64,
    remainder:     u128,
    paused:        bool,
    units_elapsed: Unit,
}

impl SimClock {
    pub fn new(config: &GameConfig) -> Self {
        let (ms_num, ms_den) = config.ms_per_unit();
        Self {
            ms_num,
            ms_den,
            remainder: 0,
            paused: false,
            units_elapsed: 0,
        }
    }

    /// Feed elapsed real time. Returns the number of whole units that are
    /// now due. Elapsed time fed while paused is dropped.
    pub fn feed(&mut self, elapsed: Duration) -> Unit {
        if self.paused || elapsed.is_zero() {
            return 0;
        }
        let unit_cost = self.ms_num as u128 * NANOS_PER_MS;
        self.remainder += elapsed.as_nanos() * self.ms_den as u128;
        let whole = self.remainder / unit_cost;
        self.remainder -= whole * unit_cost;

        let whole = Unit::try_from(whole).unwrap_or(Unit::MAX);
        self.units_elapsed = self.units_elapsed.saturating_add(whole);
        whole
    }

    /// Count units applied directly, without real time behind them.
    pub fn count(&mut self, units: Unit) {
        self.units_elapsed = self.units_elapsed.saturating_add(units);
    }

    /// Real time banked towards the next unit.
    pub fn pending(&self) -> Duration {
        let nanos = self.remainder / self.ms_den as u128;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    pub fn units_elapsed(&self) -> Unit {
        self.units_elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }
}

/// What one unit step crossed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rollover {
    pub hour_passed: bool,
    pub day_started: bool,
}

/// In-game calendar: day number plus a 24h/60m/60s wall clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameTime {
    pub day:    Day,
    pub hour:   u32,
    pub minute: u32,
    pub second: u32,
}

impl GameTime {
    pub fn new(day: Day, hour: u32, minute: u32, second: u32) -> Self {
        Self { day, hour, minute, second }
    }

    /// Advance by one unit of `granularity`, carrying into minutes, hours
    /// and days.
    pub fn step(&mut self, granularity: Granularity) -> Rollover {
        let mut rollover = Rollover::default();

        match granularity {
            Granularity::Second => {
                self.second += 1;
                if self.second >= 60 {
                    self.second = 0;
                    self.minute += 1;
                }
            }
            Granularity::Minute => self.minute += 1,
        }
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
            rollover.hour_passed = true;
        }
        if self.hour >= 24 {
            self.hour %= 24;
            self.day += 1;
            rollover.day_started = true;
        }
        rollover
    }

    /// True exactly at `hour:00:00`.
    pub fn is_on_the_hour(&self, hour: u32) -> bool {
        self.hour == hour && self.minute == 0 && self.second == 0
    }

    pub fn phase(&self) -> DayPhase {
        if (6..18).contains(&self.hour) {
            DayPhase::Daytime
        } else {
            DayPhase::Nighttime
        }
    }

    /// `HH:MM`
    pub fn hh_mm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} {:02}:{:02}:{:02}", self.day, self.hour, self.minute, self.second)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayPhase {
    Daytime,
    Nighttime,
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daytime   => f.write_str("Daytime"),
            Self::Nighttime => f.write_str("Nighttime"),
        }
    }
}
