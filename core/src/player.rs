//! The player record and the character chosen before play.

use crate::clock::GameTime;
use crate::config::GameConfig;
use crate::error::{SimError, SimResult};
use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};

/// Authoritative player state. One per session; mutated only by the
/// engine's advance and travel operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub money:  Money,
    /// Always within `0..=max_energy`.
    pub energy: i64,
    /// Grows without bound.
    pub hunger: i64,
    #[serde(flatten)]
    pub time:   GameTime,
    pub total_earned: Money,
    pub total_spent:  Money,
    pub last_tax_day: Day,
    pub energy_penalty_counter: u32,
}

impl PlayerState {
    pub fn new(config: &GameConfig) -> Self {
        let s = &config.start;
        Self {
            money:  s.money,
            energy: s.energy.unwrap_or(config.max_energy),
            hunger: s.hunger,
            time:   GameTime::new(s.day, s.hour, s.minute, s.second),
            total_earned: 0,
            total_spent:  0,
            last_tax_day: s.day,
            energy_penalty_counter: 0,
        }
    }

    /// Add to money and the earnings ledger.
    pub fn earn(&mut self, amount: Money) {
        self.money += amount;
        self.total_earned += amount;
    }

    /// Take from money (no floor) and add to the spending ledger.
    pub fn spend(&mut self, amount: Money) {
        self.money -= amount;
        self.total_spent += amount;
    }
}

/// Choices made on the character-creation screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterDraft {
    pub gender: Option<String>,
    pub city:   Option<String>,
}

impl CharacterDraft {
    pub fn choose_gender(&mut self, gender: &str) {
        self.gender = non_blank(gender);
    }

    pub fn choose_city(&mut self, city: &str) {
        self.city = non_blank(city);
    }

    /// Ready to start once both choices are in.
    pub fn is_complete(&self) -> bool {
        self.gender.is_some() && self.city.is_some()
    }

    /// Summary line while both are chosen, `None` otherwise.
    pub fn summary(&self) -> Option<String> {
        self.clone().finish().ok().map(|c| c.summary())
    }

    pub fn finish(self) -> SimResult<Character> {
        let gender = self.gender.ok_or(SimError::CharacterIncomplete { missing: "gender" })?;
        let city = self.city.ok_or(SimError::CharacterIncomplete { missing: "city" })?;
        Ok(Character { gender, city })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub gender: String,
    pub city:   String,
}

impl Character {
    pub fn new(gender: impl Into<String>, city: impl Into<String>) -> Self {
        Self { gender: gender.into(), city: city.into() }
    }

    pub fn summary(&self) -> String {
        format!(
            "You are an 18-year-old {} who just moved into an apartment in {}.",
            self.gender, self.city
        )
    }
}
