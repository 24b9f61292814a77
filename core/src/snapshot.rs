//! Read-only view of a session for rendering.

use crate::{
    clock::DayPhase,
    location::Location,
    player::{Character, PlayerState},
    types::SessionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub character:  Option<Character>,
    pub location:   Location,
    pub location_name: String,
    pub location_description: String,
    #[serde(flatten)]
    pub player:     PlayerState,
    /// `HH:MM`
    pub time_of_day: String,
    pub phase:      DayPhase,
    pub paused:     bool,
}

impl SessionSnapshot {
    pub fn city(&self) -> Option<&str> {
        self.character.as_ref().map(|c| c.city.as_str())
    }
}
