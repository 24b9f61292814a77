//! Static location catalog.

use crate::config::GameConfig;
use crate::error::{SimError, SimResult};
use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    Apartment,
    City,
    Store,
    Work,
}

impl Location {
    /// Map order.
    pub const ALL: [Location; 4] = [Self::Apartment, Self::City, Self::Store, Self::Work];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::City      => "city",
            Self::Store     => "store",
            Self::Work      => "work",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Apartment => "Your Apartment",
            Self::City      => "City Center",
            Self::Store     => "Grocery Store",
            Self::Work      => "Workplace",
        }
    }

    /// Label on the map button.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::City      => "City Center",
            Self::Store     => "Grocery Store",
            Self::Work      => "Workplace",
        }
    }

    pub fn description(&self, city: Option<&str>) -> String {
        match self {
            Self::Apartment => format!(
                "A small starter apartment in {}.",
                city.unwrap_or("a city")
            ),
            Self::City  => "Shops, traffic, and people everywhere.".to_string(),
            Self::Store => "Buy food to reduce hunger.".to_string(),
            Self::Work  => "Earn money here during the day.".to_string(),
        }
    }

    /// Signed money change on arrival.
    pub fn money_delta(&self, config: &GameConfig) -> Money {
        match self {
            Self::Work => config.work_pay,
            Self::Apartment | Self::City | Self::Store => -config.travel_cost,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Location {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.id() == wanted)
            .ok_or(SimError::UnknownLocation { id: s.to_string() })
    }
}
