use crate::location::Location;
use serde::{Deserialize, Serialize};

/// All player-issued commands during play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    Travel { location: Location },

    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
}
