//! Shared primitive types used across the entire simulation.

/// One atomic step of the in-game clock. Its length (second or minute)
/// depends on the configured granularity.
pub type Unit = u64;

/// In-game day number, starting at 1.
pub type Day = u32;

/// Money is whole dollars and may go negative.
pub type Money = i64;

/// The canonical session identifier.
pub type SessionId = String;
