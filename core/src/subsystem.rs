//! Subsystem trait.
//!
//! The engine advances the calendar by one unit, then calls update() on
//! each registered subsystem in registration order. Execution order is
//! fixed and documented in engine.rs.

use crate::{event::SimEvent, player::PlayerState};

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per in-game unit by the engine.
    ///
    /// - `state`:     the player record, already carrying this unit's time
    /// - `events_in`: events emitted earlier in this unit
    ///
    /// Returns the new events to append to this unit's log.
    fn update(&mut self, state: &mut PlayerState, events_in: &[SimEvent]) -> Vec<SimEvent>;
}
