//! Energy drain while hungry.
//!
//! Each unit at or above the hunger threshold counts towards the next
//! point of energy lost. Dropping below the threshold clears the count
//! at once.

use crate::{
    config::GameConfig,
    event::SimEvent,
    player::PlayerState,
    subsystem::SimSubsystem,
};

pub struct FatigueSubsystem {
    threshold: i64,
    interval:  u32,
}

impl FatigueSubsystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            threshold: config.hunger_penalty_threshold,
            interval:  config.penalty_interval_units,
        }
    }
}

impl SimSubsystem for FatigueSubsystem {
    fn name(&self) -> &'static str { "fatigue" }

    fn update(&mut self, state: &mut PlayerState, _events_in: &[SimEvent]) -> Vec<SimEvent> {
        if state.hunger < self.threshold {
            state.energy_penalty_counter = 0;
            return vec![];
        }

        state.energy_penalty_counter += 1;
        if state.energy_penalty_counter < self.interval {
            return vec![];
        }

        state.energy = (state.energy - 1).max(0);
        state.energy_penalty_counter = 0;
        log::debug!("fatigue: hunger={} energy={}", state.hunger, state.energy);

        vec![SimEvent::EnergyLost { energy: state.energy }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_clears_below_threshold() {
        let config = GameConfig::default();
        let mut fatigue = FatigueSubsystem::new(&config);
        let mut state = PlayerState::new(&config);

        state.hunger = 50;
        for _ in 0..4 {
            assert!(fatigue.update(&mut state, &[]).is_empty());
        }
        assert_eq!(state.energy_penalty_counter, 4);

        state.hunger = 49;
        fatigue.update(&mut state, &[]);
        assert_eq!(state.energy_penalty_counter, 0);
        assert_eq!(state.energy, 100);
    }

    #[test]
    fn energy_stays_at_zero() {
        let config = GameConfig::default();
        let mut fatigue = FatigueSubsystem::new(&config);
        let mut state = PlayerState::new(&config);
        state.hunger = 500;
        state.energy = 0;

        for _ in 0..5 {
            fatigue.update(&mut state, &[]);
        }
        assert_eq!(state.energy, 0);
        assert_eq!(state.energy_penalty_counter, 0);
    }
}
