//! Hunger growth on the hour and the energy refill at the start of each day.

use crate::{
    config::GameConfig,
    event::SimEvent,
    player::PlayerState,
    subsystem::SimSubsystem,
};

pub struct VitalsSubsystem {
    hunger_per_hour: i64,
    max_energy:      i64,
}

impl VitalsSubsystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            hunger_per_hour: config.hunger_per_hour,
            max_energy:      config.max_energy,
        }
    }
}

impl SimSubsystem for VitalsSubsystem {
    fn name(&self) -> &'static str { "vitals" }

    fn update(&mut self, state: &mut PlayerState, events_in: &[SimEvent]) -> Vec<SimEvent> {
        let mut out = Vec::new();
        for event in events_in {
            match event {
                SimEvent::HourPassed { .. } => {
                    state.hunger += self.hunger_per_hour;
                    out.push(SimEvent::HungerIncreased {
                        amount: self.hunger_per_hour,
                        hunger: state.hunger,
                    });
                }
                SimEvent::DayStarted { day } => {
                    state.energy = self.max_energy;
                    log::debug!("day {day} started, energy restored to {}", state.energy);
                    out.push(SimEvent::EnergyRestored { day: *day, energy: state.energy });
                }
                _ => {}
            }
        }
        out
    }
}
