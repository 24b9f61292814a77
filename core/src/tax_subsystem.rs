//! Daily flat tax, charged once at TAX_HOUR:00:00.

use crate::{
    config::GameConfig,
    event::SimEvent,
    player::PlayerState,
    subsystem::SimSubsystem,
    types::Money,
};

pub struct TaxSubsystem {
    amount: Money,
    hour:   u32,
}

impl TaxSubsystem {
    pub fn new(config: &GameConfig) -> Self {
        Self { amount: config.tax_amount, hour: config.tax_hour }
    }
}

impl SimSubsystem for TaxSubsystem {
    fn name(&self) -> &'static str { "tax" }

    fn update(&mut self, state: &mut PlayerState, _events_in: &[SimEvent]) -> Vec<SimEvent> {
        // Exact instant only: the clock sits on hour:00:00 once per day,
        // so a day can never be charged twice.
        if !state.time.is_on_the_hour(self.hour) || state.time.day <= state.last_tax_day {
            return vec![];
        }

        state.spend(self.amount);
        state.last_tax_day = state.time.day;

        log::debug!(
            "day={} tax: charged {} money={}",
            state.time.day, self.amount, state.money
        );

        vec![SimEvent::TaxCharged {
            day:    state.time.day,
            amount: self.amount,
            money:  state.money,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::GameTime;

    #[test]
    fn charges_new_day_once() {
        let config = GameConfig::default();
        let mut tax = TaxSubsystem::new(&config);
        let mut state = PlayerState::new(&config);

        // Start instant of day 1 is already settled.
        assert!(tax.update(&mut state, &[]).is_empty());

        state.time = GameTime::new(2, 8, 0, 0);
        assert_eq!(tax.update(&mut state, &[]).len(), 1);
        assert_eq!(state.money, 9_000);
        assert_eq!(state.last_tax_day, 2);

        assert!(tax.update(&mut state, &[]).is_empty());
        assert_eq!(state.money, 9_000);
    }

    #[test]
    fn ignores_later_instants_of_the_hour() {
        let config = GameConfig::default();
        let mut tax = TaxSubsystem::new(&config);
        let mut state = PlayerState::new(&config);

        state.time = GameTime::new(2, 8, 0, 1);
        assert!(tax.update(&mut state, &[]).is_empty());
        state.time = GameTime::new(2, 9, 0, 0);
        assert!(tax.update(&mut state, &[]).is_empty());
        assert_eq!(state.last_tax_day, 1);
    }
}
