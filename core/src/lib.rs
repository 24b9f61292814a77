//! World Runner core: the game clock engine and its data model.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod location;
pub mod player;
pub mod snapshot;
pub mod subsystem;
pub mod types;

pub mod fatigue_subsystem;
pub mod tax_subsystem;
pub mod vitals_subsystem;
