//! Protection paladin combat simulator
//!
//! A discrete-event engine runs many seeded fights of one paladin against a
//! target and aggregates damage, threat, damage taken and survival. The
//! spec layer on top binds a player model and static presentation config
//! to the engine the way a simulator front end would.

pub mod apl;
pub mod aura;
pub mod buffs;
pub mod character;
pub mod config;
pub mod encounter;
pub mod ep;
pub mod error;
pub mod gear;
pub mod item_sets;
pub mod logging;
pub mod outcome;
pub mod player;
pub mod player_data;
pub mod presets;
pub mod protection_paladin;
pub mod runes;
pub mod scheduler;
pub mod sim_ui;
pub mod simulation;
pub mod spec_config;
pub mod spells;
pub mod stats;
pub mod talents;
pub mod target;
pub mod unit_stats;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use simulation::{run_and_aggregate, run_simulation_with_seed, run_simulations_parallel, run_simulations_sequential};
pub use stats::{AggregatedStats, SimResult};
