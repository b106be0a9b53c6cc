//! Wildfire Cellular Automaton Core Library
//!
//! A probabilistic grid model of wildfire spread. Each tick every cell is
//! evaluated against the previous tick's state: burning cells try to ignite
//! flammable neighbours, age, and burn out into ash; ash counts down towards
//! bare ground, and bare ground may regrow vegetation.
//!
//! ## Components
//!
//! - [`Cell`] and [`SimulationParameters`] - per-location state and run configuration
//! - [`Grid`] - rectangular cell container with wind-aware neighbour lookup
//! - [`FireRule`] - the double-buffered transition function
//! - [`StatsTracker`] - incremental burned/survived/obstacle bookkeeping
//! - [`SimulationController`] - seeding, stepping, reignition and termination
//!
//! ## Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use wildfire_core::{SimulationController, SimulationParameters};
//!
//! let params = SimulationParameters::default().with_rebirth_probability(0.0);
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut sim = SimulationController::new(20, 20, params).unwrap();
//! sim.seed_random(0.8, &mut rng).unwrap();
//! sim.run(&mut rng, 5_000);
//! assert!(sim.is_terminated());
//! ```

// Core types and configuration
pub mod core_types;
pub mod error;

// Grid container and neighbourhoods
pub mod grid;

// Transition rule, bookkeeping and orchestration
pub mod render;
pub mod simulation;

pub use core_types::{Cell, SimulationParameters, WindMode};
pub use error::WildfireError;
pub use grid::{Grid, Neighbor, Reach};
pub use render::CellCategory;
pub use simulation::{
    FireRule, SimulationController, SimulationState, StatsSeries, StatsSnapshot, StatsTracker,
    TickReport,
};
