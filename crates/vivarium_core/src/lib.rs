//! # Vivarium Core
//!
//! The simulation engine for vivarium - a multi-species, energy- and
//! quantum-augmented cellular automaton.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Toroidal double-buffered cell grid
//! - Species-specific birth/survival rules with pairwise interaction bonuses
//! - Quantum phase drift and best-effort tunneling
//! - Stochastic spatial events (meteors, energy waves, temporal rifts, ...)
//! - Population history and Shannon-entropy bookkeeping
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! One simulation step is strictly sequential: the event scheduler ages and
//! maybe spawns events, continuous event effects perturb the grid, and only
//! then does the automaton run its full rule pass over the perturbed state.
//! All randomness flows through seedable ChaCha8 generators injected at
//! construction, so a fixed seed reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use vivarium_core::{SimConfig, Simulation};
//! use vivarium_data::SpeciesId;
//!
//! let mut config = SimConfig::default();
//! config.world.seed = Some(42);
//!
//! let mut sim = Simulation::new(&config);
//! sim.automaton.seed(10, 10, SpeciesId::Alpha, 1.0);
//! sim.step();
//! assert_eq!(sim.automaton.generation(), 1);
//! ```

/// Generation advance, energy/entropy bookkeeping, and the external cell API
pub mod automaton;
/// Configuration management for simulation parameters
pub mod config;
/// Stochastic spatial events and their scheduler
pub mod events;
/// Toroidal double-buffered cell grid
pub mod grid;
/// Per-species population history ring buffers
pub mod history;
/// Pairwise species interaction bonuses
pub mod interaction;
/// Metrics collection and structured logging
pub mod metrics;
/// Birth, survival, mutation, and quantum transition rules
pub mod rules;
/// Step driver composing the automaton and the event scheduler
pub mod simulation;

pub use automaton::Automaton;
pub use config::{EventConfig, SimConfig, WorldConfig};
pub use events::{Event, EventKind, EventScheduler};
pub use grid::Grid;
pub use history::PopulationHistory;
pub use interaction::InteractionMatrix;
pub use metrics::{init_logging, Metrics};
pub use rules::RuleEngine;
pub use simulation::Simulation;
