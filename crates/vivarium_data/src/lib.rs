//! Value types shared across the vivarium simulation.
//!
//! This crate holds the plain cell-level data model and carries no engine
//! logic: the automaton, rule evaluation, and event machinery live in
//! `vivarium_core`.

mod cell;
mod stats;

pub use cell::{Cell, Organism, Species, SpeciesId, DEFAULT_MUTATION_RATE};
pub use stats::PopulationCounts;
