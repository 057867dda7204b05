//! Step driver owning the automaton/event ordering contract.

use rand::RngCore;

use crate::automaton::Automaton;
use crate::config::SimConfig;
use crate::events::EventScheduler;
use crate::metrics::Metrics;

use std::time::Instant;

/// Seed offset separating the scheduler's RNG stream from the automaton's.
const SCHEDULER_SEED_OFFSET: u64 = 0x5EED;

/// The full simulation: automaton plus event engine plus metrics, stepped
/// in a fixed order so event effects are always visible to the rule pass
/// that follows them.
pub struct Simulation {
    pub automaton: Automaton,
    pub events: EventScheduler,
    metrics: Metrics,
}

impl Simulation {
    /// Builds a simulation from validated config. With a configured seed
    /// the run is fully reproducible; otherwise both RNG streams are
    /// entropy-seeded.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        let seed = config
            .world
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        let world = crate::config::WorldConfig {
            seed: Some(seed),
            ..config.world.clone()
        };
        Self {
            automaton: Automaton::from_config(&world),
            events: EventScheduler::from_config(
                &config.events,
                seed.wrapping_add(SCHEDULER_SEED_OFFSET),
            ),
            metrics: Metrics::new(),
        }
    }

    /// Advances the simulation by one tick: scheduler bookkeeping, then
    /// continuous event effects, then the generation advance. Instantaneous
    /// spawn effects apply inside the scheduler update, synchronously at
    /// spawn time.
    pub fn step(&mut self) {
        let start = Instant::now();

        self.events.update(self.automaton.grid_mut());
        self.events.apply_effects(self.automaton.grid_mut());
        self.automaton.update();

        self.metrics.record_step(
            start.elapsed(),
            self.automaton.population_counts().alive(),
            self.events.events().len(),
        );
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
