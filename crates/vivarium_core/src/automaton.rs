//! Generation advance and grid-wide bookkeeping.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vivarium_data::{Cell, Organism, PopulationCounts, Species, SpeciesId};

use crate::config::WorldConfig;
use crate::grid::Grid;
use crate::history::PopulationHistory;
use crate::rules::{self, RuleEngine};

use std::f64::consts::TAU;

/// The automaton proper: grid, rule engine, and rolling statistics, driven
/// by one seedable RNG.
#[derive(Debug, Clone)]
pub struct Automaton {
    grid: Grid,
    rules: RuleEngine,
    history: PopulationHistory,
    rng: ChaCha8Rng,
    generation: u64,
    total_energy: f64,
}

impl Automaton {
    #[must_use]
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded from config when a seed is given, from OS entropy otherwise.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config.width, config.height, rng)
    }

    fn with_rng(width: usize, height: usize, rng: ChaCha8Rng) -> Self {
        Self {
            grid: Grid::new(width, height),
            rules: RuleEngine::default(),
            history: PopulationHistory::default(),
            rng,
            generation: 0,
            total_energy: 0.0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Generations advanced since construction or the last clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sum of all cell energies after the most recent advance.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    #[must_use]
    pub fn history(&self) -> &PopulationHistory {
        &self.history
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for the event engine. Callers must not hold
    /// this across an `update` call; the borrow checker enforces it.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Non-wrapping cell read; `None` out of bounds.
    #[must_use]
    pub fn get_cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(x, y)
    }

    /// Wholesale cell replacement, a no-op out of bounds.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.grid.set(x, y, cell);
    }

    /// Places a newborn organism; quantum seeds get a fresh random phase.
    pub fn seed(&mut self, x: usize, y: usize, id: SpeciesId, energy: f64) {
        self.grid.seed(x, y, id, energy, &mut self.rng);
    }

    /// Advances one generation: full rule pass over the current buffer into
    /// the next buffer, then swap, bookkeeping, and history append.
    pub fn update(&mut self) {
        self.grid.reset_next();

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let cell = self.grid.get_wrapped(x as i64, y as i64);
                let neighbors = self.grid.neighbors(x, y);
                let mut next = self.rules.next_cell(&cell, &neighbors, &mut self.rng);

                if let Cell::Alive(org) = &mut next {
                    if let Species::Quantum { phase } = &mut org.species {
                        *phase = (*phase + rules::PHASE_STEP) % TAU;
                        let energy = org.energy;
                        if self.rng.gen::<f64>() < rules::TUNNEL_CHANCE {
                            self.tunnel(x, y, energy);
                        }
                    }
                }

                // An empty result never clobbers a tunnel arrival already
                // staged at this slot; a live result always wins.
                if !next.is_empty() {
                    self.grid.stage(x, y, next);
                }
            }
        }

        self.total_energy = self.grid.staged_energy();
        self.grid.swap();
        self.generation += 1;

        let counts = self.population_counts();
        self.history.record(&counts);
        tracing::trace!(
            generation = self.generation,
            alive = counts.alive(),
            total_energy = self.total_energy,
            "generation advanced"
        );
    }

    /// Best-effort quantum tunneling: seeds a dimmed copy at a nearby slot
    /// that is empty in the current buffer and still unclaimed in the next.
    fn tunnel(&mut self, x: usize, y: usize, energy: f64) {
        let dx = self.rng.gen_range(-rules::TUNNEL_RANGE..=rules::TUNNEL_RANGE);
        let dy = self.rng.gen_range(-rules::TUNNEL_RANGE..=rules::TUNNEL_RANGE);
        let (tx, ty) = self.grid.wrap(x as i64 + dx, y as i64 + dy);

        if self.grid.get_wrapped(tx as i64, ty as i64).is_empty()
            && self.grid.staged(tx, ty).is_empty()
        {
            let phase = self.rng.gen::<f64>() * TAU;
            self.grid.stage(
                tx,
                ty,
                Cell::Alive(Organism::new(
                    Species::Quantum { phase },
                    energy * rules::TUNNEL_ENERGY_SHARE,
                )),
            );
        }
    }

    /// Resets every cell to empty and rewinds generation and history.
    pub fn clear_grid(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.total_energy = 0.0;
        self.history.clear();
    }

    /// Reshapes the grid to an all-empty field of the new size. Zero
    /// dimensions are rejected and nothing changes.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if self.grid.resize(width, height) {
            self.generation = 0;
            self.total_energy = 0.0;
            self.history.clear();
            true
        } else {
            false
        }
    }

    /// Full-grid census, empty slots included.
    #[must_use]
    pub fn population_counts(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for cell in self.grid.iter() {
            counts.record(cell);
        }
        counts
    }

    /// Shannon entropy over the five category shares (empty included);
    /// 0.0 for a grid with nothing to count.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        let counts = self.population_counts();
        let total = counts.total();
        if total == 0 {
            return 0.0;
        }
        counts
            .as_array()
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total as f64;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup(seed: u64) -> Automaton {
        let mut automaton = Automaton::new(24, 16, seed);
        for y in 0..16 {
            for x in 0..24 {
                match (x * 7 + y * 3) % 5 {
                    0 => automaton.seed(x, y, SpeciesId::Alpha, 1.0),
                    1 => automaton.seed(x, y, SpeciesId::Beta, 1.0),
                    2 => automaton.seed(x, y, SpeciesId::Gamma, 1.0),
                    3 => automaton.seed(x, y, SpeciesId::Quantum, 1.0),
                    _ => {}
                }
            }
        }
        automaton
    }

    #[test]
    fn test_clear_grid_resets_everything() {
        let mut automaton = soup(1);
        for _ in 0..3 {
            automaton.update();
        }

        automaton.clear_grid();
        assert_eq!(automaton.generation(), 0);
        assert_eq!(automaton.total_energy(), 0.0);
        assert!(automaton.history().is_empty());
        let counts = automaton.population_counts();
        assert_eq!(counts.alive(), 0);
        assert_eq!(counts.empty, 24 * 16);
    }

    #[test]
    fn test_update_advances_generation_and_history() {
        let mut automaton = soup(2);
        automaton.update();
        automaton.update();

        assert_eq!(automaton.generation(), 2);
        assert_eq!(automaton.history().len(), 2);
    }

    #[test]
    fn test_energy_and_phase_bounds_hold() {
        let mut automaton = soup(3);
        for _ in 0..12 {
            automaton.update();
        }

        for cell in automaton.grid().iter() {
            if let Some(org) = cell.organism() {
                assert!(
                    (0.0..=3.0).contains(&org.energy),
                    "energy out of range: {}",
                    org.energy
                );
                if let Some(phase) = org.species.phase() {
                    assert!((0.0..TAU).contains(&phase), "phase out of range: {phase}");
                }
            }
        }
    }

    #[test]
    fn test_total_energy_matches_grid_sum() {
        let mut automaton = soup(4);
        automaton.update();
        let sum: f64 = automaton.grid().iter().map(Cell::energy).sum();
        assert!((automaton.total_energy() - sum).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_of_empty_grid_is_zero() {
        let automaton = Automaton::new(8, 8, 0);
        assert_eq!(automaton.entropy(), 0.0);
    }

    #[test]
    fn test_entropy_of_half_full_single_species() {
        let mut automaton = Automaton::new(10, 10, 0);
        for i in 0..50 {
            automaton.seed(i % 10, i / 10, SpeciesId::Alpha, 1.0);
        }
        // Two equally likely categories (empty, alpha) give exactly one bit.
        assert!((automaton.entropy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_of_saturated_grid_is_zero() {
        let mut automaton = Automaton::new(6, 6, 0);
        for y in 0..6 {
            for x in 0..6 {
                automaton.seed(x, y, SpeciesId::Gamma, 1.0);
            }
        }
        assert_eq!(automaton.entropy(), 0.0);
    }

    #[test]
    fn test_get_cell_out_of_bounds_is_none() {
        let automaton = Automaton::new(5, 5, 0);
        assert!(automaton.get_cell(4, 4).is_some());
        assert_eq!(automaton.get_cell(5, 0), None);
        assert_eq!(automaton.get_cell(0, 17), None);
    }
}
