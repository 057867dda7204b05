//! Per-cell transition rules: birth, survival, mutation, and the quantum
//! oscillator.
//!
//! Everything here is a pure function of the current-buffer cell, its
//! neighbor composition, and the injected RNG. The one grid side effect of
//! the quantum rule set (tunneling) lives in the automaton's rule pass,
//! since it writes into another cell's next-buffer slot.

use rand::seq::SliceRandom;
use rand::Rng;
use vivarium_data::{Cell, Organism, Species, SpeciesId};

use crate::interaction::InteractionMatrix;

use std::f64::consts::TAU;

/// Energy ceiling enforced by the rule pass.
pub const ENERGY_CAP: f64 = 2.0;
/// Effective energy at or below which a cell starves.
const SURVIVAL_ENERGY_FLOOR: f64 = 0.1;
/// Flat per-generation energy cost of staying alive.
const UPKEEP: f64 = 0.1;
/// Energy granted to rule-born cells.
const BIRTH_ENERGY: f64 = 1.0;
/// Chance a birth next to quantum neighbors comes out quantum instead.
const QUANTUM_BIRTH_CHANCE: f64 = 0.3;
/// Share of mutation events that produce a quantum organism.
const MUTATION_QUANTUM_SHARE: f64 = 0.1;
/// Age at which an organism's full mutation_rate applies.
const MUTATION_AGE_SCALE: f64 = 100.0;

/// Per-generation quantum phase advance.
pub(crate) const PHASE_STEP: f64 = 0.1;
/// Chance a quantum cell attempts to tunnel each generation.
pub(crate) const TUNNEL_CHANCE: f64 = 0.05;
/// Chebyshev reach of a tunneling attempt.
pub(crate) const TUNNEL_RANGE: i64 = 2;
/// Fraction of the source energy a tunneled copy receives.
pub(crate) const TUNNEL_ENERGY_SHARE: f64 = 0.7;

const ORGANIC: [Species; 3] = [Species::Alpha, Species::Beta, Species::Gamma];

/// Neighbor composition around one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborCensus {
    pub alpha: u32,
    pub beta: u32,
    pub gamma: u32,
    pub quantum: u32,
}

impl NeighborCensus {
    #[must_use]
    pub fn of(neighbors: &[Cell; 8]) -> Self {
        let mut census = Self::default();
        for id in neighbors.iter().filter_map(Cell::species_id) {
            match id {
                SpeciesId::Alpha => census.alpha += 1,
                SpeciesId::Beta => census.beta += 1,
                SpeciesId::Gamma => census.gamma += 1,
                SpeciesId::Quantum => census.quantum += 1,
            }
        }
        census
    }

    #[must_use]
    pub fn alive(&self) -> u32 {
        self.alpha + self.beta + self.gamma + self.quantum
    }
}

/// Alive-neighbor band `[low, high]` within which a species survives. The
/// quantum band oscillates with the cell's phase.
#[must_use]
pub fn survival_band(species: &Species) -> (u32, u32) {
    match species {
        Species::Alpha => (2, 4),
        Species::Beta => (1, 3),
        Species::Gamma => (2, 3),
        Species::Quantum { phase } => {
            let phase_factor = (phase.sin() + 1.0) / 2.0;
            let low = (1.0 + phase_factor).floor() as u32;
            let high = (3.0 + phase_factor).floor() as u32;
            (low, high)
        }
    }
}

/// Evaluates the transition rule for single cells.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    matrix: InteractionMatrix,
}

impl RuleEngine {
    #[must_use]
    pub fn new(matrix: InteractionMatrix) -> Self {
        Self { matrix }
    }

    #[must_use]
    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    /// The next state of one cell given its 8 toroidal neighbors. Reads
    /// only current-buffer state; tunneling is handled by the caller.
    #[must_use]
    pub fn next_cell<R: Rng>(&self, cell: &Cell, neighbors: &[Cell; 8], rng: &mut R) -> Cell {
        let census = NeighborCensus::of(neighbors);
        match cell {
            Cell::Empty => Self::birth(&census, rng),
            Cell::Alive(org) => self.survive(org, &census, neighbors, rng),
        }
    }

    /// Birth rule: exactly 3 live neighbors spawn the plurality species.
    ///
    /// Ties resolve in fixed Alpha, Beta, Gamma priority order, an
    /// inherited behavioral quirk kept for compatibility rather than a
    /// principled tie-break.
    fn birth<R: Rng>(census: &NeighborCensus, rng: &mut R) -> Cell {
        if census.alive() != 3 {
            return Cell::Empty;
        }

        let mut species = if census.alpha >= census.beta && census.alpha >= census.gamma {
            Species::Alpha
        } else if census.beta >= census.gamma {
            Species::Beta
        } else {
            Species::Gamma
        };

        if census.quantum > 0 && rng.gen::<f64>() < QUANTUM_BIRTH_CHANCE {
            species = Species::Quantum { phase: 0.0 };
        }

        Cell::Alive(Organism::new(species, BIRTH_ENERGY))
    }

    /// Survival rule: band membership plus an effective-energy floor, then
    /// upkeep decay and the age-gated mutation roll.
    fn survive<R: Rng>(
        &self,
        org: &Organism,
        census: &NeighborCensus,
        neighbors: &[Cell; 8],
        rng: &mut R,
    ) -> Cell {
        let bonus = self.matrix.neighbor_bonus(org.species.id(), neighbors);
        let energy_factor = (org.energy + bonus).min(ENERGY_CAP);
        let (low, high) = survival_band(&org.species);
        let alive = census.alive();

        if alive < low || alive > high || energy_factor <= SURVIVAL_ENERGY_FLOOR {
            return Cell::Empty;
        }

        let mut next = Organism {
            species: org.species,
            energy: (org.energy + bonus - UPKEEP).min(ENERGY_CAP),
            age: org.age + 1,
            mutation_rate: org.mutation_rate,
        };

        // Mutation pressure builds with age: effectively dormant while the
        // cell is young, scaling up to the full rate at MUTATION_AGE_SCALE.
        let mutation_chance = org.mutation_rate * (f64::from(org.age) / MUTATION_AGE_SCALE);
        if rng.gen::<f64>() < mutation_chance {
            next.species = if rng.gen::<f64>() < MUTATION_QUANTUM_SHARE {
                Species::Quantum {
                    phase: rng.gen::<f64>() * TAU,
                }
            } else {
                *ORGANIC.choose(rng).expect("ORGANIC is non-empty")
            };
        }

        Cell::Alive(next)
    }
}
