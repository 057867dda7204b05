//! Cell-level data model: species, organisms, and grid slots.

use serde::{Deserialize, Serialize};

/// Mutation propensity a freshly constructed organism starts with.
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;

/// Payload-free species discriminant, used for neighbor counting,
/// interaction-matrix lookup, and population bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesId {
    Alpha,
    Beta,
    Gamma,
    Quantum,
}

impl SpeciesId {
    /// The three non-quantum organism kinds.
    pub const ORGANIC: [SpeciesId; 3] = [SpeciesId::Alpha, SpeciesId::Beta, SpeciesId::Gamma];

    /// Every organism kind.
    pub const ALL: [SpeciesId; 4] = [
        SpeciesId::Alpha,
        SpeciesId::Beta,
        SpeciesId::Gamma,
        SpeciesId::Quantum,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SpeciesId::Alpha => "alpha",
            SpeciesId::Beta => "beta",
            SpeciesId::Gamma => "gamma",
            SpeciesId::Quantum => "quantum",
        }
    }
}

/// Organism species. Quantum organisms structurally carry their phase
/// angle, an oscillator in `[0, 2π)` that the rule engine advances each
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Species {
    Alpha,
    Beta,
    Gamma,
    Quantum { phase: f64 },
}

impl Species {
    #[must_use]
    pub fn id(&self) -> SpeciesId {
        match self {
            Species::Alpha => SpeciesId::Alpha,
            Species::Beta => SpeciesId::Beta,
            Species::Gamma => SpeciesId::Gamma,
            Species::Quantum { .. } => SpeciesId::Quantum,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Option<f64> {
        match self {
            Species::Quantum { phase } => Some(*phase),
            _ => None,
        }
    }
}

/// A living organism: species identity plus its vitals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub species: Species,
    /// Vitality proxy, `>= 0`. The rule pass caps it at 2.0, event boosts
    /// at 3.0.
    pub energy: f64,
    /// Generations survived consecutively.
    pub age: u32,
    /// In `[0, 1)`, inherited unchanged for the organism's lifetime.
    pub mutation_rate: f64,
}

impl Organism {
    /// A newborn organism: age 0, default mutation propensity.
    #[must_use]
    pub fn new(species: Species, energy: f64) -> Self {
        Self {
            species,
            energy,
            age: 0,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

/// A single grid slot. `Empty` carries no payload, so an empty cell cannot
/// hold stale energy or age.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Alive(Organism),
}

impl Cell {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub fn organism(&self) -> Option<&Organism> {
        match self {
            Cell::Empty => None,
            Cell::Alive(org) => Some(org),
        }
    }

    #[must_use]
    pub fn species_id(&self) -> Option<SpeciesId> {
        self.organism().map(|org| org.species.id())
    }

    /// Energy of the occupant, 0.0 for empty slots.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.organism().map_or(0.0, |org| org.energy)
    }
}
