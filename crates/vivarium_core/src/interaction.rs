//! Pairwise species interaction bonuses.

use serde::{Deserialize, Serialize};
use vivarium_data::{Cell, SpeciesId};

/// Signed bonus per unordered species pair. Queried symmetric; absent
/// pairs (including same-species pairs) contribute nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionMatrix {
    pairs: Vec<(SpeciesId, SpeciesId, f64)>,
}

impl Default for InteractionMatrix {
    fn default() -> Self {
        Self {
            pairs: vec![
                (SpeciesId::Alpha, SpeciesId::Beta, 0.1),
                (SpeciesId::Alpha, SpeciesId::Gamma, -0.05),
                (SpeciesId::Beta, SpeciesId::Gamma, 0.05),
                (SpeciesId::Alpha, SpeciesId::Quantum, 0.2),
                (SpeciesId::Beta, SpeciesId::Quantum, 0.2),
                (SpeciesId::Gamma, SpeciesId::Quantum, 0.2),
            ],
        }
    }
}

impl InteractionMatrix {
    /// Bonus for one unordered pair, 0.0 when unlisted.
    #[must_use]
    pub fn bonus(&self, a: SpeciesId, b: SpeciesId) -> f64 {
        self.pairs
            .iter()
            .find(|(p, q, _)| (*p == a && *q == b) || (*p == b && *q == a))
            .map_or(0.0, |(_, _, bonus)| *bonus)
    }

    /// Summed bonus between one organism and its live neighbors.
    #[must_use]
    pub fn neighbor_bonus(&self, me: SpeciesId, neighbors: &[Cell; 8]) -> f64 {
        neighbors
            .iter()
            .filter_map(Cell::species_id)
            .map(|other| self.bonus(me, other))
            .sum()
    }
}
