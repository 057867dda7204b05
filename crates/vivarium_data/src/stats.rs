//! Population bookkeeping shared between the engine and display layers.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, SpeciesId};

/// Per-category cell counts over a full grid, empty slots included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub empty: usize,
    pub alpha: usize,
    pub beta: usize,
    pub gamma: usize,
    pub quantum: usize,
}

impl PopulationCounts {
    pub fn record(&mut self, cell: &Cell) {
        match cell.species_id() {
            None => self.empty += 1,
            Some(SpeciesId::Alpha) => self.alpha += 1,
            Some(SpeciesId::Beta) => self.beta += 1,
            Some(SpeciesId::Gamma) => self.gamma += 1,
            Some(SpeciesId::Quantum) => self.quantum += 1,
        }
    }

    #[must_use]
    pub fn of(&self, id: SpeciesId) -> usize {
        match id {
            SpeciesId::Alpha => self.alpha,
            SpeciesId::Beta => self.beta,
            SpeciesId::Gamma => self.gamma,
            SpeciesId::Quantum => self.quantum,
        }
    }

    /// Total cells counted, empty slots included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.empty + self.alive()
    }

    /// Occupied cells only.
    #[must_use]
    pub fn alive(&self) -> usize {
        self.alpha + self.beta + self.gamma + self.quantum
    }

    /// All five category counts, for share/entropy computations.
    #[must_use]
    pub fn as_array(&self) -> [usize; 5] {
        [self.empty, self.alpha, self.beta, self.gamma, self.quantum]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Organism, Species};

    #[test]
    fn test_record_and_totals() {
        let mut counts = PopulationCounts::default();
        counts.record(&Cell::Empty);
        counts.record(&Cell::Alive(Organism::new(Species::Alpha, 1.0)));
        counts.record(&Cell::Alive(Organism::new(Species::Alpha, 1.0)));
        counts.record(&Cell::Alive(Organism::new(Species::Quantum { phase: 0.0 }, 1.0)));

        assert_eq!(counts.empty, 1);
        assert_eq!(counts.of(SpeciesId::Alpha), 2);
        assert_eq!(counts.of(SpeciesId::Quantum), 1);
        assert_eq!(counts.alive(), 3);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.as_array(), [1, 2, 0, 0, 1]);
    }
}
