//! Rolling per-species population series.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use vivarium_data::{PopulationCounts, SpeciesId};

/// Samples retained per species before the oldest are dropped.
pub const HISTORY_CAPACITY: usize = 1000;

/// Bounded time series of live-cell counts, one sample per generation.
/// Empty slots are not tracked; they dominate every series and carry no
/// signal for the population overlays this feeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationHistory {
    alpha: VecDeque<usize>,
    beta: VecDeque<usize>,
    gamma: VecDeque<usize>,
    quantum: VecDeque<usize>,
}

impl PopulationHistory {
    pub fn record(&mut self, counts: &PopulationCounts) {
        Self::push(&mut self.alpha, counts.alpha);
        Self::push(&mut self.beta, counts.beta);
        Self::push(&mut self.gamma, counts.gamma);
        Self::push(&mut self.quantum, counts.quantum);
    }

    fn push(series: &mut VecDeque<usize>, value: usize) {
        if series.len() == HISTORY_CAPACITY {
            series.pop_front();
        }
        series.push_back(value);
    }

    #[must_use]
    pub fn series(&self, id: SpeciesId) -> &VecDeque<usize> {
        match id {
            SpeciesId::Alpha => &self.alpha,
            SpeciesId::Beta => &self.beta,
            SpeciesId::Gamma => &self.gamma,
            SpeciesId::Quantum => &self.quantum,
        }
    }

    /// Most recent sample for one species.
    #[must_use]
    pub fn latest(&self, id: SpeciesId) -> Option<usize> {
        self.series(id).back().copied()
    }

    /// Samples recorded so far (identical across species).
    #[must_use]
    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn clear(&mut self) {
        self.alpha.clear();
        self.beta.clear();
        self.gamma.clear();
        self.quantum.clear();
    }
}
