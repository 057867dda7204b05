//! Toroidal cell grid with swap-based double buffering.
//!
//! The grid owns exactly two equally-shaped buffers. The rule pass reads
//! the current buffer, stages results into the next buffer, and swaps; no
//! data is copied beyond the swap itself.

use rand::Rng;
use vivarium_data::{Cell, Organism, Species, SpeciesId};

use std::f64::consts::TAU;

/// Fixed width×height cell field. Internal rule addressing wraps modulo the
/// dimensions; the external accessors do not wrap and clamp instead.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    next: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates an all-empty grid. Dimensions must be non-zero; construction
    /// happens through validated config in normal operation.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let cells = vec![Cell::Empty; width * height];
        let next = cells.clone();
        Self {
            cells,
            next,
            width,
            height,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Maps arbitrary signed coordinates onto the torus.
    #[inline]
    #[must_use]
    pub fn wrap(&self, x: i64, y: i64) -> (usize, usize) {
        let wx = x.rem_euclid(self.width as i64) as usize;
        let wy = y.rem_euclid(self.height as i64) as usize;
        (wx, wy)
    }

    /// Non-wrapping read. Out-of-bounds probes are routine for display code
    /// near the edges, so they report `None` rather than failing.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Wrapping read used by the rule engine and event effects.
    #[must_use]
    pub fn get_wrapped(&self, x: i64, y: i64) -> Cell {
        let (wx, wy) = self.wrap(x, y);
        self.cells[self.index(wx, wy)]
    }

    /// Wholesale cell replacement. A no-op when the coordinate is out of
    /// range.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Places a newborn organism of the given kind. Quantum organisms get a
    /// fresh random phase; the other species carry no phase at all.
    pub fn seed<R: Rng>(&mut self, x: usize, y: usize, id: SpeciesId, energy: f64, rng: &mut R) {
        let species = match id {
            SpeciesId::Alpha => Species::Alpha,
            SpeciesId::Beta => Species::Beta,
            SpeciesId::Gamma => Species::Gamma,
            SpeciesId::Quantum => Species::Quantum {
                phase: rng.gen::<f64>() * TAU,
            },
        };
        self.set(x, y, Cell::Alive(Organism::new(species, energy)));
    }

    /// The 8 toroidal neighbors of a cell, row-major order.
    #[must_use]
    pub fn neighbors(&self, x: usize, y: usize) -> [Cell; 8] {
        let mut out = [Cell::Empty; 8];
        let mut i = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out[i] = self.get_wrapped(x as i64 + dx, y as i64 + dy);
                i += 1;
            }
        }
        out
    }

    /// Stages a result into the next buffer.
    pub(crate) fn stage(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.next[idx] = cell;
    }

    /// Reads back a staged result; `Empty` when the slot is still unset.
    pub(crate) fn staged(&self, x: usize, y: usize) -> Cell {
        self.next[self.index(x, y)]
    }

    /// Resets the next buffer ahead of a rule pass.
    pub(crate) fn reset_next(&mut self) {
        self.next.fill(Cell::Empty);
    }

    /// Total energy staged in the next buffer.
    pub(crate) fn staged_energy(&self) -> f64 {
        self.next.iter().map(Cell::energy).sum()
    }

    /// Promotes the next buffer to current.
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.next);
    }

    /// Resets every cell in both buffers to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.next.fill(Cell::Empty);
    }

    /// Reshapes the grid, reinitializing all cells to empty. Zero
    /// dimensions are rejected and the prior shape is kept.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "rejecting resize to empty grid");
            return false;
        }
        *self = Grid::new(width, height);
        true
    }

    /// Iterates the current buffer row-major.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
