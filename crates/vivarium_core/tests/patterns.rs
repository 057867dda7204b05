//! Classic Life patterns carried over: with zero interaction bonus and no
//! mutation pressure, species Alpha behaves like standard Conway cells.

use vivarium_core::Automaton;
use vivarium_data::{Cell, Organism, Species, SpeciesId};

/// An Alpha cell that can never mutate, so pattern evolution is exactly
/// deterministic.
fn stable_alpha() -> Cell {
    Cell::Alive(Organism {
        species: Species::Alpha,
        energy: 1.0,
        age: 0,
        mutation_rate: 0.0,
    })
}

fn alpha_coords(automaton: &Automaton) -> Vec<(usize, usize)> {
    let mut coords = Vec::new();
    for y in 0..automaton.height() {
        for x in 0..automaton.width() {
            if automaton.get_cell(x, y).unwrap().species_id() == Some(SpeciesId::Alpha) {
                coords.push((x, y));
            }
        }
    }
    coords
}

#[test]
fn test_block_is_a_fixed_point() {
    let block = [(5, 5), (6, 5), (5, 6), (6, 6)];
    let mut automaton = Automaton::new(12, 12, 42);
    for &(x, y) in &block {
        automaton.set_cell(x, y, stable_alpha());
    }

    // Stable until upkeep eventually starves the cells; well within that
    // horizon nothing may move.
    for generation in 1..=6 {
        automaton.update();
        let mut coords = alpha_coords(&automaton);
        coords.sort_unstable();
        let mut expected: Vec<_> = block.to_vec();
        expected.sort_unstable();
        assert_eq!(coords, expected, "block moved at generation {generation}");

        let counts = automaton.population_counts();
        assert_eq!(counts.alive(), 4);
    }
}

#[test]
fn test_blinker_oscillates_with_period_two() {
    let horizontal = [(4, 5), (5, 5), (6, 5)];
    let vertical = [(5, 4), (5, 5), (5, 6)];
    let mut automaton = Automaton::new(11, 11, 7);
    for &(x, y) in &horizontal {
        automaton.set_cell(x, y, stable_alpha());
    }

    for cycle in 0..2 {
        automaton.update();
        let mut coords = alpha_coords(&automaton);
        coords.sort_unstable();
        let mut expected: Vec<_> = vertical.to_vec();
        expected.sort_unstable();
        assert_eq!(coords, expected, "cycle {cycle}: expected vertical phase");

        automaton.update();
        let mut coords = alpha_coords(&automaton);
        coords.sort_unstable();
        let mut expected: Vec<_> = horizontal.to_vec();
        expected.sort_unstable();
        assert_eq!(coords, expected, "cycle {cycle}: expected horizontal phase");
    }
}

#[test]
fn test_lone_cell_dies_and_stays_dead() {
    let mut automaton = Automaton::new(9, 9, 0);
    automaton.set_cell(4, 4, stable_alpha());

    automaton.update();
    assert_eq!(automaton.population_counts().alive(), 0);
    automaton.update();
    assert_eq!(automaton.population_counts().alive(), 0);
}
