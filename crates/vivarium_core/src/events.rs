//! Transient spatial events that perturb the grid outside the normal
//! transition rule.
//!
//! Each event kind has a fixed spawn profile (radius range, duration,
//! intensity) and either a one-shot spawn effect, a continuous per-tick
//! effect, or both. The scheduler owns the active set and its own RNG; it
//! mutates the grid directly through the same cell primitives the external
//! API uses.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vivarium_data::{Cell, SpeciesId};

use crate::config::EventConfig;
use crate::grid::Grid;

/// Energy ceiling for event-driven boosts, above the rule-pass cap.
pub const EVENT_ENERGY_CAP: f64 = 3.0;
/// Upper bound on the configurable spawn probability.
pub const MAX_SPAWN_PROBABILITY: f64 = 0.1;

/// Remaining-duration window in which a temporal rift replays its snapshot.
const RIFT_RESTORE_WINDOW: u32 = 10;
/// Seeding attempts per species migration.
const MIGRATION_SEEDS: usize = 20;
/// Fraction of disk cells a bloom considers at all.
const BLOOM_COVERAGE: f64 = 0.4;
/// Flat per-cell chance of a cosmic radiation strike each tick.
const RADIATION_CHANCE: f64 = 0.02;
/// Half-width of the expanding energy-wave ring, in cells.
const WAVE_HALF_WIDTH: f64 = 2.0;

/// The eight event kinds, payload-free. Captured per-event state lives in
/// [`EventState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Meteor,
    EnergyWave,
    MutationBurst,
    QuantumStorm,
    SpeciesMigration,
    CosmicRadiation,
    TemporalRift,
    EcosystemBloom,
}

/// Spawn profile: radius range, lifetime, intensity.
struct Profile {
    radius_min: i64,
    radius_max: i64,
    duration: u32,
    intensity: f64,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::Meteor,
        EventKind::EnergyWave,
        EventKind::MutationBurst,
        EventKind::QuantumStorm,
        EventKind::SpeciesMigration,
        EventKind::CosmicRadiation,
        EventKind::TemporalRift,
        EventKind::EcosystemBloom,
    ];

    /// Relative spawn weight in the random draw.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            EventKind::Meteor => 20,
            EventKind::EnergyWave => 15,
            EventKind::MutationBurst => 10,
            EventKind::QuantumStorm => 8,
            EventKind::SpeciesMigration => 12,
            EventKind::CosmicRadiation => 5,
            EventKind::TemporalRift => 3,
            EventKind::EcosystemBloom => 7,
        }
    }

    fn profile(self) -> Profile {
        let (radius_min, radius_max, duration, intensity) = match self {
            EventKind::Meteor => (3, 8, 60, 2.0),
            EventKind::EnergyWave => (8, 15, 120, 1.5),
            EventKind::MutationBurst => (4, 10, 90, 3.0),
            EventKind::QuantumStorm => (6, 12, 150, 2.5),
            EventKind::SpeciesMigration => (5, 12, 200, 1.0),
            EventKind::CosmicRadiation => (10, 20, 300, 1.0),
            EventKind::TemporalRift => (3, 6, 180, 4.0),
            EventKind::EcosystemBloom => (6, 15, 100, 2.0),
        };
        Profile {
            radius_min,
            radius_max,
            duration,
            intensity,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Meteor => "meteor",
            EventKind::EnergyWave => "energy_wave",
            EventKind::MutationBurst => "mutation_burst",
            EventKind::QuantumStorm => "quantum_storm",
            EventKind::SpeciesMigration => "species_migration",
            EventKind::CosmicRadiation => "cosmic_radiation",
            EventKind::TemporalRift => "temporal_rift",
            EventKind::EcosystemBloom => "ecosystem_bloom",
        }
    }
}

/// Kind-specific state an active event carries. Only the temporal rift
/// captures anything; its snapshot is taken at spawn time and replayed
/// near expiry.
#[derive(Debug, Clone)]
pub enum EventState {
    Meteor,
    EnergyWave,
    MutationBurst,
    QuantumStorm,
    SpeciesMigration,
    CosmicRadiation,
    TemporalRift { snapshot: Vec<(usize, usize, Cell)> },
    EcosystemBloom,
}

impl EventState {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventState::Meteor => EventKind::Meteor,
            EventState::EnergyWave => EventKind::EnergyWave,
            EventState::MutationBurst => EventKind::MutationBurst,
            EventState::QuantumStorm => EventKind::QuantumStorm,
            EventState::SpeciesMigration => EventKind::SpeciesMigration,
            EventState::CosmicRadiation => EventKind::CosmicRadiation,
            EventState::TemporalRift { .. } => EventKind::TemporalRift,
            EventState::EcosystemBloom => EventKind::EcosystemBloom,
        }
    }
}

/// One active event. Created directly active, ticked down each scheduler
/// update, removed once its duration reaches zero.
#[derive(Debug, Clone)]
pub struct Event {
    pub x: usize,
    pub y: usize,
    pub radius: i64,
    pub duration: u32,
    pub total_duration: u32,
    pub intensity: f64,
    state: EventState,
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.state.kind()
    }

    /// Normalized lifetime progress: 0 at spawn, rising to 1 at expiry.
    #[must_use]
    pub fn age_factor(&self) -> f64 {
        1.0 - f64::from(self.duration) / f64::from(self.total_duration)
    }

    /// Ages the event one tick; false once expired.
    fn tick(&mut self) -> bool {
        self.duration = self.duration.saturating_sub(1);
        self.duration > 0
    }
}

/// Owns the active event set and decides when to spawn new ones.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    events: Vec<Event>,
    rng: ChaCha8Rng,
    spawn_probability: f64,
    min_interval: u32,
    ticks_since_spawn: u32,
}

impl EventScheduler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_config(&EventConfig::default(), seed)
    }

    #[must_use]
    pub fn from_config(config: &EventConfig, seed: u64) -> Self {
        Self {
            events: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawn_probability: config.spawn_probability.clamp(0.0, MAX_SPAWN_PROBABILITY),
            min_interval: config.min_interval,
            ticks_since_spawn: 0,
        }
    }

    /// Active events, oldest first, for display layers.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn spawn_probability(&self) -> f64 {
        self.spawn_probability
    }

    /// Per-tick spawn chance once the rate limit has elapsed, clamped to
    /// `[0, 0.1]`.
    pub fn set_spawn_probability(&mut self, probability: f64) {
        self.spawn_probability = probability.clamp(0.0, MAX_SPAWN_PROBABILITY);
    }

    /// Ages and expires events, then runs the rate-limited spawn trial.
    /// The interval counter resets only when a spawn actually fires.
    pub fn update(&mut self, grid: &mut Grid) {
        self.events.retain_mut(Event::tick);

        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn >= self.min_interval
            && self.rng.gen::<f64>() < self.spawn_probability
        {
            let kind = *EventKind::ALL
                .choose_weighted(&mut self.rng, |kind| kind.weight())
                .expect("static weight table is valid");
            let x = self.rng.gen_range(0..grid.width());
            let y = self.rng.gen_range(0..grid.height());
            self.spawn(kind, x, y, grid);
            self.ticks_since_spawn = 0;
        }
    }

    /// Spawns an event immediately, bypassing the probability gate. Used by
    /// external trigger surfaces.
    pub fn force_event(&mut self, kind: EventKind, x: usize, y: usize, grid: &mut Grid) {
        self.spawn(kind, x, y, grid);
    }

    /// Drops every active event immediately, with no winding-down effects.
    /// A rift cleared this way never replays its snapshot.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn spawn(&mut self, kind: EventKind, x: usize, y: usize, grid: &mut Grid) {
        let profile = kind.profile();
        let radius = self.rng.gen_range(profile.radius_min..=profile.radius_max);
        tracing::debug!(kind = kind.label(), x, y, radius, "event spawned");

        let state = match kind {
            EventKind::Meteor => {
                impact(grid, x, y, radius, &mut self.rng);
                EventState::Meteor
            }
            EventKind::EnergyWave => EventState::EnergyWave,
            EventKind::MutationBurst => EventState::MutationBurst,
            EventKind::QuantumStorm => EventState::QuantumStorm,
            EventKind::SpeciesMigration => {
                migrate(grid, x, y, radius, &mut self.rng);
                EventState::SpeciesMigration
            }
            EventKind::CosmicRadiation => EventState::CosmicRadiation,
            EventKind::TemporalRift => EventState::TemporalRift {
                snapshot: capture(grid, x, y, radius),
            },
            EventKind::EcosystemBloom => {
                bloom(grid, x, y, radius, &mut self.rng);
                EventState::EcosystemBloom
            }
        };

        self.events.push(Event {
            x,
            y,
            radius,
            duration: profile.duration,
            total_duration: profile.duration,
            intensity: profile.intensity,
            state,
        });
    }

    /// Runs every active event's continuous effect against the grid. Must
    /// complete before the automaton's rule pass reads the perturbed state.
    pub fn apply_effects(&mut self, grid: &mut Grid) {
        let rng = &mut self.rng;
        for event in &self.events {
            apply_continuous(event, grid, rng);
        }
    }
}

fn apply_continuous<R: Rng>(event: &Event, grid: &mut Grid, rng: &mut R) {
    match &event.state {
        // Spawn-only kinds.
        EventState::Meteor | EventState::SpeciesMigration | EventState::EcosystemBloom => {}

        EventState::EnergyWave => {
            // A thin ring expanding from the center to the full radius over
            // the event's life.
            let wave_radius = event.radius as f64 * event.age_factor();
            for_disk_box(event, |dx, dy, distance| {
                if (distance - wave_radius).abs() < WAVE_HALF_WIDTH {
                    let (tx, ty) = grid.wrap(event.x as i64 + dx, event.y as i64 + dy);
                    if let Some(mut org) = grid.get_wrapped(tx as i64, ty as i64).organism().copied()
                    {
                        org.energy = (org.energy + event.intensity * 0.5).min(EVENT_ENERGY_CAP);
                        grid.set(tx, ty, Cell::Alive(org));
                    }
                }
            });
        }

        EventState::MutationBurst => {
            let radius = event.radius as f64;
            for_disk_box(event, |dx, dy, distance| {
                if distance <= radius {
                    let (tx, ty) = grid.wrap(event.x as i64 + dx, event.y as i64 + dy);
                    if let Some(org) = grid.get_wrapped(tx as i64, ty as i64).organism() {
                        let energy = org.energy;
                        let chance = event.intensity * (1.0 - distance / radius) * 0.05;
                        if rng.gen::<f64>() < chance {
                            let id = *SpeciesId::ALL.choose(rng).expect("non-empty");
                            grid.seed(tx, ty, id, energy, rng);
                        }
                    }
                }
            });
        }

        EventState::QuantumStorm => {
            let radius = event.radius as f64;
            for_disk_box(event, |dx, dy, distance| {
                if distance <= radius {
                    let (tx, ty) = grid.wrap(event.x as i64 + dx, event.y as i64 + dy);
                    let cell = grid.get_wrapped(tx as i64, ty as i64);
                    if let Some(org) = cell.organism() {
                        if org.species.id() != SpeciesId::Quantum {
                            let chance = event.intensity * (1.0 - distance / radius) * 0.1;
                            let energy = org.energy;
                            if rng.gen::<f64>() < chance {
                                grid.seed(tx, ty, SpeciesId::Quantum, energy, rng);
                            }
                        }
                    }
                }
            });
        }

        EventState::CosmicRadiation => {
            let radius = event.radius as f64;
            for_disk_box(event, |dx, dy, distance| {
                if distance <= radius && rng.gen::<f64>() < RADIATION_CHANCE {
                    let (tx, ty) = grid.wrap(event.x as i64 + dx, event.y as i64 + dy);
                    let cell = grid.get_wrapped(tx as i64, ty as i64);
                    match rng.gen_range(0..4u8) {
                        0 => {
                            if let Some(mut org) = cell.organism().copied() {
                                org.energy = (org.energy + 0.5).min(EVENT_ENERGY_CAP);
                                grid.set(tx, ty, Cell::Alive(org));
                            }
                        }
                        1 => {
                            if let Some(org) = cell.organism() {
                                let energy = org.energy;
                                let id = *SpeciesId::ALL.choose(rng).expect("non-empty");
                                grid.seed(tx, ty, id, energy, rng);
                            }
                        }
                        2 => grid.set(tx, ty, Cell::Empty),
                        _ => {
                            if cell.is_empty() {
                                let id = *SpeciesId::ORGANIC.choose(rng).expect("non-empty");
                                grid.seed(tx, ty, id, 1.0, rng);
                            }
                        }
                    }
                }
            });
        }

        EventState::TemporalRift { snapshot } => {
            // Rewind fires near the end of life, restoring the captured
            // cells verbatim on every remaining tick.
            if event.duration <= RIFT_RESTORE_WINDOW {
                for &(x, y, cell) in snapshot {
                    grid.set(x, y, cell);
                }
            }
        }
    }
}

/// Visits every offset in the event's bounding box with its Euclidean
/// distance from the center.
fn for_disk_box(event: &Event, mut visit: impl FnMut(i64, i64, f64)) {
    for dy in -event.radius..=event.radius {
        for dx in -event.radius..=event.radius {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            visit(dx, dy, distance);
        }
    }
}

/// Meteor strike: destruction probability falls off quadratically from a
/// near-certain hit at the center to nothing at the rim.
fn impact<R: Rng>(grid: &mut Grid, x: usize, y: usize, radius: i64, rng: &mut R) {
    let r = radius as f64;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if distance <= r {
                let destruction_chance = 1.0 - (distance / r).powi(2);
                if rng.gen::<f64>() < destruction_chance {
                    let (tx, ty) = grid.wrap(x as i64 + dx, y as i64 + dy);
                    grid.set(tx, ty, Cell::Empty);
                }
            }
        }
    }
}

/// Seeds a wave of one organic species into empty cells inside the event's
/// bounding box.
fn migrate<R: Rng>(grid: &mut Grid, x: usize, y: usize, radius: i64, rng: &mut R) {
    let id = *SpeciesId::ORGANIC.choose(rng).expect("non-empty");
    for _ in 0..MIGRATION_SEEDS {
        let (tx, ty) = grid.wrap(
            x as i64 + rng.gen_range(-radius..=radius),
            y as i64 + rng.gen_range(-radius..=radius),
        );
        if grid.get_wrapped(tx as i64, ty as i64).is_empty() {
            grid.seed(tx, ty, id, 0.8, rng);
        }
    }
}

/// Deep-copies every cell inside the disk for later restoration.
fn capture(grid: &Grid, x: usize, y: usize, radius: i64) -> Vec<(usize, usize, Cell)> {
    let mut snapshot = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                let (tx, ty) = grid.wrap(x as i64 + dx, y as i64 + dy);
                snapshot.push((tx, ty, grid.get_wrapped(tx as i64, ty as i64)));
            }
        }
    }
    snapshot
}

/// Scatters random species (quantum included) across part of the disk,
/// denser toward the center. Does not check occupancy.
fn bloom<R: Rng>(grid: &mut Grid, x: usize, y: usize, radius: i64, rng: &mut R) {
    let r = radius as f64;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if distance <= r && rng.gen::<f64>() < BLOOM_COVERAGE {
                let id = *SpeciesId::ALL.choose(rng).expect("non-empty");
                if rng.gen::<f64>() < 1.0 - distance / r {
                    let (tx, ty) = grid.wrap(x as i64 + dx, y as i64 + dy);
                    grid.seed(tx, ty, id, 1.5, rng);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_well_formed() {
        for kind in EventKind::ALL {
            let profile = kind.profile();
            assert!(profile.radius_min > 0, "{}", kind.label());
            assert!(profile.radius_max >= profile.radius_min, "{}", kind.label());
            assert!(profile.duration > 0, "{}", kind.label());
            assert!(profile.intensity > 0.0, "{}", kind.label());
            assert!(kind.weight() > 0, "{}", kind.label());
        }
    }

    #[test]
    fn test_age_factor_rises_over_lifetime() {
        let mut event = Event {
            x: 0,
            y: 0,
            radius: 4,
            duration: 10,
            total_duration: 10,
            intensity: 1.0,
            state: EventState::EnergyWave,
        };
        assert_eq!(event.age_factor(), 0.0);

        assert!(event.tick());
        let early = event.age_factor();
        for _ in 0..8 {
            event.tick();
        }
        assert!(event.age_factor() > early);
        assert!(!event.tick(), "event should expire on the final tick");
        assert_eq!(event.age_factor(), 1.0);
    }

    #[test]
    fn test_force_event_registers_active_event() {
        let mut grid = Grid::new(30, 30);
        let mut scheduler = EventScheduler::new(9);
        scheduler.force_event(EventKind::Meteor, 15, 15, &mut grid);

        assert_eq!(scheduler.events().len(), 1);
        let event = &scheduler.events()[0];
        assert_eq!(event.kind(), EventKind::Meteor);
        assert_eq!((event.x, event.y), (15, 15));
        assert_eq!(event.duration, 60);
        assert!((3..=8).contains(&event.radius));
    }

    #[test]
    fn test_events_expire_after_duration() {
        let mut grid = Grid::new(20, 20);
        let mut scheduler = EventScheduler::new(11);
        scheduler.set_spawn_probability(0.0);
        scheduler.force_event(EventKind::Meteor, 5, 5, &mut grid);

        for _ in 0..59 {
            scheduler.update(&mut grid);
        }
        assert_eq!(scheduler.events().len(), 1);
        scheduler.update(&mut grid);
        assert!(scheduler.events().is_empty());
    }

    #[test]
    fn test_clear_events_is_unconditional() {
        let mut grid = Grid::new(20, 20);
        let mut scheduler = EventScheduler::new(13);
        scheduler.force_event(EventKind::TemporalRift, 10, 10, &mut grid);
        scheduler.force_event(EventKind::EnergyWave, 3, 3, &mut grid);

        scheduler.clear_events();
        assert!(scheduler.events().is_empty());
    }

    #[test]
    fn test_spawn_probability_is_clamped() {
        let mut scheduler = EventScheduler::new(17);
        scheduler.set_spawn_probability(0.5);
        assert_eq!(scheduler.spawn_probability(), MAX_SPAWN_PROBABILITY);
        scheduler.set_spawn_probability(-1.0);
        assert_eq!(scheduler.spawn_probability(), 0.0);
    }

    #[test]
    fn test_rift_state_carries_snapshot() {
        let mut grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for y in 0..20 {
            for x in 0..20 {
                grid.seed(x, y, SpeciesId::Beta, 1.0, &mut rng);
            }
        }

        let mut scheduler = EventScheduler::new(19);
        scheduler.force_event(EventKind::TemporalRift, 10, 10, &mut grid);

        let event = &scheduler.events()[0];
        match &event.state {
            EventState::TemporalRift { snapshot } => {
                assert!(!snapshot.is_empty());
                assert!(snapshot.iter().all(|(_, _, cell)| !cell.is_empty()));
            }
            other => panic!("expected rift state, got {other:?}"),
        }
    }
}
