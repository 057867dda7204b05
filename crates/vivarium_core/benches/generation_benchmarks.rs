use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vivarium_core::Automaton;
use vivarium_data::SpeciesId;

/// Default-sized world seeded to roughly 60% occupancy across all species.
fn soup() -> Automaton {
    let mut automaton = Automaton::new(120, 80, 42);
    for y in 0..80 {
        for x in 0..120 {
            match (x * 7 + y * 3) % 5 {
                0 => automaton.seed(x, y, SpeciesId::Alpha, 1.0),
                1 => automaton.seed(x, y, SpeciesId::Beta, 1.0),
                2 => automaton.seed(x, y, SpeciesId::Gamma, 1.0),
                _ => {}
            }
        }
    }
    automaton
}

fn bench_generation_advance(c: &mut Criterion) {
    let mut automaton = soup();
    c.bench_function("generation_advance_120x80", |b| {
        b.iter(|| {
            automaton.update();
            black_box(automaton.total_energy())
        });
    });
}

fn bench_entropy(c: &mut Criterion) {
    let automaton = soup();
    c.bench_function("entropy_120x80", |b| {
        b.iter(|| black_box(automaton.entropy()));
    });
}

criterion_group!(benches, bench_generation_advance, bench_entropy);
criterion_main!(benches);
