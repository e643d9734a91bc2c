use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use reversal::constants::{PUZZLE_31279, PUZZLE_495, PUZZLE_539, PUZZLE_851};
use reversal::game::{Puzzle, PuzzleState};
use reversal::solver::beam::{sample_without_replacement, softmax};
use reversal::solver::{AStar, BreadthFirst, Deadline, ProbabilisticBeam, RandomWalkAStar, Solver};

fn bench_successors(c: &mut Criterion) {
    let puzzle = Puzzle::new(&PUZZLE_31279).unwrap();
    let states = [
        PuzzleState::from([3, 12, 7, 9]),
        PuzzleState::from([3, 2, 7, 10]),
        PuzzleState::from([1, 2, 4, 5, 7, 10]),
    ];
    c.bench_function("successors", |b| {
        b.iter(|| {
            for state in &states {
                black_box(puzzle.successors(black_box(state)));
            }
        })
    });
}

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("Exhaustive search");
    group.warm_up_time(Duration::from_millis(100));
    group.sample_size(20);
    group.measurement_time(Duration::from_millis(500));

    for values in [&PUZZLE_539[..], &PUZZLE_495[..], &PUZZLE_851[..]] {
        let puzzle = Puzzle::new(values).unwrap();
        group.bench_with_input(
            BenchmarkId::new("breadth-first", puzzle.initial()),
            &puzzle,
            |b, puzzle| {
                b.iter(|| BreadthFirst.solve(puzzle, &mut Pcg64Mcg::seed_from_u64(0), Deadline::none()))
            },
        );
        group.bench_with_input(
            BenchmarkId::new("a-star", puzzle.initial()),
            &puzzle,
            |b, puzzle| {
                b.iter(|| AStar.solve(puzzle, &mut Pcg64Mcg::seed_from_u64(0), Deadline::none()))
            },
        );
    }
    group.finish();
}

fn bench_stochastic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stochastic search");
    group.warm_up_time(Duration::from_millis(100));
    group.sample_size(20);
    group.measurement_time(Duration::from_millis(500));

    let puzzle = Puzzle::new(&PUZZLE_495).unwrap();
    let beam = ProbabilisticBeam {
        beam_width: 5,
        temperature: 1.0,
    };
    let walk = RandomWalkAStar {
        random_steps: 3,
        attempts: 5,
    };
    let mut rng = Pcg64Mcg::seed_from_u64(1337);
    group.bench_function("probabilistic-beam", |b| {
        b.iter(|| beam.solve(&puzzle, &mut rng, Deadline::none()))
    });
    group.bench_function("random-walk-a-star", |b| {
        b.iter(|| walk.solve(&puzzle, &mut rng, Deadline::none()))
    });
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let costs: Vec<f64> = (0..40).map(|cost| (cost % 13) as f64).collect();
    let mut rng = Pcg64Mcg::seed_from_u64(1337);
    c.bench_function("softmax sampling", |b| {
        b.iter(|| {
            let probabilities = softmax(black_box(&costs), 1.0);
            sample_without_replacement(&probabilities, 5, &mut rng)
        })
    });
}

criterion_group!(
    benches,
    bench_successors,
    bench_exhaustive,
    bench_stochastic,
    bench_sampling
);
criterion_main!(benches);
