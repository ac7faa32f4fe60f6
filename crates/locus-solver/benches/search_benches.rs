// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use locus_model::prelude::*;
use locus_solver::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

// Scenario constants: a mid-sized linear-ordering instance.
const PROBLEM_SIZE: usize = 64;
const SAMPLE_SIZE: usize = 128;
const SEED: u64 = 0x5EED_CAFE;

/// Linear ordering: minimize the sum of position * value over π.
#[derive(Debug, Clone)]
struct Ordering {
    perm: Permutation,
}

impl Ordering {
    fn shuffled(n: usize, seed: u64) -> Self {
        let mut ordering = Self {
            perm: Permutation::identity(n),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        random_shuffle(&mut ordering, &mut rng);
        ordering
    }
}

impl Solution for Ordering {
    type Cost = f64;

    fn cost(&self) -> f64 {
        self.perm
            .as_slice()
            .iter()
            .enumerate()
            .map(|(position, &value)| (position as f64) * (value as f64))
            .sum()
    }
}

impl CopyableSolution for Ordering {
    fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }
}

impl PermutationSolution for Ordering {
    fn len(&self) -> usize {
        self.perm.len()
    }

    fn permutation(&self) -> &[usize] {
        self.perm.as_slice()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
    }
}

fn bench_swap_neighborhood_refresh(c: &mut Criterion) {
    let solution = Ordering::shuffled(PROBLEM_SIZE, SEED);
    let mut neighborhood =
        SwapNeighborhood::new(ChaCha8Rng::seed_from_u64(SEED), SAMPLE_SIZE);

    c.bench_function("swap_neighborhood_refresh", |b| {
        b.iter(|| {
            neighborhood.refresh(black_box(&solution));
            black_box(MoveManager::<Ordering>::len(&neighborhood))
        })
    });
}

fn bench_neighborhood_scan(c: &mut Criterion) {
    let solution = Ordering::shuffled(PROBLEM_SIZE, SEED);
    let neighborhood = FullSwapNeighborhood::new(PROBLEM_SIZE);

    c.bench_function("full_neighborhood_scan", |b| {
        b.iter(|| {
            let best = MoveManager::<Ordering>::moves(&neighborhood)
                .iter()
                .map(|mv| mv.evaluate(black_box(&solution)))
                .fold(f64::INFINITY, f64::min);
            black_box(best)
        })
    });
}

fn bench_local_search_descent(c: &mut Criterion) {
    c.bench_function("local_search_descent", |b| {
        b.iter_batched(
            || Ordering::shuffled(PROBLEM_SIZE, SEED),
            |mut working| {
                let mut recorder = BestEverSolution::new(working.clone());
                let mut moves = FullSwapNeighborhood::new(PROBLEM_SIZE);
                let core = SearchCore::new(&mut working, &mut recorder, &mut moves);
                let mut search = LocalSearch::new(core);
                search.search().expect("neighborhood is never empty");
                black_box(recorder.best_cost())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_tabu_search_iterations(c: &mut Criterion) {
    c.bench_function("tabu_search_64_iterations", |b| {
        b.iter_batched(
            || Ordering::shuffled(PROBLEM_SIZE, SEED),
            |mut working| {
                let mut recorder = BestEverSolution::new(working.clone());
                let mut moves =
                    SwapNeighborhood::new(ChaCha8Rng::seed_from_u64(SEED), SAMPLE_SIZE);
                let mut tabu_list: SimpleTabuList<Ordering> = SimpleTabuList::new(16);
                let mut aspiration: BestEverCriteria<f64> = BestEverCriteria::default();
                let mut termination = IterationLimit::new(64);

                let core = SearchCore::new(&mut working, &mut recorder, &mut moves);
                let mut search =
                    TabuSearch::new(core, &mut tabu_list, &mut aspiration, &mut termination);
                search.search().expect("sampled swaps are never all tabu");
                black_box(recorder.best_cost())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_swap_neighborhood_refresh,
    bench_neighborhood_scan,
    bench_local_search_descent,
    bench_tabu_search_iterations
);
criterion_main!(benches);
