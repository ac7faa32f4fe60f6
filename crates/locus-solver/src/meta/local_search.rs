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

use crate::search::driver::{Search, SearchCore, SearchStep};
use crate::search::err::NoMovesError;
use crate::search::moves::Move;
use crate::search::neighborhood::MoveManager;
use locus_core::num::SolverCost;
use locus_model::solution::Solution;

/// Greedy descent over a neighborhood.
///
/// Each iteration scans the refreshed neighborhood for a move that
/// improves on the working cost and applies it; the search ends
/// normally at the first iteration without an improving move (a local
/// optimum for the neighborhood). By default the scan is steepest
/// descent, taking the best improving move of the whole neighborhood;
/// [`first_improvement`](LocalSearch::first_improvement) short-circuits
/// the scan at the first improving move instead.
///
/// The starting solution is offered to the recorder before the first
/// iteration, so the recorder's best is never worse than the start.
///
/// # Errors
///
/// [`NoMovesError`] when a refresh leaves the neighborhood empty: the
/// strategy cannot make a single move.
pub struct LocalSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    core: SearchCore<'a, S, M>,
    short_circuit: bool,
}

impl<'a, S, M> LocalSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    /// A steepest-descent search over `core`.
    #[inline]
    pub fn new(core: SearchCore<'a, S, M>) -> Self {
        Self {
            core,
            short_circuit: false,
        }
    }

    /// A first-improvement descent: each iteration applies the first
    /// improving move the scan encounters.
    #[inline]
    pub fn first_improvement(core: SearchCore<'a, S, M>) -> Self {
        Self {
            core,
            short_circuit: true,
        }
    }

    /// The underlying search state.
    #[inline]
    pub fn core(&self) -> &SearchCore<'a, S, M> {
        &self.core
    }

    /// Consumes the strategy and hands the search state back.
    #[inline]
    pub fn into_core(self) -> SearchCore<'a, S, M> {
        self.core
    }
}

impl<'a, S, M> Search for LocalSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    fn search(&mut self) -> Result<(), NoMovesError> {
        self.core.offer_to_recorder();

        loop {
            self.core.refresh_neighborhood();
            if self.core.move_manager().is_empty() {
                return Err(NoMovesError::new());
            }

            let mut best_cost = self.core.working().cost();
            let mut best_index = None;
            {
                let working = self.core.working();
                let moves = self.core.move_manager().moves();
                for (index, mv) in moves.iter().enumerate() {
                    let cost = mv.evaluate(working);
                    if cost.improves(best_cost) {
                        best_cost = cost;
                        best_index = Some(index);
                        if self.short_circuit {
                            break;
                        }
                    }
                }
            }

            let Some(index) = best_index else {
                tracing::debug!(
                    iterations = self.core.iteration(),
                    cost = %self.core.working().cost(),
                    "descent reached a local optimum"
                );
                return Ok(());
            };

            self.core.apply_move(index);
            self.core.notify();
            if self.core.offer_to_recorder() {
                self.core.set_step(SearchStep::IMPROVEMENT_MADE);
                self.core.notify();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::observer::{SearchListener, Subject};
    use crate::search::driver::SearchEvent;
    use crate::search::neighborhood::FullSwapNeighborhood;
    use crate::search::recorder::BestEverSolution;
    use locus_model::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Minimizing sum of position * value drives large values to the
    /// front; every non-optimal state has an improving swap.
    #[derive(Debug, Clone, PartialEq)]
    struct Lineup {
        perm: Permutation,
    }

    impl Lineup {
        fn new(n: usize) -> Self {
            Self {
                perm: Permutation::identity(n),
            }
        }

        fn optimal_cost(n: usize) -> f64 {
            (0..n).map(|p| (p * (n - 1 - p)) as f64).sum()
        }
    }

    impl Solution for Lineup {
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

    impl CopyableSolution for Lineup {
        fn copy_from(&mut self, other: &Self) {
            self.clone_from(other);
        }
    }

    impl PermutationSolution for Lineup {
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

    #[test]
    fn test_steepest_descent_reaches_the_optimum() {
        let mut working = Lineup::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        random_shuffle(&mut working, &mut rng);

        let mut recorder = BestEverSolution::new(Lineup::new(6));
        let mut moves = FullSwapNeighborhood::new(6);
        let core = SearchCore::new(&mut working, &mut recorder, &mut moves);

        let mut search = LocalSearch::new(core);
        search.search().expect("the neighborhood is never empty");

        assert_eq!(recorder.best_cost(), Some(Lineup::optimal_cost(6)));
        assert_eq!(recorder.best().permutation(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_first_improvement_reaches_the_optimum_too() {
        let mut working = Lineup::new(5);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        random_shuffle(&mut working, &mut rng);

        let mut recorder = BestEverSolution::new(Lineup::new(5));
        let mut moves = FullSwapNeighborhood::new(5);
        let core = SearchCore::new(&mut working, &mut recorder, &mut moves);

        let mut search = LocalSearch::first_improvement(core);
        search.search().expect("the neighborhood is never empty");

        assert_eq!(recorder.best_cost(), Some(Lineup::optimal_cost(5)));
    }

    #[test]
    fn test_start_is_recorded_even_without_any_improving_move() {
        // Already optimal: the descent makes no move.
        let mut working = Lineup::new(4);
        working.perm = Permutation::from_vec(vec![3, 2, 1, 0]).unwrap();
        let start_cost = working.cost();

        let mut recorder = BestEverSolution::new(Lineup::new(4));
        let mut moves = FullSwapNeighborhood::new(4);
        let core = SearchCore::new(&mut working, &mut recorder, &mut moves);

        let mut search = LocalSearch::new(core);
        search.search().expect("the neighborhood is never empty");
        assert_eq!(search.core().iteration(), 0);
        assert_eq!(recorder.best_cost(), Some(start_cost));
    }

    #[test]
    fn test_empty_neighborhood_raises_no_moves_error() {
        let mut working = Lineup::new(1);
        let mut recorder = BestEverSolution::new(Lineup::new(1));
        let mut moves = FullSwapNeighborhood::new(1);
        let core = SearchCore::new(&mut working, &mut recorder, &mut moves);

        let mut search = LocalSearch::new(core);
        assert_eq!(search.search(), Err(NoMovesError::new()));
    }

    #[test]
    fn test_descent_publishes_move_and_improvement_events() {
        struct Tap {
            steps: Rc<RefCell<Vec<SearchStep>>>,
        }
        impl SearchListener<SearchEvent<f64>> for Tap {
            fn update(&mut self, _s: &Subject<SearchEvent<f64>>, event: &SearchEvent<f64>) {
                self.steps.borrow_mut().push(event.step);
            }
        }

        let mut working = Lineup::new(3);
        working.perm = Permutation::from_vec(vec![0, 2, 1]).unwrap();

        let mut recorder = BestEverSolution::new(Lineup::new(3));
        let mut moves = FullSwapNeighborhood::new(3);
        let core = SearchCore::new(&mut working, &mut recorder, &mut moves);

        let steps = Rc::new(RefCell::new(Vec::new()));
        core.attach(Tap {
            steps: steps.clone(),
        });

        let mut search = LocalSearch::new(core);
        search.search().expect("the neighborhood is never empty");

        let seen = steps.borrow();
        assert!(!seen.is_empty());
        // Every applied move improves under greedy descent, so the
        // event stream alternates move / improvement.
        for pair in seen.chunks(2) {
            assert_eq!(pair[0], SearchStep::MOVE_MADE);
            assert_eq!(pair[1], SearchStep::IMPROVEMENT_MADE);
        }
    }
}
