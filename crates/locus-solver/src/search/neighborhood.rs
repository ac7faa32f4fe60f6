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

//! Neighborhood generators.
//!
//! A move manager materializes the set of moves applicable to the
//! current solution. Constant neighborhoods fill their move list at
//! construction and treat `refresh` as a no-op; variable or stochastic
//! neighborhoods rebuild the list on every `refresh`.

use crate::search::move_library::SwapElements;
use crate::search::moves::Move;
use locus_model::problem::PermutationSolution;
use locus_model::solution::Solution;
use rand::Rng;

/// Owner and generator of the current neighborhood.
///
/// The manager owns its moves; references into
/// [`moves`](MoveManager::moves) stay valid only until the next
/// [`refresh`](MoveManager::refresh). Iteration order over the slice
/// is the neighborhood's evaluation order. Before the first refresh
/// the neighborhood is empty.
pub trait MoveManager<S: Solution> {
    /// The move kind this manager publishes.
    type Move: Move<S>;

    /// Rebuilds the neighborhood against `sol`.
    fn refresh(&mut self, sol: &S);

    /// The current neighborhood, in iteration order.
    fn moves(&self) -> &[Self::Move];

    /// Size of the current neighborhood.
    #[inline]
    fn len(&self) -> usize {
        self.moves().len()
    }

    /// Whether the current neighborhood is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.moves().is_empty()
    }
}

/// A stochastic neighborhood of element swaps.
///
/// Every `refresh` publishes exactly `sample_size` random
/// [`SwapElements`] moves with distinct in-range endpoints, drawn
/// against the passed solution's size. Slots are allocated once and
/// re-targeted in place on subsequent refreshes.
///
/// Duplicate moves across slots are possible; strategies that need
/// distinct candidates must deduplicate themselves. Solutions with
/// fewer than two elements admit no swap and yield an empty
/// neighborhood.
#[derive(Debug)]
pub struct SwapNeighborhood<R> {
    rng: R,
    sample_size: usize,
    moves: Vec<SwapElements>,
}

impl<R> SwapNeighborhood<R>
where
    R: Rng,
{
    /// A neighborhood publishing `sample_size` random swaps per
    /// refresh, drawn from `rng`.
    #[inline]
    pub fn new(rng: R, sample_size: usize) -> Self {
        Self {
            rng,
            sample_size,
            moves: Vec::new(),
        }
    }

    /// The number of swaps published per refresh.
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl<P, R> MoveManager<P> for SwapNeighborhood<R>
where
    P: PermutationSolution,
    R: Rng,
{
    type Move = SwapElements;

    fn refresh(&mut self, sol: &P) {
        let n = sol.len();
        if n < 2 {
            self.moves.clear();
            return;
        }

        self.moves
            .resize(self.sample_size, SwapElements::new(0, 1));
        for slot in &mut self.moves {
            let i = self.rng.random_range(0..n);
            let mut j = self.rng.random_range(0..n);
            while j == i {
                j = self.rng.random_range(0..n);
            }
            slot.set(i, j);
        }
    }

    #[inline]
    fn moves(&self) -> &[SwapElements] {
        &self.moves
    }
}

/// The complete swap neighborhood of a fixed-size permutation.
///
/// All `n * (n - 1) / 2` canonical swaps are generated at
/// construction; `refresh` is a no-op. Exhaustive scans over small
/// problems use this where the stochastic sampler would miss moves.
#[derive(Debug, Clone)]
pub struct FullSwapNeighborhood {
    moves: Vec<SwapElements>,
}

impl FullSwapNeighborhood {
    /// The full swap neighborhood of a permutation with `size`
    /// elements.
    pub fn new(size: usize) -> Self {
        let mut moves = Vec::with_capacity(size.saturating_sub(1) * size / 2);
        for i in 0..size.saturating_sub(1) {
            for j in (i + 1)..size {
                moves.push(SwapElements::new(i, j));
            }
        }
        Self { moves }
    }
}

impl<P> MoveManager<P> for FullSwapNeighborhood
where
    P: PermutationSolution,
{
    type Move = SwapElements;

    /// Constant neighborhood: nothing to rebuild.
    #[inline]
    fn refresh(&mut self, _sol: &P) {}

    #[inline]
    fn moves(&self) -> &[SwapElements] {
        &self.moves
    }
}
