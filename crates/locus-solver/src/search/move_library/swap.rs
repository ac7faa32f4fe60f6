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

use crate::search::moves::{Move, TabuMove};
use locus_model::problem::PermutationSolution;
use std::any::Any;
use std::hash::{Hash, Hasher};

/// A tabu-compatible move that exchanges two elements of a
/// permutation solution.
///
/// The endpoint pair is canonicalized to `(min, max)` at construction
/// and on [`set`](SwapElements::set), so "swap i and j" has one
/// identity regardless of argument order; equality and hashing are
/// symmetric for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapElements {
    first: usize,
    second: usize,
}

impl SwapElements {
    /// A move swapping the elements at `from` and `to`.
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            first: from.min(to),
            second: from.max(to),
        }
    }

    /// Re-targets the move, canonicalizing the new pair.
    ///
    /// Stochastic neighborhoods mutate their slots through this
    /// instead of reallocating moves on every refresh.
    #[inline]
    pub fn set(&mut self, from: usize, to: usize) {
        self.first = from.min(to);
        self.second = from.max(to);
    }

    /// The lower endpoint.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// The higher endpoint.
    #[inline]
    pub fn second(&self) -> usize {
        self.second
    }

    /// Stable hash signature: `(first << 16) ^ second`.
    #[inline]
    pub fn signature(&self) -> u64 {
        ((self.first as u64) << 16) ^ (self.second as u64)
    }
}

impl Hash for SwapElements {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.signature());
    }
}

impl std::fmt::Display for SwapElements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Swap({}, {})", self.first, self.second)
    }
}

impl<P> Move<P> for SwapElements
where
    P: PermutationSolution,
{
    #[inline]
    fn apply(&self, sol: &mut P) {
        sol.swap(self.first, self.second);
    }

    #[inline]
    fn evaluate(&self, sol: &P) -> P::Cost {
        sol.swap_cost(self.first, self.second)
    }
}

impl<P> TabuMove<P> for SwapElements
where
    P: PermutationSolution + 'static,
{
    #[inline]
    fn clone_move(&self) -> Box<dyn TabuMove<P>> {
        Box::new(*self)
    }

    fn move_eq(&self, other: &dyn TabuMove<P>) -> bool {
        other
            .as_any()
            .downcast_ref::<SwapElements>()
            .is_some_and(|o| o == self)
    }

    #[inline]
    fn move_hash(&self) -> u64 {
        self.signature()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}
