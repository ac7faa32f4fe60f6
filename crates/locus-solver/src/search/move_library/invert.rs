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

/// A tabu-compatible move that reverses a subsequence of a
/// permutation solution.
///
/// Unlike [`SwapElements`](crate::search::move_library::SwapElements)
/// the endpoint pair is *not* canonicalized: direction matters. The
/// reversed subsequence runs from `from` forward to `to`, both
/// inclusive, wrapping past the end of π when `from > to` (the
/// circular segment `from, ..., n-1, 0, ..., to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvertSubsequence {
    from: usize,
    to: usize,
}

impl InvertSubsequence {
    /// A move reversing the subsequence from `from` forward to `to`.
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Re-targets the move.
    #[inline]
    pub fn set(&mut self, from: usize, to: usize) {
        self.from = from;
        self.to = to;
    }

    /// The starting endpoint.
    #[inline]
    pub fn from(&self) -> usize {
        self.from
    }

    /// The final endpoint.
    #[inline]
    pub fn to(&self) -> usize {
        self.to
    }

    /// Stable hash signature: `(from << 16) ^ to`.
    #[inline]
    pub fn signature(&self) -> u64 {
        ((self.from as u64) << 16) ^ (self.to as u64)
    }
}

impl Hash for InvertSubsequence {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.signature());
    }
}

impl std::fmt::Display for InvertSubsequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invert({} -> {})", self.from, self.to)
    }
}

impl<P> Move<P> for InvertSubsequence
where
    P: PermutationSolution,
{
    #[inline]
    fn apply(&self, sol: &mut P) {
        sol.reverse(self.from, self.to);
    }

    #[inline]
    fn evaluate(&self, sol: &P) -> P::Cost {
        sol.reversal_cost(self.from, self.to)
    }
}

impl<P> TabuMove<P> for InvertSubsequence
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
            .downcast_ref::<InvertSubsequence>()
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

#[cfg(test)]
mod tests {
    use super::*;
    use locus_model::prelude::*;

    #[derive(Debug, Clone)]
    struct Tour {
        perm: Permutation,
    }

    impl Tour {
        fn new(n: usize) -> Self {
            Self {
                perm: Permutation::identity(n),
            }
        }
    }

    impl Solution for Tour {
        type Cost = f64;

        fn cost(&self) -> f64 {
            // Sum of absolute steps between consecutive cities,
            // closing the cycle.
            let pi = self.perm.as_slice();
            let n = pi.len();
            (0..n)
                .map(|i| {
                    let a = pi[i] as f64;
                    let b = pi[(i + 1) % n] as f64;
                    (a - b).abs()
                })
                .sum()
        }
    }

    impl PermutationSolution for Tour {
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
    fn test_apply_reverses_forward_segment() {
        let mut sol = Tour::new(6);
        InvertSubsequence::new(1, 4).apply(&mut sol);
        assert_eq!(sol.permutation(), &[0, 4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_apply_wraps_when_from_exceeds_to() {
        let mut sol = Tour::new(6);
        InvertSubsequence::new(4, 1).apply(&mut sol);
        assert_eq!(sol.permutation(), &[5, 4, 2, 3, 1, 0]);
    }

    #[test]
    fn test_direction_matters_for_identity() {
        let forward = InvertSubsequence::new(2, 5);
        let backward = InvertSubsequence::new(5, 2);
        assert_ne!(forward, backward);
        let boxed: Box<dyn TabuMove<Tour>> = Box::new(backward);
        assert!(!TabuMove::<Tour>::move_eq(&forward, boxed.as_ref()));
    }

    #[test]
    fn test_evaluate_matches_apply_then_cost() {
        let sol = Tour::new(8);
        for mv in [InvertSubsequence::new(2, 6), InvertSubsequence::new(6, 2)] {
            let predicted = mv.evaluate(&sol);
            let mut applied = sol.clone();
            mv.apply(&mut applied);
            assert!((predicted - applied.cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_clone_move_is_equal_and_independent() {
        let mv = InvertSubsequence::new(3, 7);
        let copy: Box<dyn TabuMove<Tour>> = TabuMove::<Tour>::clone_move(&mv);
        assert!(TabuMove::<Tour>::move_eq(&mv, copy.as_ref()));
        assert_eq!(TabuMove::<Tour>::move_hash(&mv), copy.move_hash());
    }
}
