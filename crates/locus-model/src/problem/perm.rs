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

//! Permutation problem skeleton.
//!
//! Problems over permutations (assignment, QAP, TSP and friends) hold
//! a permutation π of `{0, ..., n-1}` and only differ in their cost
//! function. [`Permutation`] is the reusable π storage,
//! [`PermutationSolution`] the contract the search machinery works
//! against, and [`random_shuffle`]/[`perturb`] the standard ways of
//! producing a random starting point or kicking a solution out of a
//! basin of attraction.

use crate::problem::err::InvalidPermutationError;
use crate::solution::Solution;
use locus_core::seq::Sequence;
use rand::Rng;

/// A permutation of `{0, ..., n-1}`.
///
/// This is the state skeleton problems embed; it never carries cost
/// information. The element-level operations keep the permutation
/// invariant by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    pi: Vec<usize>,
}

impl Permutation {
    /// The identity permutation `0, 1, ..., n-1`.
    #[inline]
    pub fn identity(n: usize) -> Self {
        Self {
            pi: Sequence::default().take(n).collect(),
        }
    }

    /// Builds a permutation from an explicit layout, rejecting vectors
    /// that do not contain every integer in `[0, len)` exactly once.
    pub fn from_vec(pi: Vec<usize>) -> Result<Self, InvalidPermutationError> {
        let n = pi.len();
        let mut seen = vec![false; n];
        for &value in &pi {
            if value >= n || seen[value] {
                return Err(InvalidPermutationError::new(n, value));
            }
            seen[value] = true;
        }
        Ok(Self { pi })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.pi.len()
    }

    /// Whether the permutation has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pi.is_empty()
    }

    /// Read-only view of π.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.pi
    }

    /// Exchanges the elements at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range; out-of-range indices in a
    /// move are a programmer error, not a recoverable condition.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.pi.swap(i, j);
    }

    /// Reverses the subsequence running from `from` forward to `to`,
    /// both inclusive, wrapping past the end when `from > to`.
    pub fn reverse(&mut self, from: usize, to: usize) {
        let n = self.pi.len();
        let segment = if from <= to {
            to - from + 1
        } else {
            n - from + to + 1
        };
        let mut left = from;
        let mut right = to;
        for _ in 0..segment / 2 {
            self.pi.swap(left, right);
            left = (left + 1) % n;
            right = (right + n - 1) % n;
        }
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    #[inline]
    fn index(&self, position: usize) -> &usize {
        &self.pi[position]
    }
}

impl std::fmt::Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.pi.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// A solution holding a permutation of `{0, ..., n-1}`.
///
/// The provided methods express every structural operation through
/// [`swap`](PermutationSolution::swap), so a problem that overrides
/// `swap` to maintain incremental cost bookkeeping gets consistent
/// bookkeeping everywhere for free.
///
/// The `Clone` bound backs the default cost probes: `swap_cost` and
/// `reversal_cost` clone, mutate and re-evaluate, which is always
/// correct but linear in the solution size. Problems are expected to
/// override them with genuine delta evaluation; neighborhood scans
/// call them once per candidate move.
pub trait PermutationSolution: Solution + Clone {
    /// Number of elements in π.
    fn len(&self) -> usize;

    /// Read-only view of π for cost functions.
    fn permutation(&self) -> &[usize];

    /// Exchanges the elements at positions `i` and `j`.
    ///
    /// Override to update delta bookkeeping along with the state.
    fn swap(&mut self, i: usize, j: usize);

    /// Whether the permutation has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reverses the subsequence running from `from` forward to `to`,
    /// both inclusive.
    ///
    /// When `from > to` the subsequence wraps past the end of π: the
    /// circular segment `from, from+1, ..., n-1, 0, ..., to` is
    /// reversed in place. The default walks two pointers toward each
    /// other through [`swap`](PermutationSolution::swap).
    fn reverse(&mut self, from: usize, to: usize) {
        let n = self.len();
        let segment = if from <= to {
            to - from + 1
        } else {
            n - from + to + 1
        };
        let mut left = from;
        let mut right = to;
        for _ in 0..segment / 2 {
            self.swap(left, right);
            left = (left + 1) % n;
            right = (right + n - 1) % n;
        }
    }

    /// The cost this solution would have after `swap(i, j)`, without
    /// mutating it.
    fn swap_cost(&self, i: usize, j: usize) -> Self::Cost {
        let mut probe = self.clone();
        probe.swap(i, j);
        probe.cost()
    }

    /// The cost this solution would have after `reverse(from, to)`,
    /// without mutating it.
    fn reversal_cost(&self, from: usize, to: usize) -> Self::Cost {
        let mut probe = self.clone();
        probe.reverse(from, to);
        probe.cost()
    }
}

/// Shuffles a permutation solution uniformly at random.
///
/// This generates a random starting point for a search. The walk is a
/// Fisher-Yates pass expressed through the solution's `swap`, so
/// overridden swaps keep their bookkeeping consistent.
pub fn random_shuffle<P, R>(solution: &mut P, rng: &mut R)
where
    P: PermutationSolution,
    R: Rng + ?Sized,
{
    let n = solution.len();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        if i != j {
            solution.swap(i, j);
        }
    }
}

/// Perturbs a permutation solution with `swaps` random swaps.
///
/// Each swap draws both positions uniformly in `[0, len)`, re-drawing
/// the second until it differs from the first. Solutions with fewer
/// than two elements are left untouched.
pub fn perturb<P, R>(solution: &mut P, swaps: usize, rng: &mut R)
where
    P: PermutationSolution,
    R: Rng + ?Sized,
{
    let n = solution.len();
    if n < 2 {
        return;
    }
    for _ in 0..swaps {
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n);
        while j == i {
            j = rng.random_range(0..n);
        }
        solution.swap(i, j);
    }
}
