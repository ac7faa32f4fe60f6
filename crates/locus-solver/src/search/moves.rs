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

//! Move contracts.
//!
//! A move is a prospective local transformation of one solution kind.
//! Moves are typed over the solution they operate on, so offering a
//! permutation move to a non-permutation solution is rejected by the
//! compiler rather than failing at runtime.

use locus_model::solution::Solution;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A prospective, applicable transformation of a solution.
///
/// `evaluate` answers "what would the cost be if we made this move?"
/// without touching the solution. Local searches lean on it being
/// substantially cheaper than apply-then-cost for non-trivial
/// problems; that is a performance contract, not a correctness one.
///
/// # Invariant
///
/// For any supported solution `s`, applying the move and reading
/// `s.cost()` yields the value `evaluate` reported on the pre-apply
/// `s`, within the cost type's comparison slack.
pub trait Move<S: Solution>: fmt::Debug {
    /// Mutates `sol` into the neighbor this move denotes.
    fn apply(&self, sol: &mut S);

    /// The cost `sol` would have after [`apply`](Move::apply), without
    /// mutating it.
    fn evaluate(&self, sol: &S) -> S::Cost;
}

impl<S, M> Move<S> for Box<M>
where
    S: Solution,
    M: Move<S> + ?Sized,
{
    #[inline]
    fn apply(&self, sol: &mut S) {
        (**self).apply(sol)
    }

    #[inline]
    fn evaluate(&self, sol: &S) -> S::Cost {
        (**self).evaluate(sol)
    }
}

/// A move a tabu memory can remember by identity.
///
/// On top of the plain [`Move`] contract this adds deep cloning,
/// structural equality and a stable hash, which together let a tabu
/// list store made moves in a hash set and forbid their recurrence.
/// `opposite_of` defaults to a plain clone; override it when the
/// memory should forbid *undoing* the last move instead (if the move
/// took a to b, remember b to a).
///
/// # Invariant
///
/// Equal moves hash equally, and a clone is equal to but independent
/// from its source.
pub trait TabuMove<S: Solution>: Move<S> {
    /// A deep copy of this move.
    fn clone_move(&self) -> Box<dyn TabuMove<S>>;

    /// The move a tabu memory should remember after this one was
    /// made. Defaults to a clone.
    fn opposite_of(&self) -> Box<dyn TabuMove<S>> {
        self.clone_move()
    }

    /// Structural equality with respect to tabu-list management.
    fn move_eq(&self, other: &dyn TabuMove<S>) -> bool;

    /// Stable hash signature of this move.
    fn move_hash(&self) -> u64;

    /// Concrete-type access backing [`move_eq`](TabuMove::move_eq)
    /// implementations.
    fn as_any(&self) -> &dyn Any;
}

impl<'a, S: Solution> fmt::Display for dyn TabuMove<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabuMove({:?})", self)
    }
}

/// An owned tabu-compatible move usable as a hash-map or hash-set key.
///
/// Wrapping moves this way routes `Eq` and `Hash` through the
/// [`TabuMove`] identity contract, so heterogeneous moves can share
/// one memory.
pub struct MoveKey<S: Solution> {
    inner: Box<dyn TabuMove<S>>,
}

impl<S: Solution> MoveKey<S> {
    /// Wraps an owned move.
    #[inline]
    pub fn new(inner: Box<dyn TabuMove<S>>) -> Self {
        Self { inner }
    }

    /// Captures a borrowed move by cloning it.
    #[inline]
    pub fn of(mv: &dyn TabuMove<S>) -> Self {
        Self::new(mv.clone_move())
    }

    /// The wrapped move.
    #[inline]
    pub fn get(&self) -> &dyn TabuMove<S> {
        self.inner.as_ref()
    }

    /// Unwraps into the owned move.
    #[inline]
    pub fn into_inner(self) -> Box<dyn TabuMove<S>> {
        self.inner
    }
}

impl<S: Solution> Clone for MoveKey<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.inner.clone_move())
    }
}

impl<S: Solution> PartialEq for MoveKey<S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.move_eq(other.inner.as_ref())
    }
}

impl<S: Solution> Eq for MoveKey<S> {}

impl<S: Solution> Hash for MoveKey<S> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.move_hash());
    }
}

impl<S: Solution> fmt::Debug for MoveKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveKey({:?})", self.inner)
    }
}
