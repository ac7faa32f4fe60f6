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

use locus_core::num::SolverCost;

/// A point of the space a local search explores.
///
/// "Feasible" is meant with respect to the space the search walks, not
/// the constraints of the underlying problem: letting the search move
/// through strictly infeasible territory is often beneficial, in which
/// case the cost function accounts for the violation with a penalty
/// term.
///
/// The associated `Cost` type is the per-problem numeric knob: pick
/// `f64` for real-valued objectives, or an integer scalar where one
/// suffices and exact comparisons are wanted.
///
/// # Invariant
///
/// `cost()` is a pure function of the solution state.
pub trait Solution {
    /// The scalar minimized by the search.
    type Cost: SolverCost;

    /// The objective value of this solution.
    fn cost(&self) -> Self::Cost;
}

/// A solution whose state can be captured for best-ever tracking.
///
/// Recorders snapshot the working solution through this trait at the
/// end of improving iterations. After `copy_from` the two solutions
/// are independent: later mutations of one do not affect the other.
///
/// The usual implementation is `self.clone_from(other)`; the trait
/// exists so problems can overwrite only the state that matters and
/// skip caches they can rebuild.
pub trait CopyableSolution: Solution {
    /// Overwrites this solution's state with `other`'s.
    fn copy_from(&mut self, other: &Self);
}
