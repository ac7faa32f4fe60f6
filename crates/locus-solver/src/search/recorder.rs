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

//! Solution recorders.
//!
//! A recorder is the sink a search offers its working solution to at
//! the end of every iteration. What "best" means is externalized
//! here, so a search can track the best solution ever met, the best
//! feasible one, or any other criterion, without the strategy knowing.

use locus_model::solution::{CopyableSolution, Solution};
use std::fmt;

/// Sink receiving the working solution after each iteration.
pub trait SolutionRecorder<S: Solution> {
    /// Offers `sol`; returns `true` when this recorder considered it
    /// an improvement and recorded it.
    fn accept(&mut self, sol: &S) -> bool;

    /// A short identifier for diagnostics.
    fn name(&self) -> &str {
        "SolutionRecorder"
    }
}

impl<'a, S: Solution> fmt::Debug for dyn SolutionRecorder<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolutionRecorder({})", self.name())
    }
}

impl<'a, S: Solution> fmt::Display for dyn SolutionRecorder<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolutionRecorder({})", self.name())
    }
}

/// Records the best solution seen over its lifetime.
///
/// The recorder owns the best-solution buffer; construct it around
/// any solution of the right kind (the initial state is irrelevant)
/// and read the result back through [`best`](BestEverSolution::best)
/// or [`into_best`](BestEverSolution::into_best). The very first
/// offer always snapshots; afterwards only strict cost improvements
/// do.
#[derive(Debug, Clone)]
pub struct BestEverSolution<S>
where
    S: CopyableSolution,
{
    best: S,
    best_cost: Option<S::Cost>,
}

impl<S> BestEverSolution<S>
where
    S: CopyableSolution,
{
    /// A recorder writing snapshots into `buffer`.
    #[inline]
    pub fn new(buffer: S) -> Self {
        Self {
            best: buffer,
            best_cost: None,
        }
    }

    /// The best solution recorded so far.
    ///
    /// Before the first accepted offer this is the construction
    /// buffer.
    #[inline]
    pub fn best(&self) -> &S {
        &self.best
    }

    /// The cost of the best recorded solution, `None` before the
    /// first offer.
    #[inline]
    pub fn best_cost(&self) -> Option<S::Cost> {
        self.best_cost
    }

    /// Consumes the recorder and hands back the best solution.
    #[inline]
    pub fn into_best(self) -> S {
        self.best
    }
}

impl<S> SolutionRecorder<S> for BestEverSolution<S>
where
    S: CopyableSolution,
{
    fn accept(&mut self, sol: &S) -> bool {
        let cost = sol.cost();
        let improved = match self.best_cost {
            None => true,
            Some(best) => cost < best,
        };
        if improved {
            self.best.copy_from(sol);
            self.best_cost = Some(cost);
        }
        improved
    }

    fn name(&self) -> &str {
        "BestEverSolution"
    }
}

/// An ordered chain of recorders.
///
/// Every offered solution is passed to every member in chain order;
/// the chain reports an improvement when any member did. Members keep
/// their own notion of "best", so a chain can track, say, the best
/// overall and the best feasible solution side by side.
pub struct RecorderChain<S: Solution> {
    recorders: Vec<Box<dyn SolutionRecorder<S>>>,
}

impl<S: Solution> RecorderChain<S> {
    /// An empty chain.
    #[inline]
    pub fn new() -> Self {
        Self {
            recorders: Vec::new(),
        }
    }

    /// Chain-builder: appends a recorder and returns self.
    #[inline]
    pub fn with<R>(mut self, recorder: R) -> Self
    where
        R: SolutionRecorder<S> + 'static,
    {
        self.recorders.push(Box::new(recorder));
        self
    }

    /// Appends a recorder to the end of the chain.
    #[inline]
    pub fn push<R>(&mut self, recorder: R)
    where
        R: SolutionRecorder<S> + 'static,
    {
        self.recorders.push(Box::new(recorder));
    }

    /// Number of chained recorders.
    #[inline]
    pub fn len(&self) -> usize {
        self.recorders.len()
    }

    /// Whether the chain has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.recorders.is_empty()
    }
}

impl<S: Solution> Default for RecorderChain<S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Solution> SolutionRecorder<S> for RecorderChain<S> {
    /// Offers `sol` to every member in order; true when any member
    /// recorded an improvement.
    fn accept(&mut self, sol: &S) -> bool {
        let mut improved = false;
        for recorder in &mut self.recorders {
            improved |= recorder.accept(sol);
        }
        improved
    }

    fn name(&self) -> &str {
        "RecorderChain"
    }
}

impl<S: Solution> fmt::Debug for RecorderChain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecorderChain[")?;
        for (i, recorder) in self.recorders.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", recorder.name())?;
        }
        write!(f, "]")
    }
}
