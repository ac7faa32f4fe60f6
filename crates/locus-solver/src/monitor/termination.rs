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

//! Termination criteria for iterative strategies.
//!
//! The core never stops a search on its own; strategies poll one of
//! these between iterations and leave the loop cleanly when it fires.

use locus_core::num::SolverCost;
use locus_model::solution::Solution;
use std::fmt;

/// Decides when an iterative strategy should stop.
///
/// `should_terminate` is polled once per iteration with the current
/// working solution; implementations may keep per-run state (counters,
/// best cost seen) and must restore it in `reset`.
pub trait TerminationCriteria<S: Solution> {
    /// Returns `true` when the strategy should stop before this
    /// iteration.
    fn should_terminate(&mut self, sol: &S) -> bool;

    /// Restores the criteria to its freshly constructed state.
    fn reset(&mut self);

    /// A short identifier for diagnostics.
    fn name(&self) -> &str {
        "TerminationCriteria"
    }
}

impl<'a, S: Solution> fmt::Debug for dyn TerminationCriteria<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminationCriteria({})", self.name())
    }
}

/// Stops after a fixed number of iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationLimit {
    limit: u64,
    seen: u64,
}

impl IterationLimit {
    /// Permits exactly `limit` iterations.
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self { limit, seen: 0 }
    }

    /// Iterations granted so far.
    #[inline]
    pub fn seen(&self) -> u64 {
        self.seen
    }
}

impl<S: Solution> TerminationCriteria<S> for IterationLimit {
    fn should_terminate(&mut self, _sol: &S) -> bool {
        if self.seen >= self.limit {
            return true;
        }
        self.seen += 1;
        false
    }

    fn reset(&mut self) {
        self.seen = 0;
    }

    fn name(&self) -> &str {
        "IterationLimit"
    }
}

/// Stops after a streak of iterations without strict improvement.
///
/// Improvement is measured against the best cost this criteria has
/// seen, using the cost type's comparison slack.
#[derive(Debug, Clone, PartialEq)]
pub struct NoImprovementLimit<C> {
    limit: u64,
    streak: u64,
    best: Option<C>,
}

impl<C: SolverCost> NoImprovementLimit<C> {
    /// Tolerates up to `limit` consecutive non-improving iterations.
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            streak: 0,
            best: None,
        }
    }

    /// The current non-improving streak length.
    #[inline]
    pub fn streak(&self) -> u64 {
        self.streak
    }
}

impl<S: Solution> TerminationCriteria<S> for NoImprovementLimit<S::Cost> {
    fn should_terminate(&mut self, sol: &S) -> bool {
        let cost = sol.cost();
        match self.best {
            Some(best) if !cost.improves(best) => {
                self.streak += 1;
                self.streak >= self.limit
            }
            _ => {
                self.best = Some(cost);
                self.streak = 0;
                false
            }
        }
    }

    fn reset(&mut self) {
        self.streak = 0;
        self.best = None;
    }

    fn name(&self) -> &str {
        "NoImprovementLimit"
    }
}

/// Stops once the working cost reaches a target level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostThreshold<C> {
    level: C,
}

impl<C: SolverCost> CostThreshold<C> {
    /// Stops when the cost is at or below `level`.
    #[inline]
    pub fn new(level: C) -> Self {
        Self { level }
    }

    /// The target level.
    #[inline]
    pub fn level(&self) -> C {
        self.level
    }
}

impl<S: Solution> TerminationCriteria<S> for CostThreshold<S::Cost> {
    fn should_terminate(&mut self, sol: &S) -> bool {
        sol.cost() <= self.level
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "CostThreshold"
    }
}

/// Stops when any member criteria fires.
pub struct CompositeTermination<S: Solution> {
    members: Vec<Box<dyn TerminationCriteria<S>>>,
}

impl<S: Solution> CompositeTermination<S> {
    /// An empty composite; it never terminates until members are
    /// added.
    #[inline]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Chain-builder: adds a member and returns self.
    #[inline]
    pub fn with<T>(mut self, criteria: T) -> Self
    where
        T: TerminationCriteria<S> + 'static,
    {
        self.members.push(Box::new(criteria));
        self
    }

    /// Adds a member criteria.
    #[inline]
    pub fn push<T>(&mut self, criteria: T)
    where
        T: TerminationCriteria<S> + 'static,
    {
        self.members.push(Box::new(criteria));
    }

    /// Number of member criteria.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the composite has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<S: Solution> Default for CompositeTermination<S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Solution> TerminationCriteria<S> for CompositeTermination<S> {
    /// Polls every member; any `true` terminates. All members are
    /// polled so their counters stay in step.
    fn should_terminate(&mut self, sol: &S) -> bool {
        let mut stop = false;
        for member in &mut self.members {
            stop |= member.should_terminate(sol);
        }
        stop
    }

    fn reset(&mut self) {
        for member in &mut self.members {
            member.reset();
        }
    }

    fn name(&self) -> &str {
        "CompositeTermination"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Fixed {
        cost: f64,
    }

    impl Solution for Fixed {
        type Cost = f64;

        fn cost(&self) -> f64 {
            self.cost
        }
    }

    #[test]
    fn test_iteration_limit_grants_exactly_the_budget() {
        let mut limit = IterationLimit::new(3);
        let sol = Fixed { cost: 1.0 };

        for _ in 0..3 {
            assert!(!limit.should_terminate(&sol));
        }
        assert!(limit.should_terminate(&sol));
        assert_eq!(limit.seen(), 3);

        TerminationCriteria::<Fixed>::reset(&mut limit);
        assert!(!limit.should_terminate(&sol));
    }

    #[test]
    fn test_zero_iteration_limit_terminates_immediately() {
        let mut limit = IterationLimit::new(0);
        assert!(limit.should_terminate(&Fixed { cost: 0.0 }));
    }

    #[test]
    fn test_no_improvement_limit_counts_stale_iterations() {
        let mut criteria: NoImprovementLimit<f64> = NoImprovementLimit::new(2);

        assert!(!criteria.should_terminate(&Fixed { cost: 10.0 }));
        // An improvement resets the streak.
        assert!(!criteria.should_terminate(&Fixed { cost: 8.0 }));
        assert!(!criteria.should_terminate(&Fixed { cost: 8.0 }));
        assert_eq!(criteria.streak(), 1);
        assert!(criteria.should_terminate(&Fixed { cost: 9.0 }));
    }

    #[test]
    fn test_cost_threshold_fires_at_or_below_level() {
        let mut criteria: CostThreshold<f64> = CostThreshold::new(5.0);
        assert!(!criteria.should_terminate(&Fixed { cost: 5.5 }));
        assert!(criteria.should_terminate(&Fixed { cost: 5.0 }));
        assert!(criteria.should_terminate(&Fixed { cost: 1.0 }));
        assert_eq!(criteria.level(), 5.0);
    }

    #[test]
    fn test_composite_fires_when_any_member_does() {
        let mut composite = CompositeTermination::new()
            .with(CostThreshold::new(0.0))
            .with(IterationLimit::new(2));
        assert_eq!(composite.len(), 2);

        let sol = Fixed { cost: 3.0 };
        assert!(!composite.should_terminate(&sol));
        assert!(!composite.should_terminate(&sol));
        // The iteration budget is exhausted even though the threshold
        // never fires.
        assert!(composite.should_terminate(&sol));

        composite.reset();
        assert!(!composite.should_terminate(&sol));
    }

    #[test]
    fn test_empty_composite_never_terminates() {
        let mut composite: CompositeTermination<Fixed> = CompositeTermination::new();
        assert!(composite.is_empty());
        assert!(!composite.should_terminate(&Fixed { cost: 0.0 }));
    }
}
