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

//! Tabu search.
//!
//! Tabu search walks to the best admissible neighbor each iteration,
//! worsening moves included, and avoids cycling by forbidding recently
//! made moves for a number of iterations (the tenure). An aspiration
//! criteria may override the tabu status of a move that is too good to
//! skip.

use crate::monitor::termination::TerminationCriteria;
use crate::search::driver::{Search, SearchCore, SearchStep};
use crate::search::err::NoMovesError;
use crate::search::moves::{Move, MoveKey, TabuMove};
use crate::search::neighborhood::MoveManager;
use locus_core::num::SolverCost;
use locus_model::solution::Solution;
use num_traits::Bounded;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Memory of recently made moves.
///
/// Both hooks receive the working solution *before* the move is
/// applied; implementations that remember solutions rather than moves
/// rely on that.
pub trait TabuList<S: Solution> {
    /// Remembers `mv`, made from `sol`.
    fn tabu(&mut self, sol: &S, mv: &dyn TabuMove<S>);

    /// Whether making `mv` from `sol` is currently forbidden.
    fn is_tabu(&self, sol: &S, mv: &dyn TabuMove<S>) -> bool;

    /// The number of remembered moves.
    fn tenure(&self) -> usize;

    /// Adjusts the tenure; shrinking evicts the oldest moves.
    fn set_tenure(&mut self, tenure: usize);

    /// A short identifier for diagnostics.
    fn name(&self) -> &str {
        "TabuList"
    }
}

impl<'a, S: Solution> fmt::Debug for dyn TabuList<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabuList({}, tenure: {})", self.name(), self.tenure())
    }
}

/// The simplest workable tabu memory: the last `tenure` moves.
///
/// Remembered moves are stored by identity (`opposite_of` of the made
/// move, which defaults to the move itself) in a FIFO with occurrence
/// counts, so a move made twice within the tenure stays tabu until
/// both instances age out. The working solution is ignored.
pub struct SimpleTabuList<S: Solution> {
    tenure: usize,
    order: VecDeque<MoveKey<S>>,
    counts: HashMap<MoveKey<S>, usize>,
}

impl<S: Solution> SimpleTabuList<S> {
    /// A tabu list remembering the last `tenure` moves.
    #[inline]
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            order: VecDeque::with_capacity(tenure),
            counts: HashMap::with_capacity(tenure),
        }
    }

    fn evict_beyond_tenure(&mut self) {
        while self.order.len() > self.tenure {
            if let Some(oldest) = self.order.pop_front() {
                if let Some(count) = self.counts.get_mut(&oldest) {
                    *count -= 1;
                    if *count == 0 {
                        self.counts.remove(&oldest);
                    }
                }
            }
        }
    }
}

impl<S: Solution> TabuList<S> for SimpleTabuList<S> {
    fn tabu(&mut self, _sol: &S, mv: &dyn TabuMove<S>) {
        let key = MoveKey::new(mv.opposite_of());
        self.order.push_back(key.clone());
        *self.counts.entry(key).or_insert(0) += 1;
        self.evict_beyond_tenure();
    }

    fn is_tabu(&self, _sol: &S, mv: &dyn TabuMove<S>) -> bool {
        self.counts
            .get(&MoveKey::of(mv))
            .is_some_and(|&count| count > 0)
    }

    #[inline]
    fn tenure(&self) -> usize {
        self.tenure
    }

    fn set_tenure(&mut self, tenure: usize) {
        self.tenure = tenure;
        self.evict_beyond_tenure();
    }

    fn name(&self) -> &str {
        "SimpleTabuList"
    }
}

/// Decides whether a tabu move may be made anyway.
pub trait AspirationCriteria<S: Solution> {
    /// Restores the criteria to its freshly constructed state.
    fn reset(&mut self);

    /// Callback after the search made `mv`; `sol` is the working
    /// solution *after* the move was applied.
    fn accept(&mut self, sol: &S, mv: &dyn Move<S>);

    /// Whether the tabu `mv` should be allowed from `sol` (before
    /// applying).
    fn should_override(&self, sol: &S, mv: &dyn Move<S>) -> bool;

    /// A short identifier for diagnostics.
    fn name(&self) -> &str {
        "AspirationCriteria"
    }
}

impl<'a, S: Solution> fmt::Debug for dyn AspirationCriteria<S> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AspirationCriteria({})", self.name())
    }
}

/// The classic aspiration criteria: a tabu move is allowed when it
/// would beat the best cost seen so far by at least a minimum
/// improvement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestEverCriteria<C> {
    best: C,
    min_improvement: C,
}

impl<C: SolverCost> BestEverCriteria<C> {
    /// Requires tabu moves to beat the best seen cost by at least
    /// `min_improvement`.
    #[inline]
    pub fn new(min_improvement: C) -> Self {
        Self {
            best: C::max_value(),
            min_improvement,
        }
    }

    /// The best cost observed through `accept` so far.
    #[inline]
    pub fn best(&self) -> C {
        self.best
    }
}

impl<C: SolverCost> Default for BestEverCriteria<C> {
    /// Uses the cost type's comparison slack as the minimum
    /// improvement.
    #[inline]
    fn default() -> Self {
        Self::new(C::slack())
    }
}

impl<S: Solution> AspirationCriteria<S> for BestEverCriteria<S::Cost> {
    fn reset(&mut self) {
        self.best = S::Cost::max_value();
    }

    fn accept(&mut self, sol: &S, _mv: &dyn Move<S>) {
        let cost = sol.cost();
        if cost < self.best {
            self.best = cost;
        }
    }

    fn should_override(&self, sol: &S, mv: &dyn Move<S>) -> bool {
        mv.evaluate(sol) < self.best - self.min_improvement
    }

    fn name(&self) -> &str {
        "BestEverCriteria"
    }
}

/// The tabu search strategy.
///
/// Each iteration evaluates the whole refreshed neighborhood and
/// applies the cheapest admissible move: non-tabu, or tabu but passed
/// by the aspiration criteria. The made move is remembered in the
/// tabu list before it is applied. Listeners see
/// [`SearchStep::MOVE_MADE`] after every applied move,
/// [`SearchStep::IMPROVEMENT_MADE`] when the recorder took the result
/// as a new best, and
/// [`ASPIRATION_CRITERIA_MET`](TabuSearch::ASPIRATION_CRITERIA_MET)
/// whenever an aspired tabu move becomes the selection candidate
/// during the scan.
pub struct TabuSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
    M::Move: TabuMove<S>,
{
    core: SearchCore<'a, S, M>,
    tabu_list: &'a mut dyn TabuList<S>,
    aspiration: &'a mut dyn AspirationCriteria<S>,
    termination: &'a mut dyn TerminationCriteria<S>,
}

impl<'a, S, M> TabuSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
    M::Move: TabuMove<S>,
{
    /// An aspiration criteria overrode a move's tabu status.
    pub const ASPIRATION_CRITERIA_MET: SearchStep = SearchStep::new(2);

    /// Wires a tabu search to its collaborators.
    pub fn new(
        core: SearchCore<'a, S, M>,
        tabu_list: &'a mut dyn TabuList<S>,
        aspiration: &'a mut dyn AspirationCriteria<S>,
        termination: &'a mut dyn TerminationCriteria<S>,
    ) -> Self {
        Self {
            core,
            tabu_list,
            aspiration,
            termination,
        }
    }

    /// The underlying search state.
    #[inline]
    pub fn core(&self) -> &SearchCore<'a, S, M> {
        &self.core
    }

    /// The tabu list in use.
    #[inline]
    pub fn tabu_list(&self) -> &dyn TabuList<S> {
        self.tabu_list
    }
}

impl<'a, S, M> Search for TabuSearch<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
    M::Move: TabuMove<S>,
{
    fn search(&mut self) -> Result<(), NoMovesError> {
        while !self.termination.should_terminate(self.core.working()) {
            self.core.refresh_neighborhood();

            let mut best_cost = S::Cost::max_value();
            let mut best_index = None;
            {
                let working = self.core.working();
                let moves = self.core.move_manager().moves();
                for (index, mv) in moves.iter().enumerate() {
                    let cost = mv.evaluate(working);
                    let is_tabu = self.tabu_list.is_tabu(working, mv);

                    if cost < best_cost {
                        let aspiration_met =
                            is_tabu && self.aspiration.should_override(working, mv);
                        if !is_tabu || aspiration_met {
                            best_cost = cost;
                            best_index = Some(index);
                            if aspiration_met {
                                self.core.publish(Self::ASPIRATION_CRITERIA_MET);
                            }
                        }
                    }
                }
            }

            let Some(index) = best_index else {
                return Err(NoMovesError::with_message(
                    "every candidate move is tabu or the neighborhood is empty",
                ));
            };

            // The tabu list sees the solution before the move.
            {
                let working = self.core.working();
                let mv = &self.core.move_manager().moves()[index];
                self.tabu_list.tabu(working, mv);
            }

            self.core.apply_move(index);
            self.core.notify();

            {
                let working = self.core.working();
                let mv = &self.core.move_manager().moves()[index];
                self.aspiration.accept(working, mv);
            }

            if self.core.offer_to_recorder() {
                self.core.set_step(SearchStep::IMPROVEMENT_MADE);
                self.core.notify();
                tracing::debug!(
                    iteration = self.core.iteration(),
                    cost = %self.core.working().cost(),
                    "tabu search improved the recorded best"
                );
            }
        }
        Ok(())
    }
}
