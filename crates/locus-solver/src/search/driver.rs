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

//! Shared state and contract of iterative search strategies.
//!
//! A concrete strategy owns a [`SearchCore`] wired to a working
//! solution, a move manager and a solution recorder, and drives the
//! iteration loop itself: refresh the neighborhood, pick a move under
//! its policy, apply it, offer the result to the recorder, publish
//! step events to listeners. The core supplies the bookkeeping every
//! strategy repeats.

use crate::monitor::observer::{ListenerId, SearchListener, Subject};
use crate::search::err::NoMovesError;
use crate::search::moves::Move;
use crate::search::neighborhood::MoveManager;
use crate::search::recorder::SolutionRecorder;
use locus_model::solution::Solution;
use std::fmt;

/// Step tag published by a search after each iteration.
///
/// The set is open: the core defines [`MOVE_MADE`](SearchStep::MOVE_MADE)
/// and [`IMPROVEMENT_MADE`](SearchStep::IMPROVEMENT_MADE), concrete
/// strategies add their own codes above those (tabu search publishes
/// code 2 when an aspiration criteria overrides the tabu status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchStep(u32);

impl SearchStep {
    /// A move was applied this iteration.
    pub const MOVE_MADE: SearchStep = SearchStep(0);

    /// The recorder reported an improvement.
    pub const IMPROVEMENT_MADE: SearchStep = SearchStep(1);

    /// A strategy-defined step code.
    #[inline]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw tag value.
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SearchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SearchStep::MOVE_MADE => write!(f, "MoveMade"),
            SearchStep::IMPROVEMENT_MADE => write!(f, "ImprovementMade"),
            SearchStep(code) => write!(f, "Step({})", code),
        }
    }
}

/// Notification payload published to search listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchEvent<C> {
    /// What happened.
    pub step: SearchStep,
    /// Moves made since the search started.
    pub iteration: u64,
    /// Cost of the working solution when the event was published.
    pub cost: C,
}

/// The state shared by every neighborhood-based strategy.
///
/// The core borrows its collaborators for the duration of the search:
/// the working solution (mutated in place by applied moves), the
/// recorder and the move manager. It additionally tracks the
/// currently selected move, the last published step code, the move
/// counter and the attached listeners.
pub struct SearchCore<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    working: &'a mut S,
    recorder: &'a mut dyn SolutionRecorder<S>,
    moves: &'a mut M,
    current_move: Option<usize>,
    step: SearchStep,
    iteration: u64,
    listeners: Subject<SearchEvent<S::Cost>>,
}

impl<'a, S, M> SearchCore<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    /// Wires a core to its collaborators.
    pub fn new(
        working: &'a mut S,
        recorder: &'a mut dyn SolutionRecorder<S>,
        moves: &'a mut M,
    ) -> Self {
        Self {
            working,
            recorder,
            moves,
            current_move: None,
            step: SearchStep::MOVE_MADE,
            iteration: 0,
            listeners: Subject::new(),
        }
    }

    /// The working solution.
    #[inline]
    pub fn working(&self) -> &S {
        self.working
    }

    /// Mutable access to the working solution.
    #[inline]
    pub fn working_mut(&mut self) -> &mut S {
        self.working
    }

    /// The move manager generating the neighborhood.
    #[inline]
    pub fn move_manager(&self) -> &M {
        self.moves
    }

    /// Mutable access to the move manager.
    #[inline]
    pub fn move_manager_mut(&mut self) -> &mut M {
        self.moves
    }

    /// The solution recorder offered each iteration's result.
    #[inline]
    pub fn recorder(&self) -> &dyn SolutionRecorder<S> {
        self.recorder
    }

    /// The move applied last, while the neighborhood it came from is
    /// still current.
    #[inline]
    pub fn current_move(&self) -> Option<&M::Move> {
        self.current_move.and_then(|i| self.moves.moves().get(i))
    }

    /// Index of the last applied move within the neighborhood.
    #[inline]
    pub fn current_move_index(&self) -> Option<usize> {
        self.current_move
    }

    /// The last step code set by the strategy.
    #[inline]
    pub fn step(&self) -> SearchStep {
        self.step
    }

    /// Sets the step code to publish next.
    #[inline]
    pub fn set_step(&mut self, step: SearchStep) {
        self.step = step;
    }

    /// Moves made since the search started.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// The listener subject of this search.
    #[inline]
    pub fn listeners(&self) -> &Subject<SearchEvent<S::Cost>> {
        &self.listeners
    }

    /// Attaches a listener.
    #[inline]
    pub fn attach<L>(&self, listener: L) -> ListenerId
    where
        L: SearchListener<SearchEvent<S::Cost>> + 'static,
    {
        self.listeners.attach(listener)
    }

    /// Detaches a listener.
    #[inline]
    pub fn detach(&self, id: ListenerId) -> bool {
        self.listeners.detach(id)
    }

    /// Rebuilds the neighborhood against the working solution and
    /// invalidates the current move.
    pub fn refresh_neighborhood(&mut self) {
        self.moves.refresh(&*self.working);
        self.current_move = None;
    }

    /// Applies the neighborhood move at `index` to the working
    /// solution, records it as current and counts the iteration.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the current neighborhood;
    /// selecting a move that does not exist is a programmer error.
    pub fn apply_move(&mut self, index: usize) {
        let mv = &self.moves.moves()[index];
        mv.apply(&mut *self.working);
        self.current_move = Some(index);
        self.step = SearchStep::MOVE_MADE;
        self.iteration += 1;
    }

    /// Offers the working solution to the recorder; true when it was
    /// recorded as an improvement.
    #[inline]
    pub fn offer_to_recorder(&mut self) -> bool {
        self.recorder.accept(&*self.working)
    }

    /// Publishes an event with the given step code and the current
    /// iteration and cost.
    pub fn publish(&self, step: SearchStep) {
        let event = SearchEvent {
            step,
            iteration: self.iteration,
            cost: self.working.cost(),
        };
        self.listeners.notify(&event);
    }

    /// Publishes an event with the stored step code.
    #[inline]
    pub fn notify(&self) {
        self.publish(self.step);
    }
}

impl<'a, S, M> fmt::Debug for SearchCore<'a, S, M>
where
    S: Solution,
    M: MoveManager<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCore")
            .field("iteration", &self.iteration)
            .field("step", &self.step)
            .field("neighborhood", &self.moves.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// An invocable search strategy.
///
/// `search` runs the strategy's loop to completion. The only declared
/// failure is [`NoMovesError`]: the strategy could not make a single
/// move.
pub trait Search {
    /// Runs the search. Remember that this is a minimization.
    fn search(&mut self) -> Result<(), NoMovesError>;
}
