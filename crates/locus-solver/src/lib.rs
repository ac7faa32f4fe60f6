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

//! The search substrate of the locus framework.
//!
//! Concrete problems plug a cost function and a move definition into
//! this crate's machinery: moves and neighborhoods
//! ([`search::moves`], [`search::neighborhood`]), best-solution
//! recording ([`search::recorder`]), listener notification
//! ([`monitor::observer`]) and the shared driver state strategies
//! build on ([`search::driver`]). Ready-made strategies live in
//! [`meta`].

pub mod meta;
pub mod monitor;
pub mod search;

pub mod prelude {
    pub use crate::meta::local_search::LocalSearch;
    pub use crate::meta::tabu::{
        AspirationCriteria, BestEverCriteria, SimpleTabuList, TabuList, TabuSearch,
    };
    pub use crate::monitor::observer::{ListenerId, SearchListener, Subject};
    pub use crate::monitor::termination::{
        CompositeTermination, CostThreshold, IterationLimit, NoImprovementLimit,
        TerminationCriteria,
    };
    pub use crate::search::driver::{Search, SearchCore, SearchEvent, SearchStep};
    pub use crate::search::err::NoMovesError;
    pub use crate::search::move_library::{InvertSubsequence, SwapElements};
    pub use crate::search::moves::{Move, MoveKey, TabuMove};
    pub use crate::search::neighborhood::{FullSwapNeighborhood, MoveManager, SwapNeighborhood};
    pub use crate::search::recorder::{BestEverSolution, RecorderChain, SolutionRecorder};
}
