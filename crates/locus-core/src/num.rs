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

use num_traits::{Bounded, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// The scalar type used for solution costs.
///
/// Searches minimize this value. Real-valued costs (`f64`) are the
/// default choice; problems whose objective is integral can pick an
/// integer scalar instead and get exact comparisons for free. The
/// choice is made per problem through the solution's associated cost
/// type, not through a global alias.
///
/// # Note
///
/// `slack()` is the comparison tolerance of the type: two costs closer
/// than the slack are considered indistinguishable. It is zero for
/// integer scalars.
pub trait SolverCost:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Zero
    + Bounded
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Comparison slack under which two costs are indistinguishable.
    fn slack() -> Self;

    /// Returns `true` when `self` is strictly lower than `other` by
    /// more than the comparison slack.
    #[inline]
    fn improves(self, other: Self) -> bool {
        self < other - Self::slack()
    }
}

impl SolverCost for f64 {
    #[inline]
    fn slack() -> Self {
        1e-9
    }
}

impl SolverCost for f32 {
    #[inline]
    fn slack() -> Self {
        1e-5
    }
}

impl SolverCost for i32 {
    #[inline]
    fn slack() -> Self {
        0
    }
}

impl SolverCost for i64 {
    #[inline]
    fn slack() -> Self {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_improvement_respects_slack() {
        assert!(9.0f64.improves(10.0));
        assert!(!10.0f64.improves(10.0));
        // Differences below the slack are not improvements.
        assert!(!(10.0f64 - 1e-12).improves(10.0));
    }

    #[test]
    fn test_integer_improvement_is_strict_comparison() {
        assert!(9i64.improves(10));
        assert!(!10i64.improves(10));
        assert!(!11i64.improves(10));
    }

    #[test]
    fn test_max_value_never_improved_upon_by_itself() {
        let max = <f64 as Bounded>::max_value();
        assert!(!max.improves(max));
        assert!(0.0f64.improves(max));
    }
}
