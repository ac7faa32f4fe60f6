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

/// Error returned by a search strategy that cannot make a single move.
///
/// This is the one expected runtime failure of a search invocation:
/// the neighborhood came back empty (or, for tabu search, entirely
/// inadmissible) and the strategy has no way to proceed. Callers catch
/// it to terminate cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoMovesError {
    message: &'static str,
}

impl NoMovesError {
    /// Creates the error with the default message.
    #[inline]
    pub fn new() -> Self {
        Self {
            message: "There are no more available moves",
        }
    }

    /// Creates the error with a strategy-specific message.
    #[inline]
    pub fn with_message(message: &'static str) -> Self {
        Self { message }
    }

    /// The human-readable reason.
    #[inline]
    pub fn message(&self) -> &str {
        self.message
    }
}

impl Default for NoMovesError {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoMovesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NoMovesError {}
