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

/// Error raised when a vector does not contain every integer in
/// `[0, len)` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidPermutationError {
    len: usize,
    offending_value: usize,
}

impl InvalidPermutationError {
    #[inline]
    pub fn new(len: usize, offending_value: usize) -> Self {
        Self {
            len,
            offending_value,
        }
    }

    /// The length of the rejected vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the rejected vector was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first value found out of range or duplicated.
    #[inline]
    pub fn offending_value(&self) -> usize {
        self.offending_value
    }
}

impl std::fmt::Display for InvalidPermutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Value {} is out of range or duplicated for a permutation of {{0, ..., {}}}",
            self.offending_value,
            self.len.saturating_sub(1)
        )
    }
}

impl std::error::Error for InvalidPermutationError {}
