// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the planner implementations.

mod parallel;
mod sequential;

pub use parallel::*;
pub use sequential::*;

use crate::Verdict;

/// The sentinel value standing for "this state can never reach full
/// completion". Candidate costs are combined with `saturating_add` so the
/// sentinel absorbs any number of additional terms.
pub(crate) const INFINITE: usize = usize::MAX;

/// How many enumerated term loads go between two cutoff checks inside the
/// evaluation of a single state. Both planners use the same stride.
pub(crate) const CUTOFF_STRIDE: usize = 4096;

/// Maps a computed state value onto the verdict reported to the caller.
pub(crate) fn verdict_of(terms: usize) -> Verdict {
    if terms == INFINITE {
        Verdict::Infeasible
    } else {
        Verdict::Feasible(terms)
    }
}
