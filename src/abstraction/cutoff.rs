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

//! This module defines the `Cutoff` trait.

/// This trait encapsulates a criterion (external to the planner) which
/// imposes to stop searching before an answer has been found. Typically,
/// this is done to grant a given time or work budget to the search: inputs
/// close to the capacity bound can otherwise take impractically long, and a
/// planner embedded in an interactive system must fail with
/// `Verdict::BudgetExceeded` rather than hang indefinitely.
pub trait Cutoff {
    /// Returns true iff the criterion is met and the search must stop.
    /// `explored` is the number of completion states evaluated so far, as
    /// reported by `Planner::explored`.
    fn must_stop(&self, explored: usize) -> bool;
}
