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

//! This module defines the `Planner` trait.

use crate::Verdict;

/// This is the planner abstraction. It is implemented by a structure that
/// searches, over the state space of completion bitmasks, for the minimum
/// number of additional terms required to complete a curriculum under a
/// per-term credit cap. A planner can only be instantiated from a compiled
/// `Curriculum`, so a planner never runs over an unvalidated course set.
pub trait Planner {
    /// This method orders the planner to search for the minimum number of
    /// additional terms among all possible course load sequences. It returns
    /// a `Verdict` standing for the outcome of the attempted minimization:
    ///
    /// * `Verdict::Feasible(terms)` when the curriculum can be completed and
    ///   `terms` is the minimum number of additional terms it takes;
    /// * `Verdict::Infeasible` when the search completed and proved that no
    ///   sequence of feasible term loads ever reaches full completion;
    /// * `Verdict::BudgetExceeded` when the configured cutoff criterion was
    ///   met before the search could conclude anything. This outcome says
    ///   nothing about the completability of the curriculum.
    fn minimize(&mut self) -> Verdict;
    /// This method returns the verdict of the last `minimize` call, or
    /// `None` when the planner has not run yet.
    fn best_verdict(&self) -> Option<Verdict>;
    /// Returns the number of completion states whose value has effectively
    /// been computed so far. Node-count budgets are expressed against this
    /// counter.
    fn explored(&self) -> usize;
}
