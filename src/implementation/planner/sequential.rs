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

//! This module provides the implementation of a sequential planner. That is
//! a planner that will compute the minimum number of terms using one single
//! thread of execution. This is the implementation you want for small
//! inputs or constrained environments; for curricula close to the capacity
//! bound you might prefer the `ParallelPlanner`.

use fxhash::FxHashMap;

use super::{verdict_of, CUTOFF_STRIDE, INFINITE};
use crate::{CourseSet, Curriculum, Cutoff, Planner, Verdict};

/// This is the structure implementing a single-threaded planner. It fills a
/// mapping `state -> minimum terms remaining` bottom-up: the completion
/// states are the supersets of the initial state, and they are walked in
/// decreasing numeric order of their bit pattern, so the value of every
/// strict superset of a state is already known when the state is evaluated.
/// There is no recursion anywhere, and the mapping lives and dies with one
/// `minimize` call: nothing leaks from one run to the next.
///
/// # Example Usage
/// ```
/// # use malla::*;
/// let courses = vec![
///     Course {
///         name: "algebra".to_string(),
///         credits: 3,
///         prerequisites: vec![],
///         status: Status::Unknown,
///     },
///     Course {
///         name: "calculus".to_string(),
///         credits: 3,
///         prerequisites: vec!["algebra".to_string()],
///         status: Status::Unknown,
///     },
/// ];
/// let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
/// let cutoff = NoCutoff;
/// let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
///
/// // calculus only unlocks once algebra is passed, so two terms it is
/// assert_eq!(Verdict::Feasible(2), planner.minimize());
/// ```
pub struct SequentialPlanner<'a> {
    /// A reference to the compiled curriculum being planned.
    curriculum: &'a Curriculum,
    /// The maximum total credit weight of one term's course load.
    credit_cap: u32,
    /// A cutoff policy meant to decide when to give up on the search.
    cutoff: &'a (dyn Cutoff),
    /// This is a counter that tracks the number of completion states that
    /// have effectively been evaluated.
    explored: usize,
    /// If set, this keeps the outcome of the last `minimize` call.
    verdict: Option<Verdict>,
}

impl<'a> SequentialPlanner<'a> {
    pub fn new(curriculum: &'a Curriculum, credit_cap: u32, cutoff: &'a dyn Cutoff) -> Self {
        SequentialPlanner {
            curriculum,
            credit_cap,
            cutoff,
            explored: 0,
            verdict: None,
        }
    }

    /// Evaluates one completion state, given the memo holding the value of
    /// every strict superset of that state. The value is the minimum over
    /// all feasible term loads of `1 + value(state | load)`, the sentinel
    /// when the available set is empty or no subset of it fits the cap.
    fn evaluate(
        &self,
        state: CourseSet,
        memo: &FxHashMap<CourseSet, usize>,
        ticker: &mut usize,
    ) -> Option<usize> {
        let available = self.curriculum.available(state);
        if available.is_empty() {
            // dead end: the remaining courses can never be unlocked
            return Some(INFINITE);
        }
        let mut best = INFINITE;
        for load in available.subsets() {
            *ticker += 1;
            if *ticker % CUTOFF_STRIDE == 0 && self.cutoff.must_stop(self.explored) {
                return None;
            }
            if load.is_empty() || self.curriculum.load_credits(load) > u64::from(self.credit_cap) {
                continue;
            }
            let after = memo.get(&state.union(load)).copied().unwrap_or(INFINITE);
            best = best.min(after.saturating_add(1));
        }
        Some(best)
    }
}

impl Planner for SequentialPlanner<'_> {
    fn minimize(&mut self) -> Verdict {
        self.explored = 0;
        let initial = self.curriculum.initial_state();
        let target = self.curriculum.target_state();
        let free = target.diff(initial);

        // the memo is owned by this call: created here, dropped on return
        let mut memo: FxHashMap<CourseSet, usize> = FxHashMap::default();
        let mut ticker = 0;
        let mut aborted = false;

        for subset in free.subsets() {
            if self.cutoff.must_stop(self.explored) {
                aborted = true;
                break;
            }
            let state = initial.union(subset);
            let value = if state == target {
                0
            } else {
                match self.evaluate(state, &memo, &mut ticker) {
                    Some(value) => value,
                    None => {
                        aborted = true;
                        break;
                    }
                }
            };
            memo.insert(state, value);
            self.explored += 1;
        }

        let verdict = if aborted {
            Verdict::BudgetExceeded
        } else {
            verdict_of(memo.get(&initial).copied().unwrap_or(INFINITE))
        };
        self.verdict = Some(verdict);
        verdict
    }

    fn best_verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    fn explored(&self) -> usize {
        self.explored
    }
}

#[cfg(test)]
mod test_sequential {
    use crate::*;

    fn course(name: &str, credits: u32, prereqs: &[&str], status: Status) -> Course {
        Course {
            name: name.to_string(),
            credits,
            prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
            status,
        }
    }
    fn curriculum(courses: Vec<Course>) -> Curriculum {
        Curriculum::compile(courses, CompileConfig::default()).unwrap()
    }

    #[test]
    fn by_default_no_verdict_is_known() {
        let curriculum = curriculum(vec![course("a", 3, &[], Status::Unknown)]);
        let cutoff = NoCutoff;
        let planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        assert_eq!(None, planner.best_verdict());
        assert_eq!(0, planner.explored());
    }
    #[test]
    fn an_already_completed_curriculum_takes_zero_terms() {
        let curriculum = curriculum(vec![course("a", 3, &[], Status::Completed)]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        assert_eq!(Verdict::Feasible(0), planner.minimize());
    }
    #[test]
    fn an_empty_curriculum_takes_zero_terms() {
        let curriculum = curriculum(vec![]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        assert_eq!(Verdict::Feasible(0), planner.minimize());
    }
    #[test]
    fn the_whole_state_space_is_explored() {
        let curriculum = curriculum(vec![
            course("a", 3, &[], Status::Unknown),
            course("b", 3, &[], Status::Unknown),
            course("c", 3, &[], Status::Unknown),
        ]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        planner.minimize();
        assert_eq!(8, planner.explored());
    }
    #[test]
    fn completed_courses_shrink_the_state_space() {
        let curriculum = curriculum(vec![
            course("a", 3, &[], Status::Completed),
            course("b", 3, &[], Status::Unknown),
        ]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        planner.minimize();
        assert_eq!(2, planner.explored());
    }
    #[test]
    fn a_course_wider_than_the_cap_is_infeasible() {
        let curriculum = curriculum(vec![course("x", 10, &[], Status::Unknown)]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        assert_eq!(Verdict::Infeasible, planner.minimize());
    }
    #[test]
    fn minimize_is_idempotent() {
        let curriculum = curriculum(vec![
            course("a", 4, &[], Status::Unknown),
            course("b", 5, &[], Status::Unknown),
            course("c", 3, &["a"], Status::Unknown),
        ]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        let first = planner.minimize();
        let second = planner.minimize();
        assert_eq!(first, second);
        assert_eq!(Some(first), planner.best_verdict());
    }
    #[test]
    fn an_exhausted_budget_aborts_the_search() {
        let curriculum = curriculum(vec![
            course("a", 3, &[], Status::Unknown),
            course("b", 3, &[], Status::Unknown),
        ]);
        let cutoff = NodeBudget(0);
        let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
        assert_eq!(Verdict::BudgetExceeded, planner.minimize());
    }
    #[test]
    fn slack_capacity_does_not_bypass_prerequisites() {
        let curriculum = curriculum(vec![
            course("a", 3, &[], Status::Unknown),
            course("b", 3, &["a"], Status::Unknown),
            course("c", 3, &["b"], Status::Unknown),
        ]);
        let cutoff = NoCutoff;
        let mut planner = SequentialPlanner::new(&curriculum, 99, &cutoff);
        assert_eq!(Verdict::Feasible(3), planner.minimize());
    }
}
