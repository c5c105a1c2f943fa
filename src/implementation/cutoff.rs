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

//! This module provides the implementation of the various cutoff policies
//! that can be used to bound the work a planner is allowed to perform.

use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

use crate::Cutoff;

/// _This is the default cutoff policy._ It never stops the search: the
/// planner runs until it has an answer.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self, _explored: usize) -> bool {
        false
    }
}

/// This cutoff allows one to specify a maximum time budget to plan the
/// curriculum. Once the time budget is elapsed, the search stops and the
/// planner returns `Verdict::BudgetExceeded`.
///
/// # Example
/// ```
/// # use malla::*;
/// use std::time::Duration;
///
/// let courses = vec![Course {
///     name: "algebra".to_string(),
///     credits: 4,
///     prerequisites: vec![],
///     status: Status::Unknown,
/// }];
/// let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
/// let cutoff = TimeBudget::new(Duration::from_secs(10));
/// let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
/// let verdict = planner.minimize(); // will run for maximum 10 seconds
/// assert_eq!(Verdict::Feasible(1), verdict);
/// ```
#[derive(Debug, Clone)]
pub struct TimeBudget {
    stop: Arc<AtomicBool>,
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let t_flag = Arc::clone(&stop);

        // timer
        std::thread::spawn(move || {
            std::thread::sleep(budget);
            t_flag.store(true, std::sync::atomic::Ordering::Relaxed);
        });

        TimeBudget { stop }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self, _explored: usize) -> bool {
        self.stop.load(std::sync::atomic::Ordering::Relaxed)
    }
}

/// This cutoff stops the search once the given number of completion states
/// has been evaluated. Unlike `TimeBudget`, it makes the abort point
/// deterministic, which is the variant you want when reproducibility
/// matters more than wall-clock fairness.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget(pub usize);
impl Cutoff for NodeBudget {
    fn must_stop(&self, explored: usize) -> bool {
        explored >= self.0
    }
}
