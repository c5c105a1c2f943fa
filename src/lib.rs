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

//! # Malla
//! Malla computes the minimum number of additional academic terms required
//! to finish a curriculum, given a set of courses with credit weights and
//! prerequisite relationships, a per-term credit cap, and the completion
//! status of the courses already attempted.
//!
//! The work happens in two stages, used in sequence:
//!
//! 1. **Compilation** (`Curriculum::compile`) builds the prerequisite graph,
//!    proves it acyclic (producing a topological ordering for diagnostics)
//!    and extracts the initial completion state from the recorded statuses.
//!    Anything structurally wrong with the input (too many courses, dangling
//!    prerequisite names, cycles, inconsistent completion flags) is rejected
//!    here, before any search cost is paid.
//! 2. **Planning** (`SequentialPlanner` or `ParallelPlanner`) runs a
//!    memoized search over the completion bitmask states: in every state,
//!    the eligible course subsets whose total credit weight fits the cap are
//!    the possible term loads, and the minimum number of terms to the
//!    all-completed state is computed bottom-up.
//!
//! ## Side benefit
//! As a side benefit from using `malla`, you will be able to exploit all of
//! your hardware: the `ParallelPlanner` evaluates the states of each
//! generation concurrently and agrees with the sequential engine on every
//! input.
//!
//! ## Quick Example
//! The following solves a three-courses curriculum where nothing has been
//! passed yet: `calculus` requires `algebra`, `physics` stands alone, and a
//! term may hold nine credits.
//! ```
//! use malla::*;
//!
//! let courses = vec![
//!     Course {
//!         name: "algebra".to_string(),
//!         credits: 4,
//!         prerequisites: vec![],
//!         status: Status::Unknown,
//!     },
//!     Course {
//!         name: "calculus".to_string(),
//!         credits: 5,
//!         prerequisites: vec!["algebra".to_string()],
//!         status: Status::Unknown,
//!     },
//!     Course {
//!         name: "physics".to_string(),
//!         credits: 4,
//!         prerequisites: vec![],
//!         status: Status::Unknown,
//!     },
//! ];
//!
//! // 1. Compile the course list. This is where cycles, dangling
//! //    prerequisite names and inconsistent statuses would be caught.
//! let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
//!
//! // 2. Decide of a cutoff policy (if you don't want to let the planner
//! //    run for ever on a pathological input).
//! let cutoff = NoCutoff; // might as well be a TimeBudget (or something else)
//!
//! // 3. Instantiate your planner and minimize the number of terms.
//! let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
//! let verdict = planner.minimize();
//!
//! // algebra + physics fit a first term, calculus takes a second one
//! assert_eq!(Verdict::Feasible(2), verdict);
//! ```

mod abstraction;
mod common;
mod implementation;

pub use abstraction::*;
pub use common::*;
pub use implementation::*;
