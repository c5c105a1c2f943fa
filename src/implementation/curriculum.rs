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

//! This module provides the compilation of a raw course list into a
//! `Curriculum`: the validated, bitmask-ready form of the input which the
//! planners consume. Compilation is the gate in front of the search: it
//! enforces the capacity bound, the input-integrity rules, the prerequisite
//! name resolution policy, the acyclicity of the prerequisite graph and the
//! consistency of the recorded completion statuses. There is no way to
//! instantiate a planner over a course set that did not go through it.

use fxhash::FxHashMap;

use crate::implementation::validator::depth_first_order;
use crate::{Course, CourseId, CourseSet, Status, MAX_COURSES};

// ----------------------------------------------------------------------------
// --- COMPILATION POLICIES ---------------------------------------------------
// ----------------------------------------------------------------------------
/// What to do with a prerequisite name that does not resolve to any course
/// of the given set (typically a requirement inherited from a previous
/// degree). The choice is explicit configuration; it is never decided
/// silently.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum UnknownPrereqs {
    /// Reject the input with `CompileError::UnknownPrerequisite`. This is
    /// the default.
    #[default]
    Deny,
    /// Keep the course but treat the unresolved requirement as permanently
    /// blocking: the course can never become available to the planner.
    Block,
    /// Drop the dangling reference as if it had not been written.
    Ignore,
}

/// What to do with a course recorded as completed while one of its
/// prerequisites is not (a data-entry inconsistency which the upstream
/// collaborator is supposed to prevent).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Completions {
    /// Audit the recorded statuses and reject inconsistent input with
    /// `CompileError::InconsistentState`. This is the default.
    #[default]
    Validate,
    /// Take the completion flags at face value.
    Trust,
}

/// The compilation configuration: one field per policy decision left open
/// by the data model. The default configuration is the strict one, it
/// rejects anything dubious.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileConfig {
    /// Policy for prerequisite names resolving to no course of the set.
    pub unknown_prereqs: UnknownPrereqs,
    /// Policy for courses recorded completed with unmet prerequisites.
    pub completions: Completions,
}

// ----------------------------------------------------------------------------
// --- COMPILE ERROR ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// The ways a course list can be refused by compilation. All of these are
/// structural: they abort the pipeline before any search cost is paid. Note
/// that an uncompletable-but-well-formed curriculum is *not* an error; it
/// compiles fine and the planner reports `Verdict::Infeasible`.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The curriculum counts more courses than a completion bitmask can
    /// encode (and than the search could ever explore).
    #[error("curriculum counts {courses} courses but at most {limit} are supported")]
    CapacityExceeded { courses: usize, limit: usize },
    /// Two courses carry the same name. The name is the course identity, so
    /// the input is ambiguous.
    #[error("course '{0}' is defined more than once")]
    DuplicateCourse(String),
    /// A course carries a zero credit weight.
    #[error("course '{0}' has a zero credit weight")]
    ZeroCredits(String),
    /// A prerequisite name resolves to no course of the set, under the
    /// `UnknownPrereqs::Deny` policy.
    #[error("course '{course}' requires '{prerequisite}' which is not a course of this curriculum")]
    UnknownPrerequisite { course: String, prerequisite: String },
    /// The prerequisite graph is not acyclic. The reported course is one
    /// course sitting on the offending cycle.
    #[error("the prerequisites of course '{0}' form a cycle")]
    CycleDetected(String),
    /// A course is recorded completed while one of its prerequisites is
    /// not, under the `Completions::Validate` policy.
    #[error("course '{0}' is marked completed but some prerequisite is not")]
    InconsistentState(String),
}

// ----------------------------------------------------------------------------
// --- CURRICULUM -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A compiled curriculum: the course list with every prerequisite resolved
/// to a bitmask, the acyclicity of the prerequisite relation proved, and the
/// initial completion state extracted from the recorded statuses. This is
/// the read-only instance data shared by every planner run.
///
/// # Example
/// ```
/// # use malla::*;
/// let courses = vec![
///     Course {
///         name: "algebra".to_string(),
///         credits: 4,
///         prerequisites: vec![],
///         status: Status::Completed,
///     },
///     Course {
///         name: "calculus".to_string(),
///         credits: 5,
///         prerequisites: vec!["algebra".to_string()],
///         status: Status::Unknown,
///     },
/// ];
/// let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
///
/// assert_eq!(2, curriculum.nb_courses());
/// assert_eq!(1, curriculum.initial_state().len());
/// // algebra is done, so calculus is available from the initial state
/// assert!(curriculum.available(curriculum.initial_state()).contains(CourseId(1)));
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Curriculum {
    /// The input courses, in input order. `CourseId(i)` denotes `courses[i]`.
    courses: Vec<Course>,
    /// For each course, the set of courses that must be completed before it
    /// can be taken.
    prereqs: Vec<CourseSet>,
    /// The courses carrying an unresolved external requirement under the
    /// `UnknownPrereqs::Block` policy. These can never become available.
    external: CourseSet,
    /// The set of courses recorded completed: the initial state of every
    /// planning run over this curriculum.
    initial: CourseSet,
    /// A topological ordering of the prerequisite graph, prerequisites
    /// first. Informational: used for diagnostics and deterministic
    /// reporting, not required for the correctness of the search.
    topo: Vec<CourseId>,
}

impl Curriculum {
    /// Compiles the given course list under the given configuration. The
    /// checks are performed in a fixed order and the first violation aborts
    /// compilation: capacity bound, name uniqueness and credit positivity,
    /// prerequisite resolution (per the `UnknownPrereqs` policy), cycle
    /// detection, and finally the completion-status audit (per the
    /// `Completions` policy).
    pub fn compile(courses: Vec<Course>, config: CompileConfig) -> Result<Self, CompileError> {
        let n = courses.len();
        if n > MAX_COURSES {
            return Err(CompileError::CapacityExceeded {
                courses: n,
                limit: MAX_COURSES,
            });
        }

        let mut prereqs = vec![CourseSet::empty(); n];
        let mut dependents = vec![vec![]; n];
        let mut external = CourseSet::empty();
        {
            let mut index: FxHashMap<&str, usize> = FxHashMap::default();
            for (i, course) in courses.iter().enumerate() {
                if course.credits == 0 {
                    return Err(CompileError::ZeroCredits(course.name.clone()));
                }
                if index.insert(course.name.as_str(), i).is_some() {
                    return Err(CompileError::DuplicateCourse(course.name.clone()));
                }
            }
            for (i, course) in courses.iter().enumerate() {
                for prereq in course.prerequisites.iter() {
                    match index.get(prereq.as_str()) {
                        Some(&p) => {
                            prereqs[i].insert(CourseId(p));
                            dependents[p].push(i);
                        }
                        None => match config.unknown_prereqs {
                            UnknownPrereqs::Deny => {
                                return Err(CompileError::UnknownPrerequisite {
                                    course: course.name.clone(),
                                    prerequisite: prereq.clone(),
                                })
                            }
                            UnknownPrereqs::Block => external.insert(CourseId(i)),
                            UnknownPrereqs::Ignore => {}
                        },
                    }
                }
            }
        }

        let topo = depth_first_order(&dependents)
            .map_err(|c| CompileError::CycleDetected(courses[c.id()].name.clone()))?;

        let mut initial = CourseSet::empty();
        for (i, course) in courses.iter().enumerate() {
            if course.status == Status::Completed {
                initial.insert(CourseId(i));
            }
        }
        if config.completions == Completions::Validate {
            for i in initial.iter() {
                // external requirements are out of the audit's scope: they
                // were necessarily met when the course was taken
                if !initial.contains_all(prereqs[i.id()]) {
                    return Err(CompileError::InconsistentState(
                        courses[i.id()].name.clone(),
                    ));
                }
            }
        }

        Ok(Curriculum {
            courses,
            prereqs,
            external,
            initial,
            topo,
        })
    }

    /// Returns the number of courses in this curriculum.
    pub fn nb_courses(&self) -> usize {
        self.courses.len()
    }
    /// Returns the course identified by the given id.
    pub fn course(&self, c: CourseId) -> &Course {
        &self.courses[c.id()]
    }
    /// Returns the unique name of the given course.
    pub fn name(&self, c: CourseId) -> &str {
        &self.courses[c.id()].name
    }
    /// Returns the credit weight of the given course.
    pub fn credits(&self, c: CourseId) -> u32 {
        self.courses[c.id()].credits
    }
    /// Returns the total credit weight of a set of courses taken together.
    /// The sum is widened to `u64` so that it cannot wrap, no matter the
    /// individual weights.
    pub fn load_credits(&self, load: CourseSet) -> u64 {
        load.iter().map(|c| u64::from(self.credits(c))).sum()
    }
    /// Returns the set of prerequisites of the given course.
    pub fn prerequisites(&self, c: CourseId) -> CourseSet {
        self.prereqs[c.id()]
    }
    /// Returns the initial completion state: the set of courses recorded
    /// completed before planning begins.
    pub fn initial_state(&self) -> CourseSet {
        self.initial
    }
    /// Returns the target completion state: every course of the curriculum.
    pub fn target_state(&self) -> CourseSet {
        CourseSet::all(self.courses.len())
    }
    /// Returns a topological ordering of the courses, prerequisites before
    /// dependents. This ordering is informational; the planners do not need
    /// it to be correct.
    pub fn topological_order(&self) -> &[CourseId] {
        &self.topo
    }
    /// Returns the available set of the given completion state: the courses
    /// not yet completed whose every prerequisite is completed, and which no
    /// external requirement blocks. These are the courses a term load may be
    /// drawn from in that state.
    pub fn available(&self, state: CourseSet) -> CourseSet {
        let mut avail = CourseSet::empty();
        for (i, &prereqs) in self.prereqs.iter().enumerate() {
            let c = CourseId(i);
            if !state.contains(c) && !self.external.contains(c) && state.contains_all(prereqs) {
                avail.insert(c);
            }
        }
        avail
    }
    /// Returns the effective status of the given course: `Completed` if it
    /// is recorded completed, `Blocked` if it cannot currently be taken
    /// (some prerequisite incomplete, or an external requirement under the
    /// `UnknownPrereqs::Block` policy), and the recorded status otherwise.
    pub fn effective_status(&self, c: CourseId) -> Status {
        if self.initial.contains(c) {
            Status::Completed
        } else if self.external.contains(c) || !self.initial.contains_all(self.prereqs[c.id()]) {
            Status::Blocked
        } else {
            self.courses[c.id()].status
        }
    }
}
