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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

use serde::{Deserialize, Serialize};

/// The maximum number of courses a curriculum may comprise. Completion states
/// are encoded as one bit per course in a 32 bits word, and the planning
/// search visits up to `2^n` of these states. Past thirty courses the search
/// is intractable anyway, so compilation refuses the input upfront rather
/// than letting the search run away.
pub const MAX_COURSES: usize = 30;

// ----------------------------------------------------------------------------
// --- COURSE ID --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes one course from the curriculum at hand. Each course is
/// identified with an integer ranging from 0 until `curriculum.nb_courses()`,
/// assigned in input order when the curriculum is compiled and stable for the
/// whole lifetime of a planning run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CourseId(pub usize);
impl CourseId {
    #[inline]
    /// This function returns the id (numeric value) of the course.
    ///
    /// # Examples:
    /// ```
    /// # use malla::CourseId;
    /// assert_eq!(0, CourseId(0).id());
    /// assert_eq!(1, CourseId(1).id());
    /// assert_eq!(2, CourseId(2).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- STATUS -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The known completion status of one course, as recorded before planning
/// begins. Whatever interactive or persisted frontend collected the statuses
/// is an external collaborator; the core takes the tags at face value modulo
/// the consistency audit performed at compilation (see `Completions`).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The course was attempted and passed.
    Completed,
    /// The course was attempted and not passed.
    Failed,
    /// The course could not be attempted because some prerequisite is not
    /// completed.
    Blocked,
    /// Nothing is known about this course. This is the default.
    #[default]
    Unknown,
}

// ----------------------------------------------------------------------------
// --- COURSE -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One course of the curriculum, as described by the input. The name is the
/// course identity and must be unique; prerequisites refer to other courses
/// by name. The credit weight must be strictly positive. Both constraints
/// are enforced when the curriculum is compiled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// The unique name identifying this course.
    pub name: String,
    /// The credit weight of the course (strictly positive).
    pub credits: u32,
    /// The names of the courses that must be completed before this one can
    /// be taken.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// The known completion status of the course.
    #[serde(default)]
    pub status: Status,
}

// ----------------------------------------------------------------------------
// --- COURSE SET -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A set of courses encoded as one bit per course id. This is the type of
/// the completion states manipulated by the planners: bit i set means course
/// i is completed. Sets are small `Copy` values; every operation returns a
/// new set, none mutates in place (except `insert`, meant for building the
/// initial state).
///
/// # Examples:
/// ```
/// # use malla::{CourseId, CourseSet};
/// let mut set = CourseSet::empty();
/// set.insert(CourseId(0));
/// set.insert(CourseId(2));
///
/// assert!( set.contains(CourseId(0)));
/// assert!(!set.contains(CourseId(1)));
/// assert_eq!(2, set.len());
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CourseSet(u32);
impl CourseSet {
    /// Returns the empty set.
    pub fn empty() -> Self {
        CourseSet(0)
    }
    /// Returns the set comprising the `n` first courses. This is the target
    /// state of a planning run over an `n` courses curriculum.
    pub fn all(n: usize) -> Self {
        debug_assert!(n <= MAX_COURSES);
        CourseSet(((1_u64 << n) - 1) as u32)
    }
    /// Adds the given course to this set.
    pub fn insert(&mut self, c: CourseId) {
        self.0 |= 1 << c.id();
    }
    /// Returns true iff the given course belongs to this set.
    pub fn contains(self, c: CourseId) -> bool {
        self.0 & (1 << c.id()) != 0
    }
    /// Returns true iff every course of `other` belongs to this set.
    pub fn contains_all(self, other: CourseSet) -> bool {
        self.0 & other.0 == other.0
    }
    /// Returns the union of this set and `other`.
    pub fn union(self, other: CourseSet) -> CourseSet {
        CourseSet(self.0 | other.0)
    }
    /// Returns the set of courses belonging to this set but not to `other`.
    pub fn diff(self, other: CourseSet) -> CourseSet {
        CourseSet(self.0 & !other.0)
    }
    /// Returns the number of courses in this set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
    /// Returns true iff this set contains no course at all.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    /// Returns an iterator over the ids of the courses in this set, in
    /// ascending id order.
    pub fn iter(self) -> CourseSetIter {
        CourseSetIter { rest: self.0 }
    }
    /// Returns an iterator over every subset of this set (the set itself and
    /// the empty set included). Subsets are emitted in decreasing numeric
    /// order of their bit pattern, which guarantees that any strict superset
    /// of a subset is emitted before it. The planners rely on that order to
    /// fill their memo tables bottom-up.
    ///
    /// # Examples:
    /// ```
    /// # use malla::CourseSet;
    /// let set = CourseSet::all(2);
    /// let sizes = set.subsets().map(|s| s.len()).collect::<Vec<_>>();
    /// assert_eq!(vec![2, 1, 1, 0], sizes);
    /// ```
    pub fn subsets(self) -> SubsetIter {
        SubsetIter {
            universe: self.0,
            next: Some(self.0),
        }
    }
}

/// An iterator over the course ids of a `CourseSet`, in ascending id order.
#[derive(Copy, Clone, Debug)]
pub struct CourseSetIter {
    rest: u32,
}
impl Iterator for CourseSetIter {
    type Item = CourseId;

    fn next(&mut self) -> Option<CourseId> {
        if self.rest == 0 {
            None
        } else {
            let lowest = self.rest.trailing_zeros() as usize;
            self.rest &= self.rest - 1;
            Some(CourseId(lowest))
        }
    }
}

/// An iterator over every subset of a `CourseSet`, in decreasing numeric
/// order of the subsets bit patterns. This is the standard `(s - 1) & set`
/// subset walk.
#[derive(Copy, Clone, Debug)]
pub struct SubsetIter {
    universe: u32,
    next: Option<u32>,
}
impl Iterator for SubsetIter {
    type Item = CourseSet;

    fn next(&mut self) -> Option<CourseSet> {
        let current = self.next?;
        self.next = if current == 0 {
            None
        } else {
            Some((current - 1) & self.universe)
        };
        Some(CourseSet(current))
    }
}

// ----------------------------------------------------------------------------
// --- VERDICT ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a planning run. `Infeasible` and `BudgetExceeded` are
/// ordinary values, not errors: both are expected, frequent outcomes of
/// perfectly valid input, and they must never be conflated (an aborted
/// search proves nothing about completability).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Verdict {
    /// The curriculum can be completed, and this is the minimum number of
    /// additional terms it takes.
    Feasible(usize),
    /// No sequence of feasible term loads ever reaches full completion.
    Infeasible,
    /// The search was aborted by the configured cutoff before it could
    /// conclude anything.
    BudgetExceeded,
}

#[cfg(test)]
mod test_course_set {
    use crate::*;

    #[test]
    fn all_yields_the_n_first_courses() {
        let set = CourseSet::all(3);
        assert!(set.contains(CourseId(0)));
        assert!(set.contains(CourseId(1)));
        assert!(set.contains(CourseId(2)));
        assert!(!set.contains(CourseId(3)));
        assert_eq!(3, set.len());
    }
    #[test]
    fn all_zero_is_empty() {
        assert!(CourseSet::all(0).is_empty());
    }
    #[test]
    fn all_supports_the_capacity_bound() {
        assert_eq!(MAX_COURSES, CourseSet::all(MAX_COURSES).len());
    }
    #[test]
    fn union_and_diff_are_set_operations() {
        let mut a = CourseSet::empty();
        a.insert(CourseId(0));
        a.insert(CourseId(1));
        let mut b = CourseSet::empty();
        b.insert(CourseId(1));
        b.insert(CourseId(2));

        assert_eq!(3, a.union(b).len());
        assert_eq!(1, a.diff(b).len());
        assert!(a.diff(b).contains(CourseId(0)));
    }
    #[test]
    fn contains_all_is_the_superset_test() {
        let target = CourseSet::all(4);
        let mut part = CourseSet::empty();
        part.insert(CourseId(1));
        part.insert(CourseId(3));

        assert!(target.contains_all(part));
        assert!(!part.contains_all(target));
        assert!(part.contains_all(CourseSet::empty()));
    }
    #[test]
    fn iter_yields_ids_in_ascending_order() {
        let mut set = CourseSet::empty();
        set.insert(CourseId(4));
        set.insert(CourseId(0));
        set.insert(CourseId(2));

        let ids = set.iter().map(CourseId::id).collect::<Vec<_>>();
        assert_eq!(vec![0, 2, 4], ids);
    }
    #[test]
    fn subsets_enumerates_the_full_powerset() {
        let set = CourseSet::all(3);
        assert_eq!(8, set.subsets().count());
    }
    #[test]
    fn subsets_emits_supersets_before_their_subsets() {
        let set = CourseSet::all(4);
        let order = set.subsets().collect::<Vec<_>>();
        for (i, small) in order.iter().enumerate() {
            for big in &order[..i] {
                assert!(!small.contains_all(*big) || small == big);
            }
        }
    }
    #[test]
    fn subsets_of_the_empty_set_is_the_empty_set() {
        let subsets = CourseSet::empty().subsets().collect::<Vec<_>>();
        assert_eq!(vec![CourseSet::empty()], subsets);
    }
}
