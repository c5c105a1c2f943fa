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

//! This module is meant to test the correctness of the whole pipeline on
//! small curricula with known answers. Each scenario is solved with both
//! planning engines, which must agree.

use malla::*;

fn course(name: &str, credits: u32, prereqs: &[&str], status: Status) -> Course {
    Course {
        name: name.to_string(),
        credits,
        prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
        status,
    }
}

fn solve(courses: Vec<Course>, credit_cap: u32) -> Verdict {
    let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
    let cutoff = NoCutoff;

    let mut sequential = SequentialPlanner::new(&curriculum, credit_cap, &cutoff);
    let mut parallel = ParallelPlanner::new(&curriculum, credit_cap, &cutoff);
    let verdict = sequential.minimize();
    assert_eq!(verdict, parallel.minimize());
    verdict
}

#[test]
fn three_independent_courses_fit_one_term() {
    let courses = vec![
        course("a", 3, &[], Status::Unknown),
        course("b", 3, &[], Status::Unknown),
        course("c", 3, &[], Status::Unknown),
    ];
    assert_eq!(Verdict::Feasible(1), solve(courses, 9));
}

#[test]
fn a_strict_chain_unlocks_one_course_per_term() {
    let courses = vec![
        course("a", 3, &[], Status::Unknown),
        course("b", 3, &["a"], Status::Unknown),
        course("c", 3, &["b"], Status::Unknown),
    ];
    // slack capacity does not help, only one course is ever available
    assert_eq!(Verdict::Feasible(3), solve(courses, 9));
}

#[test]
fn a_course_exceeding_the_cap_makes_the_curriculum_infeasible() {
    let courses = vec![course("x", 10, &[], Status::Unknown)];
    assert_eq!(Verdict::Infeasible, solve(courses, 9));
}

#[test]
fn huge_credit_weights_do_not_wrap_around_the_cap() {
    // the two weights together do not fit a u32, and a sum wrapping to 0
    // would slip the forbidden two-course load under the cap
    let courses = vec![
        course("a", 2_147_483_648, &[], Status::Unknown),
        course("b", 2_147_483_648, &[], Status::Unknown),
    ];
    assert_eq!(Verdict::Infeasible, solve(courses, 9));
}

#[test]
fn mutually_required_courses_are_a_cycle() {
    let courses = vec![
        course("a", 3, &["b"], Status::Unknown),
        course("b", 3, &["a"], Status::Unknown),
    ];
    let result = Curriculum::compile(courses, CompileConfig::default());
    assert!(matches!(result, Err(CompileError::CycleDetected(_))));
}

#[test]
fn completed_courses_are_not_replanned() {
    let courses = vec![
        course("a", 4, &[], Status::Completed),
        course("b", 5, &[], Status::Unknown),
    ];
    assert_eq!(Verdict::Feasible(1), solve(courses, 9));
}

#[test]
fn the_cap_forces_a_split_between_independent_courses() {
    let courses = vec![
        course("a", 5, &[], Status::Unknown),
        course("b", 5, &[], Status::Unknown),
        course("c", 5, &[], Status::Unknown),
    ];
    // 5 + 5 > 9, so no two courses ever share a term
    assert_eq!(Verdict::Feasible(3), solve(courses, 9));
}

#[test]
fn a_diamond_takes_three_terms_under_a_tight_cap() {
    let courses = vec![
        course("base", 4, &[], Status::Unknown),
        course("left", 4, &["base"], Status::Unknown),
        course("right", 4, &["base"], Status::Unknown),
        course("top", 4, &["left", "right"], Status::Unknown),
    ];
    // base | left + right | top
    assert_eq!(Verdict::Feasible(3), solve(courses, 9));
}

#[test]
fn a_failed_course_must_be_taken_again() {
    let courses = vec![
        course("a", 4, &[], Status::Failed),
        course("b", 5, &["a"], Status::Unknown),
    ];
    assert_eq!(Verdict::Feasible(2), solve(courses, 9));
}

#[test]
fn an_unreachable_course_behind_the_cap_is_infeasible() {
    let courses = vec![
        course("a", 10, &[], Status::Unknown),
        course("b", 3, &["a"], Status::Unknown),
    ];
    assert_eq!(Verdict::Infeasible, solve(courses, 9));
}

#[test]
fn externally_blocked_courses_make_the_rest_infeasible() {
    let config = CompileConfig {
        unknown_prereqs: UnknownPrereqs::Block,
        ..Default::default()
    };
    let courses = vec![
        course("a", 3, &["previous-degree"], Status::Unknown),
        course("b", 3, &[], Status::Unknown),
    ];
    let curriculum = Curriculum::compile(courses, config).unwrap();
    let cutoff = NoCutoff;
    let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
    assert_eq!(Verdict::Infeasible, planner.minimize());
}

#[test]
fn ignored_unknown_prerequisites_leave_the_plan_intact() {
    let config = CompileConfig {
        unknown_prereqs: UnknownPrereqs::Ignore,
        ..Default::default()
    };
    let courses = vec![
        course("a", 3, &["previous-degree"], Status::Unknown),
        course("b", 3, &[], Status::Unknown),
    ];
    let curriculum = Curriculum::compile(courses, config).unwrap();
    let cutoff = NoCutoff;
    let mut planner = SequentialPlanner::new(&curriculum, 9, &cutoff);
    assert_eq!(Verdict::Feasible(1), planner.minimize());
}

#[test]
fn a_zero_node_budget_is_reported_as_budget_exceeded() {
    let courses = vec![
        course("a", 3, &[], Status::Unknown),
        course("b", 3, &["a"], Status::Unknown),
    ];
    let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
    let cutoff = NodeBudget(0);

    let mut sequential = SequentialPlanner::new(&curriculum, 9, &cutoff);
    let mut parallel = ParallelPlanner::new(&curriculum, 9, &cutoff);

    // never Infeasible: an aborted search proves nothing
    assert_eq!(Verdict::BudgetExceeded, sequential.minimize());
    assert_eq!(Verdict::BudgetExceeded, parallel.minimize());
}

#[test]
fn planners_agree_on_a_mixed_curriculum() {
    let courses = vec![
        course("math1", 5, &[], Status::Completed),
        course("math2", 5, &["math1"], Status::Failed),
        course("prog1", 4, &[], Status::Completed),
        course("prog2", 4, &["prog1"], Status::Unknown),
        course("stats", 3, &["math1"], Status::Unknown),
        course("ai", 4, &["math2", "prog2"], Status::Unknown),
        course("db", 3, &["prog1"], Status::Unknown),
        course("thesis", 6, &["ai", "stats", "db"], Status::Unknown),
    ];
    let verdict = solve(courses, 10);
    assert!(matches!(verdict, Verdict::Feasible(_)));
}

#[test]
fn reruns_and_engines_always_return_the_same_verdict() {
    let courses = vec![
        course("a", 4, &[], Status::Unknown),
        course("b", 5, &[], Status::Unknown),
        course("c", 2, &["a"], Status::Unknown),
        course("d", 6, &["b"], Status::Unknown),
        course("e", 3, &["c", "d"], Status::Unknown),
    ];
    let curriculum = Curriculum::compile(courses, CompileConfig::default()).unwrap();
    let cutoff = NoCutoff;

    let mut sequential = SequentialPlanner::new(&curriculum, 9, &cutoff);
    let mut parallel = ParallelPlanner::new(&curriculum, 9, &cutoff);
    let first = sequential.minimize();
    for _ in 0..3 {
        assert_eq!(first, sequential.minimize());
        assert_eq!(first, parallel.minimize());
    }
}
