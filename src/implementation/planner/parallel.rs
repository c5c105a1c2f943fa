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

//! This module provides the implementation of a parallel planner. That is
//! a planner that will evaluate the completion states using as many threads
//! as requested. By default, it uses as many threads as the number of
//! hardware threads available on the machine.
//!
//! The parallelization is by generations: generation g holds the states
//! missing exactly g courses, and the value of a state only ever depends on
//! states with strictly fewer missing courses. The states of one generation
//! are therefore independent work items, and a synchronization barrier
//! between generations is all it takes to make the evaluation safe.

use dashmap::DashMap;
use fxhash::FxBuildHasher;
use parking_lot::{Condvar, Mutex};

use super::{verdict_of, CUTOFF_STRIDE, INFINITE};
use crate::{CourseId, CourseSet, Curriculum, Cutoff, Planner, Verdict};

/// The shared data that may only be manipulated within critical sections
struct Critical {
    /// The generation currently being handed out. Generation g holds the
    /// completion states which miss exactly g of the free courses; it runs
    /// from 0 (the target state alone) up to the number of free courses
    /// (the initial state alone).
    generation: usize,
    /// The next work item of the current generation, encoded as a compact
    /// combination: bit j set means the j-th free course is completed. A
    /// `None` cursor means the generation is fully handed out.
    cursor: Option<u32>,
    /// This is the number of states that are currently being evaluated.
    ///
    /// # Note
    /// This is the barrier. A generation may only be advanced when its last
    /// in-flight state completes, and this counter is what tells a starving
    /// thread whether it must wait (some state of the current generation is
    /// still being evaluated) or advance the generation itself.
    ongoing: usize,
    /// This is a counter that tracks the number of states that have
    /// effectively been evaluated.
    explored: usize,
    /// True as soon as the cutoff criterion decided to abort the search.
    aborted: bool,
}

/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park threads in case of work-starvation.
struct Shared<'a> {
    /// A reference to the compiled curriculum being planned.
    curriculum: &'a Curriculum,
    /// The maximum total credit weight of one term's course load.
    credit_cap: u32,
    /// A cutoff policy meant to decide when to give up on the search.
    cutoff: &'a (dyn Cutoff + Send + Sync),
    /// The ids of the courses not completed in the initial state, in
    /// ascending id order. Compact combinations index into this vector.
    free: Vec<CourseId>,
    /// The initial completion state.
    initial: CourseSet,
    /// The target completion state.
    target: CourseSet,
    /// The memo, one map per generation. Within a generation, threads only
    /// ever insert into the layer of that generation and read from strictly
    /// shallower layers (already sealed by the barrier), so reads never
    /// race with writes to the same map.
    memo: Vec<DashMap<CourseSet, usize, FxBuildHasher>>,
    /// This is the shared state data which can only be accessed within
    /// critical sections. Therefore, it is protected by a mutex which
    /// prevents concurrent reads/writes.
    critical: Mutex<Critical>,
    /// This is the monitor on which threads must wait when the current
    /// generation is fully handed out but not fully evaluated. The
    /// corollary, is that whenever a thread has completed the evaluation of
    /// a state, it must wake-up all parked threads waiting on this monitor.
    monitor: Condvar,
}
impl Shared<'_> {
    fn nb_free(&self) -> usize {
        self.free.len()
    }
    /// Expands a compact combination over the free courses into a full
    /// completion state.
    fn expand(&self, compact: u32) -> CourseSet {
        let mut state = self.initial;
        for (j, c) in self.free.iter().enumerate() {
            if compact & (1 << j) != 0 {
                state.insert(*c);
            }
        }
        state
    }
}

/// The workload a thread can get from the shared state
enum WorkLoad {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// The work must stop because of an external cutoff
    Aborted,
    /// There is nothing you can do right now. Check again when you wake up
    Starvation,
    /// The state to evaluate, along with its generation
    WorkItem { state: CourseSet, generation: usize },
}

/// Returns the next combination with the same number of bits set as `v`
/// (Gosper's hack), or `None` once the combinations over `nb_bits` bits are
/// exhausted.
fn next_combination(v: u32, nb_bits: usize) -> Option<u32> {
    if v == 0 {
        // the empty combination is the one and only of its kind
        return None;
    }
    let lowest = v & v.wrapping_neg();
    let carry = v + lowest;
    let next = (((v ^ carry) >> 2) / lowest) | carry;
    if next < (1 << nb_bits) {
        Some(next)
    } else {
        None
    }
}

/// This is the structure implementing a multi-threaded planner. It computes
/// the exact same mapping as the `SequentialPlanner`, but one generation at
/// a time: all threads cooperate on the states missing g courses, park when
/// that generation is fully handed out, and the last thread to complete a
/// state of the generation unseals the next one. Both planners return
/// identical verdicts on identical inputs.
///
/// # Example Usage
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
/// let cutoff = NoCutoff;
/// let mut planner = ParallelPlanner::new(&curriculum, 9, &cutoff);
///
/// // only calculus remains and it fits a term on its own
/// assert_eq!(Verdict::Feasible(1), planner.minimize());
/// ```
pub struct ParallelPlanner<'a> {
    /// A reference to the compiled curriculum being planned.
    curriculum: &'a Curriculum,
    /// The maximum total credit weight of one term's course load.
    credit_cap: u32,
    /// A cutoff policy meant to decide when to give up on the search.
    cutoff: &'a (dyn Cutoff + Send + Sync),
    /// This is a configuration parameter that tunes the number of threads
    /// that will be spawned to evaluate the states. By default, this number
    /// amounts to the number of hardware threads available on the machine.
    nb_threads: usize,
    /// The number of states evaluated by the last `minimize` call.
    explored: usize,
    /// If set, this keeps the outcome of the last `minimize` call.
    verdict: Option<Verdict>,
}

impl<'a> ParallelPlanner<'a> {
    pub fn new(
        curriculum: &'a Curriculum,
        credit_cap: u32,
        cutoff: &'a (dyn Cutoff + Send + Sync),
    ) -> Self {
        Self::custom(curriculum, credit_cap, cutoff, num_cpus::get())
    }
    pub fn custom(
        curriculum: &'a Curriculum,
        credit_cap: u32,
        cutoff: &'a (dyn Cutoff + Send + Sync),
        nb_threads: usize,
    ) -> Self {
        ParallelPlanner {
            curriculum,
            credit_cap,
            cutoff,
            nb_threads,
            explored: 0,
            verdict: None,
        }
    }
    /// Sets the number of threads used by the planner
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads;
        self
    }

    /// Evaluates one completion state of the given generation. All the
    /// lookups hit strictly shallower memo layers, which the generation
    /// barrier guarantees to be complete. The cutoff is consulted every
    /// `CUTOFF_STRIDE` enumerated loads; `None` means it decided to abort
    /// in the middle of the enumeration.
    fn evaluate(
        shared: &Shared,
        state: CourseSet,
        generation: usize,
        ticker: &mut usize,
    ) -> Option<usize> {
        if state == shared.target {
            return Some(0);
        }
        let available = shared.curriculum.available(state);
        if available.is_empty() {
            // dead end: the remaining courses can never be unlocked
            return Some(INFINITE);
        }
        let mut best = INFINITE;
        for load in available.subsets() {
            *ticker += 1;
            if *ticker % CUTOFF_STRIDE == 0 {
                let explored = shared.critical.lock().explored;
                if shared.cutoff.must_stop(explored) {
                    return None;
                }
            }
            if load.is_empty()
                || shared.curriculum.load_credits(load) > u64::from(shared.credit_cap)
            {
                continue;
            }
            let next = state.union(load);
            let after = shared.memo[generation - load.len()]
                .get(&next)
                .map(|v| *v)
                .unwrap_or(INFINITE);
            best = best.min(after.saturating_add(1));
        }
        Some(best)
    }

    /// Acknowledges that a thread finished evaluating its state.
    fn notify_state_finished(shared: &Shared) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        shared.monitor.notify_all();
    }

    /// Acknowledges that a thread gave up on its state because the cutoff
    /// tripped mid-enumeration. Every parked thread is woken up so that it
    /// can observe the abort and terminate.
    fn notify_aborted(shared: &Shared) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        critical.aborted = true;
        shared.monitor.notify_all();
    }

    /// Consults the shared state to fetch a workload. Depending on the
    /// current state, the workload can either be:
    ///
    ///   + Complete, when every generation has been evaluated and all
    ///     threads should stop
    ///   + Aborted, when the cutoff criterion was met
    ///   + Starvation, when the current generation is fully handed out but
    ///     some of its states are still being evaluated (and thus the next
    ///     generation cannot be started yet)
    ///   + WorkItem, when the thread successfully obtained a state to
    ///     evaluate.
    fn get_workload(shared: &Shared) -> WorkLoad {
        let mut critical = shared.critical.lock();

        // Do we need to stop ?
        if critical.aborted {
            return WorkLoad::Aborted;
        }
        // Are we done ?
        if critical.generation > shared.nb_free() {
            return WorkLoad::Complete;
        }
        if shared.cutoff.must_stop(critical.explored) {
            critical.aborted = true;
            shared.monitor.notify_all();
            return WorkLoad::Aborted;
        }

        if critical.cursor.is_none() {
            // The current generation is fully handed out. It must also be
            // fully evaluated before the next one may start: this is the
            // barrier that makes the deeper memo layers safe to read.
            if critical.ongoing > 0 {
                shared.monitor.wait(&mut critical);
                return WorkLoad::Starvation;
            }
            critical.generation += 1;
            if critical.generation > shared.nb_free() {
                shared.monitor.notify_all();
                return WorkLoad::Complete;
            }
            let nb_done = shared.nb_free() - critical.generation;
            critical.cursor = Some(((1_u64 << nb_done) - 1) as u32);
        }

        if let Some(compact) = critical.cursor {
            critical.cursor = next_combination(compact, shared.nb_free());
            critical.ongoing += 1;
            critical.explored += 1;
            WorkLoad::WorkItem {
                state: shared.expand(compact),
                generation: critical.generation,
            }
        } else {
            WorkLoad::Starvation
        }
    }
}

impl Planner for ParallelPlanner<'_> {
    /// Evaluates the whole state space generation by generation. To do so,
    /// it spawns `nb_threads` workers (long running threads); each of which
    /// will continually get a workload and process it until every
    /// generation is complete or the cutoff criterion is met.
    fn minimize(&mut self) -> Verdict {
        let initial = self.curriculum.initial_state();
        let target = self.curriculum.target_state();
        let free = target.diff(initial).iter().collect::<Vec<_>>();
        let nb_free = free.len();

        // the memo is owned by this call: created here, dropped on return
        let shared = Shared {
            curriculum: self.curriculum,
            credit_cap: self.credit_cap,
            cutoff: self.cutoff,
            free,
            initial,
            target,
            memo: (0..=nb_free).map(|_| DashMap::default()).collect(),
            monitor: Condvar::new(),
            critical: Mutex::new(Critical {
                generation: 0,
                cursor: Some(((1_u64 << nb_free) - 1) as u32),
                ongoing: 0,
                explored: 0,
                aborted: false,
            }),
        };

        std::thread::scope(|s| {
            for _ in 0..self.nb_threads {
                let shared = &shared;
                s.spawn(move || {
                    let mut ticker = 0;
                    loop {
                        match Self::get_workload(shared) {
                            WorkLoad::Complete => break,
                            WorkLoad::Aborted => break,
                            WorkLoad::Starvation => continue,
                            WorkLoad::WorkItem { state, generation } => {
                                match Self::evaluate(shared, state, generation, &mut ticker) {
                                    Some(value) => {
                                        shared.memo[generation].insert(state, value);
                                        Self::notify_state_finished(shared);
                                    }
                                    None => {
                                        Self::notify_aborted(shared);
                                        break;
                                    }
                                }
                            }
                        }
                    }
                });
            }
        });

        let value = shared.memo[nb_free]
            .get(&initial)
            .map(|v| *v)
            .unwrap_or(INFINITE);
        let critical = shared.critical.into_inner();
        self.explored = critical.explored;

        let verdict = if critical.aborted {
            Verdict::BudgetExceeded
        } else {
            verdict_of(value)
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

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

/// The barrier logic is hard to unit test in isolation, so the parallel
/// planner is mostly validated by comparison: on identical inputs it must
/// return exactly the verdict of the sequential planner (see also the
/// crate-level scenario tests).
