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

//! This module provides the dependency validator: a depth-first traversal of
//! the prerequisite graph which either produces a topological ordering of
//! the courses or reports a cycle. The traversal is iterative with an
//! explicit frame stack; neither correctness nor safety depends on the call
//! stack being deep enough for the input.

use crate::CourseId;

/// The transient marks of the traversal. A node on the current traversal
/// path reached a second time is the witness of a cycle.
const UNVISITED: u8 = 0;
const ON_PATH: u8 = 1;
const FINISHED: u8 = 2;

/// Performs a depth-first traversal of the prerequisite graph, given as a
/// prerequisite -> dependents adjacency list. On success, it returns the
/// course ids in topological order: every prerequisite is placed before all
/// of its dependents (finished nodes accumulate in post-order and the
/// post-order is reversed). On failure, it returns the id of one course
/// sitting on a cycle; no partial ordering is ever returned and no attempt
/// is made to enumerate further cycles.
pub(crate) fn depth_first_order(dependents: &[Vec<usize>]) -> Result<Vec<CourseId>, CourseId> {
    let n = dependents.len();
    let mut mark = vec![UNVISITED; n];
    let mut order = Vec::with_capacity(n);
    // each frame is a node along with the rank of the next successor to visit
    let mut stack: Vec<(usize, usize)> = vec![];

    for root in 0..n {
        if mark[root] != UNVISITED {
            continue;
        }
        mark[root] = ON_PATH;
        stack.push((root, 0));

        while let Some(&mut (node, ref mut next)) = stack.last_mut() {
            if let Some(&succ) = dependents[node].get(*next) {
                *next += 1;
                match mark[succ] {
                    UNVISITED => {
                        mark[succ] = ON_PATH;
                        stack.push((succ, 0));
                    }
                    ON_PATH => return Err(CourseId(succ)),
                    _ => { /* finished: reached along a second path */ }
                }
            } else {
                mark[node] = FINISHED;
                order.push(CourseId(node));
                stack.pop();
            }
        }
    }

    order.reverse();
    Ok(order)
}
