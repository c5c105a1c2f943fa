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

//! This example reads a curriculum instance from a JSON file, compiles it,
//! and reports the dependency ordering, the effective status of every
//! course and the minimum number of additional terms. Run it with e.g.
//! `cargo run --example plan -- demos/plan/instance.json`.

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use clap::Parser;
use malla::*;
use serde::Deserialize;

/// The shape of an instance file. This is a convenience of the example, not
/// a contract of the library: the core only ever sees the course list and
/// the cap.
#[derive(Debug, Deserialize)]
struct Instance {
    credit_cap: u32,
    courses: Vec<Course>,
}

// #### ONLY USEFUL FOR THE EXAMPLE #######################################################

#[derive(Debug, thiserror::Error)]
enum Errors {
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    #[error("ill formed instance {0}")]
    Format(#[from] serde_json::Error),
    #[error("{0}")]
    Compile(#[from] CompileError),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// An easy way to know how many terms are left before graduation
struct Args {
    /// The path to the instance file
    fname: String,
    /// The number of concurrent threads
    #[clap(short, long, default_value = "8")]
    threads: usize,
    /// The maximum amount of time (in seconds) you would like this planner to run
    #[clap(short, long)]
    duration: Option<u64>,
    /// Override the per-term credit cap of the instance
    #[clap(short, long)]
    cap: Option<u32>,
    /// Treat prerequisites referring to no course of the instance as
    /// permanently blocking instead of rejecting the input
    #[clap(short, long)]
    block_unknown: bool,
}

fn read_instance<P: AsRef<Path>>(fname: P) -> Result<Instance, Errors> {
    let f = File::open(fname)?;
    let f = BufReader::new(f);
    Ok(serde_json::from_reader(f)?)
}

fn main() -> Result<(), Errors> {
    let args = Args::parse();
    let instance = read_instance(&args.fname)?;
    let credit_cap = args.cap.unwrap_or(instance.credit_cap);
    let config = CompileConfig {
        unknown_prereqs: if args.block_unknown {
            UnknownPrereqs::Block
        } else {
            UnknownPrereqs::Deny
        },
        ..Default::default()
    };

    let curriculum = Curriculum::compile(instance.courses, config)?;

    println!("dependency order:");
    for c in curriculum.topological_order() {
        println!(
            "  {:<20} {:>2} credits  {:?}",
            curriculum.name(*c),
            curriculum.credits(*c),
            curriculum.effective_status(*c)
        );
    }

    let cutoff: Box<dyn Cutoff + Send + Sync> = match args.duration {
        Some(secs) => Box::new(TimeBudget::new(Duration::from_secs(secs))),
        None => Box::new(NoCutoff),
    };
    let mut planner =
        ParallelPlanner::new(&curriculum, credit_cap, cutoff.as_ref()).with_nb_threads(args.threads);

    match planner.minimize() {
        Verdict::Feasible(terms) => {
            println!("minimum additional terms: {terms} (cap {credit_cap} credits)")
        }
        Verdict::Infeasible => {
            println!("impossible: no sequence of term loads completes this curriculum")
        }
        Verdict::BudgetExceeded => {
            println!("gave up: budget exhausted after {} states", planner.explored())
        }
    }
    Ok(())
}
