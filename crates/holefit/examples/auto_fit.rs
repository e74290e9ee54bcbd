//! Drive a session the way a GUI timer would and print the score every 100 ticks.
//!
//! Usage:
//!   cargo run -p holefit --example auto_fit -- path/to/1.problem [path/to/1.json]

use holefit::prelude::*;
use std::path::PathBuf;

fn main() {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let Some(problem) = args.next() else {
        eprintln!("usage: auto_fit PROBLEM [SOLUTION]");
        return;
    };
    let solution = args.next();
    let mut session = match Session::open(&problem, solution.as_deref()) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    session.match_corners();
    let cfg = StepCfg::auto();
    for round in 0..10 {
        let (ticks, eval) = session.relax(&cfg, 100);
        println!(
            "round {round}: ticks={ticks} verdict={} dislikes={} overstretched={} out_of_hole={}",
            eval.verdict, eval.dislikes, eval.overstretched, eval.out_of_hole
        );
        if ticks < 100 {
            break;
        }
    }
}
