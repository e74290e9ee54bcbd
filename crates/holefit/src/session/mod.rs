//! Single-writer owner of a pose.
//!
//! A `Session` holds the immutable `Problem`, the one mutable pose and the
//! held bonuses. Every mutation goes through `&mut self`; a tick is one
//! relaxation step followed by a fresh evaluation.

use std::path::Path;

use crate::eval::{evaluate, Evaluation};
use crate::geom;
use crate::io::{self, IoError};
use crate::matcher::{self, MatchReport};
use crate::problem::{HeldBonus, HeldBonuses, Problem};
use crate::relax::{step, StepCfg, StepReport};
use crate::Point;

#[derive(Clone, Debug)]
pub struct Session {
    problem: Problem,
    pose: Vec<Point>,
    held: HeldBonuses,
}

impl Session {
    /// Start from the figure's source positions with no held bonuses.
    pub fn new(problem: Problem) -> Self {
        let pose = problem.figure().vertices.clone();
        Self {
            problem,
            pose,
            held: HeldBonuses::none(),
        }
    }

    /// Load a problem and, if given, a prior solution (falling back to the
    /// source positions when it cannot be used).
    pub fn open(problem_path: &Path, solution_path: Option<&Path>) -> Result<Self, IoError> {
        let problem = io::load_problem(problem_path)?;
        let (pose, held) = io::load_solution_or_default(solution_path, &problem);
        Ok(Self {
            problem,
            pose,
            held,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn pose(&self) -> &[Point] {
        &self.pose
    }

    pub fn held(&self) -> &HeldBonuses {
        &self.held
    }

    pub fn set_held(&mut self, held: HeldBonuses) {
        self.held = held;
    }

    pub fn hold(&mut self, bonus: HeldBonus) {
        self.held.insert(bonus);
    }

    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.problem, &self.pose, &self.held)
    }

    /// One scheduler tick: run the enabled passes, then re-evaluate.
    pub fn tick(&mut self, cfg: &StepCfg) -> (StepReport, Evaluation) {
        let report = step(&self.problem, &mut self.pose, cfg, &self.held);
        (report, self.evaluate())
    }

    /// Run up to `ticks` ticks, stopping early once a tick moves nothing.
    /// Returns the number of ticks run and the final evaluation.
    pub fn relax(&mut self, cfg: &StepCfg, ticks: usize) -> (usize, Evaluation) {
        for n in 0..ticks {
            let report = step(&self.problem, &mut self.pose, cfg, &self.held);
            if report.total() == 0 {
                return (n + 1, self.evaluate());
            }
        }
        (ticks, self.evaluate())
    }

    pub fn translate(&mut self, delta: Point) {
        geom::translate(&mut self.pose, delta);
    }

    /// Rotate the whole pose by `angle` radians about `pivot`.
    pub fn rotate_about_pivot(&mut self, pivot: Point, angle: f64) {
        geom::rotate_about_pivot(&mut self.pose, pivot, angle);
    }

    /// Rotate about the pose vertex nearest to `at`, as a drag on the canvas does.
    pub fn rotate_about_nearest(&mut self, at: Point, angle: f64) -> Option<usize> {
        let pivot = crate::relax::nearest_vertex(&self.pose, at)?;
        let p = self.pose[pivot];
        self.rotate_about_pivot(p, angle);
        Some(pivot)
    }

    pub fn snap_to_integer(&mut self) {
        geom::snap_to_integer(&mut self.pose);
    }

    /// Reflect across the vertical line through the hole's bounding-box center.
    pub fn mirror(&mut self) {
        let (lo, hi) = self.hole_x_range();
        geom::mirror_x(&mut self.pose, (lo + hi) * 0.5);
    }

    /// Scale the pose by `factor` about its own center and move it onto the
    /// hole's bounding-box center.
    pub fn spread(&mut self, factor: f64) {
        let center = self.hole_center();
        geom::spread(&mut self.pose, center, factor);
    }

    /// Move one vertex; out-of-range indices are ignored.
    pub fn set_vertex(&mut self, index: usize, to: Point) -> bool {
        match self.pose.get_mut(index) {
            Some(p) => {
                *p = to;
                true
            }
            None => false,
        }
    }

    /// Put every vertex back on its source position.
    pub fn reset(&mut self) {
        self.pose.clone_from(&self.problem.figure().vertices);
    }

    pub fn match_edges(&mut self) -> MatchReport {
        matcher::match_edges(&self.problem, &mut self.pose)
    }

    pub fn match_corners(&mut self) -> MatchReport {
        matcher::match_corners(&self.problem, &mut self.pose)
    }

    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        io::save_solution(path, &self.pose, &self.held)
    }

    fn hole_x_range(&self) -> (f64, f64) {
        self.problem
            .hole()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }

    fn hole_center(&self) -> Point {
        let hole = self.problem.hole();
        let (lo, hi) = hole
            .iter()
            .fold((hole[0], hole[0]), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        (lo + hi) * 0.5
    }
}

#[cfg(test)]
mod tests;
