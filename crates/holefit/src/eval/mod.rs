//! Validity verdicts and dislike score.
//!
//! Rules
//! - Stretch: an edge is fine when `|1e6·(dst²/src² − 1)| ≤ ε` (plus a tiny
//!   fudge). GLOBALIST replaces the per-edge check by one budget over the sum.
//! - Containment: an edge is fine when the segment lies in the hole.
//!   WALLHACK exempts the edges of a single stray vertex.
//! - Verdict: no out-of-hole edges and the stretch rule holds; SUPERFLEX
//!   tolerates one overstretched edge.
//! - Dislikes: sum over hole vertices of the squared distance to the nearest
//!   pose vertex.
//!
//! Everything is recomputed from the pose on each call; nothing is cached.

use crate::cfg::{EPS_FUDGE, PPM};
use crate::geom::{point_in_polygon, segment_in_polygon, sq_distance, Containment};
use crate::problem::{BonusKind, HeldBonuses, Problem};
use crate::Point;

/// Deviation of a squared length from its source in parts per million.
#[inline]
pub fn stretch_ppm(src_sq: f64, dst_sq: f64) -> f64 {
    PPM * (dst_sq / src_sq - 1.0).abs()
}

/// Per-edge stretch check against `epsilon`.
#[inline]
pub fn within_epsilon(src_sq: f64, dst_sq: f64, epsilon: u64) -> bool {
    stretch_ppm(src_sq, dst_sq) <= epsilon as f64 + EPS_FUDGE
}

/// Aggregate GLOBALIST budget for `edges` edges.
#[inline]
pub fn global_budget(epsilon: u64, edges: usize) -> f64 {
    (epsilon as f64 + EPS_FUDGE) * edges as f64
}

/// Status of one figure edge in the current pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStatus {
    /// Stretch criterion of the active mode (shared verdict under GLOBALIST).
    pub stretch_ok: bool,
    /// Segment lies in the hole, or is exempted by WALLHACK.
    pub in_hole: bool,
    /// Pose length is at most the source length.
    pub compressed: bool,
}

impl EdgeStatus {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.stretch_ok && self.in_hole
    }
}

/// Full report for one pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub edges: Vec<EdgeStatus>,
    /// Edges failing the per-edge epsilon check (counted in every mode).
    pub overstretched: usize,
    pub out_of_hole: usize,
    pub dislikes: f64,
    pub verdict: bool,
    /// Indices into `Problem::bonuses` whose position is occupied.
    pub collected: Vec<usize>,
    /// Sum of per-edge deviations when GLOBALIST is held.
    pub global_deviation: Option<f64>,
    /// Vertex exempted by WALLHACK.
    pub wallhack_vertex: Option<usize>,
}

impl Evaluation {
    /// Dislikes as shown to users: negative when the pose is invalid.
    pub fn signed_dislikes(&self) -> f64 {
        if self.verdict {
            self.dislikes
        } else {
            -self.dislikes
        }
    }
}

/// Sum over hole vertices of the squared distance to the nearest pose vertex.
pub fn dislikes(hole: &[Point], pose: &[Point]) -> f64 {
    hole.iter()
        .map(|&h| {
            pose.iter()
                .map(|&p| sq_distance(h, p))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

/// The single vertex outside the hole, if exactly one is.
fn lone_stray_vertex(hole: &[Point], pose: &[Point]) -> Option<usize> {
    let mut stray = pose
        .iter()
        .enumerate()
        .filter(|&(_, &p)| point_in_polygon(hole, p) == Containment::Outside)
        .map(|(i, _)| i);
    match (stray.next(), stray.next()) {
        (Some(i), None) => Some(i),
        _ => None,
    }
}

/// Evaluate `pose` against `problem` under the `held` bonus rules.
pub fn evaluate(problem: &Problem, pose: &[Point], held: &HeldBonuses) -> Evaluation {
    debug_assert_eq!(pose.len(), problem.figure().vertices.len());
    let hole = problem.hole();
    let epsilon = problem.epsilon();
    let edges = problem.edges();

    let global_deviation = held.holds(BonusKind::Globalist).then(|| {
        edges
            .iter()
            .enumerate()
            .map(|(k, &(a, b))| stretch_ppm(problem.src_sq(k), sq_distance(pose[a], pose[b])))
            .sum::<f64>()
    });
    let global_ok = global_deviation.map(|total| total <= global_budget(epsilon, edges.len()));

    let wallhack_vertex = if held.holds(BonusKind::Wallhack) {
        lone_stray_vertex(hole, pose)
    } else {
        None
    };

    let mut overstretched = 0;
    let mut out_of_hole = 0;
    let statuses: Vec<EdgeStatus> = edges
        .iter()
        .enumerate()
        .map(|(k, &(a, b))| {
            let src_sq = problem.src_sq(k);
            let dst_sq = sq_distance(pose[a], pose[b]);
            let edge_ok = within_epsilon(src_sq, dst_sq, epsilon);
            if !edge_ok {
                overstretched += 1;
            }
            let exempt = wallhack_vertex.is_some_and(|w| w == a || w == b);
            let in_hole = exempt || segment_in_polygon(hole, pose[a], pose[b]);
            if !in_hole {
                out_of_hole += 1;
            }
            EdgeStatus {
                stretch_ok: global_ok.unwrap_or(edge_ok),
                in_hole,
                compressed: dst_sq <= src_sq,
            }
        })
        .collect();

    let stretch_verdict = match global_ok {
        Some(ok) => ok,
        None if held.holds(BonusKind::Superflex) => overstretched <= 1,
        None => overstretched == 0,
    };
    let verdict = out_of_hole == 0 && stretch_verdict;

    let mut collected: Vec<usize> = pose
        .iter()
        .flat_map(|&p| problem.anchors().bonuses_at(p).iter().copied())
        .collect();
    collected.sort_unstable();
    collected.dedup();

    Evaluation {
        edges: statuses,
        overstretched,
        out_of_hole,
        dislikes: dislikes(hole, pose),
        verdict,
        collected,
        global_deviation,
        wallhack_vertex,
    }
}

#[cfg(test)]
mod tests;
