//! Length-signature matching between hole and figure.
//!
//! Purpose
//! - Place figure pieces directly when the hole geometry singles them out.
//!   Both searches are best effort: zero or several candidates leave the pose
//!   untouched.
//!
//! Searches
//! - `match_edges`: a hole edge whose squared length (within the epsilon band)
//!   matches exactly one figure edge gets that edge centered on it.
//! - `match_corners`: a hole corner whose two incident edge lengths match the
//!   incident lengths of exactly one figure vertex gets that vertex snapped
//!   onto it.
//!
//! Hole edges and corners are visited in boundary order starting from the
//! last hole vertex; each placement is visible to the following ones.

use crate::cfg::PPM;
use crate::geom::{polygon_edges, sq_distance};
use crate::problem::Problem;
use crate::Point;

/// Closed range of squared lengths accepted for a hole edge of squared length `d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub lo: f64,
    pub hi: f64,
}

impl Band {
    /// `d ± floor((d·ε + 1) / 1e6)`.
    pub fn around(d: f64, epsilon: u64) -> Self {
        let delta = ((d * epsilon as f64 + 1.0) / PPM).floor();
        Self {
            lo: d - delta,
            hi: d + delta,
        }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// One mutation made by a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Figure edge `edge` was centered on hole edge `(hole_from, hole_to)`.
    Edge {
        edge: usize,
        hole_from: usize,
        hole_to: usize,
    },
    /// Figure vertex `vertex` was moved onto hole vertex `hole_vertex`.
    Corner { vertex: usize, hole_vertex: usize },
}

/// Outcome of one search run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchReport {
    pub placements: Vec<Placement>,
    /// Hole edges or corners that had more than one candidate.
    pub ambiguous: usize,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Hole edges as `(from, to)` index pairs, starting with `(n-1, 0)`.
fn hole_edge_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).map(move |i| ((i + n - 1) % n, i))
}

/// Center uniquely matching figure edges on hole edges.
pub fn match_edges(problem: &Problem, pose: &mut [Point]) -> MatchReport {
    let hole = problem.hole();
    let edges = problem.edges();
    let mut by_len: Vec<(f64, usize)> = (0..edges.len()).map(|k| (problem.src_sq(k), k)).collect();
    by_len.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut report = MatchReport::default();
    for ((h1, h2), (from, to)) in polygon_edges(hole).zip(hole_edge_indices(hole.len())) {
        let band = Band::around(sq_distance(h1, h2), problem.epsilon());
        let start = by_len.partition_point(|&(d, _)| d < band.lo);
        let end = by_len.partition_point(|&(d, _)| d <= band.hi);
        let candidates = &by_len[start..end];
        match candidates {
            [(_, k)] => {
                let (a, b) = edges[*k];
                let shift = (h1 + h2) * 0.5 - (pose[a] + pose[b]) * 0.5;
                pose[a] += shift;
                pose[b] += shift;
                tracing::debug!(edge = *k, hole_from = from, hole_to = to, "edge match");
                report.placements.push(Placement::Edge {
                    edge: *k,
                    hole_from: from,
                    hole_to: to,
                });
            }
            [] => {}
            _ => report.ambiguous += 1,
        }
    }
    report
}

/// Incident squared-length pairs `(d1, d2, vertex)` for every pair of
/// neighbors `n1 < n2` of each figure vertex.
fn corner_signatures(problem: &Problem) -> Vec<(f64, f64, usize)> {
    let src = &problem.figure().vertices;
    let mut out = Vec::new();
    for (v, nbrs) in problem.figure().neighbors().iter().enumerate() {
        for (i, &n1) in nbrs.iter().enumerate() {
            for &n2 in &nbrs[i + 1..] {
                out.push((sq_distance(src[v], src[n1]), sq_distance(src[v], src[n2]), v));
            }
        }
    }
    out
}

/// Snap uniquely matching figure vertices onto hole corners.
pub fn match_corners(problem: &Problem, pose: &mut [Point]) -> MatchReport {
    let hole = problem.hole();
    let n = hole.len();
    let signatures = corner_signatures(problem);
    let band = |i: usize, j: usize| Band::around(sq_distance(hole[i], hole[j]), problem.epsilon());

    let mut report = MatchReport::default();
    // Corner `at` joins the edge from its predecessor and the edge to `next`.
    for (at, next) in hole_edge_indices(n) {
        let before = band((at + n - 1) % n, at);
        let after = band(at, next);
        let mut candidates: Vec<usize> = signatures
            .iter()
            .filter(|&&(d1, d2, _)| {
                (before.contains(d1) && after.contains(d2))
                    || (before.contains(d2) && after.contains(d1))
            })
            .map(|&(_, _, v)| v)
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        match candidates[..] {
            [vertex] => {
                pose[vertex] = hole[at];
                tracing::debug!(vertex, hole_vertex = at, "corner match");
                report.placements.push(Placement::Corner {
                    vertex,
                    hole_vertex: at,
                });
            }
            [] => {}
            _ => report.ambiguous += 1,
        }
    }
    report
}
