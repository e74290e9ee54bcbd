//! The four relaxation passes. Each returns the number of vertices it moved.

use super::StepCfg;
use crate::cfg::COLLAPSED_SQ_LEN;
use crate::eval::{global_budget, stretch_ppm, within_epsilon};
use crate::geom::{
    closest_point_on_segment, move_toward, point_in_polygon, polygon_edges, sq_distance,
    Containment,
};
use crate::problem::{BonusKind, HeldBonuses, Problem};
use crate::Point;

#[inline]
fn pinned(problem: &Problem, cfg: &StepCfg, p: Point) -> bool {
    let anchors = problem.anchors();
    (cfg.sticky_hole && anchors.is_hole_vertex(p)) || (cfg.sticky_bonus && anchors.has_bonus(p))
}

/// Current squared length of edge `(a, b)`, never zero.
#[inline]
fn pose_sq(pose: &[Point], a: usize, b: usize) -> f64 {
    let d = sq_distance(pose[a], pose[b]);
    if d == 0.0 {
        COLLAPSED_SQ_LEN
    } else {
        d
    }
}

/// Scale edge `(a, b)` about its midpoint toward its source length, damped.
fn relax_edge(
    problem: &Problem,
    pose: &mut [Point],
    (a, b): (usize, usize),
    src_sq: f64,
    cfg: &StepCfg,
) -> usize {
    let dst_sq = pose_sq(pose, a, b);
    let (pa, pb) = (pose[a], pose[b]);
    let mid = (pa + pb) * 0.5;
    let scale = (src_sq / dst_sq).sqrt();
    let mut moved = 0;
    for (idx, p) in [(a, pa), (b, pb)] {
        if pinned(problem, cfg, p) {
            continue;
        }
        let target = mid + (p - mid) * scale;
        let next = move_toward(target, p, cfg.damping.unstretch, cfg.integer_unstretch);
        if next != p {
            pose[idx] = next;
            moved += 1;
        }
    }
    moved
}

/// Unstretch pass.
///
/// Without GLOBALIST, every edge failing epsilon (or every edge, with
/// `unstretch_all`) is relaxed in order, each seeing earlier moves. With
/// GLOBALIST, only the worst edge is relaxed, and only while the total
/// deviation exceeds the shared budget.
pub fn unstretch(
    problem: &Problem,
    pose: &mut [Point],
    cfg: &StepCfg,
    held: &HeldBonuses,
) -> usize {
    let in_focus = |a: usize, b: usize| cfg.focus.is_none_or(|v| v == a || v == b);
    let edges = problem.edges();

    if held.holds(BonusKind::Globalist) {
        let mut total = 0.0;
        let mut worst: Option<(f64, usize)> = None;
        for (k, &(a, b)) in edges.iter().enumerate() {
            if !in_focus(a, b) {
                continue;
            }
            let e = stretch_ppm(problem.src_sq(k), pose_sq(pose, a, b));
            total += e;
            if worst.is_none_or(|(w, _)| w < e) {
                worst = Some((e, k));
            }
        }
        return match worst {
            Some((_, k)) if total > global_budget(problem.epsilon(), edges.len()) => {
                relax_edge(problem, pose, edges[k], problem.src_sq(k), cfg)
            }
            _ => 0,
        };
    }

    let mut moved = 0;
    for (k, &(a, b)) in edges.iter().enumerate() {
        if !in_focus(a, b) {
            continue;
        }
        let src_sq = problem.src_sq(k);
        if cfg.unstretch_all || !within_epsilon(src_sq, pose_sq(pose, a, b), problem.epsilon()) {
            moved += relax_edge(problem, pose, (a, b), src_sq, cfg);
        }
    }
    moved
}

/// Closest point on the hole boundary to `p`.
fn closest_boundary_point(hole: &[Point], p: Point) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for (h1, h2) in polygon_edges(hole) {
        let c = closest_point_on_segment(h1, h2, p);
        let d = sq_distance(p, c);
        if best.is_none_or(|(bd, _)| bd > d) {
            best = Some((d, c));
        }
    }
    best.map(|(_, c)| c)
}

/// Stuff pass: vertices outside the hole move toward the nearest boundary point.
pub fn stuff(hole: &[Point], pose: &mut [Point], speed: f64) -> usize {
    let mut moved = 0;
    for p in pose.iter_mut() {
        if point_in_polygon(hole, *p) != Containment::Outside {
            continue;
        }
        if let Some(target) = closest_boundary_point(hole, *p) {
            let next = move_toward(target, *p, speed, false);
            if next != *p {
                *p = next;
                moved += 1;
            }
        }
    }
    moved
}

/// Index of the pose vertex nearest to `target`; ties go to the lowest index.
pub fn nearest_vertex(pose: &[Point], target: Point) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for (i, &p) in pose.iter().enumerate() {
        let d = sq_distance(p, target);
        if best.is_none_or(|(bd, _)| bd > d) {
            best = Some((d, i));
        }
    }
    best.map(|(_, i)| i)
}

fn attract(targets: &[Point], pose: &mut [Point], speed: f64) -> usize {
    let mut moved = 0;
    for &t in targets {
        let Some(i) = nearest_vertex(pose, t) else {
            continue;
        };
        if pose[i] != t {
            pose[i] = move_toward(t, pose[i], speed, false);
            moved += 1;
        }
    }
    moved
}

/// Fill pass: each hole vertex pulls its nearest pose vertex. Moves apply
/// immediately, so later hole vertices see the updated pose.
pub fn fill(hole: &[Point], pose: &mut [Point], speed: f64) -> usize {
    attract(hole, pose, speed)
}

/// BonusFill pass: like `fill`, with distinct bonus positions as targets.
pub fn bonus_fill(problem: &Problem, pose: &mut [Point], speed: f64) -> usize {
    attract(problem.anchors().bonus_positions(), pose, speed)
}
