//! Damped motion and rigid edits on a pose.

use nalgebra::Rotation2;

use crate::Point;

/// Bias used when snapping toward the direction of travel.
const SNAP_BIAS: f64 = 1e-4;
/// Below this per-axis remainder a damped move lands on the target.
const ARRIVE_DIST: f64 = 0.5;

/// Move `source` by the fraction `speed` toward `target`.
///
/// With `snap_to_int`, each axis is rounded toward the target side so repeated
/// snapped moves advance monotonically instead of oscillating around a
/// half-integer. Without snapping, a source already within 0.5 on both axes
/// lands exactly on the target, so repeated moves terminate.
pub fn move_toward(target: Point, source: Point, speed: f64, snap_to_int: bool) -> Point {
    let next = source * (1.0 - speed) + target * speed;
    if snap_to_int {
        let snap = |v: f64, tgt: f64, src: f64| {
            if tgt < src {
                (v + SNAP_BIAS).floor()
            } else {
                (v + 1.0 - SNAP_BIAS).floor()
            }
        };
        return Point::new(snap(next.x, target.x, source.x), snap(next.y, target.y, source.y));
    }
    let rest = target - source;
    if rest.x.abs() < ARRIVE_DIST && rest.y.abs() < ARRIVE_DIST {
        return target;
    }
    next
}

/// Shift every point by `delta`.
pub fn translate(points: &mut [Point], delta: Point) {
    for p in points.iter_mut() {
        *p += delta;
    }
}

/// Rotate every point by `angle` radians (counterclockwise) about `pivot`.
pub fn rotate_about_pivot(points: &mut [Point], pivot: Point, angle: f64) {
    let rot = Rotation2::new(angle);
    for p in points.iter_mut() {
        *p = pivot + rot * (*p - pivot);
    }
}

/// Round every coordinate to the nearest integer (halves round up).
pub fn snap_to_integer(points: &mut [Point]) {
    for p in points.iter_mut() {
        *p = p.map(|v| (v + 0.5).floor());
    }
}

/// Reflect every point across the vertical line `x = axis_x`.
pub fn mirror_x(points: &mut [Point], axis_x: f64) {
    for p in points.iter_mut() {
        p.x = 2.0 * axis_x - p.x;
    }
}

/// Scale the figure about its bounding-box center by `factor`, then move that
/// center onto `center`.
pub fn spread(points: &mut [Point], center: Point, factor: f64) {
    let Some(first) = points.first().copied() else {
        return;
    };
    let (lo, hi) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    let mid = (lo + hi) * 0.5;
    for p in points.iter_mut() {
        *p = (*p - mid) * factor + center;
    }
}
