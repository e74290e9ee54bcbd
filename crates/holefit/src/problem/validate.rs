//! Load-time checks for problem preconditions.

use super::ProblemError;
use crate::geom::cross;
use crate::Point;

pub(super) fn finite<'a>(
    points: impl IntoIterator<Item = &'a Point>,
    what: &'static str,
) -> Result<(), ProblemError> {
    if points.into_iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        Ok(())
    } else {
        Err(ProblemError::NonFinite { what })
    }
}

/// `q` lies on the closed segment `ab`, given that the three are collinear.
#[inline]
fn within_box(a: Point, b: Point, q: Point) -> bool {
    q.x >= a.x.min(b.x) && q.x <= a.x.max(b.x) && q.y >= a.y.min(b.y) && q.y <= a.y.max(b.y)
}

/// Closed segments share at least one point (touching and overlap included).
fn segments_meet(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(a2 - a1, b1 - a1);
    let d2 = cross(a2 - a1, b2 - a1);
    let d3 = cross(b2 - b1, a1 - b1);
    let d4 = cross(b2 - b1, a2 - b1);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }
    (d1 == 0.0 && within_box(a1, a2, b1))
        || (d2 == 0.0 && within_box(a1, a2, b2))
        || (d3 == 0.0 && within_box(b1, b2, a1))
        || (d4 == 0.0 && within_box(b1, b2, a2))
}

/// Hole edge `i` runs from vertex `i` to vertex `i+1`.
pub(super) fn simple_hole(hole: &[Point]) -> Result<(), ProblemError> {
    let n = hole.len();
    if n < 3 {
        return Err(ProblemError::HoleTooSmall { len: n });
    }
    let edge = |i: usize| (hole[i], hole[(i + 1) % n]);
    for i in 0..n {
        let (a, b) = edge(i);
        if a == b {
            return Err(ProblemError::DegenerateHoleEdge { index: i });
        }
    }
    for i in 0..n {
        let (a1, a2) = edge(i);
        for j in i + 1..n {
            let (b1, b2) = edge(j);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            let bad = if adjacent {
                // Consecutive edges share a vertex; they only conflict when one
                // doubles back along the other.
                let (da, db) = (a2 - a1, b2 - b1);
                cross(da, db) == 0.0 && da.dot(&db) < 0.0
            } else {
                segments_meet(a1, a2, b1, b2)
            };
            if bad {
                return Err(ProblemError::SelfIntersectingHole { a: i, b: j });
            }
        }
    }
    Ok(())
}
