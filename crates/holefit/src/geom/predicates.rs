//! Containment predicates and projections.
//!
//! The winding test walks the boundary once and counts quarter turns of the
//! vertex offsets around the query point. For any closed boundary the total is
//! a multiple of 4; a nonzero total means the point is enclosed.

use crate::Point;

/// Where a point lies relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    OnBoundary,
    Outside,
}

impl Containment {
    /// Inside or on the boundary.
    #[inline]
    pub fn is_contained(self) -> bool {
        !matches!(self, Containment::Outside)
    }
}

/// Exact squared Euclidean distance.
#[inline]
pub fn sq_distance(a: Point, b: Point) -> f64 {
    (b - a).norm_squared()
}

/// Cross product `a × b` of two offsets.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cyclic edges of a polygon, starting with `(last, first)`.
pub fn polygon_edges(poly: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let prev = poly.iter().copied().cycle().skip(poly.len().saturating_sub(1));
    prev.zip(poly.iter().copied())
}

/// Half-open quadrant of an offset; `None` when the offset is zero.
///
/// Quadrant k covers the directions from angle k·90° (inclusive) to
/// (k+1)·90° (exclusive), so `d` and `-d` always land in opposite quadrants.
#[inline]
fn quadrant(v: Point) -> Option<i32> {
    if v.x > 0.0 && v.y >= 0.0 {
        Some(0)
    } else if v.x <= 0.0 && v.y > 0.0 {
        Some(1)
    } else if v.x < 0.0 && v.y <= 0.0 {
        Some(2)
    } else if v.x >= 0.0 && v.y < 0.0 {
        Some(3)
    } else {
        None
    }
}

/// Classify `p` against the closed polygon `poly` by quadrant winding.
pub fn point_in_polygon(poly: &[Point], p: Point) -> Containment {
    let mut turns: i64 = 0;
    for (v1, v2) in polygon_edges(poly) {
        let (Some(q1), Some(q2)) = (quadrant(v1 - p), quadrant(v2 - p)) else {
            return Containment::OnBoundary;
        };
        match (q2 - q1).rem_euclid(4) {
            0 => {}
            1 => turns += 1,
            3 => turns -= 1,
            _ => {
                // Opposite quadrants: the edge passes by p on one side or through it.
                let side = cross(p - v1, v2 - v1);
                if side == 0.0 {
                    return Containment::OnBoundary;
                }
                turns += if side < 0.0 { 2 } else { -2 };
            }
        }
    }
    debug_assert_eq!(turns.rem_euclid(4), 0, "winding must close on a full turn");
    if turns != 0 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// True iff `a1a2` and `b1b2` cross at a single interior point of both.
///
/// Touching at an endpoint and collinear overlap are not crossings.
#[inline]
pub fn properly_cross(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let da = a2 - a1;
    let db = b2 - b1;
    cross(da, b1 - a1) * cross(da, b2 - a1) < 0.0 && cross(db, a1 - b1) * cross(db, a2 - b1) < 0.0
}

/// Segment `p1p2` lies in the closed polygon: both endpoints contained and no
/// proper crossing with any boundary edge.
pub fn segment_in_polygon(poly: &[Point], p1: Point, p2: Point) -> bool {
    if !point_in_polygon(poly, p1).is_contained() || !point_in_polygon(poly, p2).is_contained() {
        return false;
    }
    !polygon_edges(poly).any(|(b1, b2)| properly_cross(p1, p2, b1, b2))
}

/// Closest point to `p` on the segment `p1p2`.
///
/// Returns the orthogonal projection when it falls within the segment
/// (inclusive), otherwise the nearer endpoint. Degenerate segments return `p1`.
pub fn closest_point_on_segment(p1: Point, p2: Point, p: Point) -> Point {
    let d = p2 - p1;
    let len_sq = d.norm_squared();
    if len_sq == 0.0 {
        return p1;
    }
    let t = (p - p1).dot(&d) / len_sq;
    if (0.0..=1.0).contains(&t) {
        p1 + d * t
    } else if sq_distance(p1, p) < sq_distance(p2, p) {
        p1
    } else {
        p2
    }
}
