//! Exact 2D primitives for hole/figure geometry.
//!
//! Purpose
//! - Point-in-polygon and segment-in-polygon predicates that stay exact for
//!   integer coordinates (no square roots, no trigonometry).
//! - Closest-point projection used to pull stray vertices back to the boundary.
//! - Damped motion (`move_toward`) and rigid edit primitives applied to a pose.
//!
//! Conventions
//! - Polygons are slices of `Point` with an implicit closing edge.
//! - Boundary points count as contained everywhere in this crate.

mod motion;
mod predicates;

pub use motion::{move_toward, mirror_x, rotate_about_pivot, snap_to_integer, spread, translate};
pub use predicates::{
    closest_point_on_segment, cross, point_in_polygon, polygon_edges, properly_cross,
    segment_in_polygon, sq_distance, Containment,
};
