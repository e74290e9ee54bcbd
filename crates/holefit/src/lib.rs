//! Geometric validity and relaxation engine for fitting a figure into a hole.
//!
//! A figure is a fixed graph of vertices and edges; a hole is a simple polygon.
//! A pose (the solution) moves the figure's vertices around. This crate checks
//! whether a pose is valid (every edge inside the hole, every edge length
//! within the epsilon band), scores it, and nudges it toward validity with
//! small damped per-tick passes.
//!
//! Layout
//! - `geom`: exact point/segment predicates and edit primitives.
//! - `problem`: typed problem model, load-time validation, anchors.
//! - `eval`: validity verdicts and the dislike score under held bonuses.
//! - `relax`: Unstretch / Stuff / Fill / BonusFill passes.
//! - `matcher`: length-signature candidate placement.
//! - `io`: JSON records and solution persistence.
//! - `session`: single-writer owner of a pose; tick = step + evaluate.

mod cfg;
pub mod eval;
pub mod geom;
pub mod io;
pub mod matcher;
pub mod problem;
pub mod relax;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// A point in problem coordinates.
pub type Point = Vec2<f64>;

/// Common exports for callers driving a session.
pub mod prelude {
    pub use crate::eval::{evaluate, EdgeStatus, Evaluation};
    pub use crate::geom::{
        closest_point_on_segment, move_toward, point_in_polygon, segment_in_polygon, sq_distance,
        Containment,
    };
    pub use crate::matcher::{match_corners, match_edges, MatchReport};
    pub use crate::problem::{
        Bonus, BonusKind, Figure, HeldBonus, HeldBonuses, Problem, ProblemError, ProblemId,
    };
    pub use crate::relax::{step, Damping, StepCfg, StepReport};
    pub use crate::session::Session;
    pub use crate::{Point, Vec2};
}
