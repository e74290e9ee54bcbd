//! Problem model: hole, figure, epsilon, and bonuses.
//!
//! A `Problem` is immutable after construction. `Problem::new` checks the
//! preconditions every other module relies on (simple hole, valid edge
//! indices, nonzero source edges), so evaluation and relaxation never
//! re-check them.

mod anchors;
mod types;
mod validate;

pub use anchors::{Anchor, Anchors};
pub use types::{
    Bonus, BonusKind, HeldBonus, HeldBonusError, HeldBonuses, ProblemId, UnknownBonusKind,
};

use thiserror::Error;

use crate::geom::sq_distance;
use crate::Point;

/// Load-time precondition violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("hole needs at least 3 vertices, got {len}")]
    HoleTooSmall { len: usize },

    #[error("hole edge {index} has zero length")]
    DegenerateHoleEdge { index: usize },

    #[error("hole is not simple: edges {a} and {b} intersect")]
    SelfIntersectingHole { a: usize, b: usize },

    #[error("figure has no vertices")]
    EmptyFigure,

    #[error("figure edge {edge} = ({a}, {b}) references a vertex out of range (figure has {len})")]
    EdgeOutOfRange {
        edge: usize,
        a: usize,
        b: usize,
        len: usize,
    },

    #[error("figure edge {edge} has zero source length")]
    ZeroLengthEdge { edge: usize },

    #[error("non-finite coordinate in {what}")]
    NonFinite { what: &'static str },
}

/// Figure graph: source positions and undirected edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub vertices: Vec<Point>,
    pub edges: Vec<(usize, usize)>,
}

impl Figure {
    /// Sorted, deduplicated neighbor lists per vertex.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.vertices.len()];
        for &(a, b) in &self.edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        for list in &mut adj {
            list.sort_unstable();
            list.dedup();
        }
        adj
    }
}

#[derive(Clone, Debug)]
pub struct Problem {
    hole: Vec<Point>,
    figure: Figure,
    epsilon: u64,
    bonuses: Vec<Bonus>,
    /// Squared source length per figure edge.
    src_sq: Vec<f64>,
    anchors: Anchors,
}

impl Problem {
    /// Validate and freeze a problem.
    pub fn new(
        hole: Vec<Point>,
        figure: Figure,
        epsilon: u64,
        bonuses: Vec<Bonus>,
    ) -> Result<Self, ProblemError> {
        validate::finite(&hole, "hole")?;
        validate::finite(&figure.vertices, "figure vertices")?;
        validate::finite(bonuses.iter().map(|b| &b.position), "bonus positions")?;
        validate::simple_hole(&hole)?;
        if figure.vertices.is_empty() {
            return Err(ProblemError::EmptyFigure);
        }
        let len = figure.vertices.len();
        let mut src_sq = Vec::with_capacity(figure.edges.len());
        for (edge, &(a, b)) in figure.edges.iter().enumerate() {
            if a >= len || b >= len {
                return Err(ProblemError::EdgeOutOfRange { edge, a, b, len });
            }
            let d = sq_distance(figure.vertices[a], figure.vertices[b]);
            if d == 0.0 {
                return Err(ProblemError::ZeroLengthEdge { edge });
            }
            src_sq.push(d);
        }
        let anchors = Anchors::build(&hole, bonuses.iter().map(|b| b.position));
        Ok(Self {
            hole,
            figure,
            epsilon,
            bonuses,
            src_sq,
            anchors,
        })
    }

    #[inline]
    pub fn hole(&self) -> &[Point] {
        &self.hole
    }
    #[inline]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }
    #[inline]
    pub fn epsilon(&self) -> u64 {
        self.epsilon
    }
    #[inline]
    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }
    #[inline]
    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }
    /// Squared source length of figure edge `edge`.
    #[inline]
    pub fn src_sq(&self, edge: usize) -> f64 {
        self.src_sq[edge]
    }
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.figure.edges
    }
}
