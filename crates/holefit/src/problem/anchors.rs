//! Exact-position lookup for hole vertices and bonus positions.
//!
//! Built once when a problem is loaded. A pose vertex is "anchored" when it
//! sits exactly on a hole vertex or bonus; anchored vertices can be kept in
//! place by the sticky options and decide which bonuses are collected.

use std::collections::HashMap;

use crate::Point;

/// What sits at one exact position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    /// Index of the hole vertex at this position (first one if repeated).
    pub hole_vertex: Option<usize>,
    /// Indices into `Problem::bonuses` located here, in problem order.
    pub bonuses: Vec<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct Anchors {
    by_pos: HashMap<(u64, u64), Anchor>,
    /// Distinct bonus positions in first-seen order.
    bonus_positions: Vec<Point>,
}

/// Bit-exact key; `-0.0` folds into `0.0` so equal coordinates share a key.
#[inline]
fn key(p: Point) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

impl Anchors {
    pub fn build(hole: &[Point], bonus_positions: impl IntoIterator<Item = Point>) -> Self {
        let mut out = Anchors::default();
        for (i, &h) in hole.iter().enumerate() {
            out.by_pos.entry(key(h)).or_default().hole_vertex.get_or_insert(i);
        }
        for (i, b) in bonus_positions.into_iter().enumerate() {
            let entry = out.by_pos.entry(key(b)).or_default();
            if entry.bonuses.is_empty() {
                out.bonus_positions.push(b);
            }
            entry.bonuses.push(i);
        }
        out
    }

    #[inline]
    pub fn at(&self, p: Point) -> Option<&Anchor> {
        self.by_pos.get(&key(p))
    }

    #[inline]
    pub fn is_hole_vertex(&self, p: Point) -> bool {
        self.at(p).is_some_and(|a| a.hole_vertex.is_some())
    }

    #[inline]
    pub fn has_bonus(&self, p: Point) -> bool {
        self.at(p).is_some_and(|a| !a.bonuses.is_empty())
    }

    /// Bonus indices located exactly at `p`.
    pub fn bonuses_at(&self, p: Point) -> &[usize] {
        self.at(p).map(|a| a.bonuses.as_slice()).unwrap_or(&[])
    }

    pub fn bonus_positions(&self) -> &[Point] {
        &self.bonus_positions
    }
}
