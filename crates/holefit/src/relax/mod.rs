//! Per-tick relaxation passes.
//!
//! Purpose
//! - Nudge a pose toward validity and a low dislike score with small damped
//!   moves, one tick at a time. An external scheduler decides when to tick.
//!
//! Passes (run in this order when enabled)
//! - Unstretch: pull edges back toward their source length about their midpoint.
//! - Stuff: pull vertices outside the hole toward the closest boundary point.
//! - Fill: each hole vertex pulls its nearest pose vertex.
//! - BonusFill: each bonus position pulls its nearest pose vertex.
//!
//! Passes never fail. A disabled pass is a no-op. `StepCfg` is a plain value
//! captured by the caller for the whole tick.

mod passes;

pub use passes::{bonus_fill, fill, nearest_vertex, stuff, unstretch};

use crate::problem::{HeldBonuses, Problem};
use crate::Point;

/// Damping fractions applied per tick. Keep `unstretch > stuff > fill`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Damping {
    pub unstretch: f64,
    pub stuff: f64,
    pub fill: f64,
}

impl Default for Damping {
    fn default() -> Self {
        Self {
            unstretch: 0.1,
            stuff: 0.075,
            fill: 0.05,
        }
    }
}

impl Damping {
    /// All fractions in (0, 1) and strictly ordered.
    pub fn is_stable(&self) -> bool {
        let in_range = |s: f64| s > 0.0 && s < 1.0;
        in_range(self.unstretch)
            && in_range(self.stuff)
            && in_range(self.fill)
            && self.unstretch > self.stuff
            && self.stuff > self.fill
    }
}

/// Which passes run in a tick and how they behave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepCfg {
    pub unstretch: bool,
    pub stuff: bool,
    pub fill: bool,
    pub bonus_fill: bool,
    /// Unstretch every edge, not only the ones failing epsilon.
    pub unstretch_all: bool,
    /// Keep vertices sitting exactly on a hole vertex in place while unstretching.
    pub sticky_hole: bool,
    /// Keep vertices sitting exactly on a bonus in place while unstretching.
    pub sticky_bonus: bool,
    /// Snap unstretched endpoints to integers in the direction of travel.
    pub integer_unstretch: bool,
    /// Only unstretch edges touching this vertex (e.g. the one being dragged).
    pub focus: Option<usize>,
    pub damping: Damping,
}

impl Default for StepCfg {
    fn default() -> Self {
        Self {
            unstretch: false,
            stuff: false,
            fill: false,
            bonus_fill: false,
            unstretch_all: false,
            sticky_hole: true,
            sticky_bonus: true,
            integer_unstretch: false,
            focus: None,
            damping: Damping::default(),
        }
    }
}

impl StepCfg {
    /// Unstretch, Stuff and Fill enabled; the usual auto-solve setting.
    pub fn auto() -> Self {
        Self {
            unstretch: true,
            stuff: true,
            fill: true,
            ..Self::default()
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.unstretch || self.stuff || self.fill || self.bonus_fill
    }
}

/// Number of vertex moves made by each pass during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub unstretched: usize,
    pub stuffed: usize,
    pub filled: usize,
    pub bonus_filled: usize,
}

impl StepReport {
    pub fn total(&self) -> usize {
        self.unstretched + self.stuffed + self.filled + self.bonus_filled
    }
}

/// Run one tick of the enabled passes on `pose`.
pub fn step(
    problem: &Problem,
    pose: &mut [Point],
    cfg: &StepCfg,
    held: &HeldBonuses,
) -> StepReport {
    let mut report = StepReport::default();
    if cfg.unstretch {
        report.unstretched = unstretch(problem, pose, cfg, held);
    }
    if cfg.stuff {
        report.stuffed = stuff(problem.hole(), pose, cfg.damping.stuff);
    }
    if cfg.fill {
        report.filled = fill(problem.hole(), pose, cfg.damping.fill);
    }
    if cfg.bonus_fill {
        report.bonus_filled = bonus_fill(problem, pose, cfg.damping.fill);
    }
    tracing::trace!(?report, "relax tick");
    report
}
