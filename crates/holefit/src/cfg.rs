//! Tolerance defaults shared by evaluation and relaxation (internal).
//!
//! Policy
//! - Fixed constants; passes and verdicts must agree on them, so they are not
//!   exposed as per-call knobs.

/// Scale of the epsilon band: deviations are measured in parts per million.
pub(crate) const PPM: f64 = 1_000_000.0;
/// Additive slack on the epsilon bound absorbing floating error in the ratio.
pub(crate) const EPS_FUDGE: f64 = 1e-7;
/// Squared length substituted for a collapsed pose edge.
pub(crate) const COLLAPSED_SQ_LEN: f64 = 0.1;
