use std::path::{Path, PathBuf};

use holefit::eval::Evaluation;
use holefit::problem::{HeldBonuses, Problem};

/// `<stem>.json` cut from a prior solution path, or `solution.json`.
///
/// Everything after the first `.json` is dropped, so re-saving a suggested
/// name replaces its suffix instead of stacking a new one.
pub fn base_name(solution: Option<&Path>) -> PathBuf {
    let Some(path) = solution else {
        return PathBuf::from("solution.json");
    };
    let text = path.to_string_lossy();
    let stem = text.split(".json").next().unwrap_or_default();
    PathBuf::from(format!("{stem}.json"))
}

/// `[G<id>W<id>S<id>=][-]<dislikes>[-<initial><id>...]`
///
/// Held bonuses come first in kind order, then the dislikes (negative when
/// the pose is invalid), then one entry per collected bonus.
pub fn suffix(eval: &Evaluation, held: &HeldBonuses, problem: &Problem) -> String {
    let held: String = held
        .iter()
        .map(|h| format!("{}{}", h.kind.initial(), h.problem))
        .collect();
    let sign = if eval.verdict { "" } else { "-" };
    let mut out = format!("{sign}{}", eval.dislikes as i64);
    if !held.is_empty() {
        out = format!("{held}={out}");
    }
    for &i in &eval.collected {
        let bonus = &problem.bonuses()[i];
        out.push_str(&format!("-{}{}", bonus.kind.initial(), bonus.problem));
    }
    out
}

/// Output path suggested for the current pose.
pub fn suggested_path(
    solution: Option<&Path>,
    eval: &Evaluation,
    held: &HeldBonuses,
    problem: &Problem,
) -> PathBuf {
    let mut name = base_name(solution).into_os_string();
    name.push(".");
    name.push(suffix(eval, held, problem));
    PathBuf::from(name)
}
