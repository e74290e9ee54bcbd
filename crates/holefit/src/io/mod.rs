//! JSON problem and solution files.
//!
//! Problems are validated on load and fail with a typed error. Solutions are
//! best effort: `load_solution_or_default` falls back to the figure's source
//! positions (and no held bonuses) when the file is missing, unreadable, or
//! does not fit the figure, and logs a warning instead of failing.

mod records;

pub use records::{BonusRecord, FigureRecord, HeldRecord, ProblemRecord, SolutionRecord};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::problem::{HeldBonuses, Problem, ProblemError};
use crate::Point;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what} record")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode solution")]
    Encode(#[source] serde_json::Error),

    #[error("solution has {found} vertices, figure has {expected}")]
    VertexCount { expected: usize, found: usize },

    #[error("invalid problem")]
    Problem(#[from] ProblemError),
}

fn read(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a problem record.
pub fn parse_problem(text: &str) -> Result<Problem, IoError> {
    let record: ProblemRecord = serde_json::from_str(text).map_err(|source| IoError::Parse {
        what: "problem",
        source,
    })?;
    Ok(record.into_problem()?)
}

pub fn load_problem(path: &Path) -> Result<Problem, IoError> {
    let problem = parse_problem(&read(path)?)?;
    tracing::debug!(
        path = %path.display(),
        hole = problem.hole().len(),
        vertices = problem.figure().vertices.len(),
        edges = problem.edges().len(),
        bonuses = problem.bonuses().len(),
        "problem loaded"
    );
    Ok(problem)
}

/// Parse a solution record and check it against `problem`.
pub fn parse_solution(
    text: &str,
    problem: &Problem,
) -> Result<(Vec<Point>, HeldBonuses), IoError> {
    let record: SolutionRecord = serde_json::from_str(text).map_err(|source| IoError::Parse {
        what: "solution",
        source,
    })?;
    let expected = problem.figure().vertices.len();
    if record.vertices.len() != expected {
        return Err(IoError::VertexCount {
            expected,
            found: record.vertices.len(),
        });
    }
    Ok((record.pose(), record.held()))
}

pub fn load_solution(
    path: &Path,
    problem: &Problem,
) -> Result<(Vec<Point>, HeldBonuses), IoError> {
    parse_solution(&read(path)?, problem)
}

/// Load a prior solution, or start from the source positions.
pub fn load_solution_or_default(
    path: Option<&Path>,
    problem: &Problem,
) -> (Vec<Point>, HeldBonuses) {
    let source = || (problem.figure().vertices.clone(), HeldBonuses::none());
    let Some(path) = path else {
        return source();
    };
    match load_solution(path, problem) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "using source positions");
            source()
        }
    }
}

pub fn solution_to_json(pose: &[Point], held: &HeldBonuses) -> Result<String, IoError> {
    serde_json::to_string(&SolutionRecord::new(pose, held)).map_err(IoError::Encode)
}

pub fn save_solution(path: &Path, pose: &[Point], held: &HeldBonuses) -> Result<(), IoError> {
    let text = solution_to_json(pose, held)?;
    fs::write(path, text).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "solution saved");
    Ok(())
}
