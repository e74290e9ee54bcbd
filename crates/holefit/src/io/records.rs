//! Wire records for problems and solutions.

use serde::{Deserialize, Serialize, Serializer};

use crate::problem::{
    Bonus, BonusKind, Figure, HeldBonus, HeldBonuses, Problem, ProblemError, ProblemId,
};
use crate::Point;

/// Largest magnitude an `f64` holds as an exact integer.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub hole: Vec<[f64; 2]>,
    pub epsilon: u64,
    pub figure: FigureRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonuses: Vec<BonusRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureRecord {
    pub vertices: Vec<[f64; 2]>,
    pub edges: Vec<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusRecord {
    pub bonus: BonusKind,
    pub position: [f64; 2],
    pub problem: ProblemId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    #[serde(serialize_with = "integral_points")]
    pub vertices: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonuses: Vec<HeldRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeldRecord {
    pub bonus: BonusKind,
    pub problem: ProblemId,
}

#[inline]
fn point(p: [f64; 2]) -> Point {
    Point::new(p[0], p[1])
}

#[inline]
fn pair(p: &Point) -> [f64; 2] {
    [p.x, p.y]
}

/// Coordinate that serializes as a JSON integer when it is one.
struct Coord(f64);

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.fract() == 0.0 && v.abs() < MAX_EXACT_INT {
            s.serialize_i64(v as i64)
        } else {
            s.serialize_f64(v)
        }
    }
}

fn integral_points<S: Serializer>(points: &[[f64; 2]], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(points.iter().map(|&[x, y]| [Coord(x), Coord(y)]))
}

impl ProblemRecord {
    /// Validate into a `Problem`.
    pub fn into_problem(self) -> Result<Problem, ProblemError> {
        let figure = Figure {
            vertices: self.figure.vertices.into_iter().map(point).collect(),
            edges: self.figure.edges.into_iter().map(|[a, b]| (a, b)).collect(),
        };
        let bonuses = self
            .bonuses
            .into_iter()
            .map(|b| Bonus {
                kind: b.bonus,
                position: point(b.position),
                problem: b.problem,
            })
            .collect();
        Problem::new(
            self.hole.into_iter().map(point).collect(),
            figure,
            self.epsilon,
            bonuses,
        )
    }
}

impl SolutionRecord {
    pub fn new(pose: &[Point], held: &HeldBonuses) -> Self {
        Self {
            vertices: pose.iter().map(pair).collect(),
            bonuses: held
                .iter()
                .map(|h| HeldRecord {
                    bonus: h.kind,
                    problem: h.problem.clone(),
                })
                .collect(),
        }
    }

    pub fn pose(&self) -> Vec<Point> {
        self.vertices.iter().copied().map(point).collect()
    }

    /// Held bonuses, skipping entries with a blank problem id.
    pub fn held(&self) -> HeldBonuses {
        self.bonuses
            .iter()
            .filter(|h| !matches!(&h.problem, ProblemId::Name(name) if name.trim().is_empty()))
            .map(|h| HeldBonus {
                kind: h.bonus,
                problem: h.problem.clone(),
            })
            .collect()
    }
}
