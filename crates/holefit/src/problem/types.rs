//! Bonus vocabulary shared by problems, poses, and verdicts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Bonus kinds. `BreakALeg` is recognized but has no validity effect here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusKind {
    Globalist,
    Wallhack,
    BreakALeg,
    Superflex,
}

impl BonusKind {
    pub const ALL: [BonusKind; 4] = [
        BonusKind::Globalist,
        BonusKind::Wallhack,
        BonusKind::BreakALeg,
        BonusKind::Superflex,
    ];

    /// Wire name, e.g. `BREAK_A_LEG`.
    pub fn as_str(self) -> &'static str {
        match self {
            BonusKind::Globalist => "GLOBALIST",
            BonusKind::Wallhack => "WALLHACK",
            BonusKind::BreakALeg => "BREAK_A_LEG",
            BonusKind::Superflex => "SUPERFLEX",
        }
    }

    /// First letter of the wire name; used in solution file suffixes.
    pub fn initial(self) -> char {
        match self {
            BonusKind::Globalist => 'G',
            BonusKind::Wallhack => 'W',
            BonusKind::BreakALeg => 'B',
            BonusKind::Superflex => 'S',
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized bonus name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bonus kind `{0}` (expected GLOBALIST, WALLHACK, BREAK_A_LEG or SUPERFLEX)")]
pub struct UnknownBonusKind(pub String);

/// Error for a malformed `KIND=ID` held-bonus argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeldBonusError {
    #[error(transparent)]
    Kind(#[from] UnknownBonusKind),
    #[error("missing problem id in `{0}` (expected KIND=ID)")]
    MissingId(String),
}

impl FromStr for BonusKind {
    type Err = UnknownBonusKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        BonusKind::ALL
            .into_iter()
            .find(|k| k.as_str() == upper)
            .ok_or_else(|| UnknownBonusKind(s.to_string()))
    }
}

/// Identifier of the problem a bonus unlocks or was unlocked from.
///
/// Records carry either a number or a string; the original form is kept so
/// that saved poses round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProblemId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemId::Number(n) => write!(f, "{n}"),
            ProblemId::Name(s) => f.write_str(s),
        }
    }
}

impl FromStr for ProblemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(ProblemId::Number)
            .unwrap_or_else(|_| ProblemId::Name(s.to_string())))
    }
}

/// A bonus placed in a problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    pub position: Point,
    pub problem: ProblemId,
}

/// A bonus the pose is allowed to use, obtained from another problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeldBonus {
    pub kind: BonusKind,
    pub problem: ProblemId,
}

/// Set of held bonuses, at most one per kind, kept in `BonusKind` order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldBonuses {
    held: Vec<HeldBonus>,
}

impl HeldBonuses {
    pub fn none() -> Self {
        Self::default()
    }

    /// Insert, replacing any bonus of the same kind.
    pub fn insert(&mut self, bonus: HeldBonus) {
        match self.held.binary_search_by(|h| h.kind.cmp(&bonus.kind)) {
            Ok(i) => self.held[i] = bonus,
            Err(i) => self.held.insert(i, bonus),
        }
    }

    #[inline]
    pub fn holds(&self, kind: BonusKind) -> bool {
        self.held.iter().any(|h| h.kind == kind)
    }

    pub fn get(&self, kind: BonusKind) -> Option<&ProblemId> {
        self.held.iter().find(|h| h.kind == kind).map(|h| &h.problem)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeldBonus> {
        self.held.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl FromIterator<HeldBonus> for HeldBonuses {
    fn from_iter<I: IntoIterator<Item = HeldBonus>>(iter: I) -> Self {
        let mut out = HeldBonuses::none();
        for b in iter {
            out.insert(b);
        }
        out
    }
}

/// Parse `KIND=ID` (e.g. `GLOBALIST=42`).
impl FromStr for HeldBonus {
    type Err = HeldBonusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let missing = || HeldBonusError::MissingId(s.to_string());
        let (kind, id) = s.split_once('=').ok_or_else(missing)?;
        let kind = kind.parse()?;
        let id = id.trim();
        if id.is_empty() {
            return Err(missing());
        }
        let problem = id
            .parse::<ProblemId>()
            .unwrap_or_else(|never| match never {});
        Ok(HeldBonus { kind, problem })
    }
}
