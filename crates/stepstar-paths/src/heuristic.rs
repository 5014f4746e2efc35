use std::fmt;
use std::str::FromStr;

use stepstar_core::Spot;

/// Estimate of the remaining cost between two lattice positions.
///
/// Implementations must be pure functions of the two spots and return a
/// finite, non-negative value. The solver rejects anything else with
/// [`SolverError::InvalidEstimate`](crate::SolverError::InvalidEstimate).
pub trait Heuristic {
    fn estimate(&self, from: Spot, to: Spot) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Spot, Spot) -> f64,
{
    #[inline]
    fn estimate(&self, from: Spot, to: Spot) -> f64 {
        self(from, to)
    }
}

/// Straight-line (L2) distance between two spots.
#[inline]
pub fn euclidean(a: Spot, b: Spot) -> f64 {
    let (dr, dc) = a.delta(b);
    f64::from(dr).hypot(f64::from(dc))
}

/// Manhattan (L1) distance between two spots.
#[inline]
pub fn manhattan(a: Spot, b: Spot) -> f64 {
    let (dr, dc) = a.delta(b);
    f64::from(dr + dc)
}

/// Chebyshev (L∞) distance between two spots.
#[inline]
pub fn chebyshev(a: Spot, b: Spot) -> f64 {
    let (dr, dc) = a.delta(b);
    f64::from(dr.max(dc))
}

/// [`euclidean`] as a [`Heuristic`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    #[inline]
    fn estimate(&self, from: Spot, to: Spot) -> f64 {
        euclidean(from, to)
    }
}

/// [`manhattan`] as a [`Heuristic`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Spot, to: Spot) -> f64 {
        manhattan(from, to)
    }
}

/// [`chebyshev`] as a [`Heuristic`].
///
/// With unit-cost diagonal moves this is the exact unobstructed distance.
#[derive(Copy, Clone, Debug, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    #[inline]
    fn estimate(&self, from: Spot, to: Spot) -> f64 {
        chebyshev(from, to)
    }
}

// ---------------------------------------------------------------------------
// HeuristicKind
// ---------------------------------------------------------------------------

/// Runtime choice among the built-in heuristics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeuristicKind {
    Euclidean,
    #[default]
    Manhattan,
    Chebyshev,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [Self::Euclidean, Self::Manhattan, Self::Chebyshev];

    pub fn name(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        }
    }
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: Spot, to: Spot) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => manhattan(from, to),
            Self::Chebyshev => chebyshev(from, to),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a heuristic name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown heuristic \u{201c}{}\u{201d} (expected euclidean, manhattan or chebyshev)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&HeuristicKind::Chebyshev).unwrap();
        assert_eq!(json, r#""chebyshev""#);
        let back: HeuristicKind = serde_json::from_str(r#""euclidean""#).unwrap();
        assert_eq!(back, HeuristicKind::Euclidean);
    }
}
