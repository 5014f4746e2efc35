//! Random wall placement.

use std::fmt;

use rand::Rng;
use stepstar_core::{Grid, GridError, Kind, Spot};

/// Parameters for [`WallGen::random`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallConfig {
    pub width: i32,
    pub height: i32,
    /// Probability (0.0–1.0) that any given spot becomes a wall.
    pub rate: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            rate: 0.3,
        }
    }
}

/// Errors that can occur when generating random walls.
#[derive(Debug, Clone, PartialEq)]
pub enum WallError {
    /// The wall rate was outside 0.0–1.0 or not a number.
    InvalidRate(f64),
    Grid(GridError),
}

impl fmt::Display for WallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate(r) => write!(f, "walls: rate {r} is outside 0.0..=1.0"),
            Self::Grid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for WallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidRate(_) => None,
        }
    }
}

impl From<GridError> for WallError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Random wall generator.
///
/// Seed the RNG (e.g. `StdRng::seed_from_u64`) for reproducible layouts.
pub struct WallGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> WallGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Build a grid where each spot is a wall with probability `rate`.
    ///
    /// The start and goal corners are always left open.
    pub fn random(&mut self, cfg: &WallConfig) -> Result<Grid, WallError> {
        if !(0.0..=1.0).contains(&cfg.rate) {
            return Err(WallError::InvalidRate(cfg.rate));
        }
        let first = Spot::ZERO;
        let last = Spot::new(cfg.height - 1, cfg.width - 1);
        let rng = &mut self.rng;
        let grid = Grid::generate(cfg.width, cfg.height, |s| {
            if s == first || s == last || !rng.random_bool(cfg.rate) {
                Kind::Path
            } else {
                Kind::Wall
            }
        })?;
        log::debug!(
            "walls: generated {} grid with {} walls at rate {}",
            grid.bounds(),
            grid.count(Kind::Wall),
            cfg.rate
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn wall_gen(seed: u64) -> WallGen<StdRng> {
        WallGen::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn corners_stay_open() {
        let cfg = WallConfig {
            width: 8,
            height: 6,
            rate: 1.0,
        };
        let grid = wall_gen(1).random(&cfg).unwrap();
        assert!(!grid.first().is_wall());
        assert!(!grid.last().is_wall());
        assert_eq!(grid.count(Kind::Wall), 8 * 6 - 2);
    }

    #[test]
    fn zero_rate_has_no_walls() {
        let cfg = WallConfig {
            rate: 0.0,
            ..WallConfig::default()
        };
        let grid = wall_gen(2).random(&cfg).unwrap();
        assert_eq!(grid.count(Kind::Wall), 0);
    }

    #[test]
    fn same_seed_same_grid() {
        let cfg = WallConfig::default();
        let a = wall_gen(42).random(&cfg).unwrap();
        let b = wall_gen(42).random(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn produces_mixed_grid() {
        let cfg = WallConfig {
            width: 30,
            height: 30,
            rate: 0.4,
        };
        let walls = wall_gen(7).random(&cfg).unwrap().count(Kind::Wall);
        assert!(walls > 0);
        assert!(walls < 30 * 30);
    }

    #[test]
    fn rejects_bad_rate_and_dimensions() {
        let mut g = wall_gen(3);
        let cfg = WallConfig {
            rate: 1.5,
            ..WallConfig::default()
        };
        assert_eq!(g.random(&cfg), Err(WallError::InvalidRate(1.5)));
        let cfg = WallConfig {
            rate: f64::NAN,
            ..WallConfig::default()
        };
        assert!(matches!(g.random(&cfg), Err(WallError::InvalidRate(_))));
        let cfg = WallConfig {
            width: 0,
            ..WallConfig::default()
        };
        assert_eq!(
            g.random(&cfg),
            Err(WallError::Grid(GridError::InvalidDimensions {
                width: 0,
                height: 20
            }))
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_json() {
        let cfg: WallConfig =
            serde_json::from_str(r#"{"width":12,"height":8,"rate":0.25}"#).unwrap();
        assert_eq!(
            cfg,
            WallConfig {
                width: 12,
                height: 8,
                rate: 0.25
            }
        );
    }
}
