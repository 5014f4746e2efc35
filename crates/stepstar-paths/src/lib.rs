//! Heuristic search over [`stepstar_core::Grid`]s.
//!
//! The centrepiece is [`Solver`], an A* search exposed as an explicit state
//! machine: each [`Solver::step`] performs one expansion, and between steps
//! the open set, closed set and current best path can be inspected for live
//! rendering.
//!
//! # Driving a search
//!
//! ```
//! use stepstar_core::Grid;
//! use stepstar_paths::{Manhattan, Phase, Solver};
//!
//! let grid = Grid::open(3, 3).unwrap();
//! let mut solver = Solver::new(grid, Manhattan).unwrap();
//! while solver.state() == Phase::Running {
//!     solver.step().unwrap();
//! }
//! assert_eq!(solver.state(), Phase::Solved);
//! assert_eq!(solver.answer().len(), 3);
//! ```
//!
//! Every move, diagonal or not, costs [`STEP_COST`]. Closed nodes are never
//! reopened.

mod frontier;
mod heuristic;
mod solver;


pub use frontier::Membership;
pub use heuristic::{
    Chebyshev, Euclidean, Heuristic, HeuristicKind, Manhattan, UnknownHeuristic, chebyshev,
    euclidean, manhattan,
};
pub use solver::{Phase, STEP_COST, Snapshot, Solver, SolverError};
