use std::fmt;

use stepstar_core::{Grid, Node, NodeId, Spot};

use crate::frontier::{Frontier, Membership};
use crate::heuristic::Heuristic;

/// Cost of every accepted move, diagonals included.
pub const STEP_COST: f64 = 1.0;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a search stands. `Solved` and `NoSolution` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Running,
    Solved,
    NoSolution,
}

impl Phase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Solved => "solved",
            Self::NoSolution => "no solution",
        })
    }
}

// ---------------------------------------------------------------------------
// SolverError
// ---------------------------------------------------------------------------

/// Misuse of a [`Solver`]. An unreachable goal is not an error; it shows up
/// as [`Phase::NoSolution`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// [`Solver::step`] was called with an empty open set.
    EmptyFrontier,
    /// The heuristic returned a negative or non-finite estimate.
    InvalidEstimate { spot: Spot, value: f64 },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFrontier => f.write_str("solver: step called on an empty frontier"),
            Self::InvalidEstimate { spot, value } => {
                write!(f, "solver: heuristic estimate {value} at {spot} is not a finite non-negative number")
            }
        }
    }
}

impl std::error::Error for SolverError {}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Summary of a search, cheap to log or serialise.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub steps: usize,
    pub open: usize,
    pub closed: usize,
    /// Current best path, goal end first.
    pub answer: Vec<Spot>,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Incremental A* from [`Grid::first`] to [`Grid::last`].
///
/// The solver owns the grid for the duration of the run and advances the
/// search by exactly one expansion per [`step`](Solver::step), so a frame
/// loop can render the open set, closed set and current best path between
/// calls. Ties on `f` are broken by lower `h`, then by earliest insertion
/// into the open set.
pub struct Solver<H> {
    grid: Grid,
    heuristic: H,
    frontier: Frontier,
    goal: NodeId,
    answer: Vec<NodeId>,
    steps: usize,
    nbuf: Vec<NodeId>,
    relax: Vec<(NodeId, f64)>,
}

impl<H: Heuristic> Solver<H> {
    /// Start a search over `grid`. Costs left by an earlier run are cleared.
    ///
    /// The heuristic is probed once from start to goal so a malformed one is
    /// rejected before any step runs.
    pub fn new(mut grid: Grid, heuristic: H) -> Result<Self, SolverError> {
        grid.reset_search();
        let start = grid.first_id();
        let goal = grid.last_id();
        check_estimate(
            grid[start].spot(),
            heuristic.estimate(grid[start].spot(), grid[goal].spot()),
        )?;

        let mut frontier = Frontier::new(grid.len());
        if !grid[start].is_wall() {
            frontier.push(start, grid[start].cost());
        }

        let mut solver = Self {
            grid,
            heuristic,
            frontier,
            goal,
            answer: Vec::new(),
            steps: 0,
            nbuf: Vec::with_capacity(8),
            relax: Vec::with_capacity(8),
        };
        if let Some(current) = solver.frontier.peek() {
            solver.answer = solver.trace(current);
        }
        log::debug!(
            "solver: new search over {} grid, phase {}",
            solver.grid.bounds(),
            solver.state()
        );
        Ok(solver)
    }

    /// Expand the best open node and relax its neighbours.
    ///
    /// Returns the phase after the expansion. Calling this once the goal is
    /// the best open node changes nothing; calling it with an empty open set
    /// is an error, so drivers should check [`state`](Solver::state) first.
    pub fn step(&mut self) -> Result<Phase, SolverError> {
        let current = self.frontier.peek().ok_or(SolverError::EmptyFrontier)?;
        if current == self.goal {
            self.answer = self.trace(current);
            return Ok(Phase::Solved);
        }

        let goal_spot = self.grid[self.goal].spot();
        let tentative_g = self.grid[current].cost().g + STEP_COST;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbor_ids(current, &mut nbuf);

        // All estimates are checked before any search state changes.
        let mut relax = std::mem::take(&mut self.relax);
        relax.clear();
        let mut result = Ok(());
        for &n in nbuf.iter() {
            let membership = self.frontier.membership(n);
            if membership == Membership::Closed {
                continue;
            }
            if membership == Membership::Open && tentative_g >= self.grid[n].cost().g {
                continue;
            }
            let spot = self.grid[n].spot();
            match check_estimate(spot, self.heuristic.estimate(spot, goal_spot)) {
                Ok(h) => relax.push((n, h)),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.nbuf = nbuf;
        if let Err(e) = result {
            self.relax = relax;
            return Err(e);
        }

        self.frontier.close_min();
        self.steps += 1;
        for &(n, h) in relax.iter() {
            let node = &mut self.grid[n];
            if self.frontier.membership(n) == Membership::Open {
                node.improve(tentative_g, h, current);
            } else {
                node.discover(tentative_g, h, current);
            }
            self.frontier.push(n, node.cost());
        }
        self.relax = relax;

        self.answer = match self.frontier.peek() {
            Some(best) => self.trace(best),
            None => self.trace(current),
        };

        let phase = self.state();
        log::trace!(
            "solver: step {} expanded {}, open {}, closed {}",
            self.steps,
            self.grid[current].spot(),
            self.frontier.open_len(),
            self.frontier.closed_len()
        );
        if phase.is_terminal() {
            log::debug!(
                "solver: {} after {} steps, path of {} nodes",
                phase,
                self.steps,
                self.answer.len()
            );
        }
        Ok(phase)
    }

    /// Call [`step`](Solver::step) while the search is running, at most
    /// `limit` times. Returns the phase reached.
    pub fn run(&mut self, limit: usize) -> Result<Phase, SolverError> {
        let mut phase = self.state();
        for _ in 0..limit {
            if phase.is_terminal() {
                break;
            }
            phase = self.step()?;
        }
        Ok(phase)
    }
}

impl<H> Solver<H> {
    /// Current phase, derived from the open set. Side-effect free.
    pub fn state(&self) -> Phase {
        match self.frontier.peek() {
            None => Phase::NoSolution,
            Some(current) if current == self.goal => Phase::Solved,
            Some(_) => Phase::Running,
        }
    }

    /// Follow back-references from `from` to the start.
    ///
    /// The result lists `from` first and the start last.
    pub fn trace(&self, from: NodeId) -> Vec<NodeId> {
        let mut path = vec![from];
        let mut cur = from;
        while let Some(prev) = self.grid[cur].previous() {
            path.push(prev);
            cur = prev;
        }
        path
    }

    /// The current best path, goal end first.
    ///
    /// Before the goal is reached this is the path to the best open node, or
    /// to the last expanded node once the open set is exhausted.
    pub fn answer(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.answer.iter().map(|&id| &self.grid[id])
    }

    /// Spots of [`answer`](Solver::answer).
    pub fn answer_spots(&self) -> Vec<Spot> {
        self.answer().map(Node::spot).collect()
    }

    /// The best open node, which the next step would expand.
    pub fn current(&self) -> Option<&Node> {
        self.frontier.peek().map(|id| &self.grid[id])
    }

    /// Nodes waiting to be expanded, row-major.
    pub fn open_set(&self) -> impl Iterator<Item = &Node> + '_ {
        self.with_membership(Membership::Open)
    }

    /// Nodes already expanded, row-major.
    pub fn closed_set(&self) -> impl Iterator<Item = &Node> + '_ {
        self.with_membership(Membership::Closed)
    }

    fn with_membership(&self, m: Membership) -> impl Iterator<Item = &Node> + '_ {
        self.grid
            .iter()
            .filter(move |n| self.membership(n.spot()) == m)
    }

    /// Where `s` stands in the search. Out-of-bounds spots are `Unseen`.
    pub fn membership(&self, s: Spot) -> Membership {
        self.grid
            .id(s)
            .map_or(Membership::Unseen, |id| self.frontier.membership(id))
    }

    pub fn is_open(&self, s: Spot) -> bool {
        self.membership(s) == Membership::Open
    }

    pub fn is_closed(&self, s: Spot) -> bool {
        self.membership(s) == Membership::Closed
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.frontier.open_len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.frontier.closed_len()
    }

    /// Number of expansions performed so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Read-only view of the grid being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// End the run and hand the grid back.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Summary of the search so far.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state(),
            steps: self.steps,
            open: self.open_len(),
            closed: self.closed_len(),
            answer: self.answer_spots(),
        }
    }
}

fn check_estimate(spot: Spot, value: f64) -> Result<f64, SolverError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SolverError::InvalidEstimate { spot, value })
    }
}
