//! The [`Grid`] type: a flat arena of [`Node`]s laid out over a lattice.
//!
//! The grid is the sole owner of its nodes. Back-references between nodes
//! are [`NodeId`]s into the arena, so tracing a path is plain index chasing.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::geom::{Bounds, Spot};

// ---------------------------------------------------------------------------
// Kind / Cost
// ---------------------------------------------------------------------------

/// What a lattice cell is made of. Fixed once the grid is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    #[default]
    Path,
    Wall,
}

/// Search cost of a node: cost so far `g` and estimate to goal `h`.
///
/// `f` is always derived as `g + h` and never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub g: f64,
    pub h: f64,
}

impl Cost {
    #[inline]
    pub const fn new(g: f64, h: f64) -> Self {
        Self { g, h }
    }

    /// Expansion priority, `g + h`.
    #[inline]
    pub fn f(self) -> f64 {
        self.g + self.h
    }
}

// ---------------------------------------------------------------------------
// NodeId / Node
// ---------------------------------------------------------------------------

/// Index of a node inside its grid's arena.
///
/// Only meaningful for the grid that handed it out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the grid's row-major node storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One lattice cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    spot: Spot,
    kind: Kind,
    cost: Cost,
    previous: Option<NodeId>,
}

impl Node {
    fn new(spot: Spot, kind: Kind) -> Self {
        Self {
            spot,
            kind,
            cost: Cost::default(),
            previous: None,
        }
    }

    #[inline]
    pub fn spot(&self) -> Spot {
        self.spot
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.kind == Kind::Wall
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The node this one was reached from, if any.
    #[inline]
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Record the first time a search reaches this node.
    #[doc(hidden)]
    pub fn discover(&mut self, g: f64, h: f64, previous: NodeId) {
        self.cost = Cost::new(g, h);
        self.previous = Some(previous);
    }

    /// Lower `g` to `g` through `previous`.
    ///
    /// Returns `false` and leaves the node untouched unless `g` is strictly
    /// below the current cost so far.
    #[doc(hidden)]
    pub fn improve(&mut self, g: f64, h: f64, previous: NodeId) -> bool {
        if g >= self.cost.g {
            return false;
        }
        self.cost = Cost::new(g, h);
        self.previous = Some(previous);
        true
    }

    fn reset(&mut self) {
        self.cost = Cost::default();
        self.previous = None;
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was not strictly positive.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid: invalid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `width × height` lattice of [`Node`]s in row-major storage.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    bounds: Bounds,
    nodes: Vec<Node>,
}

impl Grid {
    /// Build a grid, asking `kind_of` once per spot in row-major order.
    pub fn generate(
        width: i32,
        height: i32,
        mut kind_of: impl FnMut(Spot) -> Kind,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let bounds = Bounds::new(width, height);
        let nodes = bounds.iter().map(|s| Node::new(s, kind_of(s))).collect();
        Ok(Self { bounds, nodes })
    }

    /// A grid with no walls at all.
    pub fn open(width: i32, height: i32) -> Result<Self, GridError> {
        Self::generate(width, height, |_| Kind::Path)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a successfully generated grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena id of the node at `s`, or `None` if `s` is out of bounds.
    #[inline]
    pub fn id(&self, s: Spot) -> Option<NodeId> {
        self.bounds.index(s).map(NodeId)
    }

    /// The node at `s`, or `None` if `s` is out of bounds.
    #[inline]
    pub fn node(&self, s: Spot) -> Option<&Node> {
        self.bounds.index(s).map(|i| &self.nodes[i])
    }

    /// The conventional start: top-left.
    #[inline]
    pub fn first(&self) -> &Node {
        &self.nodes[0]
    }

    /// The conventional goal: bottom-right.
    #[inline]
    pub fn last(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    #[inline]
    pub fn first_id(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn last_id(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    /// Path-kind neighbours of `s` among its eight surrounding spots.
    ///
    /// Out-of-bounds and wall spots are skipped silently.
    pub fn neighbors(&self, s: Spot) -> impl Iterator<Item = &Node> + '_ {
        s.neighbors_8()
            .into_iter()
            .filter_map(move |n| self.node(n))
            .filter(|n| !n.is_wall())
    }

    /// Append the ids of the path-kind neighbours of `id` into `buf`.
    /// The caller clears `buf` before calling.
    pub fn neighbor_ids(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        let s = self.nodes[id.0].spot;
        for n in s.neighbors_8() {
            if let Some(i) = self.bounds.index(n) {
                if !self.nodes[i].is_wall() {
                    buf.push(NodeId(i));
                }
            }
        }
    }

    /// Visit every node once, row-major.
    pub fn walk(&self, mut visit: impl FnMut(&Node)) {
        for n in &self.nodes {
            visit(n);
        }
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Number of nodes of the given kind.
    pub fn count(&self, kind: Kind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Clear every cost and back-reference left by a previous search.
    pub fn reset_search(&mut self) {
        for n in &mut self.nodes {
            n.reset();
        }
    }
}

impl Index<NodeId> for Grid {
    type Output = Node;
    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Grid {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `.` for path, `#` for wall, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.nodes.chunks(self.width() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for n in row {
                f.write_str(if n.is_wall() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_wall(width: i32, height: i32, col: i32) -> Grid {
        Grid::generate(width, height, |s| {
            if s.col == col { Kind::Wall } else { Kind::Path }
        })
        .unwrap()
    }

    #[test]
    fn generate_rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::open(0, 3),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::open(3, -1).is_err());
    }

    #[test]
    fn generate_asks_once_per_spot_row_major() {
        let mut seen = Vec::new();
        let grid = Grid::generate(3, 2, |s| {
            seen.push(s);
            Kind::Path
        })
        .unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen, grid.bounds().iter().collect::<Vec<_>>());
    }

    #[test]
    fn first_and_last_are_corners() {
        let grid = Grid::open(4, 3).unwrap();
        assert_eq!(grid.first().spot(), Spot::new(0, 0));
        assert_eq!(grid.last().spot(), Spot::new(2, 3));
        assert_eq!(grid[grid.last_id()].spot(), Spot::new(2, 3));
    }

    #[test]
    fn neighbors_skip_walls_and_out_of_bounds() {
        let grid = column_wall(3, 3, 1);
        let corner: Vec<_> = grid.neighbors(Spot::new(0, 0)).map(Node::spot).collect();
        assert_eq!(corner, vec![Spot::new(1, 0)]);

        let open = Grid::open(3, 3).unwrap();
        assert_eq!(open.neighbors(Spot::new(1, 1)).count(), 8);
        assert_eq!(open.neighbors(Spot::new(0, 0)).count(), 3);
        assert_eq!(open.neighbors(Spot::new(0, 1)).count(), 5);
    }

    #[test]
    fn neighbor_ids_match_neighbors() {
        let grid = column_wall(4, 4, 2);
        let mut buf = Vec::new();
        let id = grid.id(Spot::new(1, 1)).unwrap();
        grid.neighbor_ids(id, &mut buf);
        let from_ids: Vec<_> = buf.iter().map(|&i| grid[i].spot()).collect();
        let direct: Vec<_> = grid.neighbors(Spot::new(1, 1)).map(Node::spot).collect();
        assert_eq!(from_ids, direct);
    }

    #[test]
    fn walk_visits_every_node_in_order() {
        let grid = column_wall(3, 2, 0);
        let mut spots = Vec::new();
        grid.walk(|n| spots.push(n.spot()));
        assert_eq!(spots, grid.bounds().iter().collect::<Vec<_>>());
        assert_eq!(grid.count(Kind::Wall), 2);
        assert_eq!(grid.count(Kind::Path), 4);
    }

    #[test]
    fn improve_only_lowers_g() {
        let mut grid = Grid::open(2, 2).unwrap();
        let a = grid.first_id();
        let b = grid.last_id();
        grid[b].discover(3.0, 1.0, a);
        assert!(!grid[b].improve(3.0, 1.0, a));
        assert!(!grid[b].improve(4.0, 1.0, a));
        assert!(grid[b].improve(2.0, 1.0, a));
        assert_eq!(grid[b].cost(), Cost::new(2.0, 1.0));
        assert_eq!(grid[b].cost().f(), 3.0);
        assert_eq!(grid[b].previous(), Some(a));
    }

    #[test]
    fn reset_search_clears_costs() {
        let mut grid = Grid::open(2, 2).unwrap();
        let a = grid.first_id();
        let b = grid.last_id();
        grid[b].discover(1.0, 0.0, a);
        grid.reset_search();
        assert_eq!(grid[b].cost(), Cost::default());
        assert_eq!(grid[b].previous(), None);
    }

    #[test]
    fn display_draws_walls() {
        let grid = column_wall(3, 2, 1);
        assert_eq!(grid.to_string(), ".#.\n.#.");
    }
}
