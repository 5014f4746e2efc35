//! **stepstar-core**: the graph model behind the stepstar incremental search.
//!
//! This crate provides lattice geometry ([`Spot`], [`Bounds`]) and the
//! [`Grid`] node arena whose [`Node`]s carry the per-cell [`Cost`] and
//! back-reference that a search mutates.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, BoundsIter, Spot};
pub use grid::{Cost, Grid, GridError, Kind, Node, NodeId};
