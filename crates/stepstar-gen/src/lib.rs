//! Wall pattern generators that seed [`stepstar_core::Grid`]s.
//!
//! - [`WallGen`]: every spot becomes a wall with a fixed probability.
//! - [`Layout`]: a fixed pattern drawn as text.

pub mod layout;
pub mod walls;

pub use layout::{Layout, LayoutError};
pub use walls::{WallConfig, WallError, WallGen};
