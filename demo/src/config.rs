use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stepstar_gen::WallConfig;
use stepstar_paths::HeuristicKind;

/// Watch an A* search over a walled grid unfold one expansion at a time.
#[derive(Parser, Debug, Clone)]
#[command(name = "stepstar", version)]
pub struct Config {
    /// Grid width in cells (ignored with --layout).
    #[arg(long, default_value_t = 40)]
    pub width: i32,

    /// Grid height in cells (ignored with --layout).
    #[arg(long, default_value_t = 20)]
    pub height: i32,

    /// Probability that a cell is a wall (ignored with --layout).
    #[arg(long, default_value_t = 0.3)]
    pub rate: f64,

    /// Seed for the wall generator; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance heuristic: euclidean, manhattan or chebyshev.
    #[arg(long, default_value_t = HeuristicKind::Manhattan)]
    pub heuristic: HeuristicKind,

    /// Milliseconds between steps in interactive mode.
    #[arg(long, default_value_t = 30)]
    pub tick_ms: u64,

    /// Read a fixed layout (`#` wall, `.` ground) instead of random walls.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Run to completion without a terminal UI and print the result as JSON.
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many steps in headless mode.
    #[arg(long)]
    pub max_steps: Option<usize>,
}

impl Config {
    pub fn wall_config(&self) -> WallConfig {
        WallConfig {
            width: self.width,
            height: self.height,
            rate: self.rate,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
