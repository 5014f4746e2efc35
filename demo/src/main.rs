//! Terminal demo: an animated A* search over a walled grid.
//!
//! Run: cargo run -- --seed 7 --heuristic chebyshev

mod app;
mod config;

use anyhow::Result;
use clap::Parser;

use crate::app::{GridSource, run_headless, run_interactive};
use crate::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = Config::parse();
    log::debug!("config: {cfg:?}");
    let mut source = GridSource::from_config(&cfg)?;

    if cfg.headless {
        let snapshot = run_headless(&cfg, &mut source)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    run_interactive(&cfg, &mut source)
}
