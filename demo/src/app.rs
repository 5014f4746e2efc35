use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stepstar_core::Grid;
use stepstar_crossterm::{Command, TermDriver, status_line};
use stepstar_gen::{Layout, WallConfig, WallGen};
use stepstar_paths::{HeuristicKind, Phase, Snapshot, Solver};

use crate::config::Config;

/// Where each run's grid comes from.
pub enum GridSource {
    Layout(Layout),
    Random {
        walls: WallGen<StdRng>,
        cfg: WallConfig,
    },
}

impl GridSource {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        if let Some(path) = &cfg.layout {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            let layout = Layout::parse(&text)
                .with_context(|| format!("parsing layout {}", path.display()))?;
            return Ok(Self::Layout(layout));
        }
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::Random {
            walls: WallGen::new(rng),
            cfg: cfg.wall_config(),
        })
    }

    /// A fresh grid. Random sources draw new walls every time.
    pub fn next_grid(&mut self) -> Result<Grid> {
        match self {
            Self::Layout(layout) => layout.build().context("building layout grid"),
            Self::Random { walls, cfg } => walls.random(cfg).context("generating walls"),
        }
    }
}

/// Run the search to completion (or `max_steps`) and return its summary.
pub fn run_headless(cfg: &Config, source: &mut GridSource) -> Result<Snapshot> {
    let grid = source.next_grid()?;
    let limit = cfg.max_steps.unwrap_or(grid.len());
    let mut solver = Solver::new(grid, cfg.heuristic)?;
    let phase = solver.run(limit)?;
    log::info!("headless run finished: {} after {} steps", phase, solver.steps());
    Ok(solver.snapshot())
}

/// Animate the search in the terminal until the user quits.
pub fn run_interactive(cfg: &Config, source: &mut GridSource) -> Result<()> {
    let mut term = TermDriver::new();
    term.init().context("initialising terminal")?;
    let result = interactive_loop(cfg, source, &mut term);
    term.close();
    result
}

fn interactive_loop(cfg: &Config, source: &mut GridSource, term: &mut TermDriver) -> Result<()> {
    let mut solver = new_solver(source, cfg.heuristic)?;
    let mut paused = false;

    loop {
        let mut advance = !paused;
        let status = status_line(&solver, cfg.heuristic.name(), paused);
        term.draw(&solver, &status)?;

        match term.poll(cfg.tick())? {
            Some(Command::Quit) => return Ok(()),
            Some(Command::TogglePause) => paused = !paused,
            Some(Command::Step) => advance = true,
            Some(Command::Restart) => {
                solver = new_solver(source, cfg.heuristic)?;
                continue;
            }
            None => {}
        }

        if advance && solver.state() == Phase::Running {
            solver.step()?;
        }
    }
}

fn new_solver(source: &mut GridSource, heuristic: HeuristicKind) -> Result<Solver<HeuristicKind>> {
    let grid = source.next_grid()?;
    Ok(Solver::new(grid, heuristic)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["stepstar"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn seeded_sources_repeat() {
        let cfg = config(&["--seed", "5", "--width", "10", "--height", "6"]);
        let a = GridSource::from_config(&cfg).unwrap().next_grid().unwrap();
        let b = GridSource::from_config(&cfg).unwrap().next_grid().unwrap();
        assert_eq!(a, b);
        assert_eq!((a.width(), a.height()), (10, 6));
    }

    #[test]
    fn headless_open_grid_is_solved() {
        let cfg = config(&["--seed", "1", "--rate", "0", "--width", "6", "--height", "4"]);
        let mut source = GridSource::from_config(&cfg).unwrap();
        let snap = run_headless(&cfg, &mut source).unwrap();
        assert_eq!(snap.phase, Phase::Solved);
        assert_eq!(snap.answer.len(), 6);
    }

    #[test]
    fn headless_respects_step_limit() {
        let cfg = config(&["--rate", "0", "--width", "20", "--height", "20", "--max-steps", "3"]);
        let mut source = GridSource::from_config(&cfg).unwrap();
        let snap = run_headless(&cfg, &mut source).unwrap();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.steps, 3);
    }

    #[test]
    fn missing_layout_file_is_reported() {
        let cfg = config(&["--layout", "/nonexistent/stepstar-layout.txt"]);
        let err = GridSource::from_config(&cfg).err().unwrap();
        assert!(err.to_string().contains("reading layout"));
    }
}
