//! Crossterm terminal frontend for stepstar.
//!
//! [`TermDriver`] owns the terminal (raw mode, alternate screen), turns key
//! presses into [`Command`]s and draws a [`Solver`]'s grid each frame. It only
//! reads the solver through its public views and never touches node state.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use stepstar_core::{Grid, Node};
use stepstar_paths::{Membership, Phase, Solver};

/// What the user asked the driving loop to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    /// Advance exactly one step (useful while paused).
    Step,
    /// Throw the current run away and start over.
    Restart,
}

/// Maps a key press to a [`Command`].
pub fn to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('s') | KeyCode::Char('n') | KeyCode::Right => Some(Command::Step),
        KeyCode::Char('r') => Some(Command::Restart),
        _ => None,
    }
}

/// How a cell is painted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Wall,
    Unseen,
    Open,
    Closed,
    /// On the current best path.
    Answer,
    /// Start or goal.
    Endpoint,
}

impl CellState {
    fn color(self) -> CtColor {
        match self {
            Self::Wall => CtColor::Rgb { r: 60, g: 60, b: 60 },
            Self::Unseen => CtColor::Reset,
            Self::Open => CtColor::Rgb { r: 40, g: 150, b: 60 },
            Self::Closed => CtColor::Rgb { r: 150, g: 45, b: 45 },
            Self::Answer => CtColor::Rgb { r: 50, g: 90, b: 220 },
            Self::Endpoint => CtColor::Rgb { r: 230, g: 190, b: 40 },
        }
    }
}

/// Classify every node of the solver's grid, row-major.
pub fn cell_states<H>(solver: &Solver<H>) -> Vec<CellState> {
    let grid: &Grid = solver.grid();
    let bounds = grid.bounds();
    let mut on_answer = vec![false; grid.len()];
    for n in solver.answer() {
        if let Some(i) = bounds.index(n.spot()) {
            on_answer[i] = true;
        }
    }
    let (first, last) = (grid.first().spot(), grid.last().spot());

    let mut states = Vec::with_capacity(grid.len());
    grid.walk(|n: &Node| {
        let s = n.spot();
        let state = if n.is_wall() {
            CellState::Wall
        } else if s == first || s == last {
            CellState::Endpoint
        } else if bounds.index(s).is_some_and(|i| on_answer[i]) {
            CellState::Answer
        } else {
            match solver.membership(s) {
                Membership::Open => CellState::Open,
                Membership::Closed => CellState::Closed,
                Membership::Unseen => CellState::Unseen,
            }
        };
        states.push(state);
    });
    states
}

/// One-line summary shown under the grid.
pub fn status_line<H>(solver: &Solver<H>, heuristic: &str, paused: bool) -> String {
    let phase = solver.state();
    let tag = match (phase, paused) {
        (Phase::Running, true) => "paused".to_string(),
        (p, _) => p.to_string(),
    };
    format!(
        "{tag} | step {} | open {} closed {} | path {} | {heuristic} | [space] pause [s] step [r] restart [q] quit",
        solver.steps(),
        solver.open_len(),
        solver.closed_len(),
        solver.answer().len(),
    )
}

/// A terminal frontend using crossterm.
pub struct TermDriver {
    active: bool,
}

impl TermDriver {
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        log::debug!("term: initialised");
        Ok(())
    }

    /// Wait up to `timeout` for a key press and map it to a command.
    ///
    /// Other events are drained and ignored.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(cmd) = to_command(key) {
                    return Ok(Some(cmd));
                }
            }
        }
        Ok(None)
    }

    /// Draw the grid (two columns per cell) followed by a status line.
    pub fn draw<H>(&mut self, solver: &Solver<H>, status: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        let bounds = solver.grid().bounds();

        for (i, state) in cell_states(solver).into_iter().enumerate() {
            let s = bounds.spot(i);
            queue!(
                stdout,
                cursor::MoveTo((s.col * 2) as u16, s.row as u16),
                SetBackgroundColor(state.color()),
                style::Print("  ")
            )?;
        }

        let status_row = solver.grid().height() as u16;
        queue!(
            stdout,
            SetBackgroundColor(CtColor::Reset),
            SetForegroundColor(CtColor::Reset),
            cursor::MoveTo(0, status_row),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(status)
        )?;
        stdout.flush()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("term: closed");
    }
}

impl Default for TermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TermDriver {
    fn drop(&mut self) {
        self.close();
    }
}
