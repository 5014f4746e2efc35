//! Fixed wall layouts built from text.
//!
//! A [`Layout`] parses an ASCII picture of the lattice, one line per row:
//! `#` is a wall, `.` is open ground. `S` and `G` may mark the start and goal
//! corners for readability and are treated as ground.

use std::fmt;
use std::str::FromStr;

use stepstar_core::{Grid, GridError, Kind, Spot};

/// A fixed lattice of [`Kind`]s parsed from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    kinds: Vec<Kind>,
    width: i32,
    height: i32,
}

impl Layout {
    /// Parse a layout.
    ///
    /// Leading and trailing blank lines are ignored, as is a trailing `\r`
    /// on each line. Every remaining line must have the same width.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if lines.is_empty() || lines[0].is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = lines[0].chars().count();
        let mut kinds = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::InconsistentSize {
                    row: row as i32,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind = match ch {
                    '#' => Kind::Wall,
                    '.' | 'S' | 'G' => Kind::Path,
                    _ => {
                        return Err(LayoutError::InvalidChar {
                            ch,
                            spot: Spot::new(row as i32, col as i32),
                        });
                    }
                };
                kinds.push(kind);
            }
        }

        Ok(Self {
            kinds,
            width: width as i32,
            height: lines.len() as i32,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The kind at `s`. Spots outside the layout read as walls.
    pub fn kind_at(&self, s: Spot) -> Kind {
        if s.row < 0 || s.col < 0 || s.row >= self.height || s.col >= self.width {
            return Kind::Wall;
        }
        self.kinds[(s.row * self.width + s.col) as usize]
    }

    /// Build a fresh grid with this layout's walls.
    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::generate(self.width, self.height, |s| self.kind_at(s))
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.kinds.chunks(self.width as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for k in row {
                f.write_str(match k {
                    Kind::Wall => "#",
                    Kind::Path => ".",
                })?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The text held no rows.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentSize {
        row: i32,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.`, `S` or `G` was found.
    InvalidChar { ch: char, spot: Spot },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no rows"),
            Self::InconsistentSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout: row {row} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidChar { ch, spot } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {spot}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZE: &str = "\
S.#..
..#.#
....G";

    #[test]
    fn parse_and_size() {
        let l = Layout::parse(MAZE).unwrap();
        assert_eq!((l.width(), l.height()), (5, 3));
        assert_eq!(l.kind_at(Spot::new(0, 2)), Kind::Wall);
        assert_eq!(l.kind_at(Spot::new(0, 0)), Kind::Path);
        assert_eq!(l.kind_at(Spot::new(2, 4)), Kind::Path);
        assert_eq!(l.kind_at(Spot::new(3, 0)), Kind::Wall);
    }

    #[test]
    fn build_matches_layout() {
        let grid = Layout::parse(MAZE).unwrap().build().unwrap();
        assert_eq!(grid.to_string(), "..#..\n..#.#\n.....");
        assert_eq!(grid.count(Kind::Wall), 3);
    }

    #[test]
    fn crlf_and_blank_edges_are_accepted() {
        let l: Layout = "\r\n.#\r\n#.\r\n\n".parse().unwrap();
        assert_eq!(l.to_string(), ".#\n#.");
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Layout::parse(""), Err(LayoutError::Empty));
        assert_eq!(Layout::parse("\n\n"), Err(LayoutError::Empty));
    }

    #[test]
    fn inconsistent_size_error() {
        assert_eq!(
            Layout::parse("..\n...").unwrap_err(),
            LayoutError::InconsistentSize {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_char_error() {
        let err = Layout::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidChar {
                ch: 'x',
                spot: Spot::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }
}
