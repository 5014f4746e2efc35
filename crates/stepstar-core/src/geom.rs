//! Geometry primitives: [`Spot`] and [`Bounds`].
//!
//! Coordinates are `(row, col)`: rows grow down, columns grow right, and the
//! lattice origin is always the top-left spot `(0, 0)`.

use std::fmt;

// ---------------------------------------------------------------------------
// Spot
// ---------------------------------------------------------------------------

/// An integer lattice coordinate.
///
/// Spots are plain values: two spots are the same position iff they compare
/// equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spot {
    pub row: i32,
    pub col: i32,
}

impl Spot {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new spot.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a spot shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Absolute per-axis distance to `other`, as `(|Δrow|, |Δcol|)`.
    #[inline]
    pub fn delta(self, other: Spot) -> (i32, i32) {
        ((self.row - other.row).abs(), (self.col - other.col).abs())
    }

    /// All eight neighbours, clockwise from north: N, NE, E, SE, S, SW, W, NW.
    ///
    /// No bounds check is done here; see [`Bounds::contains`].
    #[inline]
    pub fn neighbors_8(self) -> [Spot; 8] {
        [
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, 1),
            self.shift(1, 1),
            self.shift(1, 0),
            self.shift(1, -1),
            self.shift(0, -1),
            self.shift(-1, -1),
        ]
    }
}

impl PartialOrd for Spot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order, matching [`Bounds::iter`].
impl Ord for Spot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Spot {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The rectangle `[0, height) × [0, width)` covered by a grid.
///
/// Bounds also define the flat row-major index used by the node arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    /// Bounds of a `width × height` lattice. Negative sizes clamp to zero.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Number of spots inside the bounds.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `s` lies inside the bounds.
    #[inline]
    pub fn contains(self, s: Spot) -> bool {
        s.row >= 0 && s.col >= 0 && s.row < self.height && s.col < self.width
    }

    /// Convert a spot to its flat row-major index. `None` if out of bounds.
    #[inline]
    pub fn index(self, s: Spot) -> Option<usize> {
        if !self.contains(s) {
            return None;
        }
        Some(s.row as usize * self.width as usize + s.col as usize)
    }

    /// Convert a flat index back to a spot.
    #[inline]
    pub fn spot(self, idx: usize) -> Spot {
        let w = self.width.max(1) as usize;
        Spot::new((idx / w) as i32, (idx % w) as i32)
    }

    /// Row-major iterator over every spot in the bounds.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Spot::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Spot;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the spots in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Spot,
}

impl Iterator for BoundsIter {
    type Item = Spot;

    #[inline]
    fn next(&mut self) -> Option<Spot> {
        if self.cur.row >= self.bounds.height || self.bounds.is_empty() {
            return None;
        }
        let s = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.bounds.width {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(s)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.row >= self.bounds.height {
            return (0, Some(0));
        }
        let w = self.bounds.width as usize;
        let remaining_in_row = (self.bounds.width - self.cur.col) as usize;
        let remaining_rows = (self.bounds.height - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_delta_and_shift() {
        let a = Spot::new(1, 2);
        let b = Spot::new(3, 4);
        assert_eq!(a.shift(2, 2), b);
        assert_eq!(a.delta(b), (2, 2));
        assert_eq!(b.delta(a), (2, 2));
        assert_eq!(Spot::from((5, 7)), Spot::new(5, 7));
    }

    #[test]
    fn neighbors_8_are_clockwise_from_north() {
        let n = Spot::new(5, 5).neighbors_8();
        assert_eq!(n[0], Spot::new(4, 5));
        assert_eq!(n[2], Spot::new(5, 6));
        assert_eq!(n[4], Spot::new(6, 5));
        assert_eq!(n[6], Spot::new(5, 4));
        assert_eq!(n[7], Spot::new(4, 4));
    }

    #[test]
    fn spot_orders_row_major() {
        let mut spots = vec![Spot::new(1, 0), Spot::new(0, 2), Spot::new(0, 1)];
        spots.sort();
        assert_eq!(spots, vec![Spot::new(0, 1), Spot::new(0, 2), Spot::new(1, 0)]);
    }

    #[test]
    fn bounds_basics() {
        let b = Bounds::new(3, 2);
        assert_eq!(b.len(), 6);
        assert!(!b.is_empty());
        assert!(b.contains(Spot::new(0, 0)));
        assert!(b.contains(Spot::new(1, 2)));
        assert!(!b.contains(Spot::new(2, 0)));
        assert!(!b.contains(Spot::new(0, 3)));
        assert!(!b.contains(Spot::new(-1, 0)));
    }

    #[test]
    fn negative_bounds_clamp_to_empty() {
        let b = Bounds::new(-4, 3);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }

    #[test]
    fn index_round_trips_through_spot() {
        let b = Bounds::new(4, 3);
        for (i, s) in b.iter().enumerate() {
            assert_eq!(b.index(s), Some(i));
            assert_eq!(b.spot(i), s);
        }
        assert_eq!(b.index(Spot::new(3, 0)), None);
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let b = Bounds::new(3, 2);
        let spots: Vec<_> = b.iter().collect();
        assert_eq!(spots.len(), 6);
        assert_eq!(spots[0], Spot::new(0, 0));
        assert_eq!(spots[1], Spot::new(0, 1));
        assert_eq!(spots[3], Spot::new(1, 0));
        assert_eq!(spots[5], Spot::new(1, 2));
    }

    #[test]
    fn bounds_iter_size_hint_tracks_progress() {
        let mut it = Bounds::new(3, 3).iter();
        assert_eq!(it.len(), 9);
        it.next();
        it.next();
        it.next();
        it.next();
        assert_eq!(it.len(), 5);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn spot_json_shape() {
        let json = serde_json::to_string(&Spot::new(2, 3)).unwrap();
        assert_eq!(json, r#"{"row":2,"col":3}"#);
    }
}
