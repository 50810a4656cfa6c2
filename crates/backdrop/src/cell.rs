//! Cell coordinate, heading and torus size types for the backdrop grid.

use std::fmt;

use serde::Deserialize;

/// Single-axis movement direction. Discriminants are exposed to JS; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Heading {
    #[default]
    Right = 0,
    Left = 1,
    Down = 2,
    Up = 3,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Per-tick displacement in cells. Rows grow downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => write!(f, "Right"),
            Self::Left => write!(f, "Left"),
            Self::Down => write!(f, "Down"),
            Self::Up => write!(f, "Up"),
        }
    }
}

/// Grid cell address: `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl CellPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour one step along `heading`. Not wrapped.
    #[must_use]
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Torus dimensions in whole cells. Both axes are at least 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    #[must_use]
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Whole cells that fit in a pixel viewport; partial cells at the edge are dropped.
    #[must_use]
    pub fn from_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self::new((width / cell) as i32, (height / cell) as i32)
    }

    /// Wrap any coordinate onto the torus.
    #[must_use]
    pub fn wrap(self, pos: CellPos) -> CellPos {
        CellPos::new(pos.x.rem_euclid(self.cols), pos.y.rem_euclid(self.rows))
    }

    #[must_use]
    pub fn contains(self, pos: CellPos) -> bool {
        (0..self.cols).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    #[must_use]
    pub fn cell_count(self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn heading_discriminant_values() {
        assert_eq!(Heading::Right as u8, 0);
        assert_eq!(Heading::Left as u8, 1);
        assert_eq!(Heading::Down as u8, 2);
        assert_eq!(Heading::Up as u8, 3);
    }

    #[test]
    fn heading_deltas_are_unit_vectors() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{heading} is not a unit step");
        }
    }

    #[test]
    fn heading_opposites() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.delta();
            assert_eq!(heading.opposite().delta(), (-dx, -dy));
            assert!(heading.is_opposite(heading.opposite()));
            assert!(!heading.is_opposite(heading));
        }
    }

    #[test]
    fn heading_default_is_right() {
        assert_eq!(Heading::default(), Heading::Right);
        assert_eq!(format!("{}", Heading::Up), "Up");
    }

    #[test]
    fn cell_step_and_distance() {
        let origin = CellPos::new(5, 5);
        assert_eq!(origin.step(Heading::Right), CellPos::new(6, 5));
        assert_eq!(origin.step(Heading::Up), CellPos::new(5, 4));
        assert_eq!(origin.manhattan(CellPos::new(2, 9)), 7);
        assert_eq!(format!("{origin}"), "(5, 5)");
    }

    #[test]
    fn grid_size_from_viewport_floors() {
        let size = GridSize::from_viewport(1030, 760, 25);
        assert_eq!(size, GridSize { cols: 41, rows: 30 });
        assert_eq!(size.cell_count(), 1230);
    }

    #[test]
    fn grid_size_never_empty() {
        let size = GridSize::from_viewport(10, 0, 25);
        assert_eq!(size, GridSize { cols: 1, rows: 1 });
        assert_eq!(size.wrap(CellPos::new(10, -3)), CellPos::new(0, 0));
    }

    #[test]
    fn wrap_each_edge() {
        let size = GridSize::new(40, 30);
        assert_eq!(size.wrap(CellPos::new(-1, 7)), CellPos::new(39, 7));
        assert_eq!(size.wrap(CellPos::new(40, 7)), CellPos::new(0, 7));
        assert_eq!(size.wrap(CellPos::new(7, -1)), CellPos::new(7, 29));
        assert_eq!(size.wrap(CellPos::new(7, 30)), CellPos::new(7, 0));
    }

    proptest! {
        #[test]
        fn prop_wrap_lands_in_bounds(
            cols in 1i32..200,
            rows in 1i32..200,
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
        ) {
            let size = GridSize::new(cols, rows);
            let wrapped = size.wrap(CellPos::new(x, y));
            prop_assert!(size.contains(wrapped));
            prop_assert_eq!((wrapped.x - x).rem_euclid(cols), 0);
            prop_assert_eq!((wrapped.y - y).rem_euclid(rows), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_is_identity_in_bounds(
            cols in 1i32..200,
            rows in 1i32..200,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let size = GridSize::new(cols, rows);
            let pos = CellPos::new((fx * f64::from(cols)) as i32, (fy * f64::from(rows)) as i32);
            prop_assert_eq!(size.wrap(pos), pos);
        }
    }
}
