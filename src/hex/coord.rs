//! Battle-map coordinates, directions and labels.
//!
//! The battle map has six columns, `x` 0..=5, lettered A-F. Odd columns sit
//! half a row lower than even ones, so a hex's vertical position is best
//! expressed in doubled units: `2 * y + (x & 1)`.
//!
//! Off-board entrance hexes use `x == -1` with `y` holding the entry side.

use serde::{Deserialize, Serialize};

/// One of the six hexside directions, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Direction index, 0 (north) through 5 (north-west).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction from an index, wrapping modulo 6.
    #[must_use]
    pub const fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    /// The direction pointing back.
    ///
    /// ```
    /// use titan_battle::hex::Direction;
    ///
    /// assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> Direction {
        Self::from_index(self.index() + 3)
    }
}

/// Column/row position on the battle map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub x: i8,
    pub y: i8,
}

impl HexCoord {
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The off-board entrance for a side.
    #[must_use]
    pub const fn entrance(side: u8) -> Self {
        Self {
            x: -1,
            y: side as i8,
        }
    }

    #[must_use]
    pub const fn is_entrance(self) -> bool {
        self.x == -1
    }

    /// Row in half-hex units, accounting for the odd-column offset.
    #[must_use]
    pub const fn doubled_y(self) -> i32 {
        2 * self.y as i32 + (self.x & 1) as i32
    }

    /// The grid position one step away.
    ///
    /// Meaningless for entrances; the board decides whether the result
    /// is a real hex.
    #[must_use]
    pub const fn step(self, dir: Direction) -> HexCoord {
        let (x, y) = (self.x, self.y);
        let (nx, ny) = match dir {
            Direction::North => (x, y - 1),
            Direction::NorthEast => (x + 1, y - ((x + 1) & 1)),
            Direction::SouthEast => (x + 1, y + (x & 1)),
            Direction::South => (x, y + 1),
            Direction::SouthWest => (x - 1, y + (x & 1)),
            Direction::NorthWest => (x - 1, y - ((x + 1) & 1)),
        };
        HexCoord::new(nx, ny)
    }

    /// Printed label, e.g. `D4` or `X3` for an entrance.
    ///
    /// ```
    /// use titan_battle::hex::HexCoord;
    ///
    /// assert_eq!(HexCoord::new(3, 2).label(), "D4");
    /// assert_eq!(HexCoord::new(0, 4).label(), "A1");
    /// assert_eq!(HexCoord::entrance(5).label(), "X5");
    /// ```
    #[must_use]
    pub fn label(self) -> String {
        if self.is_entrance() {
            return format!("X{}", self.y);
        }
        let letter = (b'A' + self.x as u8) as char;
        format!("{}{}", letter, Self::row_number(self.x, self.y))
    }

    /// Parse a printed label. The result may still lie off the map.
    #[must_use]
    pub fn from_label(label: &str) -> Option<HexCoord> {
        let mut chars = label.chars();
        let letter = chars.next()?;
        let number: i8 = chars.as_str().parse().ok()?;
        if letter == 'X' {
            return (0..6).contains(&number).then_some(HexCoord::entrance(number as u8));
        }
        if !('A'..='F').contains(&letter) {
            return None;
        }
        let x = (letter as u8 - b'A') as i8;
        let y = 6 - number - ((x - 3) / 2).abs();
        Some(HexCoord::new(x, y))
    }

    const fn row_number(x: i8, y: i8) -> i8 {
        6 - y - ((x - 3) / 2).abs()
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(HexCoord::new(0, 2).label(), "A3");
        assert_eq!(HexCoord::new(1, 1).label(), "B4");
        assert_eq!(HexCoord::new(2, 5).label(), "C1");
        assert_eq!(HexCoord::new(3, 0).label(), "D6");
        assert_eq!(HexCoord::new(4, 5).label(), "E1");
        assert_eq!(HexCoord::new(5, 4).label(), "F1");
    }

    #[test]
    fn test_label_roundtrip() {
        for (x, y) in [(0, 3), (1, 4), (2, 2), (3, 5), (4, 1), (5, 2)] {
            let coord = HexCoord::new(x, y);
            assert_eq!(HexCoord::from_label(&coord.label()), Some(coord));
        }
        assert_eq!(HexCoord::from_label("X2"), Some(HexCoord::entrance(2)));
        assert_eq!(HexCoord::from_label("X6"), None);
        assert_eq!(HexCoord::from_label("G1"), None);
        assert_eq!(HexCoord::from_label(""), None);
    }

    #[test]
    fn test_opposite_directions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_step_and_back() {
        for coord in [HexCoord::new(2, 3), HexCoord::new(3, 3)] {
            for dir in Direction::ALL {
                assert_eq!(coord.step(dir).step(dir.opposite()), coord);
            }
        }
    }

    #[test]
    fn test_odd_column_offset() {
        // D (odd) neighbours of C4 (2,2): NE is D5 (3,1), SE is D4 (3,2).
        let c4 = HexCoord::new(2, 2);
        assert_eq!(c4.step(Direction::NorthEast).label(), "D5");
        assert_eq!(c4.step(Direction::SouthEast).label(), "D4");
        assert_eq!(HexCoord::new(3, 1).doubled_y(), 3);
    }
}
