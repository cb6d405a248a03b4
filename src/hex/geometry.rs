//! Pure hex geometry over on-board coordinates.
//!
//! Distances use the Titan metric: ranges are inclusive at both ends, so
//! adjacent hexes are range 2 and a hex is range 1 from itself. All math
//! runs on doubled rows (`HexCoord::doubled_y`), which keeps half-row
//! offsets exact and makes hexspine tests plain integer equality.
//!
//! Entrance handling lives on the board, which knows entrance neighbours.

use super::coord::{Direction, HexCoord};

/// Titan range between two on-board hexes.
///
/// ```
/// use titan_battle::hex::{HexCoord, geometry::range};
///
/// let d4 = HexCoord::new(3, 2);
/// let d3 = HexCoord::new(3, 3);
/// assert_eq!(range(d4, d3), 2);
/// assert_eq!(range(d4, d4), 1);
/// ```
#[must_use]
pub fn range(a: HexCoord, b: HexCoord) -> u32 {
    let x_dist = (b.x as i32 - a.x as i32).unsigned_abs();
    // Doubled row distance; the real distance is half of this.
    let y2 = (b.doubled_y() - a.doubled_y()).unsigned_abs();

    if x_dist >= y2 {
        x_dist + 1
    } else if 2 * x_dist >= y2 {
        x_dist + 2
    } else if y2 >= 4 * x_dist {
        // ceil(y + 1)
        (y2 + 1) / 2 + 1
    } else {
        // floor(y + 2)
        y2 / 2 + 2
    }
}

/// Direction from `a` toward `b`.
///
/// Returns `None` for the same hex or an entrance. When the bearing runs
/// exactly along a hexspine, `prefer_left` picks between the two
/// directions it separates.
#[must_use]
pub fn direction(a: HexCoord, b: HexCoord, prefer_left: bool) -> Option<Direction> {
    if a == b || a.is_entrance() || b.is_entrance() {
        return None;
    }

    let dx = b.x as i32 - a.x as i32;
    // Compare doubled rows against 3 * dx, i.e. y against 1.5 * dx.
    let dy = b.doubled_y() - a.doubled_y();
    let spine = 3 * dx;

    let dir = if dx >= 0 {
        if dy > spine {
            Direction::South
        } else if dy == spine {
            if prefer_left {
                Direction::SouthEast
            } else {
                Direction::South
            }
        } else if dy < -spine {
            Direction::North
        } else if dy == -spine {
            if prefer_left {
                Direction::North
            } else {
                Direction::NorthEast
            }
        } else if dy > 0 {
            Direction::SouthEast
        } else if dy < 0 {
            Direction::NorthEast
        } else if prefer_left {
            Direction::NorthEast
        } else {
            Direction::SouthEast
        }
    } else if dy < spine {
        Direction::North
    } else if dy == spine {
        if prefer_left {
            Direction::NorthWest
        } else {
            Direction::North
        }
    } else if dy > -spine {
        Direction::South
    } else if dy == -spine {
        if prefer_left {
            Direction::South
        } else {
            Direction::SouthWest
        }
    } else if dy > 0 {
        Direction::SouthWest
    } else if dy < 0 {
        Direction::NorthWest
    } else if prefer_left {
        Direction::SouthWest
    } else {
        Direction::NorthWest
    };

    Some(dir)
}

/// Does the straight line from `a` to `b` run along hexspines?
#[must_use]
pub fn is_hexspine(a: HexCoord, b: HexCoord) -> bool {
    let dx = b.x as i32 - a.x as i32;
    let dy = b.doubled_y() - a.doubled_y();
    dy == 0 || dy.abs() == 3 * dx.abs()
}

/// Which side of the hexspines an off-spine line should hug.
///
/// Only meaningful when the line is not itself a hexspine, so the row
/// distance is nonzero.
#[must_use]
pub fn prefers_left(a: HexCoord, b: HexCoord) -> bool {
    let dx = (b.x as i32 - a.x as i32) as f64;
    let dy = (b.doubled_y() - a.doubled_y()) as f64 / 2.0;
    let ratio = dx / dy;
    ratio >= 1.5 || (0.0..=0.75).contains(&ratio) || (-1.5..=-0.75).contains(&ratio)
}
