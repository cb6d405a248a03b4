//! Line of sight and bramble counting.
//!
//! Both walks step hex by hex from the striker toward the target. When
//! the straight line runs along a hexspine the walk can hug either side;
//! LOS is then blocked only if both sides are blocked, and the bramble
//! count takes the cheaper side. Off a hexspine the side is fixed by the
//! bearing from `from`, so a line grazing a vertex can pass a different
//! obstacle when walked the other way.
//!
//! Occupancy is not part of the board, so callers pass a predicate that
//! reports whether a hex holds a critter.

use super::board::TerrainBoard;
use super::hazard::{Hexside, Terrain};
use super::hex::HexId;
use crate::hex::geometry;

/// Bramble count reported when the path is unusable.
pub const BIGNUM: u32 = 99;

/// Obstacles accumulated along one LOS walk.
#[derive(Clone, Copy, Debug, Default)]
struct Walk {
    striker_atop: bool,
    striker_atop_cliff: bool,
    mid_obstacle: bool,
    mid_cliff: bool,
    mid_chit: bool,
    obstacles: u32,
    walls: u32,
}

impl TerrainBoard {
    /// Is the line of sight from `from` to `to` blocked?
    ///
    /// Creatures below the lower of the two end elevations never block.
    pub fn is_los_blocked<F>(&self, from: HexId, to: HexId, occupied: F) -> bool
    where
        F: Fn(HexId) -> bool,
    {
        if from == to {
            return false;
        }
        if self.is_entrance(from) || self.is_entrance(to) {
            return true;
        }

        let strike_elevation = self.elevation(from).min(self.elevation(to));
        let (a, b) = (self.hex(from).coord, self.hex(to).coord);

        if geometry::is_hexspine(a, b) {
            self.is_los_blocked_dir(from, to, true, strike_elevation, &occupied)
                && self.is_los_blocked_dir(from, to, false, strike_elevation, &occupied)
        } else {
            let left = geometry::prefers_left(a, b);
            self.is_los_blocked_dir(from, to, left, strike_elevation, &occupied)
        }
    }

    fn is_los_blocked_dir<F>(&self, initial: HexId, target: HexId, left: bool, strike_elevation: u8, occupied: &F) -> bool
    where
        F: Fn(HexId) -> bool,
    {
        let mut walk = Walk::default();
        let mut current = initial;

        loop {
            if current == target {
                return false;
            }
            if self.is_entrance(current) || self.is_entrance(target) {
                return true;
            }
            let Some(dir) = self.direction(current, target, left) else {
                return true;
            };
            let Some(next) = self.neighbor(current, dir) else {
                return true;
            };

            let near = self.hexside(current, dir);
            let far = self.opposite_hexside(current, dir);

            if current == initial {
                if near.is_obstacle() {
                    walk.striker_atop = true;
                    walk.obstacles += 1;
                    walk.striker_atop_cliff |= near == Hexside::Cliff;
                    if near == Hexside::Wall {
                        walk.walls += 1;
                    }
                }
                if far.is_obstacle() {
                    walk.mid_obstacle = true;
                    walk.obstacles += 1;
                    walk.mid_cliff |= far == Hexside::Cliff;
                    // Walls are tested on the near side here as well.
                    if near == Hexside::Wall {
                        walk.walls += 1;
                    }
                }
            } else if next == target {
                let mut target_atop = false;
                let mut target_atop_cliff = false;
                if near.is_obstacle() {
                    walk.mid_obstacle = true;
                    walk.obstacles += 1;
                    walk.mid_cliff |= near == Hexside::Cliff;
                    if near == Hexside::Wall {
                        walk.walls += 1;
                    }
                }
                if far.is_obstacle() {
                    target_atop = true;
                    target_atop_cliff = far == Hexside::Cliff;
                    walk.obstacles += 1;
                    if near == Hexside::Wall {
                        walk.walls += 1;
                    }
                }
                return walk.blocks(target_atop, target_atop_cliff, || {
                    self.range(initial, target, false) == 3
                });
            } else {
                if walk.mid_chit {
                    return true;
                }
                if near.is_obstacle() || far.is_obstacle() {
                    walk.mid_obstacle = true;
                    walk.obstacles += 1;
                    walk.mid_cliff |= near == Hexside::Cliff || far == Hexside::Cliff;
                    if near == Hexside::Wall {
                        walk.walls += 1;
                    }
                }
            }

            if self.terrain(next).blocks_line_of_sight() {
                return true;
            }

            if occupied(next)
                && self.elevation(next) >= strike_elevation
                && (!walk.striker_atop_cliff || current != initial)
            {
                walk.mid_chit = true;
            }

            current = next;
        }
    }

    /// Bramble hexes strictly between `from` and `to`, or `BIGNUM` when the
    /// path leaves the board or crosses a tree, stone or occupied hex.
    pub fn count_bramble_hexes<F>(&self, from: HexId, to: HexId, occupied: F) -> u32
    where
        F: Fn(HexId) -> bool,
    {
        if from == to {
            return 0;
        }
        if self.is_entrance(from) || self.is_entrance(to) {
            return BIGNUM;
        }

        let (a, b) = (self.hex(from).coord, self.hex(to).coord);
        if geometry::is_hexspine(a, b) {
            let left = self.count_bramble_hexes_dir(from, to, true, &occupied);
            let right = self.count_bramble_hexes_dir(from, to, false, &occupied);
            left.min(right)
        } else {
            self.count_bramble_hexes_dir(from, to, geometry::prefers_left(a, b), &occupied)
        }
    }

    fn count_bramble_hexes_dir<F>(&self, from: HexId, to: HexId, left: bool, occupied: &F) -> u32
    where
        F: Fn(HexId) -> bool,
    {
        let mut count = 0;
        let mut current = from;
        loop {
            let Some(next) = self
                .direction(current, to, left)
                .and_then(|dir| self.neighbor(current, dir))
            else {
                return BIGNUM;
            };
            if next == to {
                return count;
            }
            let terrain = self.terrain(next);
            if terrain.blocks_line_of_sight() || occupied(next) {
                return BIGNUM;
            }
            if terrain == Terrain::Bramble {
                count += 1;
            }
            current = next;
        }
    }
}

impl Walk {
    /// Final verdict once the target's edge has been examined.
    fn blocks(&self, target_atop: bool, target_atop_cliff: bool, range_is_three: impl FnOnce() -> bool) -> bool {
        if self.mid_chit && !target_atop_cliff {
            return true;
        }
        if self.mid_cliff && !self.striker_atop_cliff && !target_atop_cliff {
            return true;
        }
        if self.mid_obstacle && !self.striker_atop && !target_atop {
            return true;
        }
        // Three obstacles: striker and target must each be atop one.
        if self.obstacles >= 3
            && (!self.striker_atop || !target_atop)
            && !self.striker_atop_cliff
            && !target_atop_cliff
        {
            return true;
        }
        // Two walls block a range-3 strike.
        self.walls >= 2 && range_is_three()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::MasterTerrain;

    fn id(board: &TerrainBoard, label: &str) -> HexId {
        board.hex_by_label(label).unwrap()
    }

    #[test]
    fn test_same_hex_and_entrance() {
        let board = TerrainBoard::new(MasterTerrain::Plains);
        let d4 = id(&board, "D4");
        assert!(!board.is_los_blocked(d4, d4, |_| false));
        assert!(board.is_los_blocked(board.entrance(3), d4, |_| false));
    }

    #[test]
    fn test_open_plains() {
        let board = TerrainBoard::new(MasterTerrain::Plains);
        assert!(!board.is_los_blocked(id(&board, "A1"), id(&board, "F4"), |_| false));
        assert!(!board.is_los_blocked(id(&board, "D6"), id(&board, "D1"), |_| false));
    }

    #[test]
    fn test_trees_block() {
        let board = TerrainBoard::new(MasterTerrain::Jungle);
        assert!(board.is_los_blocked(id(&board, "D2"), id(&board, "C4"), |_| false));
    }

    #[test]
    fn test_occupant_blocks() {
        let board = TerrainBoard::new(MasterTerrain::Plains);
        let d5 = id(&board, "D5");
        let (d6, d4) = (id(&board, "D6"), id(&board, "D4"));
        assert!(board.is_los_blocked(d6, d4, |h| h == d5));
        assert!(!board.is_los_blocked(d6, d4, |_| false));
    }

    #[test]
    fn test_bramble_count() {
        let board = TerrainBoard::new(MasterTerrain::Brush);
        // D6 -> D1 runs through D5 (bramble), D4, D3 and D2 (bramble).
        let (d6, d1) = (id(&board, "D6"), id(&board, "D1"));
        assert_eq!(board.count_bramble_hexes(d6, d1, |_| false), 2);
        let d4 = id(&board, "D4");
        assert_eq!(board.count_bramble_hexes(d6, d1, |h| h == d4), BIGNUM);
        assert_eq!(board.count_bramble_hexes(d6, d6, |_| false), 0);
    }

    #[test]
    fn test_hill_between_blocks() {
        let board = TerrainBoard::new(MasterTerrain::Hills);
        // B3 is a hill sloped on every side.
        assert!(board.is_los_blocked(id(&board, "B4"), id(&board, "B2"), |_| false));
    }

    #[test]
    fn test_striker_atop_hill_sees_over() {
        let board = TerrainBoard::new(MasterTerrain::Hills);
        assert!(!board.is_los_blocked(id(&board, "D2"), id(&board, "D4"), |_| false));
    }
}
