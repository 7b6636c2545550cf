//! Movement directions and their grid offsets.
//! Rows grow southwards and columns grow eastwards.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Stay,
}

// Deterministic movement order used for neighbour expansion and lookups.
pub const CARDINALS: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

impl Direction {
    /// Unit `(d_row, d_col)` offset, `None` for [`Direction::Stay`].
    pub fn offset(self) -> Option<(i64, i64)> {
        match self {
            Direction::North => Some((-1, 0)),
            Direction::East => Some((0, 1)),
            Direction::South => Some((1, 0)),
            Direction::West => Some((0, -1)),
            Direction::Stay => None,
        }
    }

    /// The cardinal whose offset is exactly `(dr, dc)`.
    pub fn from_offset(dr: i64, dc: i64) -> Option<Self> {
        CARDINALS.into_iter().find(|d| d.offset() == Some((dr, dc)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
            Direction::Stay => "Stay",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
