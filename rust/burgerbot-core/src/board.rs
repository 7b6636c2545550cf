use std::fmt;

use crate::errors::BoardError;
use crate::models::Location;
use crate::movement::{Direction, CARDINALS};
use crate::tile::{parse_tile, Tile, TOKEN_WIDTH};

/// Square grid of tiles for one snapshot, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Parse `size * size` two-character tokens.
    pub fn parse(size: usize, tiles: &str) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        let chars: Vec<char> = tiles.chars().collect();
        let expected = size.saturating_mul(size);
        if expected.checked_mul(TOKEN_WIDTH) != Some(chars.len()) {
            return Err(BoardError::MalformedBoard { expected, actual: chars.len().div_ceil(TOKEN_WIDTH) });
        }

        let tiles = chars
            .chunks(TOKEN_WIDTH)
            .enumerate()
            .map(|(index, token)| parse_tile(&token.iter().collect::<String>(), index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { size, tiles })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, loc: Location) -> bool {
        loc.row < self.size && loc.col < self.size
    }

    pub fn tile(&self, loc: Location) -> Result<&Tile, BoardError> {
        if !self.contains(loc) {
            return Err(BoardError::OutOfBounds { row: loc.row, col: loc.col, size: self.size });
        }
        Ok(&self.tiles[loc.row * self.size + loc.col])
    }

    /// True if a bot can walk onto the cell.
    pub fn passable(&self, loc: Location) -> Result<bool, BoardError> {
        Ok(match self.tile(loc)? {
            Tile::Wall | Tile::Goal | Tile::PickupA { .. } | Tile::PickupB { .. } => false,
            Tile::Empty | Tile::StaticHazard | Tile::AgentOccupant { .. } | Tile::TargetOccupant { .. } => true,
        })
    }

    /// True if the cell is spikes or another hero.
    pub fn hazard(&self, loc: Location) -> Result<bool, BoardError> {
        Ok(matches!(self.tile(loc)?, Tile::StaticHazard | Tile::AgentOccupant { .. }))
    }

    /// Move one cell in `direction`, saturating at the board edges.
    pub fn step(&self, loc: Location, direction: Direction) -> Location {
        let Some((dr, dc)) = direction.offset() else {
            return self.clamp(loc.row as i64, loc.col as i64);
        };
        self.clamp(loc.row as i64 + dr, loc.col as i64 + dc)
    }

    fn clamp(&self, row: i64, col: i64) -> Location {
        let max = self.size as i64 - 1;
        Location::new(row.clamp(0, max) as usize, col.clamp(0, max) as usize)
    }

    /// Clamped steps in North, East, South, West order. May contain `loc` itself on an edge.
    pub fn neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        CARDINALS.into_iter().map(move |d| self.step(loc, d))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (Location::new(i / self.size, i % self.size), t))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                f.write_str(&tile.encode())?;
            }
        }
        Ok(())
    }
}
