//! Two-character tile tokens as they appear in the board payload.

use crate::errors::BoardError;

/// Id carried by pickups and customers that nobody owns yet.
pub const NO_OWNER: i32 = -1;

/// Width of one encoded tile token, in characters.
pub const TOKEN_WIDTH: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall,
    /// Tavern. Blocks movement like a wall but is a destination for the bot.
    Goal,
    /// Spikes.
    StaticHazard,
    /// A hero standing on the cell.
    AgentOccupant { agent_id: i32 },
    /// French fries, owned by `owner_id` or [`NO_OWNER`].
    PickupA { owner_id: i32 },
    /// Burger, owned by `owner_id` or [`NO_OWNER`].
    PickupB { owner_id: i32 },
    /// A customer waiting for an order.
    TargetOccupant { entity_id: i32 },
}

impl Tile {
    pub fn owner(&self) -> Option<u32> {
        let id = match *self {
            Tile::AgentOccupant { agent_id } => agent_id,
            Tile::PickupA { owner_id } | Tile::PickupB { owner_id } => owner_id,
            Tile::TargetOccupant { entity_id } => entity_id,
            Tile::Empty | Tile::Wall | Tile::Goal | Tile::StaticHazard => return None,
        };
        u32::try_from(id).ok()
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, Tile::AgentOccupant { .. })
    }

    /// Wire token for this tile; inverse of [`parse_tile`].
    pub fn encode(&self) -> String {
        match *self {
            Tile::Empty => "  ".to_string(),
            Tile::Wall => "##".to_string(),
            Tile::Goal => "[]".to_string(),
            Tile::StaticHazard => "^^".to_string(),
            Tile::AgentOccupant { agent_id } => format!("@{}", encode_id(agent_id)),
            Tile::PickupA { owner_id } => format!("F{}", encode_id(owner_id)),
            Tile::PickupB { owner_id } => format!("B{}", encode_id(owner_id)),
            Tile::TargetOccupant { entity_id } => format!("C{}", encode_id(entity_id)),
        }
    }
}

fn encode_id(id: i32) -> char {
    u32::try_from(id)
        .ok()
        .and_then(|d| char::from_digit(d, 10))
        .unwrap_or('-')
}

/// Classify a single token. `index` is the token's position in the board
/// string and is only used for error reporting.
pub fn parse_tile(token: &str, index: usize) -> Result<Tile, BoardError> {
    let unknown = || BoardError::UnknownTile { token: token.to_string(), index };
    let mut chars = token.chars();
    let (Some(kind), Some(id), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(unknown());
    };

    match (kind, id) {
        (' ', ' ') => Ok(Tile::Empty),
        ('#', '#') => Ok(Tile::Wall),
        ('[', ']') => Ok(Tile::Goal),
        ('^', '^') => Ok(Tile::StaticHazard),
        ('F', c) => owner_id(c).map(|owner_id| Tile::PickupA { owner_id }).ok_or_else(unknown),
        ('B', c) => owner_id(c).map(|owner_id| Tile::PickupB { owner_id }).ok_or_else(unknown),
        ('C', c) => owner_id(c).map(|entity_id| Tile::TargetOccupant { entity_id }).ok_or_else(unknown),
        ('@', c) => digit(c).map(|agent_id| Tile::AgentOccupant { agent_id }).ok_or_else(unknown),
        _ => Err(unknown()),
    }
}

fn owner_id(c: char) -> Option<i32> {
    if c == '-' { Some(NO_OWNER) } else { digit(c) }
}

fn digit(c: char) -> Option<i32> {
    c.to_digit(10).map(|d| d as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_fixed_tokens() {
        assert_eq!(parse_tile("  ", 0), Ok(Tile::Empty));
        assert_eq!(parse_tile("##", 0), Ok(Tile::Wall));
        assert_eq!(parse_tile("[]", 0), Ok(Tile::Goal));
        assert_eq!(parse_tile("^^", 0), Ok(Tile::StaticHazard));
    }

    #[test]
    fn classifies_owned_tokens() {
        assert_eq!(parse_tile("F1", 0), Ok(Tile::PickupA { owner_id: 1 }));
        assert_eq!(parse_tile("F-", 0), Ok(Tile::PickupA { owner_id: NO_OWNER }));
        assert_eq!(parse_tile("B4", 0), Ok(Tile::PickupB { owner_id: 4 }));
        assert_eq!(parse_tile("B-", 0), Ok(Tile::PickupB { owner_id: NO_OWNER }));
        assert_eq!(parse_tile("@2", 0), Ok(Tile::AgentOccupant { agent_id: 2 }));
        assert_eq!(parse_tile("C7", 0), Ok(Tile::TargetOccupant { entity_id: 7 }));
    }

    #[test]
    fn rejects_unknown_tokens() {
        for bad in ["??", "#", "###", "@-", "Fx", "[[", " #", ""] {
            let err = parse_tile(bad, 3).unwrap_err();
            assert_eq!(err, BoardError::UnknownTile { token: bad.to_string(), index: 3 }, "token {bad:?}");
        }
    }

    #[test]
    fn owner_ignores_placeholder() {
        assert_eq!(Tile::PickupA { owner_id: NO_OWNER }.owner(), None);
        assert_eq!(Tile::PickupB { owner_id: 3 }.owner(), Some(3));
        assert_eq!(Tile::Wall.owner(), None);
        assert!(Tile::AgentOccupant { agent_id: 1 }.is_agent());
        assert!(!Tile::StaticHazard.is_agent());
    }

    #[test]
    fn encode_matches_wire_tokens() {
        for token in ["  ", "##", "[]", "^^", "@1", "F-", "F2", "B-", "B3", "C4", "C-"] {
            assert_eq!(parse_tile(token, 0).unwrap().encode(), token);
        }
    }
}
