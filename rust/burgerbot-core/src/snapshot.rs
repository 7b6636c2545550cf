//! Game payload received each turn, and the per-kind location indexes built from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::astar::Pathfinder;
use crate::board::Board;
use crate::cost::CostPolicy;
use crate::errors::{BoardError, PathError};
use crate::models::{Location, PathResult};
use crate::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game: Game,
    pub hero: Hero,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub turn: u32,
    #[serde(default)]
    pub max_turns: u32,
    #[serde(default)]
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    pub board: BoardState,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub size: usize,
    pub tiles: String,
}

/// Position as sent by the server: `x` is the row, `y` the column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl From<Pos> for Location {
    fn from(p: Pos) -> Self {
        Location::new(p.x, p.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: i32,
    pub name: String,
    pub pos: Pos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_pos: Option<Pos>,
    pub life: i32,
    pub calories: i32,
    pub french_fries_count: u32,
    pub burger_count: u32,
    #[serde(default)]
    pub crashed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub burger: u32,
    pub french_fries: u32,
    pub fulfilled_orders: u32,
}

/// Kinds of cells the bot walks towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Fries,
    Burger,
    Tavern,
    Customer,
}

impl std::str::FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fries" => Ok(TargetKind::Fries),
            "burger" => Ok(TargetKind::Burger),
            "tavern" => Ok(TargetKind::Tavern),
            "customer" => Ok(TargetKind::Customer),
            other => Err(format!("unknown target kind {other:?}")),
        }
    }
}

/// One parsed turn: the board plus where everything on it is.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub board: Board,
    pub me: Hero,
    pub heroes: Vec<Hero>,
    pub customers: Vec<Customer>,
    /// Fries location to owner id (-1 unowned).
    pub fries: BTreeMap<Location, i32>,
    /// Burger location to owner id (-1 unowned).
    pub burgers: BTreeMap<Location, i32>,
    pub hero_locs: BTreeMap<Location, i32>,
    pub taverns: BTreeSet<Location>,
    pub spikes: BTreeSet<Location>,
    pub customer_locs: BTreeMap<Location, i32>,
}

impl Snapshot {
    pub fn from_state(state: GameState) -> Result<Self, BoardError> {
        let board = Board::parse(state.game.board.size, &state.game.board.tiles)?;
        board.tile(state.hero.pos.into())?;

        let mut fries = BTreeMap::new();
        let mut burgers = BTreeMap::new();
        let mut hero_locs = BTreeMap::new();
        let mut taverns = BTreeSet::new();
        let mut spikes = BTreeSet::new();
        let mut customer_locs = BTreeMap::new();
        for (loc, tile) in board.iter() {
            match *tile {
                Tile::PickupA { owner_id } => { fries.insert(loc, owner_id); }
                Tile::PickupB { owner_id } => { burgers.insert(loc, owner_id); }
                Tile::AgentOccupant { agent_id } => { hero_locs.insert(loc, agent_id); }
                Tile::Goal => { taverns.insert(loc); }
                Tile::StaticHazard => { spikes.insert(loc); }
                Tile::TargetOccupant { entity_id } => { customer_locs.insert(loc, entity_id); }
                Tile::Empty | Tile::Wall => {}
            }
        }

        Ok(Self {
            board,
            me: state.hero,
            heroes: state.game.heroes,
            customers: state.game.customers,
            fries,
            burgers,
            hero_locs,
            taverns,
            spikes,
            customer_locs,
        })
    }

    pub fn my_location(&self) -> Location {
        self.me.pos.into()
    }

    /// Candidate cells of `kind`. Pickups already owned by `me` are left out.
    pub fn targets(&self, kind: TargetKind) -> Vec<Location> {
        let not_mine = |(loc, owner): (&Location, &i32)| (*owner != self.me.id).then_some(*loc);
        match kind {
            TargetKind::Fries => self.fries.iter().filter_map(not_mine).collect(),
            TargetKind::Burger => self.burgers.iter().filter_map(not_mine).collect(),
            TargetKind::Tavern => self.taverns.iter().copied().collect(),
            TargetKind::Customer => self.customer_locs.keys().copied().collect(),
        }
    }

    /// Cheapest reachable target of `kind` from `me`, ties broken by location.
    pub fn closest(
        &self,
        pathfinder: &Pathfinder<'_>,
        kind: TargetKind,
        hazard_cost: Option<&CostPolicy>,
    ) -> Result<Option<(Location, PathResult)>, PathError> {
        let start = Some(self.my_location());
        let mut best: Option<(Location, PathResult)> = None;
        for target in self.targets(kind) {
            let res = pathfinder.find_path(start, Some(target), hazard_cost)?;
            if !res.is_reachable() {
                continue;
            }
            if best.as_ref().map_or(true, |(_, b)| res.cost < b.cost) {
                best = Some((target, res));
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_state() -> serde_json::Value {
        let hero = |id: i32, x: usize, y: usize| json!({
            "id": id, "name": format!("bot{id}"), "pos": {"x": x, "y": y},
            "life": 100, "calories": 0, "frenchFriesCount": 0, "burgerCount": 0
        });
        json!({
            "game": {
                "id": "g1",
                "turn": 3,
                "maxTurns": 1200,
                "heroes": [hero(1, 0, 0), hero(2, 3, 3)],
                "customers": [{"id": 1, "burger": 1, "frenchFries": 2, "fulfilledOrders": 0}],
                "board": {
                    "size": 4,
                    "tiles": concat!("@1  F-  ", "  ##B1  ", "[]^^  C1", "    F1@2")
                },
                "finished": false
            },
            "hero": hero(1, 0, 0),
            "token": "abcd"
        })
    }

    fn snapshot() -> Snapshot {
        let state: GameState = serde_json::from_value(sample_state()).unwrap();
        Snapshot::from_state(state).unwrap()
    }

    #[test]
    fn indexes_every_tile_kind() {
        let s = snapshot();
        assert_eq!(s.fries, BTreeMap::from([(Location::new(0, 2), -1), (Location::new(3, 2), 1)]));
        assert_eq!(s.burgers, BTreeMap::from([(Location::new(1, 2), 1)]));
        assert_eq!(s.hero_locs, BTreeMap::from([(Location::new(0, 0), 1), (Location::new(3, 3), 2)]));
        assert_eq!(s.taverns, BTreeSet::from([Location::new(2, 0)]));
        assert_eq!(s.spikes, BTreeSet::from([Location::new(2, 1)]));
        assert_eq!(s.customer_locs, BTreeMap::from([(Location::new(2, 3), 1)]));
        assert_eq!(s.my_location(), Location::new(0, 0));
        assert_eq!(s.heroes.len(), 2);
        assert_eq!(s.customers[0].french_fries, 2);
    }

    #[test]
    fn targets_skip_my_own_pickups() {
        let s = snapshot();
        assert_eq!(s.targets(TargetKind::Fries), vec![Location::new(0, 2)]);
        assert!(s.targets(TargetKind::Burger).is_empty());
        assert_eq!(s.targets(TargetKind::Tavern), vec![Location::new(2, 0)]);
    }

    #[test]
    fn closest_picks_cheapest_reachable() {
        let s = snapshot();
        let pf = Pathfinder::new(&s.board);
        let (loc, res) = s.closest(&pf, TargetKind::Fries, None).unwrap().unwrap();
        assert_eq!(loc, Location::new(0, 2));
        assert_eq!(res.cost, 2);
        assert!(s.closest(&pf, TargetKind::Burger, None).unwrap().is_none());
    }

    #[test]
    fn malformed_board_is_rejected() {
        let mut v = sample_state();
        v["game"]["board"]["tiles"] = json!("@1");
        let state: GameState = serde_json::from_value(v).unwrap();
        assert_eq!(Snapshot::from_state(state).unwrap_err(), BoardError::MalformedBoard { expected: 16, actual: 1 });
    }

    #[test]
    fn hero_off_the_board_is_rejected() {
        let mut v = sample_state();
        v["hero"]["pos"] = json!({"x": 9, "y": 0});
        let state: GameState = serde_json::from_value(v).unwrap();
        assert_eq!(Snapshot::from_state(state).unwrap_err(), BoardError::OutOfBounds { row: 9, col: 0, size: 4 });
    }

    #[test]
    fn parses_target_kinds() {
        assert_eq!("Fries".parse::<TargetKind>(), Ok(TargetKind::Fries));
        assert_eq!(" tavern ".parse::<TargetKind>(), Ok(TargetKind::Tavern));
        assert!("gold".parse::<TargetKind>().is_err());
    }
}
