use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::errors::PathError;
use crate::models::Location;
use crate::tile::Tile;

pub const STEP_COST: i64 = 1;

pub type TileCostFn = dyn Fn(&Tile) -> i64 + Send + Sync;

/// Extra cost charged for stepping onto a hazard cell.
#[derive(Clone)]
pub enum CostPolicy {
    /// Same cost for every hazard, scaled by `1 + adjacent heroes`.
    Flat(i64),
    /// Cost looked up per tile, for the hazard and each adjacent hero.
    PerTile(Arc<TileCostFn>),
}

impl CostPolicy {
    pub fn per_tile<F>(f: F) -> Self
    where
        F: Fn(&Tile) -> i64 + Send + Sync + 'static,
    {
        CostPolicy::PerTile(Arc::new(f))
    }

    fn tile_cost(&self, tile: &Tile) -> Result<i64, PathError> {
        let cost = match self {
            CostPolicy::Flat(c) => *c,
            CostPolicy::PerTile(f) => f(tile),
        };
        if cost < 0 {
            return Err(PathError::NegativeCost { cost });
        }
        Ok(cost)
    }
}

impl fmt::Debug for CostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostPolicy::Flat(c) => f.debug_tuple("Flat").field(c).finish(),
            CostPolicy::PerTile(_) => f.write_str("PerTile(..)"),
        }
    }
}

/// Cost of entering `loc`. Hazards are charged the policy value of their own
/// tile plus the policy value of every hero one clamped step away; on an edge
/// that step can land back on `loc` itself. Sums saturate at `i64::MAX`.
pub fn step_cost(board: &Board, loc: Location, policy: Option<&CostPolicy>) -> Result<i64, PathError> {
    let Some(policy) = policy else { return Ok(STEP_COST) };
    if !board.hazard(loc)? {
        return Ok(STEP_COST);
    }

    let mut cost = policy.tile_cost(board.tile(loc)?)?;
    for n in board.neighbors(loc) {
        let tile = board.tile(n)?;
        if tile.is_agent() {
            cost = cost.saturating_add(policy.tile_cost(tile)?);
        }
    }
    Ok(cost)
}

/// Serialisable form of a [`CostPolicy`]: a bare number, or a per-kind table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HazardCost {
    Flat(i64),
    Table {
        #[serde(default)]
        static_hazard: i64,
        #[serde(default)]
        agent: i64,
    },
}

impl TryFrom<&HazardCost> for CostPolicy {
    type Error = PathError;

    fn try_from(cfg: &HazardCost) -> Result<Self, Self::Error> {
        let lowest = match *cfg {
            HazardCost::Flat(c) => c,
            HazardCost::Table { static_hazard, agent } => static_hazard.min(agent),
        };
        if lowest < 0 {
            return Err(PathError::NegativeCost { cost: lowest });
        }
        Ok(match *cfg {
            HazardCost::Flat(c) => CostPolicy::Flat(c),
            HazardCost::Table { static_hazard, agent } => CostPolicy::per_tile(move |tile| match tile {
                Tile::StaticHazard => static_hazard,
                Tile::AgentOccupant { .. } => agent,
                _ => 0,
            }),
        })
    }
}
