pub mod astar;
pub mod board;
pub mod cost;
pub mod errors;
pub mod models;
pub mod movement;
pub mod options;
pub mod snapshot;
pub mod tile;

pub use astar::{first_step, Pathfinder};
pub use board::Board;
pub use cost::{CostPolicy, HazardCost};
pub use errors::{BoardError, PathError};
pub use models::{Location, PathResult, UNREACHABLE_COST};
pub use movement::{Direction, CARDINALS};
pub use options::SearchOptions;
pub use snapshot::{GameState, Snapshot, TargetKind};
pub use tile::Tile;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
