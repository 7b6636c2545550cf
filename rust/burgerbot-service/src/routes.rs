use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, info_span};

use burgerbot_core::snapshot::BoardState;
use burgerbot_core::{
    first_step, Board, CostPolicy, Direction, GameState, HazardCost, Location, PathResult, Pathfinder, SearchOptions,
    Snapshot, TargetKind,
};

use crate::config::Config;
use crate::errors::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config) }
    }

    fn hazard_policy(&self, requested: Option<&HazardCost>) -> Result<Option<CostPolicy>, AppError> {
        match requested {
            Some(cfg) => Ok(Some(CostPolicy::try_from(cfg)?)),
            None => Ok(self.config.hazard_cost.map(CostPolicy::Flat)),
        }
    }

    fn search_options(&self, requested: Option<SearchOptions>) -> SearchOptions {
        requested.unwrap_or(SearchOptions { max_expansions: self.config.max_expansions })
    }
}

#[derive(Debug, Deserialize)]
pub struct FindPathRequest {
    pub board: BoardState,
    pub start: Option<Location>,
    pub target: Option<Location>,
    #[serde(default)]
    pub hazard_cost: Option<HazardCost>,
    #[serde(default)]
    pub options: Option<SearchOptions>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub state: GameState,
    /// Explicit destination; takes precedence over `goal`.
    #[serde(default)]
    pub target: Option<Location>,
    #[serde(default)]
    pub goal: Option<TargetKind>,
    #[serde(default)]
    pub hazard_cost: Option<HazardCost>,
    #[serde(default)]
    pub options: Option<SearchOptions>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MoveResponse {
    pub direction: Option<Direction>,
    pub target: Option<Location>,
    pub cost: i64,
}

#[derive(Debug, Serialize)]
pub struct Healthz { pub status: &'static str }

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/version", get(version))
        .route("/find_path", post(find_path))
        .route("/move", post(next_move))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(Healthz { status: "ok" }))
}

async fn version() -> impl IntoResponse {
    let svc_version = env!("CARGO_PKG_VERSION");
    let core_version = burgerbot_core::version();
    (StatusCode::OK, Json(json!({"service_version": svc_version, "core_version": core_version})))
}

async fn find_path(State(state): State<AppState>, Json(req): Json<FindPathRequest>) -> Result<Json<PathResult>, AppError> {
    let span = info_span!("find_path", size = req.board.size);
    let _enter = span.enter();

    let board = Board::parse(req.board.size, &req.board.tiles)?;
    let policy = state.hazard_policy(req.hazard_cost.as_ref())?;
    let pf = Pathfinder::new(&board).with_options(state.search_options(req.options));
    let res = pf.find_path(req.start, req.target, policy.as_ref())?;

    let path_len = res.path.as_ref().map(|p| p.len()).unwrap_or(0);
    info!(reason=?res.reason, expanded=res.expanded, path_len, cost=res.cost, "find_path done");
    Ok(Json(res))
}

async fn next_move(State(state): State<AppState>, Json(req): Json<MoveRequest>) -> Result<Json<MoveResponse>, AppError> {
    let span = info_span!("move", turn = req.state.game.turn, hero = req.state.hero.id);
    let _enter = span.enter();

    let snapshot = Snapshot::from_state(req.state)?;
    let policy = state.hazard_policy(req.hazard_cost.as_ref())?;
    let pf = Pathfinder::new(&snapshot.board).with_options(state.search_options(req.options));
    let start = Some(snapshot.my_location());

    let (target, res) = match (req.target, req.goal) {
        (Some(target), _) => (Some(target), pf.find_path(start, Some(target), policy.as_ref())?),
        (None, Some(kind)) => match snapshot.closest(&pf, kind, policy.as_ref())? {
            Some((target, res)) => (Some(target), res),
            None => (None, PathResult::unreachable("no-target", 0)),
        },
        (None, None) => (None, pf.find_path(start, None, policy.as_ref())?),
    };

    let direction = first_step(&res)?;
    info!(?direction, ?target, cost = res.cost, expanded = res.expanded, "move chosen");
    Ok(Json(MoveResponse { direction, target, cost: res.cost }))
}
