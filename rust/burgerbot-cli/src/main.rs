use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use burgerbot_core::{
    first_step, CostPolicy, Direction, GameState, Location, PathResult, Pathfinder, SearchOptions, Snapshot, TargetKind,
};

#[derive(Parser, Debug)]
#[command(name = "burgerbot", version, about = "Pick the next move for a burger bot from one game snapshot")]
struct Args {
    /// Snapshot JSON file, or `-` for stdin
    #[arg(long = "snapshot", value_name = "PATH", default_value = "-")]
    snapshot: PathBuf,

    /// Kind of cell to walk to (fries, burger, tavern, customer)
    #[arg(long = "goal", value_name = "KIND", conflicts_with = "target")]
    goal: Option<TargetKind>,

    /// Explicit destination cell
    #[arg(long = "target", value_name = "ROW,COL", value_parser = parse_location)]
    target: Option<Location>,

    /// Flat extra cost for spikes and heroes
    #[arg(long = "hazard-cost", value_name = "N", value_parser = clap::value_parser!(i64).range(0..))]
    hazard_cost: Option<i64>,

    /// Stop searching after this many expanded cells
    #[arg(long = "max-expansions", value_name = "N")]
    max_expansions: Option<u64>,

    /// Print the full result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Log search details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_location(s: &str) -> Result<Location, String> {
    let (row, col) = s.split_once(',').ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse::<usize>().map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col.trim().parse::<usize>().map_err(|e| format!("bad col {col:?}: {e}"))?;
    Ok(Location::new(row, col))
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("failed to read snapshot from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?
    };
    let state: GameState = serde_json::from_str(&raw).context("snapshot is not a valid game state")?;
    Snapshot::from_state(state).context("snapshot board is malformed")
}

struct Decision {
    target: Option<Location>,
    result: PathResult,
    direction: Option<Direction>,
}

fn decide(snapshot: &Snapshot, args: &Args) -> Result<Decision> {
    let policy = args.hazard_cost.map(CostPolicy::Flat);
    let pf = Pathfinder::new(&snapshot.board).with_options(SearchOptions { max_expansions: args.max_expansions });
    let start = Some(snapshot.my_location());

    let (target, result) = match (args.target, args.goal) {
        (Some(target), _) => (Some(target), pf.find_path(start, Some(target), policy.as_ref())?),
        (None, Some(kind)) => match snapshot.closest(&pf, kind, policy.as_ref())? {
            Some((target, res)) => (Some(target), res),
            None => (None, PathResult::unreachable("no-target", 0)),
        },
        (None, None) => (None, pf.find_path(start, None, policy.as_ref())?),
    };
    let direction = first_step(&result)?;
    Ok(Decision { target, result, direction })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
    info!(?args, "starting burgerbot");

    let snapshot = load_snapshot(&args.snapshot)?;
    let decision = decide(&snapshot, &args)?;
    if decision.direction.is_none() {
        warn!(reason = ?decision.result.reason, "no route to target");
    }

    if args.json {
        let out = json!({
            "direction": decision.direction,
            "target": decision.target,
            "cost": decision.result.cost,
            "path": decision.result.steps(),
        });
        println!("{out}");
    } else {
        match decision.direction {
            Some(d) => println!("{d}"),
            None => println!("none"),
        }
    }
    Ok(())
}
