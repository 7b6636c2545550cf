use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::board::Board;
use crate::cost::{step_cost, CostPolicy};
use crate::errors::PathError;
use crate::models::{Location, PathResult};
use crate::movement::Direction;
use crate::options::SearchOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueNode {
    f: i64,
    loc: Location,
}

impl PartialOrd for QueueNode { fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) } }
impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert ordering for min-heap behavior
        (other.f, other.loc).cmp(&(self.f, self.loc))
    }
}

/// Hazard-aware A* over one board. Holds no search state between calls.
pub struct Pathfinder<'a> {
    board: &'a Board,
    options: SearchOptions,
}

impl<'a> Pathfinder<'a> {
    pub fn new(board: &'a Board) -> Self { Self { board, options: SearchOptions::default() } }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Cheapest path from `start` to `target`, stored target first.
    ///
    /// A missing `start` is unreachable; a missing `target` is a zero-cost
    /// path that stays on `start`. The target cell is always admissible, so
    /// impassable destinations such as taverns and pickups can be reached by
    /// walking up to them.
    pub fn find_path(
        &self,
        start: Option<Location>,
        target: Option<Location>,
        hazard_cost: Option<&CostPolicy>,
    ) -> Result<PathResult, PathError> {
        let Some(start) = start else {
            return Ok(PathResult::unreachable("no-start", 0));
        };
        self.board.tile(start)?;
        let Some(target) = target else {
            return Ok(PathResult { cost: 0, path: Some(vec![start]), expanded: 0, reason: None });
        };
        self.board.tile(target)?;

        let res = self.search(start, target, hazard_cost)?;
        debug!(?start, ?target, cost = res.cost, expanded = res.expanded, reason = ?res.reason, "find_path done");
        Ok(res)
    }

    fn search(&self, start: Location, target: Location, hazard_cost: Option<&CostPolicy>) -> Result<PathResult, PathError> {
        let limit = self.options.expansion_limit(self.board.size());

        let mut open = BinaryHeap::new();
        let mut in_open: HashSet<Location> = HashSet::new();
        let mut closed: HashSet<Location> = HashSet::new();
        let mut came_from: HashMap<Location, Location> = HashMap::new();
        let mut g_score: HashMap<Location, i64> = HashMap::new();
        let mut f_score: HashMap<Location, i64> = HashMap::new();
        let mut expanded: u64 = 0;

        let h0 = start.manhattan(target);
        g_score.insert(start, 0);
        f_score.insert(start, h0);
        open.push(QueueNode { f: h0, loc: start });
        in_open.insert(start);

        while let Some(qn) = open.pop() {
            // Discard stale
            if !in_open.contains(&qn.loc) || f_score.get(&qn.loc) != Some(&qn.f) {
                continue;
            }
            expanded += 1;
            if expanded > limit {
                return Ok(PathResult::unreachable("expansion-limit", expanded));
            }

            let current = qn.loc;
            let g_current = g_score[&current];
            if current == target {
                return Ok(PathResult { cost: g_current, path: Some(reconstruct(&came_from, current)), expanded, reason: None });
            }

            in_open.remove(&current);
            closed.insert(current);
            for neighbor in self.board.neighbors(current) {
                if neighbor != target && (closed.contains(&neighbor) || !self.board.passable(neighbor)?) {
                    continue;
                }

                let tentative_g = g_current.saturating_add(step_cost(self.board, neighbor, hazard_cost)?);
                if !in_open.contains(&neighbor) {
                    in_open.insert(neighbor);
                } else if g_score.get(&neighbor).is_some_and(|&g| tentative_g >= g) {
                    continue;
                }

                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                let f = tentative_g.saturating_add(neighbor.manhattan(target));
                f_score.insert(neighbor, f);
                open.push(QueueNode { f, loc: neighbor });
            }
        }

        Ok(PathResult::unreachable("no-path", expanded))
    }

    /// First move along the cheapest path, `Stay` when already on the target,
    /// `None` when the target cannot be reached.
    pub fn next_direction(
        &self,
        start: Option<Location>,
        target: Option<Location>,
        hazard_cost: Option<&CostPolicy>,
    ) -> Result<Option<Direction>, PathError> {
        let res = self.find_path(start, target, hazard_cost)?;
        first_step(&res)
    }
}

/// Direction of the first move stored in `res`.
pub fn first_step(res: &PathResult) -> Result<Option<Direction>, PathError> {
    let Some(path) = res.path.as_deref() else { return Ok(None) };
    let [.., next, from] = path else {
        return Ok(Some(Direction::Stay));
    };
    let dr = next.row as i64 - from.row as i64;
    let dc = next.col as i64 - from.col as i64;
    Direction::from_offset(dr, dc)
        .map(Some)
        .ok_or(PathError::NoMatchingDirection { dr, dc })
}

fn reconstruct(came_from: &HashMap<Location, Location>, mut current: Location) -> Vec<Location> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        path.push(current);
    }
    path
}
