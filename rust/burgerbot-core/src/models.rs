use serde::{Deserialize, Serialize};

/// Cost reported for a target that cannot be reached.
pub const UNREACHABLE_COST: i64 = (1 << 32) - 1;

/// A grid cell. Ordering is `(row, col)`, which is also the frontier tie-break.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Location) -> i64 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as i64
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub cost: i64,
    /// Target first, start last.
    pub path: Option<Vec<Location>>,
    pub expanded: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PathResult {
    pub fn unreachable(reason: &str, expanded: u64) -> Self {
        Self { cost: UNREACHABLE_COST, path: None, expanded, reason: Some(reason.to_string()) }
    }

    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }

    /// The path in walking order, start first.
    pub fn steps(&self) -> Option<Vec<Location>> {
        self.path.as_ref().map(|p| p.iter().rev().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn location_orders_by_row_then_col() {
        let mut locs = vec![Location::new(1, 0), Location::new(0, 2), Location::new(0, 1)];
        locs.sort();
        assert_eq!(locs, vec![Location::new(0, 1), Location::new(0, 2), Location::new(1, 0)]);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Location::new(0, 3);
        let b = Location::new(4, 1);
        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn unreachable_omits_path_and_keeps_reason() {
        let res = PathResult::unreachable("no-path", 9);
        assert!(!res.is_reachable());
        assert_eq!(res.cost, UNREACHABLE_COST);
        assert_eq!(res.steps(), None);
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["path"], Value::Null);
        assert_eq!(v["reason"], json!("no-path"));
    }

    #[test]
    fn steps_reverse_the_stored_path() {
        let res = PathResult {
            cost: 2,
            path: Some(vec![Location::new(1, 1), Location::new(0, 1), Location::new(0, 0)]),
            expanded: 3,
            reason: None,
        };
        assert_eq!(res.steps().unwrap(), vec![Location::new(0, 0), Location::new(0, 1), Location::new(1, 1)]);
        let v = serde_json::to_value(&res).unwrap();
        assert!(v.get("reason").is_none());
        assert_eq!(v["path"][0], json!({"row": 1, "col": 1}));
    }
}
