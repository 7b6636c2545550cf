use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Upper bound on expanded cells. `None` means `size * size`.
    pub max_expansions: Option<u64>,
}

impl SearchOptions {
    pub fn expansion_limit(&self, board_size: usize) -> u64 {
        let area = (board_size as u64).saturating_mul(board_size as u64);
        self.max_expansions.unwrap_or(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_board_area() {
        let o = SearchOptions::default();
        assert_eq!(o.expansion_limit(10), 100);
        let o = SearchOptions { max_expansions: Some(7) };
        assert_eq!(o.expansion_limit(10), 7);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_boards_saturate_the_default_limit() {
        assert_eq!(SearchOptions::default().expansion_limit(1 << 32), u64::MAX);
        assert_eq!(SearchOptions::default().expansion_limit(usize::MAX), u64::MAX);
    }

    #[test]
    fn deserializes_with_defaults_when_missing_fields() {
        let o: SearchOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(o, SearchOptions::default());
        let o: SearchOptions = serde_json::from_value(json!({"max_expansions": 3})).unwrap();
        assert_eq!(o.max_expansions, Some(3));
    }
}
