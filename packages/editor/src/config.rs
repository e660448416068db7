use serde::{Deserialize, Serialize};

/// Interaction tuning for an editor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Distance (px) from the viewport mid-point at which a drag snaps
    pub snap_threshold: f64,
    /// Arrow-key nudge (px)
    pub nudge_step: f64,
    /// Arrow-key nudge with a modifier held (px)
    pub nudge_step_large: f64,
    /// How far up the tree a click may climb to find a text-bearing node
    pub ancestor_depth: usize,
    /// History entries kept before the oldest is dropped
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 8.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            ancestor_depth: 5,
            history_limit: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"snapThreshold": 4}"#).unwrap();
        assert_eq!(config.snap_threshold, 4.0);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.ancestor_depth, 5);
    }
}
