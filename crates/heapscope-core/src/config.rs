use serde::{Deserialize, Serialize};

/// Tracker behavior knobs.
///
/// The sampling interval is advisory data for the host's capture
/// loop — the tracker itself owns no timers and never sleeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum snapshots retained in history; older snapshots are
    /// dropped first. `0` keeps unbounded history.
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
    /// Suggested milliseconds between captures for the host loop.
    #[serde(default = "default_sampling_interval_ms")]
    pub sampling_interval_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_snapshots: default_max_snapshots(),
            sampling_interval_ms: default_sampling_interval_ms(),
        }
    }
}

fn default_max_snapshots() -> usize {
    100
}

fn default_sampling_interval_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_serde_defaults() {
        let from_empty: TrackerConfig =
            serde_json::from_value(serde_json::json!({})).expect("all fields optional");
        assert_eq!(from_empty, TrackerConfig::default());
        assert_eq!(from_empty.max_snapshots, 100);
        assert_eq!(from_empty.sampling_interval_ms, 2000);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: TrackerConfig =
            serde_json::from_value(serde_json::json!({ "max_snapshots": 5 }))
                .expect("partial config parses");
        assert_eq!(config.max_snapshots, 5);
        assert_eq!(config.sampling_interval_ms, 2000);
    }
}
