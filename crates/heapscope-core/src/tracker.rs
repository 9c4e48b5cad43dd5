//! Snapshot history tracker.
//!
//! An explicit context object (no module-level singletons): the host
//! constructs one [`MemoryTracker`] per tracked surface, feeds it raw
//! capture payloads on whatever cadence it chooses, and reads the
//! bounded history back. Tests instantiate independent trackers.

use serde_json::Value;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::model::{ComponentMemoryUsage, HeapSnapshot};
use crate::parse;
use crate::registry::ComponentRegistry;

/// Bounded snapshot history plus the component registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryTracker {
    config: TrackerConfig,
    snapshots: Vec<HeapSnapshot>,
    registry: ComponentRegistry,
}

impl MemoryTracker {
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            snapshots: Vec::new(),
            registry: ComponentRegistry::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Parse one raw capture payload and append it to history,
    /// dropping the oldest snapshots beyond `max_snapshots`.
    ///
    /// Failed captures (`None` or malformed payloads) still append
    /// an empty snapshot, so history gaps stay visible.
    pub fn record_capture(&mut self, raw: Option<&Value>) -> &HeapSnapshot {
        let snapshot = parse::parse(raw);
        debug!(
            id = %snapshot.id,
            objects = snapshot.object_count,
            used_bytes = snapshot.metrics.used_heap_size,
            "recorded snapshot"
        );
        self.snapshots.push(snapshot);

        let max = self.config.max_snapshots;
        if max > 0 && self.snapshots.len() > max {
            let excess = self.snapshots.len() - max;
            self.snapshots.drain(..excess);
        }

        self.snapshots.last().expect("history non-empty after push")
    }

    #[must_use]
    pub fn snapshots(&self) -> &[HeapSnapshot] {
        &self.snapshots
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HeapSnapshot> {
        self.snapshots.last()
    }

    /// Clear the snapshot history. Component registrations survive a
    /// reset: their lifecycle is owned by the host, not by capture
    /// history.
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    pub fn register_component(&mut self, component_id: &str, display_name: &str) {
        self.registry.register(component_id, display_name);
    }

    pub fn unregister_component(&mut self, component_id: &str) {
        self.registry.unregister(component_id);
    }

    #[must_use]
    pub fn component_usage(&self, component_id: &str) -> Option<ComponentMemoryUsage> {
        self.registry.usage(component_id)
    }

    #[must_use]
    pub fn component_breakdown(&self) -> Vec<ComponentMemoryUsage> {
        self.registry.breakdown()
    }

    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metrics_payload(used: u64) -> Value {
        json!({ "usedJSHeapSize": used, "totalJSHeapSize": used * 2 })
    }

    #[test]
    fn history_is_bounded_and_keeps_newest() {
        let mut tracker = MemoryTracker::new(TrackerConfig {
            max_snapshots: 3,
            ..TrackerConfig::default()
        });

        for used in 1..=5_u64 {
            tracker.record_capture(Some(&metrics_payload(used)));
        }

        assert_eq!(tracker.snapshots().len(), 3);
        let used: Vec<u64> = tracker
            .snapshots()
            .iter()
            .map(|s| s.metrics.used_heap_size)
            .collect();
        assert_eq!(used, vec![3, 4, 5]);
        assert_eq!(tracker.latest().map(|s| s.metrics.used_heap_size), Some(5));
    }

    #[test]
    fn zero_max_snapshots_keeps_unbounded_history() {
        let mut tracker = MemoryTracker::new(TrackerConfig {
            max_snapshots: 0,
            ..TrackerConfig::default()
        });

        for used in 0..10 {
            tracker.record_capture(Some(&metrics_payload(used)));
        }
        assert_eq!(tracker.snapshots().len(), 10);
    }

    #[test]
    fn failed_captures_still_append_empty_snapshots() {
        let mut tracker = MemoryTracker::default();
        let snapshot = tracker.record_capture(None);
        assert!(snapshot.is_empty());
        assert_eq!(tracker.snapshots().len(), 1);
    }

    #[test]
    fn reset_clears_history_but_keeps_registrations() {
        let mut tracker = MemoryTracker::default();
        tracker.register_component("a", "Foo");
        tracker.record_capture(Some(&metrics_payload(1)));

        tracker.reset();

        assert!(tracker.snapshots().is_empty());
        assert!(tracker.latest().is_none());
        assert_eq!(
            tracker.component_usage("a").map(|u| u.instance_count),
            Some(1)
        );
    }

    #[test]
    fn independent_trackers_do_not_share_state() {
        let mut a = MemoryTracker::default();
        let mut b = MemoryTracker::default();
        a.register_component("x", "X");
        b.record_capture(None);

        assert!(b.component_usage("x").is_none());
        assert!(a.snapshots().is_empty());
    }
}
