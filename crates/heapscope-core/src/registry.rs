//! Component attribution registry.
//!
//! A mutable registry, separate from the immutable snapshot model,
//! bridging the host's component lifecycle into the memory model.
//! The host registers a component id per mounted instance and
//! unregisters it on unmount; size estimates arrive separately via
//! [`ComponentRegistry::record_estimate`] and stay zero until then.
//!
//! Calls take `&mut self`; embedders on preemptive threads wrap the
//! registry in a mutex.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ErrorCode;
use crate::model::ComponentMemoryUsage;

/// Retained size is reported as this multiple of the shallow
/// estimate. A rough approximation, documented as such.
const RETAINED_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
struct RegisteredComponent {
    display_name: String,
    instances: u32,
    /// Per-instance shallow estimate in bytes; 0 until recorded.
    estimated_size: f64,
}

/// Registry mapping component ids to display names and live
/// instance counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRegistry {
    components: HashMap<String, RegisteredComponent>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one instance of a component.
    ///
    /// Creates the entry on first call; later calls increment the
    /// instance count and refresh the display name.
    pub fn register(&mut self, component_id: &str, display_name: &str) {
        self.components
            .entry(component_id.to_string())
            .and_modify(|component| {
                component.instances += 1;
                component.display_name = display_name.to_string();
            })
            .or_insert_with(|| RegisteredComponent {
                display_name: display_name.to_string(),
                instances: 1,
                estimated_size: 0.0,
            });
    }

    /// Unregister one instance; the entry is removed once the count
    /// reaches zero. Unknown ids are a logged no-op.
    pub fn unregister(&mut self, component_id: &str) {
        match self.components.get_mut(component_id) {
            Some(component) if component.instances > 1 => component.instances -= 1,
            Some(_) => {
                self.components.remove(component_id);
            }
            None => debug!(
                code = %ErrorCode::UnknownComponentId,
                component_id,
                "unregister for unknown component ignored"
            ),
        }
    }

    /// Record a heap-delta estimate for a component, spread across
    /// its current instances. Unknown ids are a logged no-op.
    pub fn record_estimate(&mut self, component_id: &str, estimated_bytes: f64) {
        match self.components.get_mut(component_id) {
            Some(component) => {
                component.estimated_size =
                    (estimated_bytes / f64::from(component.instances)).max(0.0);
            }
            None => debug!(
                code = %ErrorCode::UnknownComponentId,
                component_id,
                "estimate for unknown component ignored"
            ),
        }
    }

    /// Estimated usage for one component, or `None` when it is not
    /// registered.
    #[must_use]
    pub fn usage(&self, component_id: &str) -> Option<ComponentMemoryUsage> {
        self.components
            .get(component_id)
            .map(|component| to_usage(component_id, component))
    }

    /// Usage for every registered component, sorted by component id.
    #[must_use]
    pub fn breakdown(&self) -> Vec<ComponentMemoryUsage> {
        let mut usages: Vec<ComponentMemoryUsage> = self
            .components
            .iter()
            .map(|(id, component)| to_usage(id, component))
            .collect();
        usages.sort_by(|a, b| a.component_id.cmp(&b.component_id));
        usages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

fn to_usage(component_id: &str, component: &RegisteredComponent) -> ComponentMemoryUsage {
    ComponentMemoryUsage {
        component_id: component_id.to_string(),
        display_name: component.display_name.clone(),
        shallow_size: component.estimated_size,
        retained_size: component.estimated_size * RETAINED_FACTOR,
        instance_count: component.instances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn register_twice_then_unregister_leaves_one_instance() {
        let mut registry = ComponentRegistry::new();
        registry.register("a", "Foo");
        registry.register("a", "Foo");
        registry.unregister("a");

        let usage = registry.usage("a").expect("still registered");
        assert_eq!(usage.instance_count, 1);

        registry.unregister("a");
        assert!(registry.usage("a").is_none());

        // A further unregister of a missing entry is a no-op.
        registry.unregister("a");
        assert!(registry.is_empty());
    }

    #[test]
    fn register_refreshes_display_name() {
        let mut registry = ComponentRegistry::new();
        registry.register("a", "Foo");
        registry.register("a", "FooRenamed");

        let usage = registry.usage("a").expect("registered");
        assert_eq!(usage.display_name, "FooRenamed");
        assert_eq!(usage.instance_count, 2);
    }

    #[test]
    fn usage_is_zero_until_an_estimate_is_recorded() {
        let mut registry = ComponentRegistry::new();
        registry.register("a", "Foo");

        let usage = registry.usage("a").expect("registered");
        assert_approx_eq(usage.shallow_size, 0.0);
        assert_approx_eq(usage.retained_size, 0.0);
    }

    #[test]
    fn estimates_are_spread_across_instances() {
        let mut registry = ComponentRegistry::new();
        registry.register("a", "Foo");
        registry.register("a", "Foo");
        registry.record_estimate("a", 300.0);

        let usage = registry.usage("a").expect("registered");
        assert_approx_eq(usage.shallow_size, 150.0);
        assert_approx_eq(usage.retained_size, 225.0);
    }

    #[test]
    fn negative_estimates_clamp_to_zero() {
        let mut registry = ComponentRegistry::new();
        registry.register("a", "Foo");
        registry.record_estimate("a", -64.0);

        let usage = registry.usage("a").expect("registered");
        assert_approx_eq(usage.shallow_size, 0.0);
    }

    #[test]
    fn breakdown_is_sorted_by_component_id() {
        let mut registry = ComponentRegistry::new();
        registry.register("b", "Bar");
        registry.register("a", "Foo");
        registry.register("c", "Baz");

        let ids: Vec<String> = registry
            .breakdown()
            .into_iter()
            .map(|usage| usage.component_id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn estimate_for_unknown_component_is_ignored() {
        let mut registry = ComponentRegistry::new();
        registry.record_estimate("ghost", 100.0);
        assert!(registry.is_empty());
    }
}
