use serde::{Deserialize, Serialize};

/// Estimated memory usage attributed to one registered component.
///
/// Sizes are best-effort estimates, never authoritative: the shallow
/// size comes from whatever delta the embedder recorded, and the
/// retained size is a fixed multiple of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMemoryUsage {
    pub component_id: String,
    pub display_name: String,
    /// Estimated shallow size in bytes.
    pub shallow_size: f64,
    /// Estimated retained size in bytes.
    pub retained_size: f64,
    /// Number of live instances of this component.
    pub instance_count: u32,
}
