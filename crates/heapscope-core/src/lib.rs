#![forbid(unsafe_code)]
//! heapscope-core: heap graph model, snapshot parser, and component
//! attribution registry.
//!
//! # Overview
//!
//! The acquisition layer (a devtools protocol client, an
//! instrumentation hook, a simulated fallback — not this crate's
//! concern) produces one raw JSON payload per capture. [`parse`]
//! normalizes it into an immutable [`HeapSnapshot`]; the
//! [`MemoryTracker`] keeps a bounded history of them and owns the
//! [`ComponentRegistry`] that maps host component ids to instance
//! counts and size estimates.
//!
//! # Conventions
//!
//! - **Errors**: parsing and tracking never fail; degraded results
//!   carry an [`ErrorCode`] in their log line (see [`error`]).
//! - **Logging**: `tracing` macros (`warn!` for degradation,
//!   `debug!` for summaries, `trace!` for skipped records).

pub mod clock;
pub mod config;
pub mod error;
pub mod estimate;
pub mod id;
pub mod model;
pub mod parse;
pub mod registry;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::ErrorCode;
pub use estimate::SizeEstimator;
pub use model::{
    ComponentMemoryUsage, EdgeType, HeapEdge, HeapNode, HeapSnapshot, MemoryMetrics, NodeType,
};
pub use parse::parse;
pub use registry::ComponentRegistry;
pub use tracker::MemoryTracker;
