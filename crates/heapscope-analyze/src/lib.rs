#![forbid(unsafe_code)]
//! heapscope-analyze: leak heuristics, component attribution, and
//! snapshot diffing over the `heapscope-core` model.
//!
//! # Overview
//!
//! Every query here is a pure, read-only function of its snapshot
//! argument(s): nothing mutates a snapshot, nothing touches the
//! acquisition layer, and results borrow nodes from the input
//! instead of copying them. Dangling edge targets never fail a
//! query — they resolve to "target not found" and are skipped.
//!
//! The heuristics are deliberately shallow (direct-neighbor cycle
//! checks, name-based detachment) and report leak *candidates*;
//! see the module docs in [`leaks`] for the exact rules.
//!
//! # Conventions
//!
//! - **Errors**: queries cannot fail; degraded inputs produce
//!   empty results (see `heapscope_core::error`).
//! - **Logging**: `tracing` macros, `debug!` for summaries and
//!   `trace!` for skipped records.

pub mod attribution;
pub mod diff;
pub mod index;
pub mod leaks;
pub mod pressure;
pub mod timeline;

pub use attribution::component_memory_usage;
pub use diff::{NodeChange, SnapshotDiff, compare_snapshots};
pub use index::GraphIndex;
pub use leaks::{LeakConfig, find_memory_leaks, find_memory_leaks_with};
pub use pressure::{DEFAULT_PRESSURE_THRESHOLD, memory_pressure_objects, memory_usage_summary};
pub use timeline::{MemoryTimePoint, component_memory_over_time};
