//! Tagged decode of raw capture payloads.
//!
//! Shape dispatch happens exactly once, at this boundary: a payload
//! with a `nodes` array is an indexed graph, a payload with a numeric
//! `usedJSHeapSize` is a flat metrics reading, anything else
//! (including an absent payload) is empty. Downstream code never
//! inspects `serde_json::Value` again.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ErrorCode;

/// The indexed-graph capture payload.
///
/// `nodes` and `edges` are flat numeric sequences in fixed-width
/// records; the field order is declared in `snapshot.meta` and
/// resolved through [`crate::parse::FieldSchema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IndexedGraphPayload {
    #[serde(default)]
    pub snapshot: SnapshotHeader,
    #[serde(default)]
    pub nodes: Vec<u64>,
    #[serde(default)]
    pub edges: Vec<u64>,
    #[serde(default)]
    pub strings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotHeader {
    #[serde(default)]
    pub meta: SnapshotMeta,
    #[serde(default)]
    pub total_heap_size: u64,
    #[serde(default)]
    pub used_heap_size: u64,
    #[serde(default)]
    pub max_heap_size: u64,
}

/// Declared record layouts; `None` means "use the default order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotMeta {
    #[serde(default)]
    pub node_fields: Option<Vec<String>>,
    #[serde(default)]
    pub edge_fields: Option<Vec<String>>,
}

/// The flat metrics capture payload (no graph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FlatMetricsPayload {
    #[serde(rename = "totalJSHeapSize", default)]
    pub total_heap_size: u64,
    #[serde(rename = "usedJSHeapSize", default)]
    pub used_heap_size: u64,
    #[serde(rename = "jsHeapSizeLimit", default)]
    pub heap_size_limit: u64,
    /// Capture time; `None` falls back to the parse-time clock.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One raw capture payload, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    IndexedGraph(IndexedGraphPayload),
    FlatMetrics(FlatMetricsPayload),
    Empty,
}

impl RawPayload {
    /// Classify and decode a raw payload.
    ///
    /// Never fails: a payload that matches a shape but does not
    /// decode (wrong value types, negative counts) degrades to
    /// [`Self::Empty`] with a logged [`ErrorCode`].
    #[must_use]
    pub fn classify(raw: Option<&Value>) -> Self {
        let Some(value) = raw else {
            warn!(
                code = %ErrorCode::CaptureUnavailable,
                "no capture payload; producing empty snapshot"
            );
            return Self::Empty;
        };

        if value.get("nodes").is_some_and(Value::is_array) {
            return match IndexedGraphPayload::deserialize(value) {
                Ok(payload) => Self::IndexedGraph(payload),
                Err(err) => {
                    warn!(
                        code = %ErrorCode::MalformedGraphData,
                        error = %err,
                        "indexed graph payload did not decode; producing empty snapshot"
                    );
                    Self::Empty
                }
            };
        }

        if value.get("usedJSHeapSize").is_some_and(Value::is_number) {
            return match FlatMetricsPayload::deserialize(value) {
                Ok(payload) => Self::FlatMetrics(payload),
                Err(err) => {
                    warn!(
                        code = %ErrorCode::MalformedGraphData,
                        error = %err,
                        "flat metrics payload did not decode; producing empty snapshot"
                    );
                    Self::Empty
                }
            };
        }

        debug!(
            code = %ErrorCode::MalformedGraphData,
            "unrecognized capture payload shape; producing empty snapshot"
        );
        Self::Empty
    }
}
