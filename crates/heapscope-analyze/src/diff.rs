//! Snapshot diffing.
//!
//! # Node identity across snapshots
//!
//! Raw node ids are not stable between captures, so identity is the
//! composite `name:id` key. That is an acknowledged approximation:
//! an object whose id was reused by a same-named object diffs as
//! unchanged, and an id shift shows up as one removal plus one
//! addition.
//!
//! The diff is key-based set algebra over hash maps — near-linear in
//! the node counts, never pairwise.

use std::collections::HashMap;

use tracing::debug;

use heapscope_core::model::{HeapNode, HeapSnapshot};

/// A node present in both snapshots whose retained size moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeChange<'a> {
    pub before: &'a HeapNode,
    pub after: &'a HeapNode,
    /// `after.retained_size - before.retained_size`, saturating at
    /// the `i64` bounds.
    pub growth: i64,
}

/// Added/removed/changed nodes between two snapshots.
///
/// Borrows nodes from both input snapshots; nothing is copied.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDiff<'a> {
    /// Nodes whose key exists only in the `after` snapshot.
    pub added: Vec<&'a HeapNode>,
    /// Nodes whose key exists only in the `before` snapshot.
    pub removed: Vec<&'a HeapNode>,
    /// Key matches with differing retained size.
    pub changed: Vec<NodeChange<'a>>,
}

impl SnapshotDiff<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

fn composite_key(node: &HeapNode) -> String {
    format!("{}:{}", node.name, node.id)
}

fn signed_growth(after: u64, before: u64) -> i64 {
    if after >= before {
        i64::try_from(after - before).unwrap_or(i64::MAX)
    } else {
        i64::try_from(before - after).map_or(i64::MIN, |delta| -delta)
    }
}

/// Diff two snapshots by composite node key.
#[must_use]
pub fn compare_snapshots<'a>(
    before: &'a HeapSnapshot,
    after: &'a HeapSnapshot,
) -> SnapshotDiff<'a> {
    let before_map: HashMap<String, &HeapNode> = before
        .nodes
        .iter()
        .map(|node| (composite_key(node), node))
        .collect();
    let after_map: HashMap<String, &HeapNode> = after
        .nodes
        .iter()
        .map(|node| (composite_key(node), node))
        .collect();

    let mut diff = SnapshotDiff::default();

    for node in &after.nodes {
        match before_map.get(&composite_key(node)) {
            None => diff.added.push(node),
            Some(&before_node) if before_node.retained_size != node.retained_size => {
                diff.changed.push(NodeChange {
                    before: before_node,
                    after: node,
                    growth: signed_growth(node.retained_size, before_node.retained_size),
                });
            }
            Some(_) => {}
        }
    }

    for node in &before.nodes {
        if !after_map.contains_key(&composite_key(node)) {
            diff.removed.push(node);
        }
    }

    debug!(
        heap_growth = signed_growth(
            after.metrics.used_heap_size,
            before.metrics.used_heap_size
        ),
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "compared snapshots"
    );

    diff
}
