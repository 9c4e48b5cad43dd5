//! Best-effort recursive size estimation for JSON-shaped values.
//!
//! Estimates use fixed per-field and per-element overhead constants
//! and are approximations, never authoritative sizes. Results are
//! memoized in a weak-keyed cache: an entry holds only a
//! [`Weak`] reference to the value it describes, so the cache never
//! extends a value's lifetime, and entries for dropped values are
//! pruned opportunistically.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};

use serde_json::Value;

/// Bytes charged for null-free scalar values (booleans, numbers,
/// strings are all charged as one machine word like the capture
/// sources do).
const PRIMITIVE_SIZE: u64 = 8;
const ARRAY_OVERHEAD: u64 = 32;
const OBJECT_OVERHEAD: u64 = 40;
/// UTF-16 accounting for object keys.
const KEY_BYTES_PER_CHAR: u64 = 2;

#[derive(Debug, Clone)]
struct CacheEntry {
    key: Weak<Value>,
    size: u64,
}

/// Memoizing size estimator for [`Arc<Value>`] trees.
#[derive(Debug, Clone, Default)]
pub struct SizeEstimator {
    cache: HashMap<usize, CacheEntry>,
}

impl SizeEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the size of `value` in bytes, memoized by identity.
    ///
    /// Cache entries key on the allocation address; an address can be
    /// reused after the old value drops, so a hit also requires the
    /// stored weak reference to upgrade to this same allocation.
    pub fn estimate(&mut self, value: &Arc<Value>) -> u64 {
        let address = Arc::as_ptr(value) as usize;

        if let Some(entry) = self.cache.get(&address) {
            if let Some(live) = entry.key.upgrade() {
                if Arc::ptr_eq(&live, value) {
                    return entry.size;
                }
            }
        }

        let mut seen = HashSet::new();
        let size = estimate_value(value, &mut seen);

        self.prune();
        self.cache.insert(
            address,
            CacheEntry {
                key: Arc::downgrade(value),
                size,
            },
        );
        size
    }

    /// Number of cache entries whose value is still alive.
    #[must_use]
    pub fn live_cache_entries(&self) -> usize {
        self.cache
            .values()
            .filter(|entry| entry.key.strong_count() > 0)
            .count()
    }

    fn prune(&mut self) {
        self.cache
            .retain(|_, entry| entry.key.strong_count() > 0);
    }
}

fn estimate_value(value: &Value, seen: &mut HashSet<*const Value>) -> u64 {
    match value {
        Value::Null => 0,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => PRIMITIVE_SIZE,
        Value::Array(items) => {
            // Revisited addresses contribute nothing; this caps the
            // traversal if a caller ever feeds aliased subtrees.
            if !seen.insert(std::ptr::from_ref(value)) {
                return 0;
            }
            ARRAY_OVERHEAD
                + items
                    .iter()
                    .map(|item| estimate_value(item, seen))
                    .sum::<u64>()
        }
        Value::Object(map) => {
            if !seen.insert(std::ptr::from_ref(value)) {
                return 0;
            }
            OBJECT_OVERHEAD
                + map
                    .iter()
                    .map(|(key, item)| {
                        key.len() as u64 * KEY_BYTES_PER_CHAR + estimate_value(item, seen)
                    })
                    .sum::<u64>()
        }
    }
}
