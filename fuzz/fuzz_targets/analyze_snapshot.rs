#![no_main]

use heapscope_analyze::{compare_snapshots, component_memory_usage, find_memory_leaks};
use heapscope_core::parse::parse;
use libfuzzer_sys::fuzz_target;

// Every analyzer query must tolerate whatever the parser produces
// from hostile input, dangling edges included.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };

    let snapshot = parse(Some(&value));
    let leaks = find_memory_leaks(&snapshot);
    assert!(leaks.len() <= snapshot.nodes.len());
    let _ = component_memory_usage(&snapshot);
    // Hostile input may repeat `name:id` keys, so the self-diff can
    // legitimately report changes; only totality is asserted here.
    let diff = compare_snapshots(&snapshot, &snapshot);
    assert!(diff.added.is_empty() && diff.removed.is_empty());
});
