#![no_main]

use heapscope_core::parse::parse;
use libfuzzer_sys::fuzz_target;

// The parser is total: any JSON document must produce a snapshot
// whose object count matches its node list, without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };

    let snapshot = parse(Some(&value));
    assert_eq!(snapshot.object_count, snapshot.nodes.len());
});
