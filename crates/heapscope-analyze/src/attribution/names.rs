//! Component name extraction from heap node labels.
//!
//! Capture sources label component-framework objects in a handful of
//! conventions — wrapper forms like `Memo(Sidebar)`, bracketed fiber
//! labels like `Fiber[Sidebar]`, plain `class Sidebar` / `function
//! Sidebar` declarations, and `FooComponent`-style suffixes. The
//! first matching pattern wins; a `React`-prefixed name that matches
//! nothing falls back to its last path segment.

use std::sync::LazyLock;

use regex::Regex;

/// Extraction patterns in priority order; each captures the
/// component name in group 1.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"ReactComponent\(([^)]+)\)",
        r"React\.Component\[([^\]]+)\]",
        r"ReactElement\(([^)]+)\)",
        r"React\.Element\[([^\]]+)\]",
        r"Fiber\[([^\]]+)\]",
        r"ForwardRef\(([^)]+)\)",
        r"Memo\(([^)]+)\)",
        r"LazyComponent\[([^\]]+)\]",
        r"([A-Z][a-zA-Z0-9]+)(?:Component|Element|Container)",
        r"class ([A-Z][a-zA-Z0-9]+)",
        r"function ([A-Z][a-zA-Z0-9]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("hard-coded pattern compiles"))
    .collect()
});

/// Whether a node label looks like a component-framework object.
#[must_use]
pub fn is_component_like(name: &str) -> bool {
    name.contains("React")
        && (name.contains("Component") || name.contains("Element") || name.contains("Fiber"))
}

/// Best-guess component name for a node label, if any.
#[must_use]
pub fn extract_component_name(node_name: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(node_name) {
            if let Some(matched) = captures.get(1) {
                return Some(matched.as_str().to_string());
            }
        }
    }

    // Nothing matched, but the label is framework-flavored: strip the
    // namespace prefix and keep the last delimited segment.
    if node_name.contains("React") {
        let stripped = node_name.replace("React.", "").replace("react.", "");
        return stripped
            .split(['.', ':', '<', '>'])
            .next_back()
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string);
    }

    None
}
