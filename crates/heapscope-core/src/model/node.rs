use serde::{Deserialize, Serialize};

/// The kind of object a heap node represents.
///
/// Wire names follow the V8 heap-snapshot spelling, including the
/// space-separated string variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Object,
    Native,
    Code,
    Closure,
    Synthetic,
    #[serde(rename = "concatenated string")]
    ConcatenatedString,
    #[serde(rename = "sliced string")]
    SlicedString,
    Array,
    Regexp,
}

impl NodeType {
    /// Map a numeric type code from the indexed snapshot format.
    ///
    /// Codes 0–8 are defined; anything else falls back to [`Self::Object`].
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Native,
            2 => Self::Code,
            3 => Self::Closure,
            4 => Self::Synthetic,
            5 => Self::ConcatenatedString,
            6 => Self::SlicedString,
            7 => Self::Array,
            8 => Self::Regexp,
            _ => Self::Object,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Native => "native",
            Self::Code => "code",
            Self::Closure => "closure",
            Self::Synthetic => "synthetic",
            Self::ConcatenatedString => "concatenated string",
            Self::SlicedString => "sliced string",
            Self::Array => "array",
            Self::Regexp => "regexp",
        }
    }
}

impl Default for NodeType {
    fn default() -> Self {
        Self::Object
    }
}

/// The kind of reference an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Context,
    Element,
    Property,
    Internal,
    Hidden,
    Shortcut,
    Weak,
}

impl EdgeType {
    /// Map a numeric type code from the indexed snapshot format.
    ///
    /// Codes 0–6 are defined; anything else falls back to
    /// [`Self::Property`].
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Context,
            1 => Self::Element,
            3 => Self::Internal,
            4 => Self::Hidden,
            5 => Self::Shortcut,
            6 => Self::Weak,
            _ => Self::Property,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Element => "element",
            Self::Property => "property",
            Self::Internal => "internal",
            Self::Hidden => "hidden",
            Self::Shortcut => "shortcut",
            Self::Weak => "weak",
        }
    }
}

impl Default for EdgeType {
    fn default() -> Self {
        Self::Property
    }
}

/// A directed reference from one heap node to another.
///
/// Edges are owned by their source node and carry no ownership of the
/// target; `to_node` may reference an id that does not exist in the
/// snapshot (dangling), which every consumer tolerates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapEdge {
    /// Property or slot label.
    pub name: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Target node id.
    pub to_node: u64,
}

/// One object in a parsed heap snapshot.
///
/// `id` is unique only within a single snapshot. Sizes are estimates
/// carried over from the capture source; `retained_size` is not
/// validated against `self_size` because source data may violate the
/// expected ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapNode {
    pub id: u64,
    /// Constructor or type label.
    pub name: String,
    pub self_size: u64,
    pub retained_size: u64,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub edges: Vec<HeapEdge>,
}

impl HeapNode {
    /// First outgoing edge with the given label, if any.
    #[must_use]
    pub fn find_edge(&self, name: &str) -> Option<&HeapEdge> {
        self.edges.iter().find(|edge| edge.name == name)
    }
}
