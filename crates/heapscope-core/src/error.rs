use std::fmt;

/// Machine-readable codes for the degradation paths.
///
/// No condition in this crate is fatal: every failure mode degrades
/// to an empty or partial result plus a log line carrying one of
/// these codes, so embedders can alert on specific codes without
/// string-matching log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CaptureUnavailable,
    MalformedGraphData,
    SchemaFieldMissing,
    DanglingEdgeTarget,
    UnattributableComponent,
    UnknownComponentId,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CaptureUnavailable => "E1001",
            Self::MalformedGraphData => "E1002",
            Self::SchemaFieldMissing => "E1003",
            Self::DanglingEdgeTarget => "E2001",
            Self::UnattributableComponent => "E2002",
            Self::UnknownComponentId => "E3001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CaptureUnavailable => "No capture payload available",
            Self::MalformedGraphData => "Malformed or partial graph data",
            Self::SchemaFieldMissing => "Record schema missing a required field",
            Self::DanglingEdgeTarget => "Edge references a node id not in the snapshot",
            Self::UnattributableComponent => "No component name could be extracted",
            Self::UnknownComponentId => "Component id is not registered",
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::CaptureUnavailable => {
                Some("Check that the acquisition layer can reach a heap profiler.")
            }
            Self::MalformedGraphData => {
                Some("The capture source produced an unreadable payload; the snapshot is empty.")
            }
            Self::SchemaFieldMissing => {
                Some("The capture source's node/edge field schema lacks a required field.")
            }
            Self::DanglingEdgeTarget | Self::UnattributableComponent => None,
            Self::UnknownComponentId => {
                Some("Register the component before recording estimates or unregistering.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ErrorCode;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::CaptureUnavailable,
            ErrorCode::MalformedGraphData,
            ErrorCode::SchemaFieldMissing,
            ErrorCode::DanglingEdgeTarget,
            ErrorCode::UnattributableComponent,
            ErrorCode::UnknownComponentId,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::DanglingEdgeTarget.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }
}
