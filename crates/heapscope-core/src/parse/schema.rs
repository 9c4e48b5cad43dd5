//! Schema-driven field offsets for the indexed snapshot format.
//!
//! The flat `nodes`/`edges` numeric sequences are laid out in
//! fixed-width records whose field order is declared in the payload's
//! `meta` block and may vary between capture sources. Offsets are
//! resolved into a decode table once per parse instead of hard-coding
//! positions.

use std::collections::HashMap;

use thiserror::Error;

/// Field order assumed when the payload carries no node schema.
pub const DEFAULT_NODE_FIELDS: [&str; 5] = ["id", "name", "size", "retained_size", "type"];

/// Field order assumed when the payload carries no edge schema.
pub const DEFAULT_EDGE_FIELDS: [&str; 4] = ["from_node", "to_node", "name", "type"];

/// A schema that cannot describe usable records.
///
/// This is the one condition under which an indexed-graph parse
/// degrades wholesale to the empty snapshot: without the required
/// fields there is no way to identify records at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("record schema declares no fields")]
    Empty,
    #[error("record schema is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Field-name → offset decode table for one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    width: usize,
    offsets: HashMap<String, usize>,
}

impl FieldSchema {
    /// Build a decode table from a declared field order.
    ///
    /// # Errors
    ///
    /// Fails when `fields` is empty or lacks one of `required`.
    /// Optional fields may be absent; [`Self::read`] then yields
    /// `None` and callers substitute per-field defaults.
    pub fn resolve(fields: &[String], required: &[&'static str]) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let offsets: HashMap<String, usize> = fields
            .iter()
            .enumerate()
            .map(|(offset, field)| (field.clone(), offset))
            .collect();

        for &field in required {
            if !offsets.contains_key(field) {
                return Err(SchemaError::MissingField(field));
            }
        }

        Ok(Self {
            width: fields.len(),
            offsets,
        })
    }

    /// Number of values per record.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Offset of `field` within a record, if the schema declares it.
    #[must_use]
    pub fn offset(&self, field: &str) -> Option<usize> {
        self.offsets.get(field).copied()
    }

    /// Read `field` out of one record, or `None` when the schema
    /// does not declare it.
    #[must_use]
    pub fn read(&self, record: &[u64], field: &str) -> Option<u64> {
        self.offset(field).and_then(|i| record.get(i).copied())
    }
}
