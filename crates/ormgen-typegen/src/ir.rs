//! Dialect-neutral intermediate representation of one model.
//!
//! A [`NormalizedSchema`] is built by [`normalize`](crate::normalize::normalize)
//! and consumed by every renderer. Names are kept in their snake-case source
//! form; renderers apply their own casing.

use crate::classify::{GenerationStrategy, ValidationRule};
use crate::taxonomy::{FieldKind, ValueKind};
use serde::Serialize;

/// Normalized form of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSchema {
    pub app: String,
    pub class_name: String,
    pub table: String,
    pub fields: Vec<PlainField>,
    pub one_to_one: Vec<OneToOne>,
    pub many_to_one: Vec<ManyToOne>,
    pub one_to_many: Vec<OneToMany>,
    pub many_to_many: Vec<ManyToMany>,
    /// Fields that could not be represented.
    pub skipped: Vec<SkippedField>,
}

impl NormalizedSchema {
    pub fn new(
        app: impl Into<String>,
        class_name: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            class_name: class_name.into(),
            table: table.into(),
            fields: Vec::new(),
            one_to_one: Vec::new(),
            many_to_one: Vec::new(),
            one_to_many: Vec::new(),
            many_to_many: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Total number of relation entries.
    pub fn relation_count(&self) -> usize {
        self.one_to_one.len()
            + self.many_to_one.len()
            + self.one_to_many.len()
            + self.many_to_many.len()
    }
}

/// A non-relational field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainField {
    pub name: String,
    pub column: String,
    pub nullable: bool,
    pub kind: FieldKind,
    pub value_kind: ValueKind,
    pub generation: GenerationStrategy,
    pub validation: Vec<ValidationRule>,
    pub max_length: Option<u32>,
    pub primary_key: bool,
    pub unique: bool,
    pub indexed: bool,
    /// Blank values are rejected.
    pub required: bool,
}

/// One-to-one relation, forward or reverse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneToOne {
    pub name: String,
    pub related_model: Option<String>,
    pub nullable: bool,
    /// Local join column; forward only.
    pub join_column: Option<String>,
    /// Owning field on the related model; reverse only.
    pub peer_field: Option<String>,
    pub reverse: bool,
    pub on_delete: Option<String>,
}

/// Many-to-one relation. Always forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManyToOne {
    pub name: String,
    pub related_model: Option<String>,
    pub join_column: String,
    pub nullable: bool,
    pub on_delete: Option<String>,
}

/// One-to-many relation. Always reverse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneToMany {
    pub name: String,
    pub related_model: Option<String>,
    pub peer_field: Option<String>,
}

/// Many-to-many relation, forward or reverse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManyToMany {
    pub name: String,
    pub related_model: Option<String>,
    pub join_table: Option<String>,
    pub join_column: Option<String>,
    pub peer_join_column: Option<String>,
    pub peer_field: Option<String>,
    pub reverse: bool,
}

/// A field left out of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedField {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Kind has no taxonomy entry.
    UnrecognizedKind(String),
    /// Many-to-one without a local attribute (generic foreign key).
    NoLocalAttribute,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnrecognizedKind(kind) => write!(f, "unrecognized kind `{kind}`"),
            SkipReason::NoLocalAttribute => f.write_str("no local attribute"),
        }
    }
}
