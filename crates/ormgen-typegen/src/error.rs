//! Errors raised while classifying, normalizing and rendering a model.

use crate::taxonomy::FieldKind;

/// Error attributed to a single field of a single model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A field's declared kind has no taxonomy entry.
    #[error("field `{field}` has unrecognized kind `{kind}`")]
    UnrecognizedFieldKind { field: String, kind: String },

    /// The classifier was asked for a value kind outside the plain-kind set.
    #[error("field `{field}` of kind {kind:?} has no value kind")]
    UnmappedValueKind { field: String, kind: FieldKind },

    /// A relational field matched zero or several relation shapes.
    #[error("relation `{field}` matches {matched} relation shapes, expected exactly one")]
    AmbiguousFieldShape { field: String, matched: usize },

    /// A template slot could not be filled from the normalized schema.
    #[error("cannot resolve `{{{placeholder}}}` for field `{field}` in template `{template}`")]
    UnsupportedDialectPlaceholder {
        field: String,
        placeholder: String,
        template: String,
    },
}

impl SchemaError {
    /// Name of the field the error is attributed to.
    pub fn field(&self) -> &str {
        match self {
            SchemaError::UnrecognizedFieldKind { field, .. }
            | SchemaError::UnmappedValueKind { field, .. }
            | SchemaError::AmbiguousFieldShape { field, .. }
            | SchemaError::UnsupportedDialectPlaceholder { field, .. } => field,
        }
    }
}
