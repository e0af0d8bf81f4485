//! Field classifier: derives kind, value kind, generation strategy and
//! validation rules from one field descriptor.

use crate::error::SchemaError;
use crate::input::FieldDescriptor;
use crate::taxonomy::{FieldKind, ValueKind};
use serde::Serialize;

/// How a field's value is produced automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GenerationStrategy {
    #[default]
    None,
    AutoIncrement,
    Uuid,
    SetOnCreate,
    SetOnUpdate,
}

/// A validation constraint on a field's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationRule {
    Email,
    Url,
    Ip,
    NumericRange { min: i64 },
    Choice { values: Vec<String> },
}

/// Map the descriptor's internal type name to a [`FieldKind`].
pub fn classify_kind(field: &FieldDescriptor) -> Result<FieldKind, SchemaError> {
    classify_kind_lenient(field).ok_or_else(|| SchemaError::UnrecognizedFieldKind {
        field: field.name.clone(),
        kind: field.kind.clone(),
    })
}

/// Like [`classify_kind`], but unknown kinds yield `None`.
pub fn classify_kind_lenient(field: &FieldDescriptor) -> Option<FieldKind> {
    FieldKind::from_name(&field.kind)
}

/// Generation strategy of a field.
///
/// For `DateTimeField` the "set on every save" flag wins over "set on first
/// save" when both are present.
pub fn classify_generation(field: &FieldDescriptor) -> GenerationStrategy {
    match FieldKind::from_name(&field.kind) {
        Some(kind) if kind.is_auto() => GenerationStrategy::AutoIncrement,
        Some(FieldKind::UuidField) => GenerationStrategy::Uuid,
        Some(FieldKind::DateTimeField) => {
            if field.auto_now {
                GenerationStrategy::SetOnUpdate
            } else if field.auto_now_add {
                GenerationStrategy::SetOnCreate
            } else {
                GenerationStrategy::None
            }
        }
        _ => GenerationStrategy::None,
    }
}

/// Validation rules of a field. Empty means none.
pub fn classify_validation(field: &FieldDescriptor) -> Vec<ValidationRule> {
    let mut rules = Vec::new();
    match FieldKind::from_name(&field.kind) {
        Some(FieldKind::EmailField) => rules.push(ValidationRule::Email),
        Some(FieldKind::UrlField) => rules.push(ValidationRule::Url),
        Some(FieldKind::GenericIpAddressField | FieldKind::IpAddressField) => {
            rules.push(ValidationRule::Ip)
        }
        Some(kind) if kind.is_positive() => rules.push(ValidationRule::NumericRange { min: 0 }),
        _ => {}
    }
    if !field.choices.is_empty() {
        rules.push(ValidationRule::Choice {
            values: field.choices.clone(),
        });
    }
    rules
}

/// Language-neutral value type of a plain field.
///
/// Relation kinds and unknown kinds are a caller bug and fail with
/// [`SchemaError::UnmappedValueKind`] / [`SchemaError::UnrecognizedFieldKind`].
pub fn classify_value_kind(field: &FieldDescriptor) -> Result<ValueKind, SchemaError> {
    let kind = classify_kind(field)?;
    kind.value_kind()
        .ok_or_else(|| SchemaError::UnmappedValueKind {
            field: field.name.clone(),
            kind,
        })
}
