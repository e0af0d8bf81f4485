//! Model metadata input.
//!
//! The engine reads models through the [`ModelSource`] trait. The built-in
//! source is the JSON/YAML [`Manifest`].

mod manifest;

pub use manifest::{LoadError, Manifest, ManifestFormat, parse_manifest};

use serde::{Deserialize, Serialize};

/// Supplies model descriptors grouped by app scope.
pub trait ModelSource {
    /// App entries in enumeration order, each with its models. A label may
    /// occur more than once.
    fn apps(&self) -> Vec<(&str, &[ModelDescriptor])>;

    /// App labels in enumeration order, without repeats.
    fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for (label, _) in self.apps() {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// Models of every entry labelled `app`, in enumeration order, or `None`
    /// if the label is unknown.
    fn models(&self, app: &str) -> Option<Vec<&ModelDescriptor>> {
        let entries: Vec<&[ModelDescriptor]> = self
            .apps()
            .into_iter()
            .filter(|(label, _)| *label == app)
            .map(|(_, models)| models)
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(entries.into_iter().flatten().collect())
    }
}

/// One app scope and its models.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppDescriptor {
    pub label: String,
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// One model class.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelDescriptor {
    /// Class name.
    pub name: String,
    /// Persistence table name.
    pub db_table: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// Raw metadata of one field, as exposed by the model runtime.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Internal type name, e.g. `CharField` or `ManyToManyRel`.
    pub kind: String,
    #[serde(default)]
    pub null: bool,
    #[serde(default = "default_blank")]
    pub blank: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub db_index: bool,
    /// Database column; defaults to the field name.
    pub column: Option<String>,
    pub max_length: Option<u32>,
    #[serde(default)]
    pub choices: Vec<String>,

    // Date/time generation flags.
    /// Set on every save.
    #[serde(default)]
    pub auto_now: bool,
    /// Set on first save.
    #[serde(default)]
    pub auto_now_add: bool,

    // Relation shape.
    #[serde(default)]
    pub is_relation: bool,
    #[serde(default)]
    pub one_to_one: bool,
    #[serde(default)]
    pub many_to_one: bool,
    #[serde(default)]
    pub one_to_many: bool,
    #[serde(default)]
    pub many_to_many: bool,
    /// Declared on the related side rather than the owning side.
    #[serde(default)]
    pub is_reverse: bool,

    // Relation naming.
    pub related_model: Option<String>,
    /// Local attribute holding the key. Absent for generic foreign keys.
    pub attname: Option<String>,
    pub accessor_name: Option<String>,
    /// Name of the owning field on the related model.
    pub peer_field: Option<String>,
    pub m2m_db_table: Option<String>,
    pub m2m_column_name: Option<String>,
    pub m2m_reverse_name: Option<String>,
    pub on_delete: Option<String>,
}

fn default_blank() -> bool {
    true
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            null: false,
            blank: true,
            primary_key: false,
            unique: false,
            db_index: false,
            column: None,
            max_length: None,
            choices: Vec::new(),
            auto_now: false,
            auto_now_add: false,
            is_relation: false,
            one_to_one: false,
            many_to_one: false,
            one_to_many: false,
            many_to_many: false,
            is_reverse: false,
            related_model: None,
            attname: None,
            accessor_name: None,
            peer_field: None,
            m2m_db_table: None,
            m2m_column_name: None,
            m2m_reverse_name: None,
            on_delete: None,
        }
    }
}

impl FieldDescriptor {
    /// A plain field of the given kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Column name, falling back to the field name.
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// Number of relation-shape predicates that hold.
    pub fn shape_count(&self) -> usize {
        [
            self.one_to_one,
            self.many_to_one,
            self.one_to_many,
            self.many_to_many,
        ]
        .into_iter()
        .filter(|b| *b)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_defaults_to_true() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name": "title", "kind": "CharField"}"#).unwrap();
        assert!(field.blank);
        assert!(!field.null);
        assert_eq!(field.column_name(), "title");
    }

    #[test]
    fn name_and_kind_are_required() {
        let err = serde_json::from_str::<FieldDescriptor>(r#"{"kind": "TextField"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"), "{err}");
        let err = serde_json::from_str::<FieldDescriptor>(r#"{"name": "body"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `kind`"), "{err}");
    }

    #[test]
    fn shape_count_counts_predicates() {
        let mut field = FieldDescriptor::new("tags", "ManyToManyField");
        assert_eq!(field.shape_count(), 0);
        field.many_to_many = true;
        field.one_to_many = true;
        assert_eq!(field.shape_count(), 2);
    }
}
