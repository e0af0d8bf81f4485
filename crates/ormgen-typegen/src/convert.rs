//! Conversion driver: normalize every requested model once and render it
//! with each target dialect.

use crate::error::SchemaError;
use crate::input::ModelSource;
use crate::normalize::normalize;
use crate::registry::{DialectOptions, renderer};
use crate::taxonomy::Dialect;
use crate::traits::Renderer;
use std::collections::BTreeMap;
use std::fmt;

/// A model that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    pub app: String,
    pub model: String,
    /// Dialect whose renderer failed; `None` when normalization failed.
    pub dialect: Option<Dialect>,
    pub error: SchemaError,
}

impl fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dialect {
            Some(dialect) => write!(f, "{}.{} ({dialect}): {}", self.app, self.model, self.error),
            None => write!(f, "{}.{}: {}", self.app, self.model, self.error),
        }
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    outputs: BTreeMap<Dialect, String>,
    failures: Vec<ModelFailure>,
}

impl Conversion {
    /// Concatenated declarations for `dialect`, if it was a target.
    pub fn output(&self, dialect: Dialect) -> Option<&str> {
        self.outputs.get(&dialect).map(String::as_str)
    }

    /// Every target with its text, in dialect order.
    pub fn outputs(&self) -> impl Iterator<Item = (Dialect, &str)> {
        self.outputs.iter().map(|(d, s)| (*d, s.as_str()))
    }

    pub fn failures(&self) -> &[ModelFailure] {
        &self.failures
    }

    /// No model failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert the models of every app in `scopes` to each dialect in `targets`.
///
/// Apps and models keep the source's enumeration order. A model that fails
/// to normalize or render is reported in [`Conversion::failures`] and the
/// run moves on to the next model.
pub fn convert<S, A>(
    source: &S,
    scopes: &[A],
    targets: &[Dialect],
    options: &DialectOptions,
) -> Conversion
where
    S: ModelSource + ?Sized,
    A: AsRef<str>,
{
    let mut conversion = Conversion::default();

    let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();
    for &dialect in targets {
        if conversion.outputs.contains_key(&dialect) {
            continue;
        }
        match renderer(dialect, options) {
            Some(r) => {
                conversion.outputs.insert(dialect, String::new());
                renderers.push(r);
            }
            None => tracing::warn!(%dialect, "no renderer compiled in for dialect"),
        }
    }

    let known = source.labels();
    for scope in scopes {
        let scope = scope.as_ref();
        if !known.contains(&scope) {
            tracing::warn!(app = %scope, "unknown app scope");
        }
    }

    for (app, models) in source.apps() {
        if !scopes.iter().any(|s| s.as_ref() == app) {
            continue;
        }
        for model in models {
            let schema = match normalize(app, model) {
                Ok(schema) => schema,
                Err(error) => {
                    conversion.failures.push(ModelFailure {
                        app: app.to_string(),
                        model: model.name.clone(),
                        dialect: None,
                        error,
                    });
                    continue;
                }
            };
            tracing::debug!(
                app,
                model = %schema.class_name,
                fields = schema.fields.len(),
                relations = schema.relation_count(),
                "normalized model"
            );

            for r in &renderers {
                match r.render(&schema) {
                    Ok(text) => {
                        if let Some(out) = conversion.outputs.get_mut(&r.dialect()) {
                            out.push_str(&text);
                        }
                    }
                    Err(error) => conversion.failures.push(ModelFailure {
                        app: app.to_string(),
                        model: model.name.clone(),
                        dialect: Some(r.dialect()),
                        error,
                    }),
                }
            }
        }
    }

    conversion
}

#[cfg(all(test, feature = "backend-gorm", feature = "backend-kotlin"))]
mod tests {
    use super::*;
    use crate::input::{ManifestFormat, parse_manifest};

    const MANIFEST: &str = r#"
apps:
  - label: blog
    models:
      - name: Post
        db_table: blog_post
        fields:
          - { name: id, kind: AutoField, primary_key: true }
      - name: Broken
        db_table: blog_broken
        fields:
          - { name: id, kind: AutoField, primary_key: true }
          - name: owner
            kind: ForeignKey
            is_relation: true
            many_to_one: true
            one_to_one: true
            related_model: User
            attname: owner_id
      - name: Tag
        db_table: blog_tag
        fields:
          - { name: id, kind: AutoField, primary_key: true }
  - label: shop
    models:
      - name: Order
        db_table: shop_order
        fields:
          - { name: id, kind: AutoField, primary_key: true }
"#;

    fn manifest() -> crate::input::Manifest {
        parse_manifest(MANIFEST, ManifestFormat::Yaml).unwrap()
    }

    #[test]
    fn failing_model_does_not_stop_the_run() {
        let conversion = convert(
            &manifest(),
            &["blog"],
            &[Dialect::Gorm],
            &DialectOptions::default(),
        );
        let go = conversion.output(Dialect::Gorm).unwrap();
        let post = go.find("type Post struct").unwrap();
        let tag = go.find("type Tag struct").unwrap();
        assert!(post < tag);
        assert!(!go.contains("Broken"));

        assert!(!conversion.is_clean());
        let failure = &conversion.failures()[0];
        assert_eq!(failure.model, "Broken");
        assert_eq!(failure.dialect, None);
        assert_eq!(
            failure.error,
            SchemaError::AmbiguousFieldShape {
                field: "owner".into(),
                matched: 2
            }
        );
        assert_eq!(
            failure.to_string(),
            "blog.Broken: relation `owner` matches 2 relation shapes, expected exactly one"
        );
    }

    #[test]
    fn only_requested_scopes_are_converted() {
        let conversion = convert(
            &manifest(),
            &["shop", "missing"],
            &[Dialect::Gorm, Dialect::Kotlin],
            &DialectOptions::default(),
        );
        assert!(conversion.is_clean());
        let go = conversion.output(Dialect::Gorm).unwrap();
        assert!(go.contains("type Order struct"));
        assert!(!go.contains("Post"));
        let kotlin = conversion.output(Dialect::Kotlin).unwrap();
        assert!(kotlin.contains("class Order ("));
    }

    #[test]
    fn repeated_app_labels_convert_every_entry() {
        let manifest = parse_manifest(
            r#"
apps:
  - label: blog
    models:
      - name: Post
        db_table: blog_post
  - label: blog
    models:
      - name: Tag
        db_table: blog_tag
"#,
            ManifestFormat::Yaml,
        )
        .unwrap();
        let conversion = convert(
            &manifest,
            &["blog"],
            &[Dialect::Gorm],
            &DialectOptions::default(),
        );
        let go = conversion.output(Dialect::Gorm).unwrap();
        assert_eq!(go.matches("type Post struct").count(), 1);
        assert_eq!(go.matches("type Tag struct").count(), 1);
        assert!(go.find("type Post struct") < go.find("type Tag struct"));
    }

    #[test]
    fn untargeted_dialects_have_no_output() {
        let conversion = convert(
            &manifest(),
            &["shop"],
            &[Dialect::Kotlin, Dialect::Kotlin],
            &DialectOptions::default(),
        );
        assert!(conversion.output(Dialect::Gorm).is_none());
        assert_eq!(conversion.outputs().count(), 1);
    }

    #[test]
    fn render_failures_name_the_dialect() {
        let manifest = parse_manifest(
            r#"
apps:
  - label: blog
    models:
      - name: Post
        db_table: blog_post
        fields:
          - name: tags
            kind: ManyToManyField
            is_relation: true
            many_to_many: true
"#,
            ManifestFormat::Yaml,
        )
        .unwrap();
        let conversion = convert(
            &manifest,
            &["blog"],
            &[Dialect::Gorm],
            &DialectOptions::default(),
        );
        let failure = &conversion.failures()[0];
        assert_eq!(failure.dialect, Some(Dialect::Gorm));
        assert!(matches!(
            failure.error,
            SchemaError::UnsupportedDialectPlaceholder { .. }
        ));
        assert_eq!(conversion.output(Dialect::Gorm), Some(""));
    }
}
