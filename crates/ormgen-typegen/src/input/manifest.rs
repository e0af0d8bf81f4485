//! JSON/YAML model manifest.

use super::{AppDescriptor, ModelDescriptor, ModelSource};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A model manifest: app scopes with their models and field metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

/// Serialization format of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ManifestFormat::Json),
            "yaml" | "yml" => Some(ManifestFormat::Yaml),
            _ => None,
        }
    }

    /// Guess the format from content: JSON documents open with `{`.
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            ManifestFormat::Json
        } else {
            ManifestFormat::Yaml
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse manifest text in the given format.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<Manifest, LoadError> {
    let manifest = match format {
        ManifestFormat::Json => serde_json::from_str(content)?,
        ManifestFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(manifest)
}

impl Manifest {
    /// Read a manifest file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let format =
            ManifestFormat::from_path(path).unwrap_or_else(|| ManifestFormat::sniff(&content));
        parse_manifest(&content, format)
    }
}

impl ModelSource for Manifest {
    fn apps(&self) -> Vec<(&str, &[ModelDescriptor])> {
        self.apps
            .iter()
            .map(|a| (a.label.as_str(), a.models.as_slice()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
apps:
  - label: blog
    models:
      - name: Post
        db_table: blog_post
        fields:
          - { name: id, kind: AutoField, primary_key: true }
          - { name: title, kind: CharField, max_length: 50 }
          - name: author
            kind: ForeignKey
            is_relation: true
            many_to_one: true
            related_model: Author
            attname: author_id
            on_delete: CASCADE
      - name: Author
        db_table: blog_author
  - label: shop
"#;

    #[test]
    fn parse_yaml_manifest() {
        let manifest = parse_manifest(YAML, ManifestFormat::Yaml).unwrap();
        assert_eq!(manifest.labels(), vec!["blog", "shop"]);

        let models = manifest.models("blog").unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "Post");
        assert_eq!(models[0].fields[1].max_length, Some(50));
        assert_eq!(models[0].fields[2].attname.as_deref(), Some("author_id"));
        assert!(models[1].fields.is_empty());

        assert_eq!(manifest.models("shop").map(|m| m.len()), Some(0));
        assert!(manifest.models("missing").is_none());
    }

    #[test]
    fn repeated_labels_keep_every_entry() {
        let yaml = r#"
apps:
  - label: blog
    models:
      - { name: Post, db_table: blog_post }
  - label: shop
    models:
      - { name: Order, db_table: shop_order }
  - label: blog
    models:
      - { name: Tag, db_table: blog_tag }
"#;
        let manifest = parse_manifest(yaml, ManifestFormat::Yaml).unwrap();
        assert_eq!(manifest.apps().len(), 3);
        assert_eq!(manifest.labels(), vec!["blog", "shop"]);
        let names: Vec<&str> = manifest
            .models("blog")
            .unwrap()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Post", "Tag"]);
    }

    #[test]
    fn field_without_name_is_rejected() {
        let json = r#"{"apps": [{"label": "a", "models": [
            {"name": "M", "db_table": "a_m", "fields": [{"kind": "TextField"}]}
        ]}]}"#;
        let err = parse_manifest(json, ManifestFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn parse_json_manifest() {
        let json = r#"{"apps": [{"label": "a", "models": [
            {"name": "M", "db_table": "a_m", "fields": [{"name": "id", "kind": "BigAutoField"}]}
        ]}]}"#;
        let manifest = parse_manifest(json, ManifestFormat::sniff(json)).unwrap();
        assert_eq!(manifest.models("a").unwrap()[0].fields[0].kind, "BigAutoField");
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("models.yml")),
            Some(ManifestFormat::Yaml)
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("models.json")),
            Some(ManifestFormat::Json)
        );
        assert_eq!(ManifestFormat::from_path(Path::new("models")), None);
        assert_eq!(ManifestFormat::sniff("apps: []"), ManifestFormat::Yaml);
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let err = parse_manifest("{\"apps\": 3}", ManifestFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
