//! ORM model schemas to typed declarations in other languages.
//!
//! `ormgen-typegen` reads model metadata (app scopes, models, fields),
//! normalizes each model into a dialect-neutral schema and renders it as a
//! type declaration for a target ORM.
//!
//! # Architecture
//!
//! ```text
//! Input              Classify / IR                Output Renderers
//! ───────────     ───────────────────────     ──────────────────────
//! Manifest    ─┐   taxonomy.rs               ┌─> Go structs (GORM tags)
//! (JSON/YAML)  ├─> classify.rs ─> normalize ─┤
//! ModelSource ─┘   (ir.rs: NormalizedSchema) └─> Kotlin classes (JPA)
//! ```
//!
//! # Example
//!
//! ```
//! use ormgen_typegen::{DialectOptions, Dialect, convert};
//! use ormgen_typegen::input::{ManifestFormat, parse_manifest};
//!
//! let manifest = parse_manifest(
//!     r#"{"apps": [{"label": "blog", "models": [{
//!         "name": "Post",
//!         "db_table": "blog_post",
//!         "fields": [{"name": "id", "kind": "AutoField", "primary_key": true}]
//!     }]}]}"#,
//!     ManifestFormat::Json,
//! )
//! .unwrap();
//!
//! let conversion = convert(&manifest, &["blog"], &[Dialect::Gorm], &DialectOptions::default());
//! assert!(conversion.is_clean());
//! assert!(conversion.output(Dialect::Gorm).unwrap().contains("type Post struct"));
//! ```
//!
//! # Feature Flags
//!
//! Backend flags (use `backend-*` prefix):
//! - `backend-gorm` - Go structs with `gorm` and `validate` tags
//! - `backend-kotlin` - Kotlin classes with JPA annotations
//!
//! Language umbrella flags (convenience):
//! - `go` - backend-gorm
//! - `kotlin` - backend-kotlin

pub mod classify;
pub mod convert;
pub mod error;
pub mod input;
pub mod ir;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod registry;
pub mod taxonomy;
pub mod template;
pub mod traits;

// Re-export commonly used items
pub use convert::{Conversion, ModelFailure, convert};
pub use error::SchemaError;
pub use input::{LoadError, Manifest, ModelSource};
pub use normalize::normalize;
pub use taxonomy::{Dialect, FieldKind};

// Re-export traits
pub use traits::Renderer;

// Re-export registry functions
pub use registry::{DialectOptions, dialect_names, dialects, renderer, renderer_by_name};

// Re-export generators
#[cfg(feature = "backend-gorm")]
pub use output::{GormOptions, GormRenderer, generate_gorm};

#[cfg(feature = "backend-kotlin")]
pub use output::{KotlinRenderer, generate_kotlin};
