//! Traits for dialect renderers.

use crate::error::SchemaError;
use crate::ir::NormalizedSchema;
use crate::taxonomy::Dialect;

/// A dialect renderer.
///
/// Renderers transform one [`NormalizedSchema`] into a type declaration in a
/// target language. They never look at raw field metadata.
///
/// # Implementing Custom Renderers
///
/// ```ignore
/// use ormgen_typegen::{Renderer, SchemaError, ir::NormalizedSchema, taxonomy::Dialect};
///
/// struct DebugRenderer;
///
/// impl Renderer for DebugRenderer {
///     fn name(&self) -> &'static str { "debug" }
///     fn dialect(&self) -> Dialect { Dialect::Gorm }
///     fn extension(&self) -> &'static str { "txt" }
///     fn render(&self, schema: &NormalizedSchema) -> Result<String, SchemaError> {
///         Ok(format!("{schema:#?}\n"))
///     }
/// }
/// ```
pub trait Renderer: Send + Sync {
    /// Unique renderer identifier (e.g., "gorm", "kotlin").
    fn name(&self) -> &'static str;

    /// Dialect produced by this renderer.
    fn dialect(&self) -> Dialect;

    /// File extension for generated code (e.g., "go", "kt").
    fn extension(&self) -> &'static str;

    /// Render one model declaration.
    fn render(&self, schema: &NormalizedSchema) -> Result<String, SchemaError>;
}
