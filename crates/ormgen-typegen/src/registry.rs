//! Registry of dialect renderers compiled into this build.

use crate::taxonomy::Dialect;
use crate::traits::Renderer;

/// Per-dialect rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialectOptions {
    #[cfg(feature = "backend-gorm")]
    pub gorm: crate::output::GormOptions,
}

/// Build the renderer for `dialect`, or `None` if its backend is not compiled in.
pub fn renderer(dialect: Dialect, options: &DialectOptions) -> Option<Box<dyn Renderer>> {
    // Unused when every backend is disabled.
    let _ = options;
    match dialect {
        #[cfg(feature = "backend-gorm")]
        Dialect::Gorm => Some(Box::new(crate::output::GormRenderer::new(options.gorm))),
        #[cfg(feature = "backend-kotlin")]
        Dialect::Kotlin => Some(Box::new(crate::output::KotlinRenderer)),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Look up a renderer by dialect name or alias (`go`, `gorm`, `kotlin`, `jpa`, ...).
pub fn renderer_by_name(name: &str, options: &DialectOptions) -> Option<Box<dyn Renderer>> {
    renderer(Dialect::from_name(name)?, options)
}

/// Dialects with a compiled-in renderer.
pub fn dialects() -> Vec<Dialect> {
    Dialect::ALL
        .into_iter()
        .filter(|d| renderer(*d, &DialectOptions::default()).is_some())
        .collect()
}

/// Names of the dialects with a compiled-in renderer.
pub fn dialect_names() -> Vec<&'static str> {
    dialects().into_iter().map(Dialect::as_str).collect()
}
