//! Dialect renderers.
//!
//! Each renderer takes a [`NormalizedSchema`](crate::ir::NormalizedSchema)
//! and produces one type declaration. All renderers implement the
//! [`Renderer`](crate::traits::Renderer) trait for uniform access via the
//! registry.

// Go structs with GORM tags
#[cfg(feature = "backend-gorm")]
pub mod gorm;

#[cfg(feature = "backend-gorm")]
pub use gorm::{GormOptions, GormRenderer, generate_gorm};

// Kotlin JPA entities
#[cfg(feature = "backend-kotlin")]
pub mod kotlin;

#[cfg(feature = "backend-kotlin")]
pub use kotlin::{KotlinRenderer, generate_kotlin};
