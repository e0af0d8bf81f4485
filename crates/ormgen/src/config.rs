//! Configuration system for ormgen.
//!
//! Loads config from:
//! 1. Global: ~/.config/ormgen/config.toml
//! 2. Per-project: .ormgen/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [gorm]
//! storage_tags = true
//! validation_tags = false
//!
//! [defaults]
//! lang = ["go", "kotlin"]
//! ```

use ormgen_typegen::{Dialect, GormOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// GORM tag switches. Unset keys fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GormConfig {
    /// Emit `gorm:"…"` storage tags.
    pub storage_tags: Option<bool>,
    /// Emit `validate:"…"` validation tags.
    pub validation_tags: Option<bool>,
}

/// Defaults for command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Dialects used when `--lang` is not given.
    pub lang: Option<Vec<String>>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrmgenConfig {
    pub gorm: GormConfig,
    pub defaults: DefaultsConfig,
}

impl OrmgenConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/ormgen/config.toml,
    /// then merges with per-project config from .ormgen/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    fn load_layers(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".ormgen").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("ormgen").join("config.toml"))
    }

    /// Load config from a file path. Unreadable or malformed files are ignored.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Merge another config into this one; keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            gorm: GormConfig {
                storage_tags: other.gorm.storage_tags.or(self.gorm.storage_tags),
                validation_tags: other.gorm.validation_tags.or(self.gorm.validation_tags),
            },
            defaults: DefaultsConfig {
                lang: other.defaults.lang.or(self.defaults.lang),
            },
        }
    }

    /// GORM options with unset switches enabled.
    pub fn gorm_options(&self) -> GormOptions {
        let defaults = GormOptions::default();
        GormOptions {
            storage_tags: self.gorm.storage_tags.unwrap_or(defaults.storage_tags),
            validation_tags: self.gorm.validation_tags.unwrap_or(defaults.validation_tags),
        }
    }

    /// Default dialects. Unknown names are skipped with a warning.
    pub fn default_dialects(&self) -> Vec<Dialect> {
        let Some(names) = &self.defaults.lang else {
            return Vec::new();
        };
        names
            .iter()
            .filter_map(|name| {
                let dialect = Dialect::from_name(name);
                if dialect.is_none() {
                    tracing::warn!(lang = %name, "unknown dialect in config");
                }
                dialect
            })
            .collect()
    }
}
