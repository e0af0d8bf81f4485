//! Command-line surface: read a manifest, convert the requested apps, write
//! the declarations.

use crate::config::OrmgenConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ormgen_typegen::input::{ManifestFormat, parse_manifest};
use ormgen_typegen::{Dialect, DialectOptions, Manifest, convert};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Convert ORM model manifests into typed declarations.
#[derive(Debug, Parser)]
#[command(name = "ormgen", version, about)]
pub struct Cli {
    /// Model manifest (JSON or YAML), use - for stdin
    pub manifest: PathBuf,

    /// App scopes to convert
    #[arg(short, long, required = true, num_args = 1.., value_delimiter = ',')]
    pub apps: Vec<String>,

    /// Target dialects (defaults to `[defaults] lang` in config)
    #[arg(short, long, value_enum, num_args = 1.., value_delimiter = ',')]
    pub lang: Vec<Lang>,

    /// Omit GORM storage tags
    #[arg(long)]
    pub no_orm: bool,

    /// Omit GORM validation tags
    #[arg(long)]
    pub no_validation: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    /// Go structs with GORM tags
    #[value(alias = "gorm", alias = "golang")]
    Go,
    /// Kotlin classes with JPA annotations
    #[value(alias = "kt", alias = "java", alias = "jpa")]
    Kotlin,
}

impl From<Lang> for Dialect {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Go => Dialect::Gorm,
            Lang::Kotlin => Dialect::Kotlin,
        }
    }
}

/// Run the command and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    match execute(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

/// Returns `false` when some model failed to convert.
fn execute(cli: &Cli) -> Result<bool> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let config = OrmgenConfig::load(&root);

    let targets = resolve_targets(cli, &config)?;
    let options = resolve_options(cli, &config);
    let manifest = read_manifest(&cli.manifest)?;

    let conversion = convert(&manifest, cli.apps.as_slice(), &targets, &options);

    let mut code = String::new();
    for (_, text) in conversion.outputs() {
        code.push_str(text);
    }

    if let Some(path) = &cli.output {
        std::fs::write(path, &code)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Generated {}", path.display());
    } else {
        print!("{code}");
    }

    for failure in conversion.failures() {
        eprintln!("error: {failure}");
    }
    Ok(conversion.is_clean())
}

/// Dialects from `--lang`, falling back to the configured defaults.
fn resolve_targets(cli: &Cli, config: &OrmgenConfig) -> Result<Vec<Dialect>> {
    let targets: Vec<Dialect> = if cli.lang.is_empty() {
        config.default_dialects()
    } else {
        cli.lang.iter().copied().map(Dialect::from).collect()
    };
    if targets.is_empty() {
        anyhow::bail!("no target language: pass --lang or set [defaults] lang in config");
    }
    Ok(targets)
}

/// Config switches, with `--no-orm` / `--no-validation` taking precedence.
fn resolve_options(cli: &Cli, config: &OrmgenConfig) -> DialectOptions {
    let mut gorm = config.gorm_options();
    if cli.no_orm {
        gorm.storage_tags = false;
    }
    if cli.no_validation {
        gorm.validation_tags = false;
    }
    DialectOptions { gorm }
}

/// Read a manifest file, or stdin for `-`.
fn read_manifest(path: &Path) -> Result<Manifest> {
    if path.as_os_str() == "-" {
        return read_manifest_from(std::io::stdin());
    }
    Manifest::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Read a manifest from a stream, sniffing JSON or YAML from its content.
fn read_manifest_from(mut reader: impl Read) -> Result<Manifest> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    let format = ManifestFormat::sniff(&buf);
    parse_manifest(&buf, format).context("failed to parse manifest from stdin")
}
