//! Go struct renderer with GORM storage tags and `validate` tags.

use crate::classify::{GenerationStrategy, ValidationRule};
use crate::error::SchemaError;
use crate::ir::{ManyToMany, ManyToOne, NormalizedSchema, OneToOne, PlainField};
use crate::naming::go_ident;
use crate::taxonomy::{Dialect, FieldKind, mapping};
use crate::template::{Slots, fill};
use crate::traits::Renderer;
use std::fmt::Write;

/// Type of the synthesized join-column field.
const JOIN_COLUMN_TYPE: &str = "uint32";

/// Template of the comment carried by a reverse many-to-many field.
const BACK_REFERENCE: &str = "// back-reference to {related_model}.{peer_field}";

/// Options for GORM struct generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GormOptions {
    /// Emit `gorm:"…"` storage tags.
    pub storage_tags: bool,
    /// Emit `validate:"…"` validation tags.
    pub validation_tags: bool,
}

impl Default for GormOptions {
    fn default() -> Self {
        Self {
            storage_tags: true,
            validation_tags: true,
        }
    }
}

/// GORM renderer implementing the Renderer trait.
#[derive(Debug, Clone, Default)]
pub struct GormRenderer {
    options: GormOptions,
}

impl GormRenderer {
    pub fn new(options: GormOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GormOptions {
        &self.options
    }
}

impl Renderer for GormRenderer {
    fn name(&self) -> &'static str {
        "gorm"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Gorm
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn render(&self, schema: &NormalizedSchema) -> Result<String, SchemaError> {
        GormWriter::new(&self.options).emit(schema)
    }
}

/// Render one model as a GORM struct.
pub fn generate_gorm(
    schema: &NormalizedSchema,
    options: &GormOptions,
) -> Result<String, SchemaError> {
    GormWriter::new(options).emit(schema)
}

struct GormWriter<'o> {
    options: &'o GormOptions,
    lines: Vec<String>,
}

impl<'o> GormWriter<'o> {
    fn new(options: &'o GormOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
        }
    }

    fn emit(mut self, schema: &NormalizedSchema) -> Result<String, SchemaError> {
        for field in &schema.fields {
            self.plain(field)?;
        }
        for rel in &schema.one_to_one {
            self.one_to_one(rel)?;
        }
        for rel in &schema.many_to_one {
            self.many_to_one(rel)?;
        }
        for rel in &schema.one_to_many {
            tracing::debug!(
                model = %schema.class_name,
                field = %rel.name,
                "one-to-many is implied by the owning side"
            );
        }
        for rel in &schema.many_to_many {
            self.many_to_many(rel)?;
        }

        let class = &schema.class_name;
        let mut out = String::new();
        writeln!(out, "type {class} struct {{").unwrap();
        for line in &self.lines {
            writeln!(out, "    {line}").unwrap();
        }
        out.push_str("}\n\n");
        writeln!(out, "func ({class}) TableName() string {{").unwrap();
        writeln!(out, "    return \"{}\"", schema.table).unwrap();
        out.push_str("}\n\n");
        Ok(out)
    }

    fn plain(&mut self, field: &PlainField) -> Result<(), SchemaError> {
        let map = mapping(Dialect::Gorm, field.kind);
        let slots = Slots {
            column: Some(&field.column),
            max_length: field.max_length,
            ..Default::default()
        };

        let mut storage = Vec::new();
        if let Some(template) = map.storage {
            storage.push(fill(template, &slots, &field.name)?);
        }
        if field.primary_key && !map.storage.is_some_and(|t| t.contains("primaryKey")) {
            storage.push("primaryKey".to_string());
        }
        match field.generation {
            GenerationStrategy::SetOnCreate => storage.push("autoCreateTime".to_string()),
            GenerationStrategy::SetOnUpdate => storage.push("autoUpdateTime".to_string()),
            _ => {}
        }
        if !field.nullable {
            storage.push("not null".to_string());
        }
        if field.indexed {
            storage.push("index".to_string());
        }
        if field.unique {
            storage.push("unique".to_string());
        }

        let mut validation = Vec::new();
        if let Some(template) = map.validation {
            validation.push(fill(template, &slots, &field.name)?);
        }
        if let (FieldKind::CharField, Some(max)) = (field.kind, field.max_length) {
            validation.push(format!("max={max}"));
        }
        for rule in &field.validation {
            if let ValidationRule::Choice { values } = rule {
                validation.push(format!("oneof={}", values.join(" ")));
            }
        }
        if field.required {
            validation.push("required".to_string());
        }

        let ty = fill(map.primitive, &slots, &field.name)?;
        self.push(&go_ident(&field.name), &ty, &storage, &validation);
        Ok(())
    }

    fn one_to_one(&mut self, rel: &OneToOne) -> Result<(), SchemaError> {
        if rel.reverse {
            tracing::debug!(field = %rel.name, "reverse one-to-one is implied by the owning side");
            return Ok(());
        }
        self.belongs_to(
            FieldKind::OneToOneField,
            &rel.name,
            rel.related_model.as_deref(),
            rel.join_column.as_deref(),
            rel.nullable,
            rel.on_delete.as_deref(),
        )
    }

    fn many_to_one(&mut self, rel: &ManyToOne) -> Result<(), SchemaError> {
        self.belongs_to(
            FieldKind::ForeignKey,
            &rel.name,
            rel.related_model.as_deref(),
            Some(rel.join_column.as_str()),
            rel.nullable,
            rel.on_delete.as_deref(),
        )
    }

    /// Forward one-to-one and many-to-one: companion join column, then the
    /// relation itself.
    fn belongs_to(
        &mut self,
        kind: FieldKind,
        name: &str,
        related_model: Option<&str>,
        join_column: Option<&str>,
        nullable: bool,
        on_delete: Option<&str>,
    ) -> Result<(), SchemaError> {
        let map = mapping(Dialect::Gorm, kind);
        let join_ident = join_column.map(go_ident);
        let slots = Slots {
            related_model,
            join_column: join_ident.as_deref(),
            ..Default::default()
        };

        let ty = fill(map.primitive, &slots, name)?;
        let mut storage = Vec::new();
        if let Some(template) = map.storage {
            storage.push(fill(template, &slots, name)?);
        }
        let join_ident = fill("{join_column}", &slots, name)?;

        let index: &[&str] = if kind == FieldKind::OneToOneField {
            &["index", "unique"]
        } else {
            &["index"]
        };
        let index: Vec<String> = index.iter().map(|s| s.to_string()).collect();
        self.push(&join_ident, JOIN_COLUMN_TYPE, &index, &[]);

        if let Some(action) = on_delete {
            storage.push(format!("constraint:OnDelete:{}", action.replace('_', " ")));
        }
        if !nullable {
            storage.push("not null".to_string());
        }
        self.push(&go_ident(name), &ty, &storage, &[]);
        Ok(())
    }

    fn many_to_many(&mut self, rel: &ManyToMany) -> Result<(), SchemaError> {
        let kind = if rel.reverse {
            FieldKind::ManyToManyRel
        } else {
            FieldKind::ManyToManyField
        };
        let map = mapping(Dialect::Gorm, kind);
        let peer_ident = rel.peer_field.as_deref().map(go_ident);
        let slots = Slots {
            related_model: rel.related_model.as_deref(),
            join_table: rel.join_table.as_deref(),
            peer_field: peer_ident.as_deref(),
            ..Default::default()
        };
        let ty = fill(map.primitive, &slots, &rel.name)?;

        if rel.reverse {
            let comment = fill(BACK_REFERENCE, &slots, &rel.name)?;
            let line = format!("{:<25} {:<12} {}", go_ident(&rel.name), ty, comment);
            self.lines.push(line);
            return Ok(());
        }

        let mut storage = Vec::new();
        if let Some(template) = map.storage {
            storage.push(fill(template, &slots, &rel.name)?);
        }
        self.push(&go_ident(&rel.name), &ty, &storage, &[]);
        Ok(())
    }

    fn push(&mut self, name: &str, ty: &str, storage: &[String], validation: &[String]) {
        let tags = self.tags(storage, validation);
        let line = format!("{name:<25} {ty:<12} {tags}");
        self.lines.push(line.trim_end().to_string());
    }

    fn tags(&self, storage: &[String], validation: &[String]) -> String {
        let mut parts = Vec::new();
        if self.options.storage_tags && !storage.is_empty() {
            parts.push(format!("gorm:\"{}\"", storage.join(";")));
        }
        if self.options.validation_tags && !validation.is_empty() {
            parts.push(format!("validate:\"{}\"", validation.join(",")));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("`{}`", parts.join(" "))
        }
    }
}
