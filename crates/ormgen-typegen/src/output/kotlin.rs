//! Kotlin renderer: JPA-annotated entity classes.

use crate::classify::{GenerationStrategy, ValidationRule};
use crate::error::SchemaError;
use crate::ir::{ManyToMany, ManyToOne, NormalizedSchema, OneToMany, OneToOne, PlainField};
use crate::naming::kotlin_ident;
use crate::taxonomy::{Dialect, FieldKind, mapping};
use crate::template::{Slots, fill};
use crate::traits::Renderer;

/// Kotlin renderer implementing the Renderer trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinRenderer;

impl Renderer for KotlinRenderer {
    fn name(&self) -> &'static str {
        "kotlin"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Kotlin
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn render(&self, schema: &NormalizedSchema) -> Result<String, SchemaError> {
        KotlinWriter::emit(schema)
    }
}

/// Render one model as a Kotlin entity class.
pub fn generate_kotlin(schema: &NormalizedSchema) -> Result<String, SchemaError> {
    KotlinWriter::emit(schema)
}

/// Emits a NormalizedSchema as Kotlin source.
struct KotlinWriter {
    output: String,
}

impl KotlinWriter {
    fn emit(schema: &NormalizedSchema) -> Result<String, SchemaError> {
        let mut writer = Self {
            output: String::new(),
        };
        writer.line(0, "@Entity");
        writer.line(0, &format!("@Table(name = \"{}\")", schema.table));
        writer.line(0, &format!("class {} (", schema.class_name));

        for field in &schema.fields {
            writer.plain(field)?;
        }
        for rel in &schema.one_to_one {
            writer.one_to_one(rel)?;
        }
        for rel in &schema.many_to_one {
            writer.many_to_one(rel)?;
        }
        for rel in &schema.one_to_many {
            writer.one_to_many(rel)?;
        }
        for rel in &schema.many_to_many {
            writer.many_to_many(rel)?;
        }

        writer.output.push_str(")\n\n");
        Ok(writer.output)
    }

    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn var(&mut self, name: &str, ty: &str, nullable: bool) {
        let marker = if nullable { "?" } else { "" };
        self.line(1, &format!("var {}: {ty}{marker},", kotlin_ident(name)));
    }

    fn plain(&mut self, field: &PlainField) -> Result<(), SchemaError> {
        self.output.push('\n');
        if field.nullable {
            self.line(1, "@Column(nullable = true)");
        } else {
            self.line(1, "@NotNull");
        }
        if field.primary_key {
            self.line(1, "@Id");
        }
        match field.generation {
            GenerationStrategy::None => {}
            GenerationStrategy::AutoIncrement => {
                self.line(1, "@GeneratedValue(strategy = GenerationType.IDENTITY)")
            }
            GenerationStrategy::Uuid => {
                self.line(1, "@GeneratedValue(generator = \"uuid2\")");
                self.line(1, "@GenericGenerator(name = \"uuid2\", strategy = \"uuid2\")");
            }
            GenerationStrategy::SetOnCreate => self.line(1, "@CreationTimestamp"),
            GenerationStrategy::SetOnUpdate => self.line(1, "@UpdateTimestamp"),
        }
        for rule in &field.validation {
            if let Some(annotation) = validation_annotation(rule) {
                self.line(1, &annotation);
            }
        }

        let map = mapping(Dialect::Kotlin, field.kind);
        let ty = fill(map.primitive, &Slots::default(), &field.name)?;
        self.var(&field.name, &ty, field.nullable);
        Ok(())
    }

    fn one_to_one(&mut self, rel: &OneToOne) -> Result<(), SchemaError> {
        self.output.push('\n');
        if !rel.nullable {
            self.line(1, "@NotNull");
        }
        let slots = Slots {
            related_model: rel.related_model.as_deref(),
            join_column: rel.join_column.as_deref(),
            peer_field: rel.peer_field.as_deref(),
            ..Default::default()
        };
        let mut args = Vec::new();
        if rel.reverse {
            args.push(fill("mappedBy = \"{peer_field}\"", &slots, &rel.name)?);
        }
        if rel.nullable {
            args.push("optional = true".to_string());
        }
        self.line(1, &annotation("@OneToOne", &args));
        if !rel.reverse {
            let join = fill("@JoinColumn(name = \"{join_column}\")", &slots, &rel.name)?;
            self.line(1, &join);
        }
        let kind = if rel.reverse {
            FieldKind::OneToOneRel
        } else {
            FieldKind::OneToOneField
        };
        let ty = fill(mapping(Dialect::Kotlin, kind).primitive, &slots, &rel.name)?;
        self.var(&rel.name, &ty, rel.nullable);
        Ok(())
    }

    fn many_to_one(&mut self, rel: &ManyToOne) -> Result<(), SchemaError> {
        self.output.push('\n');
        if !rel.nullable {
            self.line(1, "@NotNull");
        }
        let args = if rel.nullable {
            vec!["optional = true".to_string()]
        } else {
            Vec::new()
        };
        self.line(1, &annotation("@ManyToOne", &args));
        self.line(1, &format!("@JoinColumn(name = \"{}\")", rel.join_column));
        let slots = Slots {
            related_model: rel.related_model.as_deref(),
            ..Default::default()
        };
        let ty = fill(
            mapping(Dialect::Kotlin, FieldKind::ForeignKey).primitive,
            &slots,
            &rel.name,
        )?;
        self.var(&rel.name, &ty, rel.nullable);
        Ok(())
    }

    fn one_to_many(&mut self, rel: &OneToMany) -> Result<(), SchemaError> {
        self.output.push('\n');
        let slots = Slots {
            related_model: rel.related_model.as_deref(),
            peer_field: rel.peer_field.as_deref(),
            ..Default::default()
        };
        let mapped_by = fill("@OneToMany(mappedBy = \"{peer_field}\")", &slots, &rel.name)?;
        self.line(1, &mapped_by);
        let ty = fill(
            mapping(Dialect::Kotlin, FieldKind::ManyToOneRel).primitive,
            &slots,
            &rel.name,
        )?;
        self.var(&rel.name, &ty, false);
        Ok(())
    }

    fn many_to_many(&mut self, rel: &ManyToMany) -> Result<(), SchemaError> {
        self.output.push('\n');
        let slots = Slots {
            related_model: rel.related_model.as_deref(),
            join_table: rel.join_table.as_deref(),
            peer_field: rel.peer_field.as_deref(),
            ..Default::default()
        };
        if rel.reverse {
            let mapped_by = fill("@ManyToMany(mappedBy = \"{peer_field}\")", &slots, &rel.name)?;
            self.line(1, &mapped_by);
        } else {
            let table = fill("name = \"{join_table}\",", &slots, &rel.name)?;
            let join = fill(
                "joinColumns = [JoinColumn(name = \"{join_column}\")],",
                &Slots {
                    join_column: rel.join_column.as_deref(),
                    ..Default::default()
                },
                &rel.name,
            )?;
            let inverse = fill(
                "inverseJoinColumns = [JoinColumn(name = \"{join_column}\")]",
                &Slots {
                    join_column: rel.peer_join_column.as_deref(),
                    ..Default::default()
                },
                &rel.name,
            )?;
            self.line(1, "@ManyToMany");
            self.line(1, "@JoinTable(");
            self.line(2, &table);
            self.line(2, &join);
            self.line(2, &inverse);
            self.line(1, ")");
        }
        let ty = fill(
            mapping(Dialect::Kotlin, FieldKind::ManyToManyField).primitive,
            &slots,
            &rel.name,
        )?;
        self.var(&rel.name, &ty, false);
        Ok(())
    }
}

/// `@Name` or `@Name(a, b)`.
fn annotation(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{name}({})", args.join(", "))
    }
}

/// Bean Validation annotation for a rule, if Kotlin has one.
fn validation_annotation(rule: &ValidationRule) -> Option<String> {
    match rule {
        ValidationRule::Email => Some("@Email".to_string()),
        ValidationRule::Url => Some("@URL".to_string()),
        ValidationRule::NumericRange { min } => Some(format!("@Min({min})")),
        ValidationRule::Ip | ValidationRule::Choice { .. } => None,
    }
}
