//! Field taxonomy: the closed catalogue of source field kinds and the
//! per-dialect data attached to each of them.
//!
//! Everything here is constant data. Templates may contain `{slot}`
//! placeholders; they are filled in by the renderers (see
//! [`template`](crate::template)), never by this module.

use serde::Serialize;

/// Category of a source model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    // Identity
    AutoField,
    BigAutoField,
    SmallAutoField,
    UuidField,

    // Boolean
    BooleanField,
    NullBooleanField,

    // Numeric
    SmallIntegerField,
    IntegerField,
    BigIntegerField,
    PositiveSmallIntegerField,
    PositiveIntegerField,
    PositiveBigIntegerField,
    FloatField,
    DecimalField,

    // String
    CharField,
    TextField,
    SlugField,
    EmailField,
    UrlField,
    FileField,
    FilePathField,
    ImageField,
    GenericIpAddressField,
    IpAddressField,
    CommaSeparatedIntegerField,

    // Date/time
    DateField,
    DateTimeField,
    TimeField,
    DurationField,

    // Other scalars
    BinaryField,
    JsonField,

    // Relations
    ForeignKey,
    ManyToOneRel,
    OneToOneField,
    OneToOneRel,
    ManyToManyField,
    ManyToManyRel,
}

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [FieldKind; 37] = [
        FieldKind::AutoField,
        FieldKind::BigAutoField,
        FieldKind::SmallAutoField,
        FieldKind::UuidField,
        FieldKind::BooleanField,
        FieldKind::NullBooleanField,
        FieldKind::SmallIntegerField,
        FieldKind::IntegerField,
        FieldKind::BigIntegerField,
        FieldKind::PositiveSmallIntegerField,
        FieldKind::PositiveIntegerField,
        FieldKind::PositiveBigIntegerField,
        FieldKind::FloatField,
        FieldKind::DecimalField,
        FieldKind::CharField,
        FieldKind::TextField,
        FieldKind::SlugField,
        FieldKind::EmailField,
        FieldKind::UrlField,
        FieldKind::FileField,
        FieldKind::FilePathField,
        FieldKind::ImageField,
        FieldKind::GenericIpAddressField,
        FieldKind::IpAddressField,
        FieldKind::CommaSeparatedIntegerField,
        FieldKind::DateField,
        FieldKind::DateTimeField,
        FieldKind::TimeField,
        FieldKind::DurationField,
        FieldKind::BinaryField,
        FieldKind::JsonField,
        FieldKind::ForeignKey,
        FieldKind::ManyToOneRel,
        FieldKind::OneToOneField,
        FieldKind::OneToOneRel,
        FieldKind::ManyToManyField,
        FieldKind::ManyToManyRel,
    ];

    /// Look up a kind by the source ORM's internal type name.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "AutoField" => FieldKind::AutoField,
            "BigAutoField" => FieldKind::BigAutoField,
            "SmallAutoField" => FieldKind::SmallAutoField,
            "UUIDField" | "UuidField" => FieldKind::UuidField,
            "BooleanField" => FieldKind::BooleanField,
            "NullBooleanField" => FieldKind::NullBooleanField,
            "SmallIntegerField" => FieldKind::SmallIntegerField,
            "IntegerField" => FieldKind::IntegerField,
            "BigIntegerField" => FieldKind::BigIntegerField,
            "PositiveSmallIntegerField" => FieldKind::PositiveSmallIntegerField,
            "PositiveIntegerField" => FieldKind::PositiveIntegerField,
            "PositiveBigIntegerField" => FieldKind::PositiveBigIntegerField,
            "FloatField" => FieldKind::FloatField,
            "DecimalField" => FieldKind::DecimalField,
            "CharField" => FieldKind::CharField,
            "TextField" => FieldKind::TextField,
            "SlugField" => FieldKind::SlugField,
            "EmailField" => FieldKind::EmailField,
            "URLField" | "UrlField" => FieldKind::UrlField,
            "FileField" => FieldKind::FileField,
            "FilePathField" => FieldKind::FilePathField,
            "ImageField" => FieldKind::ImageField,
            "GenericIPAddressField" | "GenericIpAddressField" => FieldKind::GenericIpAddressField,
            "IPAddressField" | "IpAddressField" => FieldKind::IpAddressField,
            "CommaSeparatedIntegerField" => FieldKind::CommaSeparatedIntegerField,
            "DateField" => FieldKind::DateField,
            "DateTimeField" => FieldKind::DateTimeField,
            "TimeField" => FieldKind::TimeField,
            "DurationField" => FieldKind::DurationField,
            "BinaryField" => FieldKind::BinaryField,
            "JSONField" | "JsonField" => FieldKind::JsonField,
            "ForeignKey" => FieldKind::ForeignKey,
            "ManyToOneRel" => FieldKind::ManyToOneRel,
            "OneToOneField" => FieldKind::OneToOneField,
            "OneToOneRel" => FieldKind::OneToOneRel,
            "ManyToManyField" => FieldKind::ManyToManyField,
            "ManyToManyRel" => FieldKind::ManyToManyRel,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind describes a relation rather than a stored value.
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            FieldKind::ForeignKey
                | FieldKind::ManyToOneRel
                | FieldKind::OneToOneField
                | FieldKind::OneToOneRel
                | FieldKind::ManyToManyField
                | FieldKind::ManyToManyRel
        )
    }

    /// Auto-incrementing identity kinds.
    pub fn is_auto(self) -> bool {
        matches!(
            self,
            FieldKind::AutoField | FieldKind::BigAutoField | FieldKind::SmallAutoField
        )
    }

    /// Integer kinds constrained to non-negative values.
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            FieldKind::PositiveSmallIntegerField
                | FieldKind::PositiveIntegerField
                | FieldKind::PositiveBigIntegerField
        )
    }

    /// Language-neutral value type of a plain kind. `None` for relations.
    pub fn value_kind(self) -> Option<ValueKind> {
        let value = match self {
            FieldKind::SmallAutoField => ValueKind::Short,
            FieldKind::AutoField
            | FieldKind::SmallIntegerField
            | FieldKind::IntegerField
            | FieldKind::PositiveSmallIntegerField
            | FieldKind::PositiveIntegerField => ValueKind::Int,
            FieldKind::BigAutoField
            | FieldKind::BigIntegerField
            | FieldKind::PositiveBigIntegerField => ValueKind::Long,
            FieldKind::FloatField => ValueKind::Float,
            FieldKind::DecimalField => ValueKind::Double,
            FieldKind::BooleanField | FieldKind::NullBooleanField => ValueKind::Boolean,
            FieldKind::UuidField
            | FieldKind::CharField
            | FieldKind::TextField
            | FieldKind::SlugField
            | FieldKind::EmailField
            | FieldKind::UrlField
            | FieldKind::FileField
            | FieldKind::FilePathField
            | FieldKind::ImageField
            | FieldKind::GenericIpAddressField
            | FieldKind::IpAddressField
            | FieldKind::CommaSeparatedIntegerField
            | FieldKind::DurationField => ValueKind::String,
            FieldKind::DateField => ValueKind::LocalDate,
            FieldKind::DateTimeField => ValueKind::LocalDateTime,
            FieldKind::TimeField => ValueKind::LocalTime,
            FieldKind::BinaryField => ValueKind::ByteArray,
            FieldKind::JsonField => ValueKind::Json,
            FieldKind::ForeignKey
            | FieldKind::ManyToOneRel
            | FieldKind::OneToOneField
            | FieldKind::OneToOneRel
            | FieldKind::ManyToManyField
            | FieldKind::ManyToManyRel => return None,
        };
        Some(value)
    }
}

/// Language-neutral semantic type of a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
    ByteArray,
    LocalDate,
    LocalDateTime,
    LocalTime,
    Json,
}

impl ValueKind {
    /// Kotlin/JVM type name.
    pub fn kotlin_type(self) -> &'static str {
        match self {
            ValueKind::Short => "Short",
            ValueKind::Int => "Int",
            ValueKind::Long => "Long",
            ValueKind::Float => "Float",
            ValueKind::Double => "Double",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
            ValueKind::ByteArray => "ByteArray",
            ValueKind::LocalDate => "LocalDate",
            ValueKind::LocalDateTime => "LocalDateTime",
            ValueKind::LocalTime => "LocalTime",
            ValueKind::Json => "Map<String, Any>",
        }
    }
}

/// A target output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dialect {
    /// Go structs with GORM storage tags and `validate` tags.
    Gorm,
    /// Kotlin classes with JPA annotations.
    Kotlin,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Gorm, Dialect::Kotlin];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Gorm => "go",
            Dialect::Kotlin => "kotlin",
        }
    }

    /// Parse a dialect name or one of its aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "go" | "gorm" | "golang" => Some(Dialect::Gorm),
            "kotlin" | "kt" | "java" | "jpa" => Some(Dialect::Kotlin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect-specific data attached to one field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectMapping {
    /// Target type name; may reference `{related_model}`.
    pub primitive: &'static str,
    /// Storage-constraint template.
    pub storage: Option<&'static str>,
    /// Validation-tag template.
    pub validation: Option<&'static str>,
}

impl DialectMapping {
    const fn new(
        primitive: &'static str,
        storage: Option<&'static str>,
        validation: Option<&'static str>,
    ) -> Self {
        Self {
            primitive,
            storage,
            validation,
        }
    }

    const fn bare(primitive: &'static str) -> Self {
        Self::new(primitive, None, None)
    }
}

/// Look up the data attached to `kind` in `dialect`.
pub fn mapping(dialect: Dialect, kind: FieldKind) -> DialectMapping {
    match dialect {
        Dialect::Gorm => gorm_mapping(kind),
        Dialect::Kotlin => kotlin_mapping(kind),
    }
}

fn gorm_mapping(kind: FieldKind) -> DialectMapping {
    use FieldKind::*;

    const VARCHAR_100: Option<&str> = Some("type:varchar(100)");
    const UNSIGNED_CHECK: Option<&str> = Some("check:{column}>=0");
    const NON_NEGATIVE: Option<&str> = Some("numeric,gte=0");
    const FOREIGN_KEY: Option<&str> = Some("foreignKey:{join_column}");

    match kind {
        AutoField => DialectMapping::new("uint32", Some("primaryKey"), None),
        BigAutoField => DialectMapping::new("uint64", Some("primaryKey"), None),
        SmallAutoField => DialectMapping::new("uint16", Some("primaryKey"), None),
        UuidField => DialectMapping::new(
            "uuid.UUID",
            Some("type:uuid;default:uuid_generate_v4()"),
            None,
        ),
        BooleanField | NullBooleanField => DialectMapping::bare("bool"),
        SmallIntegerField => DialectMapping::new("int16", None, Some("numeric")),
        IntegerField => DialectMapping::new("int32", None, Some("numeric")),
        BigIntegerField => DialectMapping::new("int64", None, Some("numeric")),
        PositiveSmallIntegerField => DialectMapping::new("uint16", UNSIGNED_CHECK, NON_NEGATIVE),
        PositiveIntegerField => DialectMapping::new("uint32", UNSIGNED_CHECK, NON_NEGATIVE),
        PositiveBigIntegerField => DialectMapping::new("uint64", UNSIGNED_CHECK, NON_NEGATIVE),
        FloatField | DecimalField => DialectMapping::bare("float64"),
        CharField => DialectMapping::new("string", Some("type:varchar({max_length})"), None),
        TextField | ImageField | CommaSeparatedIntegerField => DialectMapping::bare("string"),
        SlugField => DialectMapping::new("string", Some("type:varchar(50)"), None),
        EmailField => DialectMapping::new("string", Some("type:varchar(254)"), Some("email")),
        UrlField => DialectMapping::new("string", VARCHAR_100, Some("url")),
        FileField | FilePathField => DialectMapping::new("string", VARCHAR_100, None),
        GenericIpAddressField | IpAddressField => DialectMapping::new("string", None, Some("ip")),
        DateField => DialectMapping::bare("datatypes.Date"),
        DateTimeField | TimeField => DialectMapping::bare("time.Time"),
        DurationField => DialectMapping::bare("time.Duration"),
        BinaryField => DialectMapping::bare("[]byte"),
        JsonField => DialectMapping::bare("datatypes.JSON"),
        ForeignKey | ManyToOneRel | OneToOneField | OneToOneRel => {
            DialectMapping::new("{related_model}", FOREIGN_KEY, None)
        }
        ManyToManyField | ManyToManyRel => {
            DialectMapping::new("[]*{related_model}", Some("many2many:{join_table}"), None)
        }
    }
}

fn kotlin_mapping(kind: FieldKind) -> DialectMapping {
    match kind.value_kind() {
        Some(value) => DialectMapping::bare(value.kotlin_type()),
        None => match kind {
            FieldKind::ManyToManyField | FieldKind::ManyToManyRel | FieldKind::ManyToOneRel => {
                DialectMapping::bare("List<{related_model}>")
            }
            _ => DialectMapping::bare("{related_model}"),
        },
    }
}
