//! Schema normalizer: partitions a model's fields into plain fields and the
//! four relation shapes.

use crate::classify::{
    classify_generation, classify_kind, classify_kind_lenient, classify_validation,
    classify_value_kind,
};
use crate::error::SchemaError;
use crate::input::{FieldDescriptor, ModelDescriptor};
use crate::ir::{
    ManyToMany, ManyToOne, NormalizedSchema, OneToMany, OneToOne, PlainField, SkipReason,
    SkippedField,
};

/// Normalize one model of the app scope `app`.
///
/// Unrecognized plain kinds and many-to-one fields without a local attribute
/// are recorded in [`NormalizedSchema::skipped`]. A relation matching zero or
/// several shapes fails the whole model.
pub fn normalize(app: &str, model: &ModelDescriptor) -> Result<NormalizedSchema, SchemaError> {
    let mut schema = NormalizedSchema::new(app, &model.name, &model.db_table);

    let (relations, plain): (Vec<&FieldDescriptor>, Vec<&FieldDescriptor>) =
        model.fields.iter().partition(|f| f.is_relation);

    for field in plain {
        if classify_kind_lenient(field).is_none() {
            tracing::warn!(
                model = %model.name,
                field = %field.name,
                kind = %field.kind,
                "skipping field of unrecognized kind"
            );
            schema.skipped.push(SkippedField {
                name: field.name.clone(),
                reason: SkipReason::UnrecognizedKind(field.kind.clone()),
            });
            continue;
        }
        schema.fields.push(plain_field(field)?);
    }

    for field in relations {
        let matched = field.shape_count();
        if matched != 1 {
            return Err(SchemaError::AmbiguousFieldShape {
                field: field.name.clone(),
                matched,
            });
        }

        if field.one_to_one {
            schema.one_to_one.push(one_to_one(field));
        } else if field.many_to_one {
            match &field.attname {
                Some(attname) => schema.many_to_one.push(ManyToOne {
                    name: field.name.clone(),
                    related_model: field.related_model.clone(),
                    join_column: attname.clone(),
                    nullable: field.null,
                    on_delete: field.on_delete.clone(),
                }),
                None => {
                    tracing::debug!(
                        model = %model.name,
                        field = %field.name,
                        "dropping many-to-one without local attribute"
                    );
                    schema.skipped.push(SkippedField {
                        name: field.name.clone(),
                        reason: SkipReason::NoLocalAttribute,
                    });
                }
            }
        } else if field.one_to_many {
            schema.one_to_many.push(OneToMany {
                name: accessor(field),
                related_model: field.related_model.clone(),
                peer_field: field.peer_field.clone(),
            });
        } else {
            schema.many_to_many.push(many_to_many(field));
        }
    }

    Ok(schema)
}

fn plain_field(field: &FieldDescriptor) -> Result<PlainField, SchemaError> {
    let kind = classify_kind(field)?;
    let value_kind = classify_value_kind(field)?;
    Ok(PlainField {
        name: field.name.clone(),
        column: field.column_name().to_string(),
        nullable: field.null,
        kind,
        value_kind,
        generation: classify_generation(field),
        validation: classify_validation(field),
        max_length: field.max_length,
        primary_key: field.primary_key,
        unique: field.unique,
        indexed: field.db_index,
        required: !field.blank,
    })
}

fn one_to_one(field: &FieldDescriptor) -> OneToOne {
    if field.is_reverse {
        OneToOne {
            name: field.name.clone(),
            related_model: field.related_model.clone(),
            nullable: field.null,
            join_column: None,
            peer_field: field.peer_field.clone(),
            reverse: true,
            on_delete: None,
        }
    } else {
        OneToOne {
            name: field.name.clone(),
            related_model: field.related_model.clone(),
            nullable: field.null,
            join_column: field.attname.clone(),
            peer_field: None,
            reverse: false,
            on_delete: field.on_delete.clone(),
        }
    }
}

fn many_to_many(field: &FieldDescriptor) -> ManyToMany {
    if field.is_reverse {
        ManyToMany {
            name: accessor(field),
            related_model: field.related_model.clone(),
            join_table: None,
            join_column: None,
            peer_join_column: None,
            peer_field: field.peer_field.clone(),
            reverse: true,
        }
    } else {
        ManyToMany {
            name: field.name.clone(),
            related_model: field.related_model.clone(),
            join_table: field.m2m_db_table.clone(),
            join_column: field.m2m_column_name.clone(),
            peer_join_column: field.m2m_reverse_name.clone(),
            peer_field: None,
            reverse: false,
        }
    }
}

/// Consumer-facing name of a reverse relation.
fn accessor(field: &FieldDescriptor) -> String {
    field
        .accessor_name
        .clone()
        .unwrap_or_else(|| field.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GenerationStrategy;
    use crate::taxonomy::{FieldKind, ValueKind};

    fn relation(name: &str, kind: &str, model: &str) -> FieldDescriptor {
        FieldDescriptor {
            is_relation: true,
            related_model: Some(model.to_string()),
            ..FieldDescriptor::new(name, kind)
        }
    }

    fn model(fields: Vec<FieldDescriptor>) -> ModelDescriptor {
        ModelDescriptor {
            name: "Post".into(),
            db_table: "blog_post".into(),
            fields,
        }
    }

    fn blog_post() -> ModelDescriptor {
        model(vec![
            FieldDescriptor {
                primary_key: true,
                ..FieldDescriptor::new("id", "AutoField")
            },
            FieldDescriptor {
                max_length: Some(50),
                blank: false,
                ..FieldDescriptor::new("title", "CharField")
            },
            FieldDescriptor {
                auto_now_add: true,
                ..FieldDescriptor::new("created_at", "DateTimeField")
            },
            FieldDescriptor {
                many_to_one: true,
                attname: Some("author_id".into()),
                on_delete: Some("CASCADE".into()),
                ..relation("author", "ForeignKey", "Author")
            },
            FieldDescriptor {
                one_to_many: true,
                accessor_name: Some("comment_set".into()),
                peer_field: Some("post".into()),
                ..relation("comment", "ManyToOneRel", "Comment")
            },
            FieldDescriptor {
                many_to_many: true,
                m2m_db_table: Some("blog_post_tags".into()),
                m2m_column_name: Some("post_id".into()),
                m2m_reverse_name: Some("tag_id".into()),
                ..relation("tags", "ManyToManyField", "Tag")
            },
        ])
    }

    #[test]
    fn partitions_fields() {
        let schema = normalize("blog", &blog_post()).unwrap();
        assert_eq!(schema.class_name, "Post");
        assert_eq!(schema.table, "blog_post");
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.many_to_one.len(), 1);
        assert_eq!(schema.one_to_many.len(), 1);
        assert_eq!(schema.many_to_many.len(), 1);
        assert!(schema.one_to_one.is_empty());

        let title = &schema.fields[1];
        assert_eq!(title.kind, FieldKind::CharField);
        assert_eq!(title.value_kind, ValueKind::String);
        assert_eq!(title.max_length, Some(50));
        assert!(title.required);

        assert_eq!(schema.fields[2].generation, GenerationStrategy::SetOnCreate);
        assert_eq!(schema.many_to_one[0].join_column, "author_id");
        assert_eq!(schema.one_to_many[0].name, "comment_set");
        assert_eq!(schema.one_to_many[0].peer_field.as_deref(), Some("post"));
        assert_eq!(
            schema.many_to_many[0].join_table.as_deref(),
            Some("blog_post_tags")
        );
        assert!(!schema.many_to_many[0].reverse);
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let model = blog_post();
        assert_eq!(normalize("blog", &model), normalize("blog", &model));
    }

    #[test]
    fn reverse_one_to_many_never_becomes_many_to_one() {
        let schema = normalize("blog", &blog_post()).unwrap();
        for m2o in &schema.many_to_one {
            assert!(schema.one_to_many.iter().all(|o2m| o2m.name != m2o.name));
        }
        assert!(schema.many_to_one.iter().all(|m| m.name != "comment_set"));
    }

    #[test]
    fn one_to_one_orientation() {
        let schema = normalize(
            "accounts",
            &model(vec![
                FieldDescriptor {
                    one_to_one: true,
                    null: true,
                    attname: Some("profile_id".into()),
                    ..relation("profile", "OneToOneField", "Profile")
                },
                FieldDescriptor {
                    one_to_one: true,
                    is_reverse: true,
                    attname: Some("ignored".into()),
                    peer_field: Some("owner".into()),
                    ..relation("badge", "OneToOneRel", "Badge")
                },
            ]),
        )
        .unwrap();

        let forward = &schema.one_to_one[0];
        assert!(!forward.reverse);
        assert!(forward.nullable);
        assert_eq!(forward.join_column.as_deref(), Some("profile_id"));
        assert_eq!(forward.peer_field, None);

        let reverse = &schema.one_to_one[1];
        assert!(reverse.reverse);
        assert_eq!(reverse.join_column, None);
        assert_eq!(reverse.peer_field.as_deref(), Some("owner"));
    }

    #[test]
    fn reverse_many_to_many_uses_peer_field() {
        let schema = normalize(
            "blog",
            &model(vec![FieldDescriptor {
                many_to_many: true,
                is_reverse: true,
                accessor_name: Some("post_set".into()),
                peer_field: Some("tags".into()),
                m2m_db_table: Some("blog_post_tags".into()),
                ..relation("post", "ManyToManyRel", "Post")
            }]),
        )
        .unwrap();

        let m2m = &schema.many_to_many[0];
        assert!(m2m.reverse);
        assert_eq!(m2m.name, "post_set");
        assert_eq!(m2m.peer_field.as_deref(), Some("tags"));
        assert_eq!(m2m.join_table, None);
        assert_eq!(m2m.join_column, None);
    }

    #[test]
    fn generic_foreign_keys_are_dropped() {
        let schema = normalize(
            "blog",
            &model(vec![FieldDescriptor {
                many_to_one: true,
                ..relation("content_object", "GenericForeignKey", "ContentType")
            }]),
        )
        .unwrap();
        assert!(schema.many_to_one.is_empty());
        assert_eq!(schema.skipped[0].reason, SkipReason::NoLocalAttribute);
    }

    #[test]
    fn unrecognized_plain_kinds_are_skipped() {
        let schema = normalize(
            "geo",
            &model(vec![
                FieldDescriptor::new("location", "PointField"),
                FieldDescriptor::new("name", "TextField"),
            ]),
        )
        .unwrap();
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(
            schema.skipped[0].reason,
            SkipReason::UnrecognizedKind("PointField".into())
        );
    }

    #[test]
    fn ambiguous_shapes_fail() {
        let none = model(vec![relation("author", "ForeignKey", "Author")]);
        assert_eq!(
            normalize("blog", &none),
            Err(SchemaError::AmbiguousFieldShape {
                field: "author".into(),
                matched: 0
            })
        );

        let two = model(vec![FieldDescriptor {
            many_to_one: true,
            one_to_one: true,
            ..relation("author", "ForeignKey", "Author")
        }]);
        assert!(matches!(
            normalize("blog", &two),
            Err(SchemaError::AmbiguousFieldShape { matched: 2, .. })
        ));
    }

    #[test]
    fn relation_kind_flagged_as_plain_is_a_contract_error() {
        let bad = model(vec![FieldDescriptor::new("author", "ForeignKey")]);
        assert!(matches!(
            normalize("blog", &bad),
            Err(SchemaError::UnmappedValueKind { .. })
        ));
    }
}
