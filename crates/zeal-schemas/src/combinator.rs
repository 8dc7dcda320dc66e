//! Union, intersection, and discriminated-union schema combinators
//!
//! Construction-time misuse (fewer than two members, a discriminated-union
//! member without a literal discriminator) panics immediately: these are
//! programmer errors, never data errors.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use crate::schema::{type_name, Schema, SchemaKind};
use serde_json::Value;
use std::sync::Arc;

/// Union schema: members are tried in declaration order and the first match
/// wins. When none match, a single generic message is reported; member
/// messages are discarded.
pub fn union_of(members: Vec<Schema>) -> Schema {
    assert!(
        members.len() >= 2,
        "a union requires at least two member schemas"
    );
    let shared: Arc<[Schema]> = members.clone().into();
    Schema::new(
        SchemaKind::Union,
        Arc::new(move |value| {
            for member in shared.iter() {
                if member.validate(value).is_ok() {
                    return Ok(());
                }
            }
            Err("invalid input: no union member matched".to_string())
        }),
    )
    .with_members(members)
}

/// Intersection schema: every member must accept the value. The first failing
/// member's message is reported, unless an override message was given.
pub fn intersection_of(members: Vec<Schema>, message: Option<String>) -> Schema {
    assert!(
        members.len() >= 2,
        "an intersection requires at least two member schemas"
    );
    let shared: Arc<[Schema]> = members.clone().into();
    let override_message = message.clone();
    Schema::new(
        SchemaKind::Intersection,
        Arc::new(move |value| {
            for member in shared.iter() {
                if let Err(original) = member.validate(value) {
                    return Err(match &override_message {
                        Some(custom) => custom.clone(),
                        None => original,
                    });
                }
            }
            Ok(())
        }),
    )
    .with_members(members)
    .with_message(message)
}

/// Discriminated-union schema: the member to validate is selected by the
/// input's value at `discriminator` before any member validator runs.
///
/// Every member must be an object schema whose shape carries a literal
/// schema at the discriminator key; discriminator values must be distinct.
pub fn discriminated_union_of(discriminator: impl Into<String>, members: Vec<Schema>) -> Schema {
    let discriminator = discriminator.into();
    assert!(
        members.len() >= 2,
        "a discriminated union requires at least two member schemas"
    );
    let mut table: Vec<(Value, Schema)> = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        assert!(
            member.kind() == SchemaKind::Object,
            "discriminated union member {} must be an object schema",
            index
        );
        let (_, field) = member
            .shape()
            .iter()
            .find(|(name, _)| name == &discriminator)
            .unwrap_or_else(|| {
                panic!(
                    "discriminated union member {} lacks discriminator field \"{}\"",
                    index, discriminator
                )
            });
        assert!(
            field.kind() == SchemaKind::Literal,
            "discriminator field \"{}\" of member {} must be a literal schema",
            discriminator,
            index
        );
        let tag = field
            .literal_value()
            .expect("literal schema carries its expected value");
        assert!(
            !table.iter().any(|(seen, _)| seen == tag),
            "duplicate discriminator value {} in discriminated union",
            tag
        );
        table.push((tag.clone(), member.clone()));
    }
    let field_name = discriminator;
    Schema::new(
        SchemaKind::DiscriminatedUnion,
        Arc::new(move |value| {
            let map = value
                .as_object()
                .ok_or_else(|| format!("expected object, received {}", type_name(value)))?;
            let tag = map
                .get(&field_name)
                .ok_or_else(|| format!("missing discriminator field \"{}\"", field_name))?;
            let member = table
                .iter()
                .find(|(seen, _)| seen == tag)
                .map(|(_, member)| member)
                .ok_or_else(|| {
                    format!(
                        "invalid discriminator value {} for field \"{}\"",
                        tag, field_name
                    )
                })?;
            member.validate(value)
        }),
    )
    .with_members(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::object;
    use crate::primitives::{literal, number, string};
    use serde_json::json;

    #[test]
    fn test_union_first_match_wins() {
        let schema = union_of(vec![string().build(), number().build()]);
        assert!(schema.validate(&json!("hi")).is_ok());
        assert!(schema.validate(&json!(5)).is_ok());
        assert_eq!(
            schema.validate(&json!(true)).unwrap_err(),
            "invalid input: no union member matched"
        );
    }

    #[test]
    #[should_panic(expected = "a union requires at least two member schemas")]
    fn test_union_requires_two_members() {
        union_of(vec![string().build()]);
    }

    #[test]
    fn test_intersection_reports_first_failure() {
        let schema = intersection_of(
            vec![string().min_len(2).build(), string().max_len(4).build()],
            None,
        );
        assert!(schema.validate(&json!("abc")).is_ok());
        assert_eq!(
            schema.validate(&json!("a")).unwrap_err(),
            "string must contain at least 2 character(s)"
        );
    }

    #[test]
    fn test_intersection_override_message() {
        let schema = intersection_of(
            vec![string().min_len(2).build(), string().max_len(4).build()],
            Some("between 2 and 4 characters".to_string()),
        );
        assert_eq!(
            schema.validate(&json!("a")).unwrap_err(),
            "between 2 and 4 characters"
        );
        assert_eq!(schema.override_message(), Some("between 2 and 4 characters"));
    }

    fn circle() -> Schema {
        object(vec![
            ("kind".to_string(), literal(json!("circle"))),
            ("radius".to_string(), number().build()),
        ])
    }

    fn square() -> Schema {
        object(vec![
            ("kind".to_string(), literal(json!("square"))),
            ("side".to_string(), number().build()),
        ])
    }

    #[test]
    fn test_discriminated_union_selects_member() {
        let schema = discriminated_union_of("kind", vec![circle(), square()]);
        assert!(schema
            .validate(&json!({"kind": "circle", "radius": 1.0}))
            .is_ok());
        assert_eq!(
            schema
                .validate(&json!({"kind": "circle", "side": 1.0}))
                .unwrap_err(),
            "missing required field \"radius\""
        );
    }

    #[test]
    fn test_discriminated_union_structural_failures() {
        let schema = discriminated_union_of("kind", vec![circle(), square()]);
        assert_eq!(
            schema.validate(&json!(7)).unwrap_err(),
            "expected object, received number"
        );
        assert_eq!(
            schema.validate(&json!({"radius": 1.0})).unwrap_err(),
            "missing discriminator field \"kind\""
        );
        assert_eq!(
            schema
                .validate(&json!({"kind": "triangle", "side": 1.0}))
                .unwrap_err(),
            "invalid discriminator value \"triangle\" for field \"kind\""
        );
    }

    #[test]
    #[should_panic(expected = "lacks discriminator field")]
    fn test_discriminated_union_member_without_discriminator() {
        let plain = object(vec![("radius".to_string(), number().build())]);
        discriminated_union_of("kind", vec![circle(), plain]);
    }

    #[test]
    #[should_panic(expected = "duplicate discriminator value")]
    fn test_discriminated_union_duplicate_tags() {
        discriminated_union_of("kind", vec![circle(), circle()]);
    }
}
