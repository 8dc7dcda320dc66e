//! Constructor namespace mirroring the external validation API
//!
//! Each function builds the corresponding schema and wraps it into an
//! [`Adapter`]. Composite constructors accept adapters and embed each
//! argument's refinement and super-refinement steps into the element or
//! field schema via [`Adapter::to_schema`]; transforms and fallbacks cannot
//! be embedded. The `or`/`and` operators and the `.array()` method combine
//! raw schemas instead, as documented on each.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use crate::adapter::Adapter;
use serde_json::Value;
use zeal_schemas::{combinator, composite, primitives, Schema, UnknownKeys};

/// Wrap an already-built schema into an adapter.
pub fn adapt(schema: Schema) -> Adapter {
    Adapter::new(schema)
}

/// String adapter.
pub fn string() -> Adapter {
    Adapter::new(primitives::string().build())
}

/// Number adapter.
pub fn number() -> Adapter {
    Adapter::new(primitives::number().build())
}

/// Whole-number adapter.
pub fn integer() -> Adapter {
    Adapter::new(primitives::integer())
}

/// Boolean adapter.
pub fn boolean() -> Adapter {
    Adapter::new(primitives::boolean())
}

/// RFC 3339 date-string adapter.
pub fn date() -> Adapter {
    Adapter::new(primitives::date())
}

/// Adapter accepting exactly one value.
pub fn literal<V: Into<Value>>(value: V) -> Adapter {
    Adapter::new(primitives::literal(value.into()))
}

/// Adapter accepting any string out of a fixed set.
pub fn enumeration(values: &[&str]) -> Adapter {
    Adapter::new(primitives::enumeration(values.iter().copied()))
}

/// Adapter accepting only `null`.
pub fn null_value() -> Adapter {
    Adapter::new(primitives::null_value())
}

/// Adapter accepting every value.
pub fn any() -> Adapter {
    Adapter::new(primitives::any())
}

/// Adapter accepting every value, tagged unknown.
pub fn unknown() -> Adapter {
    Adapter::new(primitives::unknown())
}

/// Adapter rejecting every value.
pub fn never() -> Adapter {
    Adapter::new(primitives::never())
}

fn shape_entries(entries: Vec<(&str, Adapter)>) -> Vec<(String, Schema)> {
    entries
        .into_iter()
        .map(|(name, field)| (name.to_string(), field.to_schema()))
        .collect()
}

/// Object adapter ignoring unknown keys.
pub fn object(entries: Vec<(&str, Adapter)>) -> Adapter {
    Adapter::new(composite::object(shape_entries(entries)))
}

/// Object adapter rejecting unknown keys.
pub fn strict_object(entries: Vec<(&str, Adapter)>) -> Adapter {
    Adapter::new(composite::object_with(
        shape_entries(entries),
        UnknownKeys::Strict,
    ))
}

/// Array adapter over an element adapter, embedding its refinements.
pub fn array(element: &Adapter) -> Adapter {
    Adapter::new(composite::array_of(element.to_schema()).build())
}

/// Closed tuple adapter. Use [`Adapter::rest`] to open it.
pub fn tuple(items: Vec<Adapter>) -> Adapter {
    Adapter::new(composite::tuple(
        items.iter().map(Adapter::to_schema).collect(),
    ))
}

/// Record adapter: every object value matches `values`.
pub fn record(values: &Adapter) -> Adapter {
    Adapter::new(composite::record(values.to_schema()))
}

/// Record adapter with keys validated against `keys` as strings.
pub fn record_with_keys(keys: &Adapter, values: &Adapter) -> Adapter {
    Adapter::new(composite::record_with_keys(
        keys.to_schema(),
        values.to_schema(),
    ))
}

/// Map adapter: an array of `[key, value]` pairs.
pub fn map(keys: &Adapter, values: &Adapter) -> Adapter {
    Adapter::new(composite::map_of(keys.to_schema(), values.to_schema()))
}

/// Set adapter: an array of pairwise-distinct elements.
pub fn set(element: &Adapter) -> Adapter {
    Adapter::new(composite::set_of(element.to_schema()))
}

/// Union adapter; members are tried in declaration order, first match wins.
/// Panics when fewer than two members are given.
pub fn union(members: Vec<Adapter>) -> Adapter {
    Adapter::new(combinator::union_of(
        members.iter().map(Adapter::to_schema).collect(),
    ))
}

/// Discriminated-union adapter selecting the member to validate by the
/// input's value at `discriminator`.
///
/// Members are combined through their raw object schemas; whole-object
/// refinements on a member adapter are not carried into the union.
pub fn discriminated_union(discriminator: &str, members: Vec<Adapter>) -> Adapter {
    Adapter::new(combinator::discriminated_union_of(
        discriminator,
        members.iter().map(|member| member.schema().clone()).collect(),
    ))
}

/// Intersection adapter; every member must accept the value.
pub fn intersection(members: Vec<Adapter>) -> Adapter {
    Adapter::new(combinator::intersection_of(
        members.iter().map(Adapter::to_schema).collect(),
        None,
    ))
}

/// Intersection adapter reporting `message` for any member failure.
pub fn intersection_with_message(members: Vec<Adapter>, message: &str) -> Adapter {
    Adapter::new(combinator::intersection_of(
        members.iter().map(Adapter::to_schema).collect(),
        Some(message.to_string()),
    ))
}

/// Adapter whose schema-building thunk runs once per validation call,
/// supporting self-referential schema graphs.
pub fn lazy<F>(thunk: F) -> Adapter
where
    F: Fn() -> Adapter + Send + Sync + 'static,
{
    Adapter::lazy(thunk)
}

/// Adapter awaiting a deferred input on the asynchronous entry points
/// before validating the resolution against `inner`.
pub fn promise(inner: Adapter) -> Adapter {
    Adapter::promise(inner)
}

/// Coercing primitive adapters: the input is converted into the target
/// value space before schema validation, and the coerced value flows through
/// the rest of the pipeline.
pub mod coerce {
    use super::Adapter;
    use std::sync::Arc;
    use zeal_schemas::{coerce as rules, primitives};

    /// Stringify scalars, then validate as a string.
    pub fn string() -> Adapter {
        Adapter::new(primitives::string().build()).with_coercion(Arc::new(rules::to_string))
    }

    /// Parse numeric strings and map booleans/null to numbers.
    pub fn number() -> Adapter {
        Adapter::new(primitives::number().build()).with_coercion(Arc::new(rules::to_number))
    }

    /// Apply loose truthiness, then validate as a boolean.
    pub fn boolean() -> Adapter {
        Adapter::new(primitives::boolean()).with_coercion(Arc::new(rules::to_boolean))
    }

    /// Accept RFC 3339 strings and epoch-millisecond numbers.
    pub fn date() -> Adapter {
        Adapter::new(primitives::date()).with_coercion(Arc::new(rules::to_date))
    }
}
