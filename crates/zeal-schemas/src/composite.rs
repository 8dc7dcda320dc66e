//! Composite schema builders: objects, arrays, tuples, records, maps, sets
//!
//! Each builder captures its element schemas inside the validator closure and
//! also records them structurally (`shape`, `members`, `rest`) so the adapter
//! layer can derive new schemas without re-parsing anything.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use crate::schema::{type_name, Schema, SchemaKind, UnknownKeys};
use serde_json::Value;
use std::sync::Arc;

/// Object schema with passthrough unknown-key behavior.
pub fn object(entries: Vec<(String, Schema)>) -> Schema {
    object_with(entries, UnknownKeys::Passthrough)
}

/// Object schema with an explicit unknown-key policy.
///
/// A declared field must be present unless its schema accepts absence
/// (optional/nullish wrappers and the any/unknown primitives).
pub fn object_with(entries: Vec<(String, Schema)>, unknown_keys: UnknownKeys) -> Schema {
    let shape: Arc<[(String, Schema)]> = entries.into();
    let fields = shape.clone();
    Schema::new(
        SchemaKind::Object,
        Arc::new(move |value| {
            let map = value
                .as_object()
                .ok_or_else(|| format!("expected object, received {}", type_name(value)))?;
            if unknown_keys == UnknownKeys::Strict {
                for key in map.keys() {
                    if !fields.iter().any(|(name, _)| name == key) {
                        return Err(format!("unrecognized key \"{}\" in object", key));
                    }
                }
            }
            for (name, field) in fields.iter() {
                match map.get(name) {
                    Some(found) => field
                        .validate(found)
                        .map_err(|msg| format!("field \"{}\": {}", name, msg))?,
                    None => {
                        if !field.accepts_absent() {
                            return Err(format!("missing required field \"{}\"", name));
                        }
                    }
                }
            }
            Ok(())
        }),
    )
    .with_shape(shape)
    .with_unknown_keys(unknown_keys)
}

/// Builder for array schemas.
#[derive(Clone)]
pub struct ArraySchema {
    element: Schema,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

/// Start building an array schema over an element schema.
pub fn array_of(element: Schema) -> ArraySchema {
    ArraySchema {
        element,
        min_items: None,
        max_items: None,
    }
}

impl ArraySchema {
    /// Require at least `n` elements.
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Require at most `n` elements.
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Require at least one element.
    pub fn non_empty(self) -> Self {
        self.min_items(1)
    }

    /// Finalize the builder into a schema.
    pub fn build(self) -> Schema {
        let element = self.element.clone();
        let rules = self;
        Schema::new(
            SchemaKind::Array,
            Arc::new(move |value| {
                let items = value
                    .as_array()
                    .ok_or_else(|| format!("expected array, received {}", type_name(value)))?;
                if let Some(n) = rules.min_items {
                    if items.len() < n {
                        return Err(format!("array must contain at least {} element(s)", n));
                    }
                }
                if let Some(n) = rules.max_items {
                    if items.len() > n {
                        return Err(format!("array must contain at most {} element(s)", n));
                    }
                }
                for (index, item) in items.iter().enumerate() {
                    rules
                        .element
                        .validate(item)
                        .map_err(|msg| format!("element {}: {}", index, msg))?;
                }
                Ok(())
            }),
        )
        .with_members(vec![element])
    }
}

impl From<ArraySchema> for Schema {
    fn from(builder: ArraySchema) -> Self {
        builder.build()
    }
}

/// Closed tuple schema: fixed length, positional element schemas.
pub fn tuple(items: Vec<Schema>) -> Schema {
    build_tuple(items, None)
}

/// Open tuple schema: the declared positions are followed by any number of
/// elements matching the rest schema.
pub fn tuple_with_rest(items: Vec<Schema>, rest: Schema) -> Schema {
    build_tuple(items, Some(rest))
}

fn build_tuple(items: Vec<Schema>, rest: Option<Schema>) -> Schema {
    let positions = items.clone();
    let tail = rest.clone();
    let schema = Schema::new(
        SchemaKind::Tuple,
        Arc::new(move |value| {
            let found = value
                .as_array()
                .ok_or_else(|| format!("expected array, received {}", type_name(value)))?;
            match &tail {
                None if found.len() != positions.len() => {
                    return Err(format!(
                        "expected tuple of length {}, received length {}",
                        positions.len(),
                        found.len()
                    ));
                }
                Some(_) if found.len() < positions.len() => {
                    return Err(format!(
                        "expected tuple of at least length {}, received length {}",
                        positions.len(),
                        found.len()
                    ));
                }
                _ => {}
            }
            for (index, (item, schema)) in found.iter().zip(positions.iter()).enumerate() {
                schema
                    .validate(item)
                    .map_err(|msg| format!("element {}: {}", index, msg))?;
            }
            if let Some(rest) = &tail {
                for (offset, item) in found.iter().skip(positions.len()).enumerate() {
                    rest.validate(item).map_err(|msg| {
                        format!("element {}: {}", positions.len() + offset, msg)
                    })?;
                }
            }
            Ok(())
        }),
    )
    .with_members(items);
    match rest {
        Some(rest) => schema.with_rest(rest),
        None => schema,
    }
}

/// Record schema: an object whose values all match one schema.
pub fn record(value_schema: Schema) -> Schema {
    let values = value_schema.clone();
    Schema::new(
        SchemaKind::Record,
        Arc::new(move |value| {
            let map = value
                .as_object()
                .ok_or_else(|| format!("expected object, received {}", type_name(value)))?;
            for (key, found) in map {
                values
                    .validate(found)
                    .map_err(|msg| format!("field \"{}\": {}", key, msg))?;
            }
            Ok(())
        }),
    )
    .with_members(vec![value_schema])
}

/// Record schema whose keys are additionally validated as strings against a
/// key schema.
pub fn record_with_keys(key_schema: Schema, value_schema: Schema) -> Schema {
    let keys = key_schema.clone();
    let values = value_schema.clone();
    Schema::new(
        SchemaKind::Record,
        Arc::new(move |value| {
            let map = value
                .as_object()
                .ok_or_else(|| format!("expected object, received {}", type_name(value)))?;
            for (key, found) in map {
                keys.validate(&Value::String(key.clone()))
                    .map_err(|msg| format!("key \"{}\": {}", key, msg))?;
                values
                    .validate(found)
                    .map_err(|msg| format!("field \"{}\": {}", key, msg))?;
            }
            Ok(())
        }),
    )
    .with_members(vec![key_schema, value_schema])
}

/// Map schema: an array of `[key, value]` pairs.
pub fn map_of(key_schema: Schema, value_schema: Schema) -> Schema {
    let keys = key_schema.clone();
    let values = value_schema.clone();
    Schema::new(
        SchemaKind::Map,
        Arc::new(move |value| {
            let entries = value
                .as_array()
                .ok_or_else(|| format!("expected array of entries, received {}", type_name(value)))?;
            for (index, entry) in entries.iter().enumerate() {
                let pair = entry
                    .as_array()
                    .filter(|pair| pair.len() == 2)
                    .ok_or_else(|| format!("map entry {} must be a [key, value] pair", index))?;
                keys.validate(&pair[0])
                    .map_err(|msg| format!("map key at entry {}: {}", index, msg))?;
                values
                    .validate(&pair[1])
                    .map_err(|msg| format!("map value at entry {}: {}", index, msg))?;
            }
            Ok(())
        }),
    )
    .with_members(vec![key_schema, value_schema])
}

/// Set schema: an array whose elements match one schema and are pairwise
/// distinct under JSON equality.
pub fn set_of(element: Schema) -> Schema {
    let elements = element.clone();
    Schema::new(
        SchemaKind::Set,
        Arc::new(move |value| {
            let items = value
                .as_array()
                .ok_or_else(|| format!("expected array, received {}", type_name(value)))?;
            for (index, item) in items.iter().enumerate() {
                elements
                    .validate(item)
                    .map_err(|msg| format!("element {}: {}", index, msg))?;
            }
            for first in 0..items.len() {
                for second in (first + 1)..items.len() {
                    if items[first] == items[second] {
                        return Err(format!(
                            "set elements must be unique (duplicate at index {})",
                            second
                        ));
                    }
                }
            }
            Ok(())
        }),
    )
    .with_members(vec![element])
}
