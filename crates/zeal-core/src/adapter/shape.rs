//! Object-shape algebra
//!
//! Each derivation reads the entries stored inside the current object schema,
//! rewrites them, and rebuilds schema and entries together, so chained calls
//! (`pick().omit()`, `partial().required()`) always compose on the
//! already-narrowed field set. Invoking these on a non-object adapter is a
//! programmer error and panics.

use super::Adapter;
use zeal_schemas::composite::object_with;
use zeal_schemas::primitives::enumeration;
use zeal_schemas::{optional_of, Schema, SchemaKind, UnknownKeys};

fn unwrap_required(mut schema: Schema) -> Schema {
    while matches!(schema.kind(), SchemaKind::Optional | SchemaKind::Nullish) {
        let inner = match schema.unwrap_wrapper() {
            Some(inner) => inner.clone(),
            None => break,
        };
        schema = inner;
    }
    schema
}

impl Adapter {
    fn object_entries(&self) -> Vec<(String, Schema)> {
        assert!(
            self.schema.kind() == SchemaKind::Object,
            "shape algebra requires an object adapter"
        );
        self.schema.shape().to_vec()
    }

    fn rebuild_object(&self, entries: Vec<(String, Schema)>, unknown_keys: UnknownKeys) -> Adapter {
        let mut next = self.clone();
        next.schema = object_with(entries, unknown_keys);
        next
    }

    /// Field entries of an object adapter, in declaration order.
    pub fn shape(&self) -> &[(String, Schema)] {
        self.schema.shape()
    }

    /// Reject keys outside the declared entries. Entries unchanged.
    pub fn strict(&self) -> Adapter {
        let entries = self.object_entries();
        self.rebuild_object(entries, UnknownKeys::Strict)
    }

    /// Allow keys outside the declared entries. Entries unchanged.
    pub fn passthrough(&self) -> Adapter {
        let entries = self.object_entries();
        self.rebuild_object(entries, UnknownKeys::Passthrough)
    }

    /// Make every current entry optional.
    pub fn partial(&self) -> Adapter {
        let entries = self
            .object_entries()
            .into_iter()
            .map(|(name, schema)| {
                let schema = if schema.accepts_absent() {
                    schema
                } else {
                    optional_of(schema)
                };
                (name, schema)
            })
            .collect();
        self.rebuild_object(entries, self.schema.unknown_keys())
    }

    /// Make every current entry required, unwrapping optional/nullish
    /// wrappers.
    pub fn required(&self) -> Adapter {
        let entries = self
            .object_entries()
            .into_iter()
            .map(|(name, schema)| (name, unwrap_required(schema)))
            .collect();
        self.rebuild_object(entries, self.schema.unknown_keys())
    }

    /// Keep only the entries named by the mask. Mask keys absent from the
    /// current entries are silently ignored.
    pub fn pick(&self, keys: &[&str]) -> Adapter {
        let entries = self
            .object_entries()
            .into_iter()
            .filter(|(name, _)| keys.contains(&name.as_str()))
            .collect();
        self.rebuild_object(entries, self.schema.unknown_keys())
    }

    /// Drop the entries named by the mask.
    pub fn omit(&self, keys: &[&str]) -> Adapter {
        let entries = self
            .object_entries()
            .into_iter()
            .filter(|(name, _)| !keys.contains(&name.as_str()))
            .collect();
        self.rebuild_object(entries, self.schema.unknown_keys())
    }

    /// Enum-style adapter accepting exactly the current entries' keys. Not
    /// an object schema.
    pub fn keyof(&self) -> Adapter {
        let keys = self
            .object_entries()
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        Adapter::new(enumeration(keys))
    }
}
