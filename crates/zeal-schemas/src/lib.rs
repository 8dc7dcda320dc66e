//! Zeal Schemas - the minimal schema contract and its constructors
//!
//! This crate defines the [`Schema`] value consumed by the adapter engine in
//! `zeal-core`: a tagged, immutable validator carrying a pure
//! `validate(&Value) -> Result<(), String>` function, plus the constructors
//! that build primitive, composite, and combinator schemas over it.
//!
//! ## Components
//!
//! - **Schema contract**: [`Schema`], [`SchemaKind`], and the
//!   optional/nullable/nullish/readonly wrappers
//! - **Primitives**: string and number rule builders, integer, boolean,
//!   RFC 3339 date, literal, enumeration, null, any, unknown, never
//! - **Composites**: object (with unknown-key policies), array, tuple with
//!   open rest, record, map, set
//! - **Combinators**: union, intersection, discriminated union
//! - **Coercions**: loose scalar conversions backing the `coerce.*` namespace
//!
//! ## Quick Start
//!
//! ```rust
//! use zeal_schemas::composite::object;
//! use zeal_schemas::primitives::{number, string};
//! use serde_json::json;
//!
//! let user = object(vec![
//!     ("name".to_string(), string().non_empty().build()),
//!     ("age".to_string(), number().min(0.0).build()),
//! ]);
//!
//! assert!(user.validate(&json!({"name": "Ada", "age": 36})).is_ok());
//! assert!(user.validate(&json!({"name": "", "age": 36})).is_err());
//! ```
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

pub mod coerce;
pub mod combinator;
pub mod composite;
pub mod primitives;
pub mod schema;

// Re-export the contract types for convenience
pub use schema::{
    nullable_of, nullish_of, optional_of, readonly_of, type_name, Schema, SchemaKind, UnknownKeys,
    ValidateFn,
};
