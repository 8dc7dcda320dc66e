//! Zeal Core - immutable, chainable schema-validation adapter engine
//!
//! This crate wraps the minimal schema contract from `zeal-schemas` into an
//! immutable, chainable validator compatible with the parse/safe-parse
//! conventions of the external validation API it mirrors.
//!
//! # Main Components
//!
//! - **Adapter**: the immutable wrapper holding ordered refinement,
//!   super-refinement, and transform pipelines plus an optional fallback
//! - **Constructors**: the factory namespace (`object`, `union`, `tuple`,
//!   `coerce::*`, ...) building schemas and wrapping them in one step
//! - **Shape algebra**: `pick`/`omit`/`partial`/`required`/`keyof` over
//!   object entries stored inside the schema itself
//! - **Issue Reporting**: path-tracked issues with the external API's wire
//!   shapes for errors and safe-parse results
//!
//! # Example
//!
//! ```rust
//! use zeal_core::{object, string, number};
//! use serde_json::json;
//!
//! let user = object(vec![
//!     ("name", string()),
//!     ("age", number()),
//! ]);
//!
//! let outcome = user.safe_parse(&json!({"name": "Ada", "age": 36}));
//! assert!(outcome.is_success());
//!
//! let partial = user.partial();
//! assert!(partial.safe_parse(&json!({})).is_success());
//! ```
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

pub mod adapter;
pub mod constructors;
pub mod error;
pub mod issue;

// Re-export main types for convenience
pub use adapter::{Adapter, AsyncInput, BoxFuture, RefineContext};
pub use error::{Error, Result};
pub use issue::{Issue, ParseOutcome, PathSegment, ValidationError};

pub use constructors::{
    // Primitive adapters
    any, boolean, date, enumeration, integer, literal, never, null_value, number, string, unknown,

    // Composite adapters
    array, map, object, record, record_with_keys, set, strict_object, tuple,

    // Combinators
    discriminated_union, intersection, intersection_with_message, union,

    // Deferred construction and validation
    lazy, promise,

    // Schema wrapping
    adapt,

    // Coercing primitives
    coerce,
};

// Re-export the schema contract crate and its core types
pub use zeal_schemas as schemas;
pub use zeal_schemas::{Schema, SchemaKind, UnknownKeys};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
