//! The minimal tagged schema contract wrapped by the adapter layer
//!
//! A [`Schema`] is a cloneable value carrying a `kind` discriminator and a
//! pure validation function returning `Ok(())` for accepted values or a
//! user-facing rejection message. Composite schemas additionally expose
//! their member list, object schemas their field entries, and tuple schemas
//! their optional rest schema. Storing entries inside the schema itself keeps
//! shape derivations (`pick`, `omit`, `partial`, ...) and the validator from
//! drifting apart.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Validation function: `Ok(())` accepts the value, `Err(message)` rejects
/// it with a user-facing message.
///
/// Validators must be pure and side-effect-free.
pub type ValidateFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Discriminator tag carried by every schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Literal,
    Enum,
    Null,
    Any,
    Unknown,
    Never,
    Object,
    Array,
    Tuple,
    Record,
    Map,
    Set,
    Union,
    DiscriminatedUnion,
    Intersection,
    Optional,
    Nullable,
    Nullish,
    Readonly,
    Lazy,
    Promise,
}

impl SchemaKind {
    /// Lower-case label used in mismatch messages and issue codes.
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Date => "date",
            SchemaKind::Literal => "literal",
            SchemaKind::Enum => "enum",
            SchemaKind::Null => "null",
            SchemaKind::Any => "any",
            SchemaKind::Unknown => "unknown",
            SchemaKind::Never => "never",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::Tuple => "tuple",
            SchemaKind::Record => "record",
            SchemaKind::Map => "map",
            SchemaKind::Set => "set",
            SchemaKind::Union => "union",
            SchemaKind::DiscriminatedUnion => "discriminated_union",
            SchemaKind::Intersection => "intersection",
            SchemaKind::Optional => "optional",
            SchemaKind::Nullable => "nullable",
            SchemaKind::Nullish => "nullish",
            SchemaKind::Readonly => "readonly",
            SchemaKind::Lazy => "lazy",
            SchemaKind::Promise => "promise",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Unknown-key policy for object schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Keys outside the declared entries are ignored.
    #[default]
    Passthrough,
    /// Keys outside the declared entries reject the object.
    Strict,
}

/// The tagged validator value consumed by the adapter layer.
///
/// Schemas are immutable: every constructor and wrapper returns a new value.
/// Cloning is cheap since the validator and all structural payloads are
/// reference-counted.
#[derive(Clone)]
pub struct Schema {
    kind: SchemaKind,
    validator: ValidateFn,
    members: Arc<[Schema]>,
    shape: Arc<[(String, Schema)]>,
    rest: Option<Arc<Schema>>,
    message: Option<Arc<str>>,
    literal: Option<Arc<Value>>,
    unknown_keys: UnknownKeys,
}

impl Schema {
    /// Create a schema from a kind tag and a validation function.
    pub fn new(kind: SchemaKind, validator: ValidateFn) -> Self {
        Self {
            kind,
            validator,
            members: Vec::new().into(),
            shape: Vec::new().into(),
            rest: None,
            message: None,
            literal: None,
            unknown_keys: UnknownKeys::Passthrough,
        }
    }

    pub(crate) fn with_members(mut self, members: Vec<Schema>) -> Self {
        self.members = members.into();
        self
    }

    pub(crate) fn with_shape(mut self, shape: Arc<[(String, Schema)]>) -> Self {
        self.shape = shape;
        self
    }

    pub(crate) fn with_rest(mut self, rest: Schema) -> Self {
        self.rest = Some(Arc::new(rest));
        self
    }

    pub(crate) fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message.map(Arc::from);
        self
    }

    pub(crate) fn with_literal(mut self, literal: Value) -> Self {
        self.literal = Some(Arc::new(literal));
        self
    }

    pub(crate) fn with_unknown_keys(mut self, unknown_keys: UnknownKeys) -> Self {
        self.unknown_keys = unknown_keys;
        self
    }

    /// The discriminator tag of this schema.
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Run the validator against a value.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        (self.validator)(value)
    }

    /// Member schemas of a union, discriminated union, or intersection;
    /// the single wrapped schema for wrapper kinds; the positional item
    /// schemas for tuples. Empty for every other kind.
    pub fn members(&self) -> &[Schema] {
        &self.members
    }

    /// Field entries of an object schema, in declaration order. Empty for
    /// every other kind.
    pub fn shape(&self) -> &[(String, Schema)] {
        &self.shape
    }

    /// The rest schema of an open tuple.
    pub fn rest(&self) -> Option<&Schema> {
        self.rest.as_deref()
    }

    /// Override message set at intersection construction, if any.
    pub fn override_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The expected value of a literal schema.
    pub fn literal_value(&self) -> Option<&Value> {
        self.literal.as_deref()
    }

    /// Unknown-key policy of an object schema.
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// Whether an absent object field satisfies this schema.
    pub fn accepts_absent(&self) -> bool {
        matches!(
            self.kind,
            SchemaKind::Optional | SchemaKind::Nullish | SchemaKind::Any | SchemaKind::Unknown
        )
    }

    /// The wrapped schema of an optional/nullable/nullish/readonly wrapper.
    pub fn unwrap_wrapper(&self) -> Option<&Schema> {
        match self.kind {
            SchemaKind::Optional
            | SchemaKind::Nullable
            | SchemaKind::Nullish
            | SchemaKind::Readonly => self.members.first(),
            _ => None,
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind)
            .field("members", &self.members.len())
            .field("shape", &self.shape.len())
            .field("unknown_keys", &self.unknown_keys)
            .finish()
    }
}

/// Describe a JSON value's runtime type for mismatch messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Wrap a schema to additionally accept an absent field or `null`.
pub fn optional_of(inner: Schema) -> Schema {
    let check = inner.clone();
    Schema::new(
        SchemaKind::Optional,
        Arc::new(move |value| {
            if value.is_null() {
                Ok(())
            } else {
                check.validate(value)
            }
        }),
    )
    .with_members(vec![inner])
}

/// Wrap a schema to additionally accept `null`. An override message, when
/// given, replaces the inner schema's rejection message.
pub fn nullable_of(inner: Schema, message: Option<String>) -> Schema {
    let check = inner.clone();
    Schema::new(
        SchemaKind::Nullable,
        Arc::new(move |value| {
            if value.is_null() {
                return Ok(());
            }
            check.validate(value).map_err(|original| match &message {
                Some(custom) => custom.clone(),
                None => original,
            })
        }),
    )
    .with_members(vec![inner])
}

/// Wrap a schema to additionally accept both an absent field and `null`.
pub fn nullish_of(inner: Schema) -> Schema {
    let check = inner.clone();
    Schema::new(
        SchemaKind::Nullish,
        Arc::new(move |value| {
            if value.is_null() {
                Ok(())
            } else {
                check.validate(value)
            }
        }),
    )
    .with_members(vec![inner])
}

/// Re-tag a schema as readonly. Validation behavior is unchanged; the tag
/// exists for API parity with the mirrored surface.
pub fn readonly_of(inner: Schema) -> Schema {
    let check = inner.clone();
    Schema::new(SchemaKind::Readonly, Arc::new(move |value| check.validate(value)))
        .with_members(vec![inner])
}
