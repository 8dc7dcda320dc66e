//! The immutable, chainable validation adapter
//!
//! An [`Adapter`] wraps a [`Schema`] together with its ordered refinement,
//! super-refinement, and transform pipelines plus an optional fallback.
//! Every wrapper operator returns a *new* adapter; existing adapters are
//! never mutated, so a base schema can be shared across many derived
//! validators.
//!
//! The parse pipeline runs in a fixed order:
//!
//! 1. A null input with a `default` fallback short-circuits to the fallback.
//! 2. Coercion (for `coerce.*` adapters), then the schema validator.
//! 3. Refinements in registration order; the first failure wins.
//! 4. Super-refinements in registration order; the first call that adds any
//!    issues stops the pipeline and reports them all.
//! 5. Transforms in registration order; the last output is the final value.
//! 6. Any failure is overridden to success by a `catch` fallback.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

mod ops;
mod pipeline;
mod shape;

pub use pipeline::{BoxFuture, RefineContext};

use crate::error::Result;
use crate::issue::{Issue, ParseOutcome, ValidationError};
use pipeline::{Coercion, Fallback, Refinement, SuperRefineFn, Transform};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use zeal_schemas::{Schema, SchemaKind};

/// Delegation target for lazy and promise adapters.
#[derive(Clone)]
enum Delegate {
    None,
    Lazy(Arc<dyn Fn() -> Adapter + Send + Sync>),
    Promise(Arc<Adapter>),
}

/// Input accepted by the asynchronous entry points: either a value that is
/// already present or a deferred value still being produced.
pub enum AsyncInput {
    Ready(Value),
    Deferred(BoxFuture<'static, Value>),
}

impl AsyncInput {
    /// Wrap a future as a deferred input.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Value> + Send + 'static,
    {
        AsyncInput::Deferred(Box::pin(future))
    }
}

impl From<Value> for AsyncInput {
    fn from(value: Value) -> Self {
        AsyncInput::Ready(value)
    }
}

impl From<&Value> for AsyncInput {
    fn from(value: &Value) -> Self {
        AsyncInput::Ready(value.clone())
    }
}

impl fmt::Debug for AsyncInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncInput::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            AsyncInput::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// The immutable validator wrapper around a schema and its pipelines.
#[derive(Clone)]
pub struct Adapter {
    schema: Schema,
    coercion: Option<Coercion>,
    refinements: Vec<Refinement>,
    super_refines: Vec<SuperRefineFn>,
    transforms: Vec<Transform>,
    fallback: Option<Fallback>,
    delegate: Delegate,
}

impl Adapter {
    /// Wrap a schema into an adapter with empty pipelines.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            coercion: None,
            refinements: Vec::new(),
            super_refines: Vec::new(),
            transforms: Vec::new(),
            fallback: None,
            delegate: Delegate::None,
        }
    }

    /// Adapter whose schema-building thunk runs once per validation call,
    /// never at construction, so recursive schema graphs terminate.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: Fn() -> Adapter + Send + Sync + 'static,
    {
        let mut adapter = Adapter::new(Schema::new(SchemaKind::Lazy, Arc::new(|_| Ok(()))));
        adapter.delegate = Delegate::Lazy(Arc::new(thunk));
        adapter
    }

    /// Adapter whose asynchronous entry points await a deferred input before
    /// validating the resolution against `inner`. The synchronous entry
    /// points validate the input against `inner` directly, without
    /// unwrapping.
    pub fn promise(inner: Adapter) -> Self {
        let mut adapter = Adapter::new(Schema::new(SchemaKind::Promise, Arc::new(|_| Ok(()))));
        adapter.delegate = Delegate::Promise(Arc::new(inner));
        adapter
    }

    pub(crate) fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    /// The wrapped schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The wrapped schema's kind tag.
    pub fn kind(&self) -> SchemaKind {
        self.schema.kind()
    }

    fn has_async_transform(&self) -> bool {
        self.transforms
            .iter()
            .any(|step| matches!(step, Transform::Async(_)))
            || match &self.delegate {
                Delegate::Promise(inner) => inner.has_async_transform(),
                _ => false,
            }
    }

    /// Validate a value, returning the parsed (possibly transformed) value
    /// or the error object carrying all reported issues.
    pub fn parse(&self, input: &Value) -> std::result::Result<Value, ValidationError> {
        self.safe_parse(input).into_result()
    }

    /// Validate a value without an error path in the signature.
    ///
    /// Panics if the adapter carries an asynchronous transform; that is a
    /// programmer error, not a data error. Use [`Adapter::safe_parse_async`]
    /// instead.
    pub fn safe_parse(&self, input: &Value) -> ParseOutcome {
        assert!(
            !self.has_async_transform(),
            "synchronous parse on an adapter with an asynchronous transform; use parse_async"
        );
        if let Some(outcome) = self.missing_fallback(input) {
            return outcome;
        }
        match self.run_sync(input.clone()) {
            Ok(value) => ParseOutcome::success(value),
            Err(issues) => self.fail_or_catch(issues),
        }
    }

    /// Parse a JSON document and validate the decoded value.
    pub fn parse_str(&self, input: &str) -> Result<Value> {
        let value: Value = serde_json::from_str(input)?;
        Ok(self.parse(&value)?)
    }

    /// Asynchronous twin of [`Adapter::parse`].
    pub async fn parse_async<I>(&self, input: I) -> std::result::Result<Value, ValidationError>
    where
        I: Into<AsyncInput>,
    {
        self.safe_parse_async(input).await.into_result()
    }

    /// Asynchronous twin of [`Adapter::safe_parse`].
    ///
    /// The pipeline is identical; the only extra suspension point is
    /// awaiting a deferred input on a promise adapter. A deferred input
    /// presented to any other adapter fails validation without being
    /// awaited.
    pub async fn safe_parse_async<I>(&self, input: I) -> ParseOutcome
    where
        I: Into<AsyncInput>,
    {
        match input.into() {
            AsyncInput::Ready(value) => {
                if let Some(outcome) = self.missing_fallback(&value) {
                    return outcome;
                }
                match self.run_async(value).await {
                    Ok(value) => ParseOutcome::success(value),
                    Err(issues) => self.fail_or_catch(issues),
                }
            }
            AsyncInput::Deferred(future) => {
                if matches!(self.delegate, Delegate::Promise(_)) {
                    log::trace!("awaiting deferred input for promise adapter");
                    let value = future.await;
                    match self.run_async(value).await {
                        Ok(value) => ParseOutcome::success(value),
                        Err(issues) => self.fail_or_catch(issues),
                    }
                } else {
                    let kind = self.schema.kind().label();
                    let issue = Issue::new(format!("expected {}, received deferred value", kind))
                        .with_code(kind);
                    self.fail_or_catch(vec![issue])
                }
            }
        }
    }

    fn missing_fallback(&self, input: &Value) -> Option<ParseOutcome> {
        if input.is_null() {
            if let Some(Fallback::OnMissing(fallback)) = &self.fallback {
                log::debug!("null input, applying default fallback");
                return Some(ParseOutcome::success(fallback.produce()));
            }
        }
        None
    }

    fn fail_or_catch(&self, issues: Vec<Issue>) -> ParseOutcome {
        if let Some(Fallback::OnAnyFailure(fallback)) = &self.fallback {
            log::debug!(
                "validation failed with {} issue(s), applying catch fallback",
                issues.len()
            );
            return ParseOutcome::success(fallback.produce());
        }
        ParseOutcome::failure(ValidationError::new(issues))
    }

    fn run_sync(&self, value: Value) -> std::result::Result<Value, Vec<Issue>> {
        let mut value = self.check_base_sync(value)?;
        self.check_refinements(&value)?;
        for step in &self.transforms {
            value = match step {
                Transform::Sync(transform) => transform(value)
                    .map_err(|msg| vec![Issue::new(msg).with_code("transform")])?,
                Transform::Async(_) => {
                    unreachable!("async transform rejected before synchronous parse")
                }
            };
        }
        Ok(value)
    }

    fn check_base_sync(&self, mut value: Value) -> std::result::Result<Value, Vec<Issue>> {
        match &self.delegate {
            Delegate::None => {
                if let Some(coercion) = &self.coercion {
                    value = coercion(&value).map_err(|msg| self.mismatch(msg))?;
                }
                self.schema
                    .validate(&value)
                    .map_err(|msg| self.mismatch(msg))?;
                Ok(value)
            }
            Delegate::Lazy(thunk) => {
                log::trace!("resolving lazy schema");
                thunk()
                    .safe_parse(&value)
                    .into_result()
                    .map_err(|error| error.issues)
            }
            Delegate::Promise(inner) => inner
                .safe_parse(&value)
                .into_result()
                .map_err(|error| error.issues),
        }
    }

    fn check_refinements(&self, value: &Value) -> std::result::Result<(), Vec<Issue>> {
        for refinement in &self.refinements {
            if !(refinement.test)(value) {
                return Err(vec![
                    Issue::new(refinement.message.clone()).with_code("custom")
                ]);
            }
        }
        for super_refine in &self.super_refines {
            let mut ctx = RefineContext::new();
            super_refine(value, &mut ctx);
            let issues = ctx.take_issues();
            if !issues.is_empty() {
                return Err(issues);
            }
        }
        Ok(())
    }

    fn mismatch(&self, message: String) -> Vec<Issue> {
        vec![Issue::new(message).with_code(self.schema.kind().label())]
    }

    fn run_async<'a>(&'a self, value: Value) -> BoxFuture<'a, std::result::Result<Value, Vec<Issue>>> {
        Box::pin(async move {
            let mut value = self.check_base_async(value).await?;
            self.check_refinements(&value)?;
            for step in &self.transforms {
                value = match step {
                    Transform::Sync(transform) => transform(value)
                        .map_err(|msg| vec![Issue::new(msg).with_code("transform")])?,
                    Transform::Async(transform) => transform(value)
                        .await
                        .map_err(|msg| vec![Issue::new(msg).with_code("transform")])?,
                };
            }
            Ok(value)
        })
    }

    fn check_base_async<'a>(
        &'a self,
        value: Value,
    ) -> BoxFuture<'a, std::result::Result<Value, Vec<Issue>>> {
        Box::pin(async move {
            match &self.delegate {
                Delegate::None => {
                    let mut value = value;
                    if let Some(coercion) = &self.coercion {
                        value = coercion(&value).map_err(|msg| self.mismatch(msg))?;
                    }
                    self.schema
                        .validate(&value)
                        .map_err(|msg| self.mismatch(msg))?;
                    Ok(value)
                }
                Delegate::Lazy(thunk) => {
                    log::trace!("resolving lazy schema");
                    let resolved = thunk();
                    resolved
                        .safe_parse_async(value)
                        .await
                        .into_result()
                        .map_err(|error| error.issues)
                }
                Delegate::Promise(inner) => inner
                    .safe_parse_async(value)
                    .await
                    .into_result()
                    .map_err(|error| error.issues),
            }
        })
    }

    /// Compile this adapter into a standalone [`Schema`] for embedding as an
    /// object field, array element, or combinator member.
    ///
    /// The compiled schema runs coercion, schema validation, refinements,
    /// and super-refinements (first message wins). Transforms and fallbacks
    /// cannot be embedded: the schema contract validates values but never
    /// rewrites them.
    pub fn to_schema(&self) -> Schema {
        let plain = matches!(self.delegate, Delegate::None)
            && self.coercion.is_none()
            && self.refinements.is_empty()
            && self.super_refines.is_empty();
        if plain {
            return self.schema.clone();
        }
        let adapter = self.clone();
        Schema::new(
            self.schema.kind(),
            Arc::new(move |value| adapter.check(value)),
        )
    }

    fn check(&self, value: &Value) -> std::result::Result<(), String> {
        let mut coerced: Option<Value> = None;
        match &self.delegate {
            Delegate::Lazy(thunk) => thunk().check(value)?,
            Delegate::Promise(inner) => inner.check(value)?,
            Delegate::None => {
                if let Some(coercion) = &self.coercion {
                    coerced = Some(coercion(value)?);
                }
                let target = coerced.as_ref().unwrap_or(value);
                self.schema.validate(target)?;
            }
        }
        let target = coerced.as_ref().unwrap_or(value);
        for refinement in &self.refinements {
            if !(refinement.test)(target) {
                return Err(refinement.message.clone());
            }
        }
        for super_refine in &self.super_refines {
            let mut ctx = RefineContext::new();
            super_refine(target, &mut ctx);
            if let Some(first) = ctx.take_issues().into_iter().next() {
                return Err(first.message);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("kind", &self.schema.kind())
            .field("refinements", &self.refinements.len())
            .field("super_refines", &self.super_refines.len())
            .field("transforms", &self.transforms.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zeal_schemas::primitives::string;

    #[test]
    fn test_parse_identity_roundtrip() {
        let adapter = Adapter::new(string().build());
        assert_eq!(adapter.parse(&json!("same")).expect("valid"), json!("same"));
    }

    #[test]
    fn test_parse_reports_schema_mismatch() {
        let adapter = Adapter::new(string().build());
        let error = adapter.parse(&json!(5)).expect_err("number is not a string");
        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].message, "expected string, received number");
        assert!(error.issues[0].path.is_empty());
        assert_eq!(error.issues[0].code.as_deref(), Some("string"));
    }

    #[test]
    fn test_parse_str_decodes_then_validates() {
        let adapter = Adapter::new(string().build());
        assert_eq!(adapter.parse_str("\"ok\"").expect("valid"), json!("ok"));
        assert!(adapter.parse_str("{oops").is_err());
        assert!(adapter.parse_str("42").is_err());
    }

    #[test]
    fn test_to_schema_plain_adapter_returns_wrapped_schema() {
        let adapter = Adapter::new(string().build());
        let schema = adapter.to_schema();
        assert_eq!(schema.kind(), SchemaKind::String);
        assert!(schema.validate(&json!("x")).is_ok());
    }
}
