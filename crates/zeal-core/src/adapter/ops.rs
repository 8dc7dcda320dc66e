//! Wrapper operators deriving new adapters
//!
//! Pipeline retention is per operator and documented on each method:
//! `optional`/`nullable`/`nullish`/`readonly` carry the pipelines over,
//! `array`/`or`/`and` combine the raw underlying schemas and drop them, and
//! `with_pipelines_from` re-applies another adapter's pipelines explicitly.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use super::pipeline::{BoxFuture, Fallback, FallbackValue, RefineContext, Refinement, Transform};
use super::Adapter;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use zeal_schemas::combinator::{intersection_of, union_of};
use zeal_schemas::composite::{array_of, tuple_with_rest};
use zeal_schemas::{nullable_of, nullish_of, optional_of, readonly_of, SchemaKind};

impl Adapter {
    /// Additionally accept an absent field or `null`. Pipelines carry over.
    pub fn optional(&self) -> Adapter {
        let mut next = self.clone();
        next.schema = optional_of(self.schema.clone());
        next
    }

    /// Additionally accept `null`. Pipelines carry over.
    pub fn nullable(&self) -> Adapter {
        let mut next = self.clone();
        next.schema = nullable_of(self.schema.clone(), None);
        next
    }

    /// Additionally accept `null`, replacing the inner rejection message.
    pub fn nullable_with_message<M: Into<String>>(&self, message: M) -> Adapter {
        let mut next = self.clone();
        next.schema = nullable_of(self.schema.clone(), Some(message.into()));
        next
    }

    /// Additionally accept both an absent field and `null`. Pipelines carry
    /// over.
    pub fn nullish(&self) -> Adapter {
        let mut next = self.clone();
        next.schema = nullish_of(self.schema.clone());
        next
    }

    /// Re-tag the schema readonly. Pipelines carry over.
    pub fn readonly(&self) -> Adapter {
        let mut next = self.clone();
        next.schema = readonly_of(self.schema.clone());
        next
    }

    /// Attach a fallback applied only to a null/absent input, replacing any
    /// existing fallback. The fallback short-circuits validation entirely.
    pub fn default<V: Into<Value>>(&self, value: V) -> Adapter {
        let mut next = self.clone();
        next.fallback = Some(Fallback::OnMissing(FallbackValue::Value(value.into())));
        next
    }

    /// Like [`Adapter::default`], producing the fallback per use.
    pub fn default_with<F>(&self, factory: F) -> Adapter
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.fallback = Some(Fallback::OnMissing(FallbackValue::Factory(Arc::new(factory))));
        next
    }

    /// Attach a fallback applied to *any* downstream failure (schema
    /// mismatch, refinement failure, super-refine issues, or transform
    /// error), replacing any existing fallback.
    pub fn catch<V: Into<Value>>(&self, value: V) -> Adapter {
        let mut next = self.clone();
        next.fallback = Some(Fallback::OnAnyFailure(FallbackValue::Value(value.into())));
        next
    }

    /// Like [`Adapter::catch`], producing the fallback per use.
    pub fn catch_with<F>(&self, factory: F) -> Adapter
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.fallback = Some(Fallback::OnAnyFailure(FallbackValue::Factory(Arc::new(
            factory,
        ))));
        next
    }

    /// Wrap the *raw* underlying schema in an array-of schema. All pipelines
    /// reset: element-level refinements are not lifted onto the array. Use
    /// the free `array` constructor to embed them.
    pub fn array(&self) -> Adapter {
        Adapter::new(array_of(self.schema.clone()).build())
    }

    /// Append a pass/fail refinement with a generic message. All prior
    /// pipelines are preserved.
    pub fn refine<F>(&self, test: F) -> Adapter
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.refine_with_message(test, "invalid value")
    }

    /// Append a pass/fail refinement with its rejection message.
    pub fn refine_with_message<F, M>(&self, test: F, message: M) -> Adapter
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        M: Into<String>,
    {
        let mut next = self.clone();
        next.refinements.push(Refinement {
            test: Arc::new(test),
            message: message.into(),
        });
        next
    }

    /// Append a super-refinement that may add several issues through its
    /// context. The pipeline stops after the first call that added any.
    pub fn super_refine<F>(&self, refine: F) -> Adapter
    where
        F: Fn(&Value, &mut RefineContext) + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.super_refines.push(Arc::new(refine));
        next
    }

    /// Append a synchronous transform. Transforms run after all refinements
    /// pass, each feeding its output into the next.
    pub fn transform<F>(&self, transform: F) -> Adapter
    where
        F: Fn(Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.transforms.push(Transform::Sync(Arc::new(transform)));
        next
    }

    /// Append an asynchronous transform. The adapter can then only be run
    /// through the asynchronous entry points.
    pub fn transform_async<F, Fut>(&self, transform: F) -> Adapter
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Value, String>> + Send + 'static,
    {
        let mut next = self.clone();
        let step = move |value: Value| -> BoxFuture<'static, std::result::Result<Value, String>> {
            Box::pin(transform(value))
        };
        next.transforms.push(Transform::Async(Arc::new(step)));
        next
    }

    /// Fresh adapter around a union of the two raw underlying schemas. All
    /// pipelines on both sides are dropped; re-apply with
    /// [`Adapter::with_pipelines_from`] if needed.
    pub fn or(&self, other: &Adapter) -> Adapter {
        Adapter::new(union_of(vec![self.schema.clone(), other.schema.clone()]))
    }

    /// Fresh adapter around an intersection of the two raw underlying
    /// schemas, dropping pipelines like [`Adapter::or`].
    ///
    /// When the current schema is already an intersection, the new member is
    /// appended to its existing member list instead of nesting, keeping
    /// validation a single flat loop and preserving any override message.
    pub fn and(&self, other: &Adapter) -> Adapter {
        let schema = if self.schema.kind() == SchemaKind::Intersection {
            let mut members = self.schema.members().to_vec();
            members.push(other.schema.clone());
            intersection_of(members, self.schema.override_message().map(String::from))
        } else {
            intersection_of(vec![self.schema.clone(), other.schema.clone()], None)
        };
        Adapter::new(schema)
    }

    /// Rebuild a tuple adapter with an open rest schema. Pipelines carry
    /// over. Panics when the adapter does not wrap a tuple schema.
    pub fn rest(&self, rest: &Adapter) -> Adapter {
        assert!(
            self.schema.kind() == SchemaKind::Tuple,
            "rest requires a tuple adapter"
        );
        let mut next = self.clone();
        next.schema = tuple_with_rest(self.schema.members().to_vec(), rest.to_schema());
        next
    }

    /// Append another adapter's refinement, super-refinement, and transform
    /// pipelines after this adapter's own. The explicit preservation helper
    /// for pipeline-dropping operators like `or`/`and`/`array`.
    pub fn with_pipelines_from(&self, other: &Adapter) -> Adapter {
        let mut next = self.clone();
        next.refinements.extend(other.refinements.iter().cloned());
        next.super_refines.extend(other.super_refines.iter().cloned());
        next.transforms.extend(other.transforms.iter().cloned());
        next
    }
}
