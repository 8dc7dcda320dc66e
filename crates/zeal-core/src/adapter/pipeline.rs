//! Pipeline step types carried by an adapter
//!
//! Every step is `Arc`-shared: deriving a new adapter clones the step
//! vectors (copy-on-append), so siblings built from the same parent never
//! observe each other's additions.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use crate::issue::Issue;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future used by the asynchronous pipeline.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A pass/fail predicate with its rejection message.
#[derive(Clone)]
pub(crate) struct Refinement {
    pub test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    pub message: String,
}

/// Issue collector handed to super-refinements.
///
/// A super-refinement may add zero, one, or many issues; the pipeline stops
/// after the first call that added any.
#[derive(Debug, Default)]
pub struct RefineContext {
    issues: Vec<Issue>,
}

impl RefineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue against the value under validation.
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Record a root-path issue with the `custom` code.
    pub fn add_message<M: Into<String>>(&mut self, message: M) {
        self.add_issue(Issue::new(message).with_code("custom"));
    }

    pub(crate) fn take_issues(self) -> Vec<Issue> {
        self.issues
    }
}

pub(crate) type SuperRefineFn = Arc<dyn Fn(&Value, &mut RefineContext) + Send + Sync>;

/// One transform step.
///
/// The synchronous entry points reject adapters carrying an [`Transform::Async`]
/// step; the asynchronous pipeline awaits every step regardless of variant.
#[derive(Clone)]
pub(crate) enum Transform {
    Sync(Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>),
    Async(Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>),
}

/// A fallback payload: a fixed value or a factory producing one per use.
#[derive(Clone)]
pub(crate) enum FallbackValue {
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FallbackValue {
    pub fn produce(&self) -> Value {
        match self {
            FallbackValue::Value(value) => value.clone(),
            FallbackValue::Factory(factory) => factory(),
        }
    }
}

/// Fallback semantics attached to an adapter.
///
/// `OnMissing` is the `default` operator: it applies only to a null/absent
/// input and short-circuits validation entirely. `OnAnyFailure` is the
/// `catch` operator: it converts any downstream failure into success.
#[derive(Clone)]
pub(crate) enum Fallback {
    OnMissing(FallbackValue),
    OnAnyFailure(FallbackValue),
}

/// Coercion applied before schema validation on `coerce.*` adapters.
pub(crate) type Coercion = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_refine_context_collects_in_order() {
        let mut ctx = RefineContext::new();
        ctx.add_message("first");
        ctx.add_issue(Issue::new("second").at("field"));
        let issues = ctx.take_issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "first");
        assert_eq!(issues[0].code.as_deref(), Some("custom"));
        assert_eq!(issues[1].path_string(), "$.field");
    }

    #[test]
    fn test_fallback_value_and_factory() {
        let fixed = FallbackValue::Value(json!("x"));
        assert_eq!(fixed.produce(), json!("x"));

        let counter = FallbackValue::Factory(Arc::new(|| json!([1, 2])));
        assert_eq!(counter.produce(), json!([1, 2]));
        assert_eq!(counter.produce(), json!([1, 2]));
    }
}
