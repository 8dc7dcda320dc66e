//! Validation issues and the safe-parse result types
//!
//! A failing parse reports a [`ValidationError`] holding one or more
//! [`Issue`]s. The serialized shapes mirror the external API this engine is
//! compatible with: an error is `{"issues": [...]}` and a safe-parse result
//! is `{"success": true, "data": ...}` or `{"success": false, "error": ...}`.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A single validation issue with its location and optional code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable message
    pub message: String,
    /// Location of the issue inside the validated value; empty at the root
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// Machine-readable issue class, e.g. `"custom"` or a schema kind label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Issue {
    /// Create an issue at the root path with no code.
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            code: None,
        }
    }

    /// Attach a code.
    pub fn with_code<C: Into<String>>(mut self, code: C) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Replace the path.
    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Append one path segment.
    pub fn at<S: Into<PathSegment>>(mut self, segment: S) -> Self {
        self.path.push(segment.into());
        self
    }

    /// Render the path in JSONPath style, e.g. `$.items[0].name`.
    pub fn path_string(&self) -> String {
        let mut rendered = String::from("$");
        for segment in &self.path {
            rendered.push_str(&segment.to_string());
        }
        rendered
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (at {})", self.message, self.path_string())
        }
    }
}

/// The error object reported by a failing parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// All issues collected before the pipeline stopped
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// Create an error from a list of issues.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether the error carries no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} issue(s):", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<Issue> for ValidationError {
    fn from(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

/// Discriminated result of a safe parse.
///
/// Serializes as `{"success": true, "data": ...}` on success and
/// `{"success": false, "error": {"issues": [...]}}` on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Success { data: Value },
    Failure { error: ValidationError },
}

impl ParseOutcome {
    /// Wrap a successfully parsed value.
    pub fn success(data: Value) -> Self {
        ParseOutcome::Success { data }
    }

    /// Wrap a validation error.
    pub fn failure(error: ValidationError) -> Self {
        ParseOutcome::Failure { error }
    }

    /// Whether the parse succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    /// Whether the parse failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The parsed value, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ParseOutcome::Success { data } => Some(data),
            ParseOutcome::Failure { .. } => None,
        }
    }

    /// The validation error, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ParseOutcome::Success { .. } => None,
            ParseOutcome::Failure { error } => Some(error),
        }
    }

    /// Convert into a standard result.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            ParseOutcome::Success { data } => Ok(data),
            ParseOutcome::Failure { error } => Err(error),
        }
    }
}

impl From<Result<Value, ValidationError>> for ParseOutcome {
    fn from(result: Result<Value, ValidationError>) -> Self {
        match result {
            Ok(data) => ParseOutcome::success(data),
            Err(error) => ParseOutcome::failure(error),
        }
    }
}

impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ParseOutcome::Success { data } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            ParseOutcome::Failure { error } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}
