//! Primitive schema constructors
//!
//! String and number schemas are built through small rule builders; the
//! remaining primitives are plain constructors. Rule checks run in
//! declaration order and report the first failure.
//!
//! Copyright (c) 2025 Zeal Team
//! Licensed under the Apache-2.0 license

use crate::schema::{type_name, Schema, SchemaKind};
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use url::Url;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Builder for string schemas.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    min_len: Option<usize>,
    max_len: Option<usize>,
    exact_len: Option<usize>,
    pattern: Option<Regex>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    email: bool,
    url: bool,
}

/// Start building a string schema.
pub fn string() -> StringSchema {
    StringSchema::default()
}

impl StringSchema {
    /// Require at least `n` characters.
    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    /// Require at most `n` characters.
    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    /// Require exactly `n` characters.
    pub fn exact_len(mut self, n: usize) -> Self {
        self.exact_len = Some(n);
        self
    }

    /// Require at least one character.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Require the string to match a compiled pattern.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Require a leading substring.
    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    /// Require a trailing substring.
    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    /// Require an email-shaped string.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require a parseable URL.
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    /// Finalize the builder into a schema.
    pub fn build(self) -> Schema {
        let rules = self;
        Schema::new(
            SchemaKind::String,
            Arc::new(move |value| {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected string, received {}", type_name(value)))?;
                let length = text.chars().count();
                if let Some(n) = rules.exact_len {
                    if length != n {
                        return Err(format!("string must contain exactly {} character(s)", n));
                    }
                }
                if let Some(n) = rules.min_len {
                    if length < n {
                        return Err(format!("string must contain at least {} character(s)", n));
                    }
                }
                if let Some(n) = rules.max_len {
                    if length > n {
                        return Err(format!("string must contain at most {} character(s)", n));
                    }
                }
                if let Some(prefix) = &rules.starts_with {
                    if !text.starts_with(prefix.as_str()) {
                        return Err(format!("string must start with \"{}\"", prefix));
                    }
                }
                if let Some(suffix) = &rules.ends_with {
                    if !text.ends_with(suffix.as_str()) {
                        return Err(format!("string must end with \"{}\"", suffix));
                    }
                }
                if let Some(pattern) = &rules.pattern {
                    if !pattern.is_match(text) {
                        return Err(format!("string does not match pattern {}", pattern.as_str()));
                    }
                }
                if rules.email && !email_pattern().is_match(text) {
                    return Err("invalid email address".to_string());
                }
                if rules.url && Url::parse(text).is_err() {
                    return Err("invalid url".to_string());
                }
                Ok(())
            }),
        )
    }
}

impl From<StringSchema> for Schema {
    fn from(builder: StringSchema) -> Self {
        builder.build()
    }
}

/// Builder for number schemas.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    positive: bool,
    negative: bool,
    finite: bool,
}

/// Start building a number schema.
pub fn number() -> NumberSchema {
    NumberSchema::default()
}

impl NumberSchema {
    /// Require a value greater than or equal to `bound`.
    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    /// Require a value less than or equal to `bound`.
    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    /// Require a value greater than zero.
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    /// Require a value less than zero.
    pub fn negative(mut self) -> Self {
        self.negative = true;
        self
    }

    /// Require a finite value.
    pub fn finite(mut self) -> Self {
        self.finite = true;
        self
    }

    /// Finalize the builder into a schema.
    pub fn build(self) -> Schema {
        let rules = self;
        Schema::new(
            SchemaKind::Number,
            Arc::new(move |value| {
                let n = value
                    .as_f64()
                    .ok_or_else(|| format!("expected number, received {}", type_name(value)))?;
                if let Some(bound) = rules.min {
                    if n < bound {
                        return Err(format!("number must be greater than or equal to {}", bound));
                    }
                }
                if let Some(bound) = rules.max {
                    if n > bound {
                        return Err(format!("number must be less than or equal to {}", bound));
                    }
                }
                if rules.positive && n <= 0.0 {
                    return Err("number must be positive".to_string());
                }
                if rules.negative && n >= 0.0 {
                    return Err("number must be negative".to_string());
                }
                if rules.finite && !n.is_finite() {
                    return Err("number must be finite".to_string());
                }
                Ok(())
            }),
        )
    }
}

impl From<NumberSchema> for Schema {
    fn from(builder: NumberSchema) -> Self {
        builder.build()
    }
}

/// Schema accepting whole numbers only.
pub fn integer() -> Schema {
    Schema::new(
        SchemaKind::Integer,
        Arc::new(|value| {
            if value.is_i64() || value.is_u64() {
                return Ok(());
            }
            match value.as_f64() {
                Some(n) if n.fract() == 0.0 => Ok(()),
                Some(_) => Err("expected integer, received fractional number".to_string()),
                None => Err(format!("expected integer, received {}", type_name(value))),
            }
        }),
    )
}

/// Schema accepting booleans.
pub fn boolean() -> Schema {
    Schema::new(
        SchemaKind::Boolean,
        Arc::new(|value| {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(format!("expected boolean, received {}", type_name(value)))
            }
        }),
    )
}

/// Schema accepting RFC 3339 date-time strings.
pub fn date() -> Schema {
    Schema::new(
        SchemaKind::Date,
        Arc::new(|value| {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected date, received {}", type_name(value)))?;
            chrono::DateTime::parse_from_rfc3339(text)
                .map(|_| ())
                .map_err(|_| "invalid RFC 3339 date string".to_string())
        }),
    )
}

/// Schema accepting exactly one value, compared by JSON equality.
pub fn literal(expected: Value) -> Schema {
    let display = expected.to_string();
    let check = expected.clone();
    Schema::new(
        SchemaKind::Literal,
        Arc::new(move |value| {
            if *value == check {
                Ok(())
            } else {
                Err(format!("expected literal {}, received {}", display, value))
            }
        }),
    )
    .with_literal(expected)
}

/// Schema accepting any string out of a fixed set.
pub fn enumeration<I, S>(values: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
    let listing = allowed
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(" | ");
    Schema::new(
        SchemaKind::Enum,
        Arc::new(move |value| {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected string, received {}", type_name(value)))?;
            if allowed.iter().any(|v| v == text) {
                Ok(())
            } else {
                Err(format!("expected one of {}, received \"{}\"", listing, text))
            }
        }),
    )
}

/// Schema accepting only `null`.
pub fn null_value() -> Schema {
    Schema::new(
        SchemaKind::Null,
        Arc::new(|value| {
            if value.is_null() {
                Ok(())
            } else {
                Err(format!("expected null, received {}", type_name(value)))
            }
        }),
    )
}

/// Schema accepting every value.
pub fn any() -> Schema {
    Schema::new(SchemaKind::Any, Arc::new(|_| Ok(())))
}

/// Schema accepting every value, tagged unknown.
pub fn unknown() -> Schema {
    Schema::new(SchemaKind::Unknown, Arc::new(|_| Ok(())))
}

/// Schema rejecting every value.
pub fn never() -> Schema {
    Schema::new(
        SchemaKind::Never,
        Arc::new(|_| Err("no value is accepted by a never schema".to_string())),
    )
}
