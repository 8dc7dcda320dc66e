//! Unit tests for the adapter parse pipeline
//!
//! Covers the fixed stage order (schema, refinements, super-refinements,
//! transforms), the first-failure-wins rules, and the two fallback variants.

use serde_json::json;
use zeal_core::{boolean, coerce, number, object, string, Issue};

#[cfg(test)]
mod parse_basics {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let adapter = string();
        let input = json!("untouched");
        assert_eq!(adapter.parse(&input).expect("valid"), input);
    }

    #[test]
    fn test_parse_throws_safe_parse_reports() {
        let adapter = string();
        let error = adapter.parse(&json!(1)).expect_err("mismatch");
        assert_eq!(error.issues.len(), 1);

        let outcome = adapter.safe_parse(&json!(1));
        assert!(outcome.is_failure());
        assert_eq!(outcome.error().expect("failure").issues.len(), 1);
    }

    #[test]
    fn test_schema_mismatch_issue_shape() {
        let outcome = string().safe_parse(&json!(false));
        let error = outcome.error().expect("failure");
        assert_eq!(error.issues[0].message, "expected string, received boolean");
        assert!(error.issues[0].path.is_empty());
        assert_eq!(error.issues[0].code.as_deref(), Some("string"));
    }
}

#[cfg(test)]
mod refinements {
    use super::*;

    #[test]
    fn test_first_refinement_failure_wins() {
        let adapter = string()
            .refine_with_message(|v| v.as_str().is_some_and(|s| s.len() > 5), "first message")
            .refine_with_message(|v| v.as_str().is_some_and(|s| s.contains('@')), "second message");

        // "ab" fails both predicates; only the first message is reported.
        let outcome = adapter.safe_parse(&json!("ab"));
        let error = outcome.error().expect("failure");
        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].message, "first message");
    }

    #[test]
    fn test_refine_issue_shape() {
        let adapter =
            string().refine_with_message(|v| v.as_str().is_some_and(|s| s.len() > 2), "too short");
        let outcome = adapter.safe_parse(&json!("ab"));
        let error = outcome.error().expect("failure");
        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].message, "too short");
        assert!(error.issues[0].path.is_empty());
    }

    #[test]
    fn test_refinements_run_in_registration_order() {
        let adapter = number()
            .refine_with_message(|v| v.as_f64().is_some_and(|n| n > 0.0), "must be positive")
            .refine_with_message(|v| v.as_f64().is_some_and(|n| n < 100.0), "must be small");
        assert!(adapter.safe_parse(&json!(50)).is_success());
        let error_low = adapter.safe_parse(&json!(-1));
        assert_eq!(
            error_low.error().expect("failure").issues[0].message,
            "must be positive"
        );
        let error_high = adapter.safe_parse(&json!(200));
        assert_eq!(
            error_high.error().expect("failure").issues[0].message,
            "must be small"
        );
    }

    #[test]
    fn test_default_refine_message() {
        let adapter = string().refine(|v| v.as_str().is_some_and(|s| !s.is_empty()));
        let outcome = adapter.safe_parse(&json!(""));
        assert_eq!(
            outcome.error().expect("failure").issues[0].message,
            "invalid value"
        );
    }
}

#[cfg(test)]
mod super_refinements {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_one_call_may_add_many_issues() {
        let adapter = string().super_refine(|value, ctx| {
            let text = value.as_str().unwrap_or_default();
            if text.len() < 8 {
                ctx.add_message("too short");
            }
            if !text.contains('!') {
                ctx.add_issue(Issue::new("missing exclamation mark").with_code("custom"));
            }
        });

        let outcome = adapter.safe_parse(&json!("quiet"));
        let error = outcome.error().expect("failure");
        assert_eq!(error.issues.len(), 2);
        assert_eq!(error.issues[0].message, "too short");
        assert_eq!(error.issues[1].message, "missing exclamation mark");
    }

    #[test]
    fn test_failing_call_stops_later_super_refinements() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = later_calls.clone();
        let adapter = string()
            .super_refine(|_, ctx| ctx.add_message("always fails"))
            .super_refine(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let outcome = adapter.safe_parse(&json!("anything"));
        assert!(outcome.is_failure());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_refinement_failure_skips_super_refinements() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let adapter = string()
            .refine_with_message(|_| false, "refinement failed")
            .super_refine(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let outcome = adapter.safe_parse(&json!("x"));
        assert_eq!(
            outcome.error().expect("failure").issues[0].message,
            "refinement failed"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[cfg(test)]
mod transforms {
    use super::*;

    #[test]
    fn test_transforms_chain_in_order() {
        let adapter = string()
            .transform(|v| Ok(json!(v.as_str().unwrap_or_default().to_uppercase())))
            .transform(|v| Ok(json!(format!("{}!", v.as_str().unwrap_or_default()))));
        assert_eq!(adapter.parse(&json!("hey")).expect("valid"), json!("HEY!"));
    }

    #[test]
    fn test_transform_error_becomes_single_issue() {
        let adapter = string().transform(|_| Err("conversion blew up".to_string()));
        let outcome = adapter.safe_parse(&json!("x"));
        let error = outcome.error().expect("failure");
        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].message, "conversion blew up");
        assert_eq!(error.issues[0].code.as_deref(), Some("transform"));
    }

    #[test]
    fn test_transforms_run_only_after_refinements_pass() {
        let adapter = string()
            .refine_with_message(|_| false, "blocked")
            .transform(|_| Ok(json!("transformed")));
        let outcome = adapter.safe_parse(&json!("x"));
        assert_eq!(outcome.error().expect("failure").issues[0].message, "blocked");
    }
}

#[cfg(test)]
mod fallbacks {
    use super::*;

    #[test]
    fn test_catch_applies_to_any_failure() {
        let adapter = string().catch("fallback");
        assert_eq!(adapter.parse(&json!(42)).expect("caught"), json!("fallback"));

        let refined = string()
            .refine_with_message(|_| false, "always fails")
            .catch("caught");
        assert_eq!(refined.parse(&json!("ok")).expect("caught"), json!("caught"));

        let transformed = string()
            .transform(|_| Err("boom".to_string()))
            .catch("saved");
        assert_eq!(transformed.parse(&json!("ok")).expect("caught"), json!("saved"));
    }

    #[test]
    fn test_default_fires_only_on_null_input() {
        let adapter = number().default(7);
        assert_eq!(adapter.parse(&json!(null)).expect("default"), json!(7));
        assert_eq!(adapter.parse(&json!(3)).expect("valid"), json!(3));

        // A present but failing input is not the default's business.
        assert!(adapter.safe_parse(&json!("oops")).is_failure());
    }

    #[test]
    fn test_default_short_circuits_validation() {
        let adapter = string()
            .refine_with_message(|_| false, "never runs on null")
            .default("given");
        assert_eq!(adapter.parse(&json!(null)).expect("default"), json!("given"));
    }

    #[test]
    fn test_fallback_factories() {
        let adapter = string().catch_with(|| json!("made fresh"));
        assert_eq!(adapter.parse(&json!(0)).expect("caught"), json!("made fresh"));

        let defaulted = boolean().default_with(|| json!(true));
        assert_eq!(defaulted.parse(&json!(null)).expect("default"), json!(true));
    }

    #[test]
    fn test_later_fallback_replaces_earlier() {
        let adapter = string().catch("first").catch("second");
        assert_eq!(adapter.parse(&json!(1)).expect("caught"), json!("second"));
    }
}

#[cfg(test)]
mod wrappers {
    use super::*;

    #[test]
    fn test_optional_nullable_nullish_accept_null() {
        assert!(string().optional().safe_parse(&json!(null)).is_success());
        assert!(string().nullable().safe_parse(&json!(null)).is_success());
        assert!(string().nullish().safe_parse(&json!(null)).is_success());
        assert!(string().safe_parse(&json!(null)).is_failure());
    }

    #[test]
    fn test_nullable_with_message() {
        let adapter = string().nullable_with_message("string or null only");
        let outcome = adapter.safe_parse(&json!(5));
        assert_eq!(
            outcome.error().expect("failure").issues[0].message,
            "string or null only"
        );
    }

    #[test]
    fn test_readonly_keeps_validation() {
        let adapter = number().readonly();
        assert!(adapter.safe_parse(&json!(1)).is_success());
        assert!(adapter.safe_parse(&json!("1")).is_failure());
    }
}

#[cfg(test)]
mod coercion {
    use super::*;

    #[test]
    fn test_coerced_value_flows_through_pipeline() {
        let adapter = coerce::number().transform(|v| {
            Ok(json!(v.as_i64().unwrap_or_default() * 2))
        });
        assert_eq!(adapter.parse(&json!("21")).expect("coerced"), json!(42));
    }

    #[test]
    fn test_coerce_string_and_boolean() {
        assert_eq!(coerce::string().parse(&json!(5)).expect("coerced"), json!("5"));
        assert_eq!(
            coerce::boolean().parse(&json!("")).expect("coerced"),
            json!(false)
        );
        assert_eq!(
            coerce::boolean().parse(&json!([1])).expect("coerced"),
            json!(true)
        );
    }

    #[test]
    fn test_coercion_failure_is_catchable() {
        let adapter = coerce::number().catch(0);
        assert_eq!(adapter.parse(&json!("abc")).expect("caught"), json!(0));

        let uncaught = coerce::number();
        let outcome = uncaught.safe_parse(&json!("abc"));
        assert_eq!(
            outcome.error().expect("failure").issues[0].message,
            "cannot coerce string \"abc\" to number"
        );
    }

    #[test]
    fn test_coerce_date_accepts_millis() {
        let adapter = coerce::date();
        assert!(adapter.safe_parse(&json!(0)).is_success());
        assert!(adapter.safe_parse(&json!("2025-06-01T12:00:00Z")).is_success());
        assert!(adapter.safe_parse(&json!(true)).is_failure());
    }
}

#[cfg(test)]
mod serialization {
    use super::*;

    #[test]
    fn test_safe_parse_wire_shapes() {
        let ok = object(vec![("a", string())]).safe_parse(&json!({"a": "x"}));
        assert_eq!(
            serde_json::to_value(&ok).expect("serializes"),
            json!({"success": true, "data": {"a": "x"}})
        );

        let err = string()
            .refine_with_message(|_| false, "nope")
            .safe_parse(&json!("x"));
        assert_eq!(
            serde_json::to_value(&err).expect("serializes"),
            json!({
                "success": false,
                "error": {"issues": [{"message": "nope", "path": [], "code": "custom"}]}
            })
        );
    }
}
