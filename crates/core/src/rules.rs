//! Declarative per-field input validation.
//!
//! Validation is a pure function from a raw attribute map and a rule set to
//! either a cleaned attribute map (only the fields that passed) or a map of
//! every violated field to its human-readable messages. It never touches a
//! store: foreign-key existence is injected as a predicate so the rules stay
//! free of storage types.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::post::TITLE_MAX_LEN;

/// Predicate deciding whether a referenced user id exists.
pub type UserRefCheck = Arc<dyn Fn(u64) -> bool + Send + Sync>;

const TITLE_REQUIRED: &str = "The title field is required.";
const TITLE_STRING: &str = "The title must be a valid string.";
const TITLE_MAX: &str = "The title may not be greater than 255 characters.";
const CONTENT_REQUIRED: &str = "The content field is required.";
const CONTENT_STRING: &str = "The content must be a valid string.";
const USER_ID_REQUIRED: &str = "The user_id field is required.";
const USER_ID_EXISTS: &str = "The user_id must be a valid user id.";

/// A single check applied to a field value that is present.
#[derive(Clone)]
enum Check {
    /// Value must be a JSON string.
    Str,
    /// String value must be at most this many characters.
    MaxLen(usize),
    /// Value must be an unsigned integer accepted by the predicate.
    UserRef(UserRefCheck),
}

impl Check {
    fn passes(&self, value: &Value) -> bool {
        match self {
            Check::Str => value.is_string(),
            Check::MaxLen(limit) => match value.as_str() {
                Some(s) => s.chars().count() <= *limit,
                // Type mismatches belong to the Str check.
                None => true,
            },
            Check::UserRef(exists) => match value.as_u64() {
                Some(id) => exists(id),
                None => false,
            },
        }
    }
}

/// Rules for one named field: presence requirement plus ordered checks.
struct FieldRule {
    field: &'static str,
    /// Message to report when the field is absent; `None` marks it optional.
    required: Option<&'static str>,
    checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            required: Some(message),
            checks: Vec::new(),
        }
    }

    fn optional(field: &'static str) -> Self {
        Self {
            field,
            required: None,
            checks: Vec::new(),
        }
    }

    fn string(mut self, message: &'static str) -> Self {
        self.checks.push((Check::Str, message));
        self
    }

    fn max_len(mut self, limit: usize, message: &'static str) -> Self {
        self.checks.push((Check::MaxLen(limit), message));
        self
    }

    fn user_ref(mut self, exists: UserRefCheck, message: &'static str) -> Self {
        self.checks.push((Check::UserRef(exists), message));
        self
    }
}

/// An ordered collection of field rules.
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    fn new() -> Self {
        Self { rules: Vec::new() }
    }

    fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Rules for creating a post: `title` required string of at most 255
/// characters, `content` required string, `user_id` required and referencing
/// an existing user.
pub fn post_create_rules(user_exists: UserRefCheck) -> RuleSet {
    RuleSet::new()
        .field(
            FieldRule::required("title", TITLE_REQUIRED)
                .string(TITLE_STRING)
                .max_len(TITLE_MAX_LEN, TITLE_MAX),
        )
        .field(FieldRule::required("content", CONTENT_REQUIRED).string(CONTENT_STRING))
        .field(
            FieldRule::required("user_id", USER_ID_REQUIRED).user_ref(user_exists, USER_ID_EXISTS),
        )
}

/// Rules for updating a post: `title` and `content` optional. Ownership is
/// not reassignable, so `user_id` is never accepted here.
pub fn post_update_rules() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRule::optional("title")
                .string(TITLE_STRING)
                .max_len(TITLE_MAX_LEN, TITLE_MAX),
        )
        .field(FieldRule::optional("content").string(CONTENT_STRING))
}

/// Per-field failure messages, ordered by field name for stable output.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The subset of the raw input that passed every applicable check.
///
/// Fields without a rule are dropped, never reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedFields(Map<String, Value>);

impl CleanedFields {
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Evaluate `rules` against a raw attribute map.
///
/// All violated fields are reported in one result; a failure never
/// short-circuits the remaining fields. Within one field, checks run in
/// declaration order and stop at the first failure, since later checks
/// assume the earlier ones held (a length check on a non-string value is
/// meaningless).
pub fn validate(raw: &Value, rules: &RuleSet) -> Result<CleanedFields, FieldErrors> {
    let input = raw.as_object();

    let mut cleaned = Map::new();
    let mut errors = FieldErrors::new();

    for rule in &rules.rules {
        // JSON null counts as absent, matching the presence semantics of
        // form input.
        let value = input
            .and_then(|map| map.get(rule.field))
            .filter(|v| !v.is_null());

        let Some(value) = value else {
            if let Some(message) = rule.required {
                errors
                    .entry(rule.field.to_string())
                    .or_default()
                    .push(message.to_string());
            }
            continue;
        };

        let failed = rule
            .checks
            .iter()
            .find(|(check, _)| !check.passes(value));

        match failed {
            Some((_, message)) => {
                errors
                    .entry(rule.field.to_string())
                    .or_default()
                    .push((*message).to_string());
            }
            None => {
                cleaned.insert(rule.field.to_string(), value.clone());
            }
        }
    }

    if errors.is_empty() {
        Ok(CleanedFields(cleaned))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn any_user() -> UserRefCheck {
        Arc::new(|_| true)
    }

    fn no_user() -> UserRefCheck {
        Arc::new(|_| false)
    }

    fn only_user(id: u64) -> UserRefCheck {
        Arc::new(move |candidate| candidate == id)
    }

    #[test]
    fn valid_create_input_is_cleaned() {
        let rules = post_create_rules(only_user(1));
        let raw = json!({
            "title": "New Title",
            "content": "New Content",
            "user_id": 1,
            "slug": "ignored",
        });

        let cleaned = validate(&raw, &rules).unwrap();
        assert_eq!(
            cleaned.into_value(),
            json!({"title": "New Title", "content": "New Content", "user_id": 1})
        );
    }

    #[test]
    fn missing_fields_are_all_reported_at_once() {
        let rules = post_create_rules(any_user());
        let errors = validate(&json!({}), &rules).unwrap_err();

        assert_eq!(errors["title"], vec![TITLE_REQUIRED]);
        assert_eq!(errors["content"], vec![CONTENT_REQUIRED]);
        assert_eq!(errors["user_id"], vec![USER_ID_REQUIRED]);
    }

    #[test]
    fn non_object_input_reports_required_fields() {
        let rules = post_create_rules(any_user());
        let errors = validate(&json!("not a map"), &rules).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn type_failure_suppresses_the_length_check() {
        let rules = post_create_rules(any_user());
        let raw = json!({"title": 123, "content": "ok", "user_id": 1});

        let errors = validate(&raw, &rules).unwrap_err();
        assert_eq!(errors["title"], vec![TITLE_STRING]);
    }

    #[test]
    fn overlong_title_is_rejected_at_the_boundary() {
        let rules = post_create_rules(any_user());

        let at_limit = json!({"title": "x".repeat(255), "content": "ok", "user_id": 1});
        assert!(validate(&at_limit, &rules).is_ok());

        let over = json!({"title": "x".repeat(256), "content": "ok", "user_id": 1});
        let errors = validate(&over, &rules).unwrap_err();
        assert_eq!(errors["title"], vec![TITLE_MAX]);
    }

    #[test]
    fn unknown_user_reference_is_rejected() {
        let rules = post_create_rules(no_user());
        let raw = json!({"title": "t", "content": "c", "user_id": 999999});

        let errors = validate(&raw, &rules).unwrap_err();
        assert_eq!(errors["user_id"], vec![USER_ID_EXISTS]);
    }

    #[test]
    fn non_integer_user_reference_is_rejected() {
        let rules = post_create_rules(any_user());
        let raw = json!({"title": "t", "content": "c", "user_id": "1"});

        let errors = validate(&raw, &rules).unwrap_err();
        assert_eq!(errors["user_id"], vec![USER_ID_EXISTS]);
    }

    #[test]
    fn update_accepts_partial_input() {
        let rules = post_update_rules();

        let cleaned = validate(&json!({"title": "Updated Title"}), &rules).unwrap();
        assert!(cleaned.contains("title"));
        assert!(!cleaned.contains("content"));

        let empty = validate(&json!({}), &rules).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn update_never_accepts_ownership_changes() {
        let rules = post_update_rules();
        let cleaned = validate(&json!({"title": "t", "user_id": 5}), &rules).unwrap();
        assert!(!cleaned.contains("user_id"));
    }

    #[test]
    fn null_counts_as_absent() {
        let create = post_create_rules(any_user());
        let errors =
            validate(&json!({"title": null, "content": "c", "user_id": 1}), &create).unwrap_err();
        assert_eq!(errors["title"], vec![TITLE_REQUIRED]);

        let update = post_update_rules();
        let cleaned = validate(&json!({"title": null}), &update).unwrap();
        assert!(cleaned.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: titles within the limit always pass the length check.
            #[test]
            fn titles_within_limit_pass(title in "[a-zA-Z0-9 ]{1,255}") {
                let rules = post_create_rules(any_user());
                let raw = serde_json::json!({
                    "title": title,
                    "content": "body",
                    "user_id": 1,
                });
                prop_assert!(validate(&raw, &rules).is_ok());
            }

            /// Property: titles past the limit always fail with the max message.
            #[test]
            fn titles_past_limit_fail(title in "[a-zA-Z0-9 ]{256,400}") {
                let rules = post_create_rules(any_user());
                let raw = serde_json::json!({
                    "title": title,
                    "content": "body",
                    "user_id": 1,
                });
                let errors = validate(&raw, &rules).unwrap_err();
                prop_assert_eq!(errors["title"].clone(), vec![TITLE_MAX.to_string()]);
            }

            /// Property: the cleaned map never invents fields.
            #[test]
            fn cleaned_is_a_subset_of_the_input(
                title in "[a-z]{1,20}",
                content in "[a-z]{1,40}",
            ) {
                let rules = post_update_rules();
                let raw = serde_json::json!({"title": title, "content": content});
                let cleaned = validate(&raw, &rules).unwrap().into_value();
                let input = raw.as_object().unwrap();
                for key in cleaned.as_object().unwrap().keys() {
                    prop_assert!(input.contains_key(key));
                }
            }
        }
    }
}
