//! Declarative request validation
//!
//! Each write endpoint declares its fields as a rule table; evaluation
//! collects every violation instead of short-circuiting on the first, so a
//! client sees the complete list of problems in one response.

use serde_json::Value;

/// Expected shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string (surrounding whitespace ignored)
    Text,
    /// Integer, or a string parseable as one
    Integer,
    /// String of plausible email shape
    Email,
}

/// One field of an endpoint's rule table
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Evaluate a rule table against a JSON body, returning every violation
pub fn check_fields(rules: &[FieldRule], body: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for rule in rules {
        let value = match body.get(rule.name) {
            Some(v) if !is_absent(Some(v)) => v,
            _ => {
                if rule.required {
                    errors.push(format!("{} is a required field", rule.name));
                }
                continue;
            }
        };

        match rule.kind {
            FieldKind::Text => {
                if !value.is_string() {
                    errors.push(format!("{} must be a string", rule.name));
                }
            }
            FieldKind::Integer => {
                if get_i64_value(value).is_none() {
                    errors.push(format!("{} must be a number", rule.name));
                }
            }
            FieldKind::Email => {
                let valid = value.as_str().map(is_valid_email).unwrap_or(false);
                if !valid {
                    errors.push(format!("{} must be a valid email", rule.name));
                }
            }
        }
    }

    errors
}

/// Missing, null, and whitespace-only strings all count as absent
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Extract a trimmed string field (use after `check_fields` passed)
pub fn get_str(body: &Value, name: &str) -> Option<String> {
    body.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract an integer field, accepting numeric strings like form data sends
pub fn get_i64(body: &Value, name: &str) -> Option<i64> {
    body.get(name).and_then(get_i64_value)
}

fn get_i64_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Plausibility check, not RFC 5322: one `@`, non-empty local part, and a
/// dotted domain without whitespace
pub fn is_valid_email(candidate: &str) -> bool {
    let candidate = candidate.trim();
    let mut parts = candidate.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !candidate.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: &[FieldRule] = &[
        FieldRule::required("name", FieldKind::Text),
        FieldRule::required("yearProduced", FieldKind::Integer),
        FieldRule::optional("polyphony", FieldKind::Text),
    ];

    #[test]
    fn test_all_violations_collected() {
        let errors = check_fields(RULES, &json!({}));
        assert_eq!(
            errors,
            vec![
                "name is a required field".to_string(),
                "yearProduced is a required field".to_string(),
            ]
        );
    }

    #[test]
    fn test_valid_body_passes() {
        let body = json!({"name": "MS-20", "yearProduced": 1978, "polyphony": "2"});
        assert!(check_fields(RULES, &body).is_empty());
    }

    #[test]
    fn test_numeric_string_accepted_as_integer() {
        let body = json!({"name": "MS-20", "yearProduced": "1978"});
        assert!(check_fields(RULES, &body).is_empty());
        assert_eq!(get_i64(&body, "yearProduced"), Some(1978));
    }

    #[test]
    fn test_non_numeric_year_rejected() {
        let body = json!({"name": "MS-20", "yearProduced": "nineteen78"});
        let errors = check_fields(RULES, &body);
        assert_eq!(errors, vec!["yearProduced must be a number".to_string()]);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let body = json!({"name": "   ", "yearProduced": 1978});
        let errors = check_fields(RULES, &body);
        assert_eq!(errors, vec!["name is a required field".to_string()]);
    }

    #[test]
    fn test_optional_field_type_still_checked() {
        let body = json!({"name": "MS-20", "yearProduced": 1978, "polyphony": 2});
        let errors = check_fields(RULES, &body);
        assert_eq!(errors, vec!["polyphony must be a string".to_string()]);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("  user@example.com  "));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_email_rule_message() {
        let rules = &[FieldRule::required("email", FieldKind::Email)];
        assert_eq!(
            check_fields(rules, &json!({"email": "nope"})),
            vec!["email must be a valid email".to_string()]
        );
        assert_eq!(
            check_fields(rules, &json!({})),
            vec!["email is a required field".to_string()]
        );
    }
}
