//! Array-shaped answers: potential issues and recommendations.

use serde_json::{Map, Value};

use super::sentinels::{
    ISSUE_DEFAULT_DESCRIPTION, ISSUE_DEFAULT_LINE, ISSUE_DEFAULT_RECOMMENDATION,
    ISSUE_DEFAULT_TYPE, ISSUE_PARSE_ERROR_DESCRIPTION, ISSUE_PARSE_ERROR_LINE,
    ISSUE_PARSE_ERROR_RECOMMENDATION, ISSUE_PARSE_ERROR_TYPE, PARSE_ERROR,
    RECOMMENDATIONS_NOT_A_LIST,
};
use super::{Parsed, ResponseKind, decode, log_degraded, value_to_text};
use crate::models::Issue;

/// Parses the issue list.
///
/// Non-object elements are dropped; each missing field of an object element
/// is defaulted on its own. An undecodable or non-array answer becomes a
/// single issue describing the parse failure.
pub fn parse_issues(raw: &str) -> Parsed<Vec<Issue>> {
    let items = match decode(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return degraded_issues(raw, "answer is not a JSON array"),
        Err(reason) => return degraded_issues(raw, &reason),
    };

    let mut defaulted = 0;
    let mut dropped = 0;
    let issues = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(issue_from_object(obj, &mut defaulted)),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();
    Parsed::repaired(issues, defaulted, dropped)
}

fn issue_from_object(obj: &Map<String, Value>, defaulted: &mut usize) -> Issue {
    let mut field = |key: &str, default: &str| match obj.get(key) {
        Some(v) if !v.is_null() => value_to_text(v),
        _ => {
            *defaulted += 1;
            default.to_string()
        }
    };
    Issue {
        kind: field("type", ISSUE_DEFAULT_TYPE),
        description: field("description", ISSUE_DEFAULT_DESCRIPTION),
        line: field("line", ISSUE_DEFAULT_LINE),
        recommendation: field("recommendation", ISSUE_DEFAULT_RECOMMENDATION),
    }
}

fn degraded_issues(raw: &str, reason: &str) -> Parsed<Vec<Issue>> {
    log_degraded(ResponseKind::IssueList, reason, raw);
    Parsed::degraded(
        vec![Issue {
            kind: ISSUE_PARSE_ERROR_TYPE.into(),
            description: ISSUE_PARSE_ERROR_DESCRIPTION.into(),
            line: ISSUE_PARSE_ERROR_LINE.into(),
            recommendation: ISSUE_PARSE_ERROR_RECOMMENDATION.into(),
        }],
        reason,
    )
}

/// Parses the recommendation list.
///
/// Elements are coerced to text and falsy ones (empty string, `0`, `false`,
/// `null`, empty array/object) are dropped. An undecodable answer becomes
/// `[PARSE_ERROR]`, a decodable non-array one `[RECOMMENDATIONS_NOT_A_LIST]`.
pub fn parse_recommendations(raw: &str) -> Parsed<Vec<String>> {
    let items = match decode(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            let reason = "answer is not a JSON array";
            log_degraded(ResponseKind::RecommendationList, reason, raw);
            return Parsed::degraded(vec![RECOMMENDATIONS_NOT_A_LIST.to_string()], reason);
        }
        Err(reason) => {
            log_degraded(ResponseKind::RecommendationList, &reason, raw);
            return Parsed::degraded(vec![PARSE_ERROR.to_string()], reason);
        }
    };

    let total = items.len();
    let recs: Vec<String> = items
        .iter()
        .filter(|v| is_truthy(v))
        .map(value_to_text)
        .collect();
    let dropped = total - recs.len();
    Parsed::repaired(recs, 0, dropped)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
