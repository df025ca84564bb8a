//! Defensive parsing of raw model answers.
//!
//! Every parser here returns a [`Parsed<T>`], never a `Result`: malformed,
//! truncated or empty answers degrade to schema-complete sentinel values and
//! the [`ParseOutcome`] records what happened.
//!
//! Shared steps for every response kind:
//! 1. strip a surrounding markdown code fence and whitespace;
//! 2. decode JSON; any failure (including JSON wrapped in prose) degrades
//!    the whole answer to the kind's sentinel;
//! 3. hand the value to the kind-specific shaper in [`reports`] or [`lists`].

pub mod lists;
pub mod reports;
pub mod sentinels;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub use lists::{parse_issues, parse_recommendations};
pub use reports::{parse_package_report, parse_solid, parse_style};

/// How much of a model answer survived parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// The answer had the expected shape and every required field.
    Clean,
    /// The shape was right but some fields/elements were defaulted or dropped.
    Repaired { defaulted: usize, dropped: usize },
    /// The answer was unusable; the value is the kind's sentinel.
    Degraded { reason: String },
}

/// A parsed value that is always present, possibly built from sentinels.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub outcome: ParseOutcome,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            outcome: ParseOutcome::Clean,
        }
    }

    /// `Clean` when nothing was touched, `Repaired` otherwise.
    pub fn repaired(value: T, defaulted: usize, dropped: usize) -> Self {
        let outcome = if defaulted == 0 && dropped == 0 {
            ParseOutcome::Clean
        } else {
            ParseOutcome::Repaired { defaulted, dropped }
        };
        Self { value, outcome }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            outcome: ParseOutcome::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, ParseOutcome::Degraded { .. })
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            outcome: self.outcome,
        }
    }
}

/// Which answer is being parsed; each kind has its own typed parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Style,
    Solid,
    IssueList,
    RecommendationList,
    PackageReport,
}

/// Removes a surrounding markdown code fence (with optional language tag).
///
/// Text without a fence is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut t = raw.trim().trim_start_matches('\u{feff}');
    if let Some(rest) = t.strip_prefix("```") {
        t = match rest.find('\n') {
            Some(nl) if is_fence_tag(&rest[..nl]) => &rest[nl + 1..],
            _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }
    if let Some(rest) = t.trim_end().strip_suffix("```") {
        t = rest;
    }
    t.trim()
}

fn is_fence_tag(s: &str) -> bool {
    s.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Decodes the fenced/unfenced JSON answer. `Err` carries a short reason.
///
/// No attempt is made to dig JSON out of surrounding prose.
fn decode(raw: &str) -> Result<Value, String> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err("empty answer".into());
    }
    serde_json::from_str::<Value>(body).map_err(|e| format!("invalid JSON: {e}"))
}

/// Logs a degraded answer with a bounded snippet of the raw text.
fn log_degraded(kind: ResponseKind, reason: &str, raw: &str) {
    let snippet: String = raw.chars().take(160).collect();
    warn!(?kind, %reason, raw_len = raw.len(), %snippet, "model answer degraded to sentinel");
}

/// Text of a JSON value as shown to users: strings verbatim, everything else
/// as compact JSON.
fn value_to_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
