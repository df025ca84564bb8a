//! Object-shaped answers: style, SOLID and the package report.

use serde_json::{Map, Value};

use super::sentinels::{INSUFFICIENT_DATA, MISSING_KEY, PARSE_ERROR, STYLE_MISSING_KEY};
use super::{Parsed, ResponseKind, decode, log_degraded, value_to_text};
use crate::models::{PackageReport, SolidReport, StyleReport};

/// Parses the style answer; always yields all four aspects.
pub fn parse_style(raw: &str) -> Parsed<StyleReport> {
    parse_fixed_keys(raw, ResponseKind::Style, StyleReport::KEYS, STYLE_MISSING_KEY)
        .map(StyleReport::from_values)
}

/// Parses the SOLID answer; always yields exactly the five principles.
pub fn parse_solid(raw: &str) -> Parsed<SolidReport> {
    parse_fixed_keys(raw, ResponseKind::Solid, SolidReport::KEYS, MISSING_KEY)
        .map(SolidReport::from_values)
}

/// Parses the package answer; every advisory key is present afterwards.
///
/// Values are kept as JSON (lists of strong/weak points stay lists); keys
/// beyond the advisory set are preserved.
pub fn parse_package_report(raw: &str) -> Parsed<PackageReport> {
    let mut fields = match decode(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return degraded_package(raw, "answer is not a JSON object"),
        Err(reason) => return degraded_package(raw, &reason),
    };

    let mut defaulted = 0;
    for key in PackageReport::KEYS {
        let missing = fields.get(key).is_none_or(Value::is_null);
        if missing {
            fields.insert(key.to_string(), Value::String(INSUFFICIENT_DATA.into()));
            defaulted += 1;
        }
    }
    Parsed::repaired(PackageReport { fields }, defaulted, 0)
}

fn degraded_package(raw: &str, reason: &str) -> Parsed<PackageReport> {
    log_degraded(ResponseKind::PackageReport, reason, raw);
    let fields: Map<String, Value> = PackageReport::KEYS
        .iter()
        .map(|k| (k.to_string(), Value::String(INSUFFICIENT_DATA.into())))
        .collect();
    Parsed::degraded(PackageReport { fields }, reason)
}

/// Extracts `keys` from an object answer, in order.
///
/// A missing or `null` key gets `missing`; an undecodable or non-object
/// answer sets every key to [`PARSE_ERROR`].
fn parse_fixed_keys<const N: usize>(
    raw: &str,
    kind: ResponseKind,
    keys: [&'static str; N],
    missing: &str,
) -> Parsed<[String; N]> {
    let map = match decode(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            let reason = "answer is not a JSON object";
            log_degraded(kind, reason, raw);
            return Parsed::degraded(keys.map(|_| PARSE_ERROR.to_string()), reason);
        }
        Err(reason) => {
            log_degraded(kind, &reason, raw);
            return Parsed::degraded(keys.map(|_| PARSE_ERROR.to_string()), reason);
        }
    };

    let mut defaulted = 0;
    let values = keys.map(|key| match map.get(key) {
        Some(v) if !v.is_null() => value_to_text(v),
        _ => {
            defaulted += 1;
            missing.to_string()
        }
    });
    Parsed::repaired(values, defaulted, 0)
}
