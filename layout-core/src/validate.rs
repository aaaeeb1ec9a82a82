//! Schema validation for export documents.
//!
//! Validates an arbitrary JSON value against the export document
//! schema; it never assumes the input came from
//! [`build_export_document`](crate::export::build_export_document).
//! All applicable errors are accumulated, with two fast-fail cases: a
//! non-object root and a non-array `elements` field. Error message
//! texts are part of the compatibility surface and reproduce the
//! original export tooling verbatim, with one deliberate exception: an
//! element with `id` and `position` but no `type` reports only
//! `Element[N] missing type.`, where the original tooling also emitted
//! `Invalid type: undefined` as a stringification artifact of the
//! absent value. The allowed-type check here runs only when the field
//! is actually present.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Element type names accepted in export documents.
pub const ALLOWED_EXPORT_TYPES: [&str; 5] = ["header", "footer", "card", "text-content", "slider"];

/// Outcome of validating a candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no errors were found.
    pub is_valid: bool,
    /// Human-readable errors, in check order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let types = ALLOWED_EXPORT_TYPES.join("|");
        Regex::new(&format!(r"^elem_({types})_\d{{3}}$")).expect("id pattern is valid")
    })
}

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)?%$").expect("percent pattern is valid"))
}

/// Whether a value is a percent-string like `"42%"` or `" 12.5% "`.
fn is_percent_string(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| percent_pattern().is_match(s.trim()))
}

/// A field is "present" when the key exists and is not null.
fn field<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

/// Render a JSON value for an error message, without quoting strings.
fn lossy(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Format a collected zIndex for the aggregate error message: integral
/// values print without a trailing `.0`.
#[allow(clippy::cast_possible_truncation)] // guarded by the fract check
fn format_z(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn validate_element(
    element: &Value,
    index: usize,
    seen_ids: &mut HashSet<String>,
    z_values: &mut Vec<f64>,
    errors: &mut Vec<String>,
) {
    let id = field(element, "id");
    let kind = field(element, "type");
    let position = field(element, "position");

    if id.is_none() {
        errors.push(format!("Element[{index}] missing id."));
    }
    if kind.is_none() {
        errors.push(format!("Element[{index}] missing type."));
    }
    if position.is_none() {
        errors.push(format!("Element[{index}] missing position."));
    }

    // Without an id or a position the remaining checks are meaningless;
    // errors already recorded for this element are kept.
    let (Some(id), Some(position)) = (id, position) else {
        return;
    };

    let id_text = lossy(id);
    if !seen_ids.insert(id_text.clone()) {
        errors.push(format!("Duplicate id: {id_text}"));
    }
    if !id.as_str().is_some_and(|s| id_pattern().is_match(s)) {
        errors.push(format!("ID {id_text} does not match pattern elem_[type]_NNN."));
    }

    if let Some(kind) = kind {
        let valid_type = kind
            .as_str()
            .is_some_and(|s| ALLOWED_EXPORT_TYPES.contains(&s));
        if !valid_type {
            errors.push(format!("Invalid type: {}", lossy(kind)));
        }
    }

    if let Some(x) = position.get("x").and_then(Value::as_f64) {
        if x < 0.0 {
            errors.push(format!("Element[{index}] x is negative."));
        }
    }
    if let Some(y) = position.get("y").and_then(Value::as_f64) {
        if y < 0.0 {
            errors.push(format!("Element[{index}] y is negative."));
        }
    }

    let width = position.get("width");
    let width_valid = width.is_some_and(|w| w.is_number() || is_percent_string(w));
    if !width_valid {
        errors.push(format!("Element[{index}] invalid width."));
    }

    let height = position.get("height");
    let height_valid = height.is_some_and(|h| {
        h.is_number() || h.as_str() == Some("auto") || is_percent_string(h)
    });
    if !height_valid {
        errors.push(format!("Element[{index}] invalid height."));
    }

    match position.get("zIndex").and_then(Value::as_f64) {
        Some(z) => z_values.push(z),
        None => errors.push(format!("Element[{index}] missing numeric zIndex.")),
    }
}

/// Validate a candidate export document.
///
/// Returns a report with every applicable error; the document is valid
/// iff the error list is empty. Malformed input is never a panic or an
/// `Err`, only report entries.
#[must_use]
#[allow(clippy::cast_precision_loss)] // element counts stay tiny
pub fn validate_document(document: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(root) = document.as_object() else {
        return ValidationReport::from_errors(vec!["Root JSON is not an object.".to_string()]);
    };

    for key in ["project", "canvas", "elements", "metadata"] {
        if !root.contains_key(key) {
            errors.push(format!("Missing root key: {key}"));
        }
    }

    let Some(elements) = document.get("elements").and_then(Value::as_array) else {
        errors.push("elements must be an array.".to_string());
        return ValidationReport::from_errors(errors);
    };

    let mut seen_ids = HashSet::new();
    let mut z_values = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        validate_element(element, index, &mut seen_ids, &mut z_values, &mut errors);
    }

    if !z_values.is_empty() {
        let mut distinct = z_values;
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();

        let dense = distinct
            .iter()
            .enumerate()
            .all(|(i, z)| z.total_cmp(&((i + 1) as f64)).is_eq());
        if !dense {
            let got = distinct
                .iter()
                .map(|z| format_z(*z))
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(format!("zIndex must be sequential 1..N. Got: [{got}]"));
        }
    }

    ValidationReport::from_errors(errors)
}
