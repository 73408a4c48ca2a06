//! Attribute classification.
//!
//! Given one attribute's raw value and its sibling meta-attributes, decide
//! which widget presents it and what constraints apply. Classification runs
//! once per field at model build time and the result is stored on the
//! field, so presentation and coercion always agree on what a field is.

use crate::meta::MetaLookup;
use crate::value::{parse_number, AttrValue};

/// Option string literals that force a checkbox instead of a select.
const CHECKBOX_OPTION_SETS: [&str; 3] = ["True|False", "Yes|No", "1|0"];

/// One entry of a select widget, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The widget presenting a field, with its associated constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Checkbox,
    Select(Vec<SelectOption>),
    Number { integer: bool },
    Text,
}

/// Result of classifying one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub widget: WidgetKind,
    pub label: String,
    pub unit: Option<String>,
    pub description: String,
}

/// Classify one attribute. `key` must be a non-meta, non-private key;
/// meta-attributes never become fields.
///
/// Priority order:
/// 1. `_formtype == "CHECKBOX"`, a boolean value, or a boolean-literal
///    options set → Checkbox.
/// 2. A non-empty `_options` string → Select.
/// 3. A numeric value, or a string that is a number once a trailing unit
///    suffix is stripped → Number.
/// 4. Anything else → Text.
pub fn classify(key: &str, value: &AttrValue, meta: &MetaLookup<'_>) -> Classification {
    let label = meta.label(key).unwrap_or_else(|| key.to_string());
    let description = meta.description(key).unwrap_or_else(|| {
        format!(
            "Original value: {} (type: {})",
            value.display_string(),
            value.value_type()
        )
    });
    let options = meta.options(key);
    let mut unit = meta.units(key);

    let widget = if meta.formtype(key).as_deref() == Some("CHECKBOX")
        || matches!(value, AttrValue::Bool(_))
        || options
            .as_deref()
            .is_some_and(|o| CHECKBOX_OPTION_SETS.contains(&o))
    {
        WidgetKind::Checkbox
    } else if let Some(opts) = options.as_deref().filter(|o| !o.is_empty()) {
        WidgetKind::Select(parse_options(opts))
    } else if let Some((_, suffix)) = numeric_form(value) {
        if unit.is_none() {
            unit = suffix;
        }
        WidgetKind::Number {
            integer: !value.display_string().contains('.'),
        }
    } else {
        WidgetKind::Text
    };

    tracing::trace!(key, widget = ?widget, "classified attribute");

    Classification {
        widget,
        label,
        unit,
        description,
    }
}

/// The numeric reading of a value, plus any unit suffix that had to be
/// stripped to obtain it.
///
/// Suffix extraction is asymmetric on purpose: it only ever happens for
/// string-typed originals. A numeric original never gets a guessed unit.
pub fn numeric_form(value: &AttrValue) -> Option<(f64, Option<String>)> {
    match value {
        AttrValue::Number(n) => Some((*n, None)),
        AttrValue::Text(s) => {
            if let Some(n) = parse_number(s) {
                return Some((n, None));
            }
            let (body, suffix) = split_unit_suffix(s)?;
            parse_number(body).map(|n| (n, Some(suffix.to_string())))
        }
        AttrValue::Bool(_) => None,
    }
}

/// Whether a raw value displays as checked: `true`, the strings
/// `"true"`/`"yes"` (case-insensitive), or anything numerically equal to 1.
pub fn is_checked_value(value: &AttrValue) -> bool {
    match value {
        AttrValue::Bool(b) => *b,
        _ => {
            let s = value.display_string();
            s.eq_ignore_ascii_case("true")
                || s.eq_ignore_ascii_case("yes")
                || value.as_number() == Some(1.0)
        }
    }
}

/// Split a trailing run of ASCII letters or `%` off the end of a string.
/// Returns `None` when there is no such run.
fn split_unit_suffix(s: &str) -> Option<(&str, &str)> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic() || *c == '%')
        .last()
        .map(|(i, _)| i)?;
    Some((&s[..start], &s[start..]))
}

/// Split an options string into select options. Segments are separated by
/// `|`; each segment is optionally `value::display label`, with the label
/// defaulting to the value. Declared order is preserved.
fn parse_options(options: &str) -> Vec<SelectOption> {
    options
        .split('|')
        .map(|segment| match segment.split_once("::") {
            Some((value, label)) => SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            },
            None => SelectOption {
                value: segment.to_string(),
                label: segment.to_string(),
            },
        })
        .collect()
}
