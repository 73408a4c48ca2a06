//! Round-trip value coercion.
//!
//! Converts edited presentation values back into values type-compatible
//! with what the host originally supplied. Classification and coercion
//! read the same stored [`WidgetKind`], so they cannot disagree about what
//! a field is.

use crate::classify::{is_checked_value, WidgetKind};
use crate::message::Notice;
use crate::model::{Field, FormModel, PresentationValue};
use crate::value::{parse_number, AttrValue, RawAttributeSet, ValueType};

/// Coerce one field's current presentation into a host value.
///
/// Returns `None` only for a numeric field whose edit box is empty or not
/// a number; the caller keeps the field's last valid value rather than
/// emitting garbage.
pub fn coerce(field: &Field) -> Option<AttrValue> {
    match &field.widget {
        WidgetKind::Checkbox => {
            let checked = match &field.current {
                PresentationValue::Checked(b) => *b,
                // A text presentation follows the same truthiness family
                // the classifier uses for initial checked state.
                PresentationValue::Text(s) => is_checked_value(&AttrValue::Text(s.clone())),
            };
            // Hosts that sent a numeric flag get a numeric flag back.
            let numeric_family = field.original_type == ValueType::Number
                || field.original_value.as_number().is_some();
            if numeric_family {
                Some(AttrValue::Number(if checked { 1.0 } else { 0.0 }))
            } else {
                Some(AttrValue::Bool(checked))
            }
        }
        WidgetKind::Number { .. } => match &field.current {
            PresentationValue::Text(s) => parse_number(s).map(AttrValue::Number),
            PresentationValue::Checked(_) => None,
        },
        WidgetKind::Select(_) | WidgetKind::Text => {
            Some(AttrValue::Text(field.current.display_string()))
        }
    }
}

/// Coerce every field of the model into a fresh attribute set.
///
/// One entry per field present in the model, in model order; search
/// visibility never affects inclusion. Fields that fail numeric coercion
/// fall back to their original value and produce a warning notice; the
/// apply as a whole always proceeds.
pub fn apply_model(model: &FormModel) -> (RawAttributeSet, Vec<Notice>) {
    let mut out = RawAttributeSet::default();
    let mut notices = Vec::new();

    for field in model.fields() {
        let value = match coerce(field) {
            Some(value) => value,
            None => {
                let fallback = fallback_value(field);
                notices.push(Notice::warning(format!(
                    "{}.{}: {:?} is not a number; keeping {}",
                    field.section,
                    field.key,
                    field.current.display_string(),
                    fallback.display_string(),
                )));
                fallback
            }
        };
        out.insert(&field.section, &field.key, value);
    }

    tracing::debug!(
        fields = model.fields().count(),
        warnings = notices.len(),
        "coerced model for apply"
    );

    (out, notices)
}

/// The last valid value of a field whose edit failed to coerce. For a
/// number widget that is the original's numeric reading (the unit suffix
/// is presentation metadata, never part of the coerced value).
fn fallback_value(field: &Field) -> AttrValue {
    use crate::classify::numeric_form;
    match &field.widget {
        WidgetKind::Number { .. } => numeric_form(&field.original_value)
            .map(|(n, _)| AttrValue::Number(n))
            .unwrap_or_else(|| field.original_value.clone()),
        _ => field.original_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormModel;
    use crate::value::RawAttributeSet;

    fn model(json: &str) -> FormModel {
        let raw = RawAttributeSet::from_json_str(json).expect("valid raw set");
        FormModel::build("Test", &raw, true)
    }

    fn edit(model: &mut FormModel, section: &str, key: &str, value: PresentationValue) {
        model.field_mut(section, key).expect("field").current = value;
    }

    #[test]
    fn unchecking_a_numeric_flag_emits_zero() {
        let mut m = model(r#"{"s": {"flag": 1, "_flag_formtype": "CHECKBOX"}}"#);
        edit(&mut m, "s", "flag", PresentationValue::Checked(false));
        let (out, notices) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"flag":0}}"#);
        assert!(notices.is_empty());
    }

    #[test]
    fn numeric_looking_string_original_also_coerces_to_flag_numbers() {
        let mut m = model(r#"{"s": {"flag": "1", "_flag_formtype": "CHECKBOX"}}"#);
        edit(&mut m, "s", "flag", PresentationValue::Checked(true));
        let (out, _) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"flag":1}}"#);
    }

    #[test]
    fn text_presented_checkbox_accepts_the_whole_truthiness_family() {
        for (text, expected) in [
            ("TRUE", true),
            ("yes", true),
            ("1", true),
            ("false", false),
            ("no", false),
            ("0", false),
        ] {
            let mut m = model(r#"{"s": {"open": "True", "_open_options": "True|False"}}"#);
            edit(&mut m, "s", "open", PresentationValue::Text(text.into()));
            let field = m.field("s", "open").expect("field");
            assert_eq!(coerce(field), Some(AttrValue::Bool(expected)), "input {text:?}");
        }
    }

    #[test]
    fn boolean_original_keeps_boolean_family() {
        let mut m = model(r#"{"s": {"open": true}}"#);
        edit(&mut m, "s", "open", PresentationValue::Checked(false));
        let (out, _) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"open":false}}"#);
    }

    #[test]
    fn string_boolean_original_emits_plain_boolean() {
        // "True" with True|False options: checkbox, but not numeric family.
        let mut m = model(r#"{"s": {"open": "True", "_open_options": "True|False"}}"#);
        edit(&mut m, "s", "open", PresentationValue::Checked(false));
        let (out, _) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"open":false}}"#);
    }

    #[test]
    fn number_edit_emits_a_number() {
        let mut m = model(r#"{"s": {"lenx": "100.0cm"}}"#);
        edit(&mut m, "s", "lenx", PresentationValue::Text("150".into()));
        let (out, _) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"lenx":150}}"#);
    }

    #[test]
    fn empty_numeric_edit_keeps_original_and_warns() {
        let mut m = model(r#"{"s": {"lenz": 210.0}}"#);
        edit(&mut m, "s", "lenz", PresentationValue::Text("".into()));
        let (out, notices) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"lenz":210}}"#);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].content.contains("s.lenz"));
    }

    #[test]
    fn unparseable_numeric_edit_does_not_abort_other_fields() {
        let mut m = model(r#"{"s": {"lenz": 210.0, "material": "Wood"}}"#);
        edit(&mut m, "s", "lenz", PresentationValue::Text("tall".into()));
        edit(&mut m, "s", "material", PresentationValue::Text("Metal".into()));
        let (out, notices) = apply_model(&m);
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"s":{"lenz":210,"material":"Metal"}}"#
        );
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn unparseable_edit_of_unit_suffixed_field_keeps_the_numeric_part() {
        let mut m = model(r#"{"s": {"lenx": "100.0cm"}}"#);
        edit(&mut m, "s", "lenx", PresentationValue::Text("very wide".into()));
        let (out, notices) = apply_model(&m);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"lenx":100}}"#);
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn select_and_text_emit_verbatim_strings() {
        let mut m = model(
            r#"{"s": {"hinges": "Left", "_hinges_options": "Left::L|Right::R", "note": "hi"}}"#,
        );
        edit(&mut m, "s", "hinges", PresentationValue::Text("Right".into()));
        edit(&mut m, "s", "note", PresentationValue::Text("42".into()));
        let (out, _) = apply_model(&m);
        // A text field edited to a numeric-looking string stays a string.
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"s":{"hinges":"Right","note":"42"}}"#
        );
    }

    #[test]
    fn unedited_select_round_trips_the_original_raw_value() {
        let m = model(r#"{"s": {"hinges": "Left", "_hinges_options": "Left::L|Right::R"}}"#);
        let (out, _) = apply_model(&m);
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"s":{"hinges":"Left"}}"#
        );
    }

    #[test]
    fn unedited_unit_suffixed_number_emits_the_numeric_part() {
        let m = model(r#"{"s": {"lenx": "100.0cm"}}"#);
        let (out, _) = apply_model(&m);
        // The unit is presentation metadata, not part of the coerced value.
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"s":{"lenx":100}}"#);
    }

    #[test]
    fn boolean_round_trip_is_identity() {
        for original in [true, false] {
            let m = model(&format!(r#"{{"s": {{"open": {original}}}}}"#));
            let field = m.field("s", "open").expect("field");
            assert_eq!(coerce(field), Some(AttrValue::Bool(original)));
        }
    }
}
