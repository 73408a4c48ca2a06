//! End-to-end round-trip scenarios: raw dictionary in, form model, edits,
//! coerced dictionary out.

use attrformapp::bridge::RecordingBridge;
use attrformapp::classify::WidgetKind;
use attrformapp::config::FormConfig;
use attrformapp::model::{FormModel, PresentationValue};
use attrformapp::search;
use attrformapp::session::Session;
use attrformapp::value::RawAttributeSet;

fn raw(json: &str) -> RawAttributeSet {
    RawAttributeSet::from_json_str(json).expect("valid raw set")
}

fn session_with(json: &str) -> Session<RecordingBridge> {
    let bridge = RecordingBridge::with_initial("Test", raw(json));
    let mut session = Session::new(bridge, FormConfig::default());
    session.start().expect("start");
    session
}

#[test]
fn unit_suffixed_width_scenario() {
    // {"dynamic_attributes": {"lenx": "100.0cm", "_lenx_label": "Width"}}
    let mut session =
        session_with(r#"{"dynamic_attributes": {"lenx": "100.0cm", "_lenx_label": "Width"}}"#);

    let model = session.model();
    assert_eq!(model.sections.len(), 1);
    assert_eq!(model.sections[0].name, "dynamic_attributes");
    assert_eq!(model.sections[0].fields.len(), 1);

    let field = model.field("dynamic_attributes", "lenx").expect("field");
    assert_eq!(field.label, "Width");
    assert_eq!(field.widget, WidgetKind::Number { integer: false });
    assert_eq!(field.unit.as_deref(), Some("cm"));
    assert_eq!(field.current, PresentationValue::Text("100".into()));

    session
        .edit_field(
            "dynamic_attributes",
            "lenx",
            PresentationValue::Text("150".into()),
        )
        .unwrap();
    let outcome = session.apply().expect("apply");
    assert_eq!(
        serde_json::to_string(&outcome.values).unwrap(),
        r#"{"dynamic_attributes":{"lenx":150}}"#
    );
}

#[test]
fn numeric_checkbox_scenario() {
    // {"s": {"flag": 1, "_flag_formtype": "CHECKBOX"}}
    let mut session = session_with(r#"{"s": {"flag": 1, "_flag_formtype": "CHECKBOX"}}"#);

    let field = session.model().field("s", "flag").expect("field");
    assert_eq!(field.widget, WidgetKind::Checkbox);
    assert_eq!(field.current, PresentationValue::Checked(true));

    session
        .edit_field("s", "flag", PresentationValue::Checked(false))
        .unwrap();
    let outcome = session.apply().expect("apply");
    assert_eq!(
        serde_json::to_string(&outcome.values).unwrap(),
        r#"{"s":{"flag":0}}"#
    );
}

#[test]
fn meta_only_section_is_entirely_absent() {
    // {"s": {"_hidden_meta": "x"}} -> no sections at all.
    let session = session_with(r#"{"s": {"_hidden_meta": "x"}}"#);
    assert!(session.model().sections.is_empty());

    let outcome = session.search();
    assert!(outcome.sections.is_empty());
}

#[test]
fn boolean_round_trip_is_identity_without_edits() {
    for original in ["true", "false"] {
        let mut session = session_with(&format!(r#"{{"s": {{"open": {original}}}}}"#));
        let field = session.model().field("s", "open").expect("field");
        assert_eq!(field.widget, WidgetKind::Checkbox);

        let outcome = session.apply().expect("apply");
        assert_eq!(
            serde_json::to_string(&outcome.values).unwrap(),
            format!(r#"{{"s":{{"open":{original}}}}}"#)
        );
    }
}

#[test]
fn select_round_trip_preserves_declared_options_and_value() {
    let mut session = session_with(
        r#"{"s": {"hinges": "Left", "_hinges_options": "Left::Left Hand Hung|Right::Right Hand Hung"}}"#,
    );

    let field = session.model().field("s", "hinges").expect("field");
    let WidgetKind::Select(options) = &field.widget else {
        panic!("expected select");
    };
    let declared: Vec<(&str, &str)> = options
        .iter()
        .map(|o| (o.value.as_str(), o.label.as_str()))
        .collect();
    assert_eq!(
        declared,
        [("Left", "Left Hand Hung"), ("Right", "Right Hand Hung")]
    );

    let outcome = session.apply().expect("apply");
    assert_eq!(
        serde_json::to_string(&outcome.values).unwrap(),
        r#"{"s":{"hinges":"Left"}}"#
    );
}

#[test]
fn apply_output_never_contains_meta_or_private_keys() {
    let mut session = session_with(
        r#"{
            "s": {
                "lenx": "100.0cm",
                "_lenx_label": "Width",
                "_lenx_units": "cm",
                "_private": 1
            },
            "_hidden": {"a": 1}
        }"#,
    );
    let outcome = session.apply().expect("apply");

    let keys: Vec<&String> = outcome.values.0.keys().collect();
    assert_eq!(keys, ["s"]);
    let section = outcome.values.0["s"].as_object().expect("object");
    let field_keys: Vec<&String> = section.keys().collect();
    assert_eq!(field_keys, ["lenx"]);
}

#[test]
fn search_never_affects_apply_output() {
    let mut session = session_with(
        r#"{"a": {"x": 1, "_x_label": "Alpha"}, "b": {"y": 2, "_y_label": "Beta"}}"#,
    );

    // Narrow the view to one field, then apply.
    let outcome = session.set_search_query("alpha");
    assert!(outcome.is_field_visible("a", "x"));
    assert!(!outcome.is_field_visible("b", "y"));

    let applied = session.apply().expect("apply");
    assert_eq!(
        serde_json::to_string(&applied.values).unwrap(),
        r#"{"a":{"x":1},"b":{"y":2}}"#
    );
}

#[test]
fn reset_restores_originals_after_any_edit_sequence() {
    let mut session = session_with(
        r#"{"s": {"n": 5, "t": "hello", "f": true, "c": "Left", "_c_options": "Left|Right"}}"#,
    );

    let untouched = session.model().clone();

    session
        .edit_field("s", "n", PresentationValue::Text("9".into()))
        .unwrap();
    session
        .edit_field("s", "t", PresentationValue::Text("bye".into()))
        .unwrap();
    session
        .edit_field("s", "f", PresentationValue::Checked(false))
        .unwrap();
    session
        .edit_field("s", "c", PresentationValue::Text("Right".into()))
        .unwrap();
    session
        .edit_field("s", "n", PresentationValue::Text("".into()))
        .unwrap();

    session.reset();
    assert_eq!(*session.model(), untouched);
}

#[test]
fn search_visibility_is_monotonic() {
    let session = session_with(
        r#"{
            "dims": {"lenx": "100.0cm", "_lenx_label": "Width", "lenz": 210.0},
            "looks": {"material": "Wood", "_material_options": "Wood|Metal|Glass"}
        }"#,
    );

    let model: &FormModel = session.model();
    let all = search::filter(model, "");
    for query in ["w", "wood", "width", "100", "glass", "no-such-thing"] {
        let narrowed = search::filter(model, query);
        for section in &narrowed.sections {
            for field in &section.fields {
                if field.visible {
                    assert!(
                        all.is_field_visible(&section.name, &field.key),
                        "query {query:?} made {}.{} visible outside the full set",
                        section.name,
                        field.key
                    );
                }
            }
        }
    }
}

#[test]
fn malformed_sections_recover_without_aborting_the_session() {
    let mut session = session_with(r#"{"bad": "not an object", "good": {"a": 1}}"#);
    assert_eq!(session.model().sections.len(), 1);

    let outcome = session.apply().expect("apply");
    assert_eq!(
        serde_json::to_string(&outcome.values).unwrap(),
        r#"{"good":{"a":1}}"#
    );
}

#[test]
fn missing_bridge_session_still_round_trips() {
    let mut session = Session::new(RecordingBridge::unavailable(), FormConfig::default());
    session.start().expect("placeholder fallback");

    // The placeholder error was reported exactly once.
    assert_eq!(session.bridge().errors.len(), 1);

    // The placeholder model is fully editable and appliable.
    session
        .edit_field(
            "dynamic_attributes",
            "lenx",
            PresentationValue::Text("125".into()),
        )
        .unwrap();
    let outcome = session.apply().expect("apply");
    assert_eq!(
        outcome.values.get("dynamic_attributes", "lenx"),
        Some(&serde_json::json!(125))
    );
    assert_eq!(session.bridge().submitted.len(), 1);
}
