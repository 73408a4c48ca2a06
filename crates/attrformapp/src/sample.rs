//! Built-in placeholder dataset.
//!
//! Used when no host bridge is available, so the form stays exercisable
//! for local testing. Covers every widget kind the classifier can infer:
//! unit-suffixed and plain numbers, free selects, labeled selects, numeric
//! and string-boolean checkboxes, and plain text.

use serde_json::{json, Value};

use crate::bridge::InitialPayload;
use crate::value::RawAttributeSet;

/// The sample dataset handed out when the host is missing.
pub fn placeholder() -> InitialPayload {
    let options = json!({
        "dynamic_attributes": {
            "lenx": "100.0cm",
            "_lenx_label": "Width",
            "_lenx_description": "The overall width of the door.\nCan be numeric or a length string.",
            "lenz": 210.0,
            "_lenz_label": "Height",
            "_lenz_units": "cm",
            "_lenz_description": "The overall height of the door.",
            "material": "Wood",
            "_material_options": "Wood|Metal|Glass",
            "_material_label": "Material Type",
            "hinges": "Left",
            "_hinges_label": "Hinge Side",
            "_hinges_options": "Left::Left Hand Hung|Right::Right Hand Hung",
            "_hinges_description": "Select the side for the hinges.",
            "showdetails": 1,
            "_showdetails_label": "Display Details",
            "_showdetails_formtype": "CHECKBOX",
            "_showdetails_description": "Toggles visibility of detailed elements.",
            "isopenable": "True",
            "_isopenable_label": "Is Openable",
            "_isopenable_options": "True|False",
            "_isopenable_description": "Can the door be opened in animations?"
        },
        "definition": {
            "Price": "250.00",
            "Size": "100cm x 210cm",
            "Url": "http://example.com/door"
        }
    });

    let options = match options {
        Value::Object(map) => RawAttributeSet(map),
        _ => RawAttributeSet::default(),
    };

    InitialPayload {
        component_name: "Sample Dynamic Door".to_string(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WidgetKind;
    use crate::model::FormModel;

    #[test]
    fn placeholder_builds_a_full_model() {
        let payload = placeholder();
        let model = FormModel::build(&payload.component_name, &payload.options, true);
        let names: Vec<&str> = model.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["dynamic_attributes", "definition"]);
        assert_eq!(model.sections[0].fields.len(), 6);
        assert_eq!(model.sections[1].fields.len(), 3);
    }

    #[test]
    fn placeholder_exercises_every_widget_kind() {
        let payload = placeholder();
        let model = FormModel::build(&payload.component_name, &payload.options, true);
        let widget_of = |key: &str| {
            model
                .field("dynamic_attributes", key)
                .map(|f| f.widget.clone())
                .expect("sample field")
        };
        assert_eq!(widget_of("lenx"), WidgetKind::Number { integer: false });
        assert!(matches!(widget_of("material"), WidgetKind::Select(_)));
        assert_eq!(widget_of("showdetails"), WidgetKind::Checkbox);
        assert_eq!(widget_of("isopenable"), WidgetKind::Checkbox);
        assert!(matches!(
            model.field("definition", "Size").map(|f| &f.widget),
            Some(WidgetKind::Text)
        ));
    }
}
