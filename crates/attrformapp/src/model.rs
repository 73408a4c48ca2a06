//! Form model and builder.
//!
//! The form model is the source of truth between the raw snapshot and the
//! coerced output: an ordered list of sections, each an ordered list of
//! fields, derived from exactly the non-meta, non-private attributes of the
//! raw set. A dropped section or field here is genuinely absent from apply
//! output, not merely hidden.

use crate::classify::{self, WidgetKind};
use crate::meta::{self, MetaLookup};
use crate::value::{AttrValue, RawAttributeSet, ValueType};

/// What the user currently sees in a field's control.
///
/// Checkboxes carry a boolean; every other widget carries the raw string
/// left in the control.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationValue {
    Checked(bool),
    Text(String),
}

impl PresentationValue {
    /// Stringified form, used for search matching.
    pub fn display_string(&self) -> String {
        match self {
            PresentationValue::Checked(b) => b.to_string(),
            PresentationValue::Text(s) => s.clone(),
        }
    }
}

/// One editable unit of the form, derived from exactly one attribute.
///
/// `original_value` and `original_type` are fixed at creation; edits only
/// ever touch `current`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub section: String,
    pub key: String,
    pub label: String,
    pub unit: Option<String>,
    pub description: String,
    pub widget: WidgetKind,
    pub original_value: AttrValue,
    pub original_type: ValueType,
    pub current: PresentationValue,
}

impl Field {
    /// Lowercased text this field matches search queries against: label and
    /// current value, plus option display labels for selects.
    pub fn match_text(&self) -> String {
        let mut text = format!(
            "{} {}",
            self.label.to_lowercase(),
            self.current.display_string().to_lowercase()
        );
        if let WidgetKind::Select(options) = &self.widget {
            for option in options {
                text.push(' ');
                text.push_str(&option.label.to_lowercase());
            }
        }
        text
    }
}

/// A named group of fields. Sections with no displayable fields never make
/// it into the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub fields: Vec<Field>,
    pub expanded: bool,
}

/// The ordered form derived from one raw attribute set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModel {
    pub component_name: String,
    pub sections: Vec<Section>,
}

impl FormModel {
    /// Build a model from a raw attribute set.
    ///
    /// Sections iterate in dictionary insertion order, as do keys within a
    /// section. Private sections, private keys and meta-attribute keys are
    /// skipped; a section whose value is not an object is treated as empty
    /// (malformed input recovers locally). Empty sections are dropped
    /// outright. When `expand_first` is set, the first retained section
    /// starts expanded.
    pub fn build(component_name: &str, raw: &RawAttributeSet, expand_first: bool) -> FormModel {
        let mut sections = Vec::new();

        for (name, section_value) in &raw.0 {
            if meta::is_private_key(name) {
                continue;
            }
            let Some(attrs) = section_value.as_object() else {
                tracing::debug!(section = %name, "section is not an object; treating as empty");
                continue;
            };

            let lookup = MetaLookup::new(attrs);
            let mut fields = Vec::new();
            for (key, json_value) in attrs {
                if meta::is_private_key(key) {
                    continue;
                }
                let value = AttrValue::from_json(json_value);
                let classification = classify::classify(key, &value, &lookup);
                let current = initial_presentation(&value, &classification.widget);
                fields.push(Field {
                    section: name.clone(),
                    key: key.clone(),
                    label: classification.label,
                    unit: classification.unit,
                    description: classification.description,
                    widget: classification.widget,
                    original_type: value.value_type(),
                    original_value: value,
                    current,
                });
            }

            if fields.is_empty() {
                continue;
            }
            sections.push(Section {
                name: name.clone(),
                expanded: expand_first && sections.is_empty(),
                fields,
            });
        }

        tracing::debug!(
            component = component_name,
            sections = sections.len(),
            fields = sections.iter().map(|s| s.fields.len()).sum::<usize>(),
            "built form model"
        );

        FormModel {
            component_name: component_name.to_string(),
            sections,
        }
    }

    pub fn field(&self, section: &str, key: &str) -> Option<&Field> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .fields
            .iter()
            .find(|f| f.key == key)
    }

    pub fn field_mut(&mut self, section: &str, key: &str) -> Option<&mut Field> {
        self.sections
            .iter_mut()
            .find(|s| s.name == section)?
            .fields
            .iter_mut()
            .find(|f| f.key == key)
    }

    /// All fields in model order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }
}

/// The presentation a freshly built field starts with, equivalent to its
/// original value seen through its widget.
fn initial_presentation(value: &AttrValue, widget: &WidgetKind) -> PresentationValue {
    match widget {
        WidgetKind::Checkbox => PresentationValue::Checked(classify::is_checked_value(value)),
        WidgetKind::Number { .. } => {
            let text = classify::numeric_form(value)
                .map(|(n, _)| AttrValue::Number(n).display_string())
                .unwrap_or_else(|| value.display_string());
            PresentationValue::Text(text)
        }
        WidgetKind::Select(_) | WidgetKind::Text => {
            PresentationValue::Text(value.display_string())
        }
    }
}
