//! Search over the form model.
//!
//! Computes visibility and label highlight segments per field without
//! touching any field value. Matching is literal, case-insensitive
//! substring matching: user input is never interpreted as a pattern, so
//! metacharacters need no escaping in the first place.

use crate::model::{FormModel, Section};

/// A run of label text, either outside or inside a query match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// Visibility and highlighting for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub key: String,
    pub visible: bool,
    /// The field's label split into plain and matched runs. A single
    /// `Plain` run when there is nothing to highlight.
    pub label: Vec<MatchSegment>,
}

/// Visibility for one section and its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    pub name: String,
    pub visible: bool,
    pub fields: Vec<FieldMatch>,
}

/// The full result of filtering a model against a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub sections: Vec<SectionMatch>,
}

impl SearchOutcome {
    pub fn is_field_visible(&self, section: &str, key: &str) -> bool {
        self.sections
            .iter()
            .find(|s| s.name == section)
            .and_then(|s| s.fields.iter().find(|f| f.key == key))
            .is_some_and(|f| f.visible)
    }

    pub fn is_section_visible(&self, section: &str) -> bool {
        self.sections
            .iter()
            .find(|s| s.name == section)
            .is_some_and(|s| s.visible)
    }

    /// Names of the visible sections, in model order.
    pub fn visible_sections(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.name.as_str())
    }
}

/// Filter a model against a query. Pure with respect to field values; the
/// model is not mutated.
///
/// A field is visible iff the query is empty or its lowercase form is a
/// substring of the field's match text (label, current value, and select
/// option labels). A section is visible iff at least one field is.
pub fn filter(model: &FormModel, query: &str) -> SearchOutcome {
    let term = query.to_lowercase();
    let sections = model
        .sections
        .iter()
        .map(|section| filter_section(section, &term))
        .collect();
    SearchOutcome { sections }
}

fn filter_section(section: &Section, term: &str) -> SectionMatch {
    let fields: Vec<FieldMatch> = section
        .fields
        .iter()
        .map(|field| {
            let visible = term.is_empty() || field.match_text().contains(term);
            let label = if visible && !term.is_empty() {
                highlight_matches(&field.label, term)
            } else {
                vec![MatchSegment::Plain(field.label.clone())]
            };
            FieldMatch {
                key: field.key.clone(),
                visible,
                label,
            }
        })
        .collect();

    SectionMatch {
        name: section.name.clone(),
        visible: fields.iter().any(|f| f.visible),
        fields,
    }
}

/// Split `text` into plain and matched runs around every case-insensitive
/// occurrence of `term_lower`.
fn highlight_matches(text: &str, term_lower: &str) -> Vec<MatchSegment> {
    let text_lower = text.to_lowercase();
    // Lowercasing can change byte lengths for some scripts; highlighting
    // then degrades to a single plain run rather than slicing mid-char.
    if text_lower.len() != text.len() {
        return vec![MatchSegment::Plain(text.to_string())];
    }

    let mut segments = Vec::new();
    let term_len = term_lower.len();
    let mut last_idx = 0;

    for (start_idx, _) in text_lower.match_indices(term_lower) {
        let end_idx = start_idx + term_len;
        // Equal total length still allows individual chars to shift
        // boundaries when one grows while another shrinks; leave such
        // occurrences unhighlighted instead of slicing mid-char.
        if !text.is_char_boundary(start_idx) || !text.is_char_boundary(end_idx) {
            continue;
        }
        if start_idx > last_idx {
            segments.push(MatchSegment::Plain(text[last_idx..start_idx].to_string()));
        }
        segments.push(MatchSegment::Match(text[start_idx..end_idx].to_string()));
        last_idx = end_idx;
    }

    if last_idx < text.len() {
        segments.push(MatchSegment::Plain(text[last_idx..].to_string()));
    }

    segments
}
