//! Session state.
//!
//! Owns the immutable original snapshot and the live editable model, and
//! wires both to the host bridge. Reset is a pure rebuild from the
//! snapshot; apply derives a fresh coerced dictionary and never mutates
//! the snapshot. A host may push new data any number of times over a
//! session, and the model rebuilds deterministically each time.

use crate::bridge::HostBridge;
use crate::coerce;
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::message::Notice;
use crate::model::{FormModel, PresentationValue};
use crate::sample;
use crate::search::{self, SearchOutcome};
use crate::value::RawAttributeSet;

/// What an apply produced: the coerced dictionary the host received, plus
/// any per-field warnings gathered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub values: RawAttributeSet,
    pub notices: Vec<Notice>,
}

/// A single-editor form session, generic over the host transport.
pub struct Session<B: HostBridge> {
    bridge: B,
    config: FormConfig,
    component_name: String,
    snapshot: RawAttributeSet,
    model: FormModel,
    query: String,
}

impl<B: HostBridge> Session<B> {
    pub fn new(bridge: B, config: FormConfig) -> Self {
        Self {
            bridge,
            config,
            component_name: String::new(),
            snapshot: RawAttributeSet::default(),
            model: FormModel::default(),
            query: String::new(),
        }
    }

    /// Request the initial dataset from the host. When the bridge is
    /// missing and the config allows it, report that once and fall back to
    /// the built-in sample dataset so the form stays exercisable.
    pub fn start(&mut self) -> Result<()> {
        match self.bridge.request_initial() {
            Ok(payload) => {
                self.load_initial(payload.component_name, payload.options);
                Ok(())
            }
            Err(FormError::MissingHostBridge) if self.config.placeholder_on_missing_bridge => {
                tracing::debug!("host bridge missing; loading placeholder dataset");
                self.bridge
                    .notify_error("Host bridge not found. Loading the built-in sample dataset.");
                let payload = sample::placeholder();
                self.load_initial(payload.component_name, payload.options);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// (Re)populate the session from a raw attribute set. The set becomes
    /// the new immutable snapshot; the model and search state rebuild from
    /// scratch.
    pub fn load_initial(&mut self, component_name: impl Into<String>, raw: RawAttributeSet) {
        self.component_name = component_name.into();
        self.snapshot = raw;
        self.query.clear();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.model = FormModel::build(
            &self.component_name,
            &self.snapshot,
            self.config.expand_first_section,
        );
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    /// Record a user edit to one field's presentation value.
    pub fn edit_field(
        &mut self,
        section: &str,
        key: &str,
        value: PresentationValue,
    ) -> Result<()> {
        let field = self
            .model
            .field_mut(section, key)
            .ok_or_else(|| FormError::UnknownField {
                section: section.to_string(),
                key: key.to_string(),
            })?;
        field.current = value;
        Ok(())
    }

    /// Discard all edits and rebuild the model from the snapshot.
    pub fn reset(&mut self) {
        tracing::debug!("resetting form model from snapshot");
        self.query.clear();
        self.rebuild();
    }

    /// Coerce the whole model and hand the result to the host. The
    /// snapshot is left untouched; per-field numeric failures surface as
    /// warning notices and never abort the apply.
    pub fn apply(&mut self) -> Result<ApplyOutcome> {
        let (values, notices) = coerce::apply_model(&self.model);
        self.bridge.submit(&values)?;
        self.bridge.notify_info("Options applied.");
        Ok(ApplyOutcome { values, notices })
    }

    /// Set the search query, returning the filter outcome. Sections made
    /// visible by a non-empty query auto-expand; search never collapses a
    /// section.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> SearchOutcome {
        self.query = query.into();
        let outcome = search::filter(&self.model, &self.query);
        if !self.query.is_empty() {
            for section_match in outcome.sections.iter().filter(|s| s.visible) {
                if let Some(section) = self.model.section_mut(&section_match.name) {
                    section.expanded = true;
                }
            }
        }
        outcome
    }

    /// Filter the model against the current query without changing state.
    pub fn search(&self) -> SearchOutcome {
        search::filter(&self.model, &self.query)
    }

    /// Explicitly toggle one section's expansion. Returns the new state,
    /// or `None` when the section does not exist.
    pub fn toggle_section(&mut self, name: &str) -> Option<bool> {
        let section = self.model.section_mut(name)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }
}
