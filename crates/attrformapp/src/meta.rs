//! Meta-attribute lookup.
//!
//! Hosts describe an attribute's presentation through sibling keys that
//! follow a naming convention: `_<base>_label`, `_<base>_units`, and so on.
//! This module is the single implementation of that convention; the
//! classifier and the model builder both resolve meta values through it
//! instead of concatenating strings ad hoc.

use serde_json::{Map, Value};

use crate::value::AttrValue;

/// The five recognized meta-attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    Label,
    Units,
    Description,
    FormType,
    Options,
}

impl MetaKind {
    const ALL: [MetaKind; 5] = [
        MetaKind::Label,
        MetaKind::Units,
        MetaKind::Description,
        MetaKind::FormType,
        MetaKind::Options,
    ];

    fn suffix(self) -> &'static str {
        match self {
            MetaKind::Label => "_label",
            MetaKind::Units => "_units",
            MetaKind::Description => "_description",
            MetaKind::FormType => "_formtype",
            MetaKind::Options => "_options",
        }
    }
}

/// The conventional sibling key carrying `kind` metadata for `base`.
pub fn meta_key(base: &str, kind: MetaKind) -> String {
    format!("_{}{}", base, kind.suffix())
}

/// Whether `key` is a meta-attribute key for some other attribute
/// (underscore prefix plus a recognized suffix with a non-empty base).
pub fn is_meta_key(key: &str) -> bool {
    let Some(stripped) = key.strip_prefix('_') else {
        return false;
    };
    MetaKind::ALL.iter().any(|kind| {
        stripped
            .strip_suffix(kind.suffix())
            .is_some_and(|base| !base.is_empty())
    })
}

/// Whether `key` is private: never rendered as a field. Meta keys are a
/// subset of private keys.
pub fn is_private_key(key: &str) -> bool {
    key.starts_with('_')
}

/// Resolves meta-attributes for the attributes of one section.
#[derive(Debug, Clone, Copy)]
pub struct MetaLookup<'a> {
    section: &'a Map<String, Value>,
}

impl<'a> MetaLookup<'a> {
    pub fn new(section: &'a Map<String, Value>) -> Self {
        Self { section }
    }

    /// Stringified meta value for `base`, if the sibling key exists.
    pub fn get(&self, base: &str, kind: MetaKind) -> Option<String> {
        self.section
            .get(&meta_key(base, kind))
            .map(|v| AttrValue::from_json(v).display_string())
    }

    pub fn label(&self, base: &str) -> Option<String> {
        self.get(base, MetaKind::Label)
    }

    pub fn units(&self, base: &str) -> Option<String> {
        self.get(base, MetaKind::Units)
    }

    pub fn description(&self, base: &str) -> Option<String> {
        self.get(base, MetaKind::Description)
    }

    pub fn formtype(&self, base: &str) -> Option<String> {
        self.get(base, MetaKind::FormType)
    }

    pub fn options(&self, base: &str) -> Option<String> {
        self.get(base, MetaKind::Options)
    }
}
