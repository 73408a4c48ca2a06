//! # attrformapp
//!
//! A schema-less attribute form engine. Given a dictionary of named
//! attributes (each possibly accompanied by sibling meta-attributes
//! encoding label, unit, description, enumerated options, and form-type
//! hints), the engine:
//!
//! - infers a presentation widget and value type for each attribute,
//! - materializes an ordered form model with search, highlighting and
//!   section expansion over it, and
//! - converts user-edited presentation values back into values
//!   type-compatible with the originals before handing them to the host.
//!
//! ## Layering
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │  Session (session.rs)                              │
//! │  - owns snapshot + live model + search state       │
//! │  - start / load_initial / edit / reset / apply     │
//! │  - generic over the host transport (bridge.rs)     │
//! └────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌────────────────────────────────────────────────────┐
//! │  Engine (model.rs, classify.rs, coerce.rs,         │
//! │          search.rs, meta.rs, value.rs)             │
//! │  - pure, synchronous transforms                    │
//! │  - no I/O, no knowledge of any UI or transport     │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the session is a pure, bounded, synchronous transform:
//! classification runs once per field at build time and the result is
//! stored, so presentation and coercion can never disagree about what a
//! field is. The only asynchronous boundary is the host round-trip, which
//! lives entirely behind the [`bridge::HostBridge`] trait.
//!
//! ## Quick tour
//!
//! ```
//! use attrformapp::bridge::RecordingBridge;
//! use attrformapp::config::FormConfig;
//! use attrformapp::model::PresentationValue;
//! use attrformapp::session::Session;
//! use attrformapp::value::RawAttributeSet;
//!
//! let raw = RawAttributeSet::from_json_str(
//!     r#"{"dynamic_attributes": {"lenx": "100.0cm", "_lenx_label": "Width"}}"#,
//! ).unwrap();
//!
//! let bridge = RecordingBridge::with_initial("Door", raw);
//! let mut session = Session::new(bridge, FormConfig::default());
//! session.start().unwrap();
//!
//! session.edit_field("dynamic_attributes", "lenx", PresentationValue::Text("150".into())).unwrap();
//! let outcome = session.apply().unwrap();
//! assert_eq!(
//!     serde_json::to_string(&outcome.values).unwrap(),
//!     r#"{"dynamic_attributes":{"lenx":150}}"#,
//! );
//! ```

pub mod bridge;
pub mod classify;
pub mod coerce;
pub mod config;
pub mod error;
pub mod message;
pub mod meta;
pub mod model;
pub mod sample;
pub mod search;
pub mod session;
pub mod value;

pub use bridge::{HostBridge, InitialPayload, RecordingBridge};
pub use classify::{Classification, SelectOption, WidgetKind};
pub use config::FormConfig;
pub use error::{FormError, Result};
pub use message::{Notice, NoticeLevel};
pub use model::{Field, FormModel, PresentationValue, Section};
pub use search::{MatchSegment, SearchOutcome};
pub use session::{ApplyOutcome, Session};
pub use value::{AttrValue, RawAttributeSet, ValueType};
