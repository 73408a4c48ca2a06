//! Host bridge abstraction.
//!
//! The host that supplies the initial dictionary and receives the coerced
//! one is an external collaborator behind the [`HostBridge`] trait. The
//! session is generic over it, so the same engine runs against a real
//! transport, the CLI, or an in-memory double in tests.

use crate::error::{FormError, Result};
use crate::value::RawAttributeSet;

/// The initial dataset a host hands over at session start.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialPayload {
    pub component_name: String,
    pub options: RawAttributeSet,
}

/// Boundary contract with the host collaborator.
///
/// `submit` and `request_initial` are fallible; the notification methods
/// are best-effort with no acknowledgment expected.
pub trait HostBridge {
    /// Ask the host for the initial attribute set. Called at session start
    /// and whenever the host refreshes its data.
    fn request_initial(&mut self) -> Result<InitialPayload>;

    /// Hand the coerced dictionary back to the host.
    fn submit(&mut self, values: &RawAttributeSet) -> Result<()>;

    fn notify_error(&mut self, message: &str);

    fn notify_info(&mut self, message: &str);
}

/// In-memory bridge that records all traffic. The standard test double;
/// also usable as a capture sink by embedding UIs.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    /// Payload handed out by `request_initial`; `None` simulates a missing
    /// host bridge.
    pub initial: Option<InitialPayload>,
    /// When set, `submit` rejects instead of recording.
    pub fail_submit: bool,
    pub submitted: Vec<RawAttributeSet>,
    pub errors: Vec<String>,
    pub infos: Vec<String>,
}

impl RecordingBridge {
    pub fn with_initial(component_name: impl Into<String>, options: RawAttributeSet) -> Self {
        Self {
            initial: Some(InitialPayload {
                component_name: component_name.into(),
                options,
            }),
            ..Self::default()
        }
    }

    /// A bridge that behaves as if no host is attached.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

impl HostBridge for RecordingBridge {
    fn request_initial(&mut self) -> Result<InitialPayload> {
        self.initial.clone().ok_or(FormError::MissingHostBridge)
    }

    fn submit(&mut self, values: &RawAttributeSet) -> Result<()> {
        if self.fail_submit {
            return Err(FormError::Bridge("submit rejected by host".to_string()));
        }
        self.submitted.push(values.clone());
        Ok(())
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn notify_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}
