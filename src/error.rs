//! Crate error type.
//!
//! Only setup-time problems are errors. Ambiguous runtime input (no primary
//! contact, wrong contact count for a gesture) is logged and ignored instead,
//! since the next input event recovers the state on its own.

use crate::input::InputFamily;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// A handler was registered for a family that has no upstream provider.
    #[error("expected valid {family} event provider")]
    MissingProvider { family: InputFamily },
    /// The dispatcher was already disposed.
    #[error("event dispatcher already disposed")]
    Disposed,
    #[error("unknown navigation metaphor: {0}")]
    InvalidMetaphor(String),
    #[error("invalid value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("failed to parse navigation config: {0}")]
    Json(#[from] serde_json::Error),
}
