//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: Async tasks send them back across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Concise one-line description of an action for log output.
///
/// The default falls back to `Debug`. Override it for actions that carry
/// large payloads or values that should not end up in log files.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
