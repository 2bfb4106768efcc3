//! Middleware hooks around store dispatch

use crate::action::ActionSummary;
use crate::Action;

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns
/// to a store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
    /// Action names never logged (high-frequency timers)
    pub skipped: &'static [&'static str],
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            skipped: &[],
        }
    }

    /// Never log actions with these names
    pub fn skipping(mut self, names: &'static [&'static str]) -> Self {
        self.skipped = names;
        self
    }

    /// Whether an action with this name gets logged at all
    pub fn logs(&self, name: &str) -> bool {
        !self.skipped.contains(&name)
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before && self.logs(action.name()) {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after && self.logs(action.name()) {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_actions_are_not_logged() {
        let middleware = LoggingMiddleware::new().skipping(&["Tick"]);
        assert!(!middleware.logs("Tick"));
        assert!(middleware.logs("WeatherFetch"));
        assert!(LoggingMiddleware::new().logs("Tick"));
    }
}
