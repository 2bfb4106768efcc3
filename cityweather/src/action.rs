//! Actions
//!
//! FRAMEWORK PATTERN: Action naming convention
//! - Prefix groups related actions: WeatherFetch, WeatherDidLoad
//! - "Did" marks the result of an async operation
//! - Each fetch moves through three phases: Fetch (start), DidLoad (success),
//!   DidError (failure)

use cityweather_core::ActionSummary;

use crate::state::WeatherPayload;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Intent: look up the weather for this city (triggers async task)
    WeatherFetch(String),

    /// Result: weather data loaded successfully
    WeatherDidLoad(WeatherPayload),

    /// Result: weather fetch failed, with a displayable message
    WeatherDidError(String),

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}

impl cityweather_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch(_) => "WeatherFetch",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

/// Shows concise info instead of full Debug output for data-heavy actions
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad(payload) => format!(
                "WeatherDidLoad {{ city: {:?}, temp: {:.2}K }}",
                payload.city, payload.temperature_kelvin
            ),
            Action::WeatherDidError(e) => {
                let msg = if e.chars().count() > 40 {
                    format!("{}...", e.chars().take(37).collect::<String>())
                } else {
                    e.clone()
                };
                format!("WeatherDidError({:?})", msg)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::Action as _;

    #[test]
    fn test_names() {
        assert_eq!(Action::WeatherFetch("Oslo".into()).name(), "WeatherFetch");
        assert_eq!(Action::Tick.name(), "Tick");
    }

    #[test]
    fn test_summary_truncates_long_errors() {
        let action = Action::WeatherDidError("x".repeat(100));
        let summary = action.summary();
        assert!(summary.starts_with("WeatherDidError(\"xxx"));
        assert!(summary.ends_with("...\")"));
        assert!(summary.len() < 60);
    }
}
