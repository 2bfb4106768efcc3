//! Application state - single source of truth
//!
//! FRAMEWORK PATTERN: State is immutable from component perspective
//! - Components receive `&AppState` as props
//! - Only the reducer mutates state, through the `WeatherState` transitions

/// Message shown when a failed fetch carries no message of its own
pub const FALLBACK_ERROR: &str = "An error occurred";

/// Spinner tick period while a request is in flight
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Validated weather data for one city
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherPayload {
    /// City name as reported by the API
    pub city: String,
    pub temperature_kelvin: f64,
    pub description: String,
}

impl WeatherPayload {
    pub fn fahrenheit(&self) -> i64 {
        kelvin_to_fahrenheit(self.temperature_kelvin)
    }
}

/// `round((K - 273.15) * 9/5 + 32)` with halves rounded up, e.g. 300 K -> 80.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i64 {
    round_half_up((kelvin - 273.15) * 9.0 / 5.0 + 32.0) as i64
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// Compares the fractional part instead of adding 0.5, which is inexact for
/// values just under a half and for large odd integers.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        x.ceil()
    } else {
        floor
    }
}

/// Where the single fetch lifecycle currently is
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchPhase {
    /// No fetch has been started yet
    #[default]
    Idle,
    Loading,
    Loaded(WeatherPayload),
    Failed(String),
}

/// What happens to an earlier result when a new fetch starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Keep showing the last good result while loading and after a failure
    #[default]
    Keep,
    /// Drop the last good result as soon as a new fetch starts
    ClearOnFetch,
}

/// The weather state container: result, loading flag and error message.
///
/// The phase is the single source of truth for "loading / loaded / failed";
/// `retained` only carries an older result so it can stay on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherState {
    phase: FetchPhase,
    retained: Option<WeatherPayload>,
    policy: StalePolicy,
}

impl WeatherState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The result to display: the fresh one, or a retained older one
    pub fn result(&self) -> Option<&WeatherPayload> {
        match &self.phase {
            FetchPhase::Loaded(payload) => Some(payload),
            _ => self.retained.as_ref(),
        }
    }

    /// start: loading on, error cleared
    pub fn start(&mut self) {
        let previous = std::mem::replace(&mut self.phase, FetchPhase::Loading);
        if let FetchPhase::Loaded(payload) = previous {
            self.retained = Some(payload);
        }
        if self.policy == StalePolicy::ClearOnFetch {
            self.retained = None;
        }
    }

    /// success: loading off, result replaced
    pub fn succeed(&mut self, payload: WeatherPayload) {
        self.retained = None;
        self.phase = FetchPhase::Loaded(payload);
    }

    /// failure: loading off, error set (an empty message becomes the fallback)
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        if let FetchPhase::Loaded(payload) = std::mem::take(&mut self.phase) {
            self.retained = Some(payload);
        }
        self.phase = FetchPhase::Failed(message);
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub weather: WeatherState,

    /// Number of fetches started so far, used to give each request its own task
    pub request_seq: u64,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,
}

impl AppState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            weather: WeatherState::new(policy),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(city: &str, kelvin: f64) -> WeatherPayload {
        WeatherPayload {
            city: city.into(),
            temperature_kelvin: kelvin,
            description: "clear sky".into(),
        }
    }

    #[test]
    fn test_kelvin_to_fahrenheit() {
        assert_eq!(kelvin_to_fahrenheit(300.0), 80);
        assert_eq!(kelvin_to_fahrenheit(273.15), 32);
        assert_eq!(kelvin_to_fahrenheit(288.0), 59);
        // -459.67 rounds to -460
        assert_eq!(kelvin_to_fahrenheit(0.0), -460);
    }

    #[test]
    fn test_round_half_up_edges() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        // Largest double below 0.5: adding 0.5 would round up to 1.0
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        // Odd integer above 2^52: x + 0.5 is not representable
        let big = 4_503_599_627_370_497.0_f64;
        assert_eq!(round_half_up(big), big);
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = WeatherState::default();
        assert_eq!(state.phase(), &FetchPhase::Idle);
        assert!(!state.is_loading());
        assert!(state.result().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_start_clears_error() {
        let mut state = WeatherState::default();
        state.fail("boom");
        state.start();
        assert!(state.is_loading());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_result_by_default() {
        let mut state = WeatherState::default();
        state.start();
        state.succeed(payload("London", 288.0));

        state.start();
        assert_eq!(state.result().map(|p| p.city.as_str()), Some("London"));

        state.fail("Network Error");
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), Some("Network Error"));
        assert_eq!(state.result().map(|p| p.city.as_str()), Some("London"));
    }

    #[test]
    fn test_clear_on_fetch_drops_previous_result() {
        let mut state = WeatherState::new(StalePolicy::ClearOnFetch);
        state.start();
        state.succeed(payload("London", 288.0));

        state.start();
        assert!(state.result().is_none());

        state.fail("Network Error");
        assert!(state.result().is_none());
    }

    #[test]
    fn test_empty_failure_message_uses_fallback() {
        let mut state = WeatherState::default();
        state.start();
        state.fail("  ");
        assert_eq!(state.error_message(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn test_success_replaces_retained_result() {
        let mut state = WeatherState::default();
        state.start();
        state.succeed(payload("London", 288.0));
        state.start();
        state.succeed(payload("Paris", 290.0));
        assert_eq!(state.result().map(|p| p.city.as_str()), Some("Paris"));
        assert!(state.error_message().is_none());
    }
}
