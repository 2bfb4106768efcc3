//! Reducer - (state, action) -> (changed, effects)
//!
//! FRAMEWORK PATTERN: Reducer
//! - All state mutations happen here
//! - No side effects: async work is requested by returning an `Effect`

use cityweather_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::WeatherFetch(city) => {
            let city = city.trim();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }

            state.weather.start();
            state.request_seq += 1;
            DispatchResult::changed_with(Effect::FetchWeather {
                request_id: state.request_seq,
                city: city.to_string(),
            })
        }

        // Results apply in arrival order, whichever request they belong to
        Action::WeatherDidLoad(payload) => {
            state.weather.succeed(payload);
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            state.weather.fail(message);
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.weather.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Quit is handled in main loop, not here
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{StalePolicy, WeatherPayload};

    fn london() -> WeatherPayload {
        WeatherPayload {
            city: "London".into(),
            temperature_kelvin: 288.0,
            description: "clear sky".into(),
        }
    }

    #[test]
    fn test_weather_fetch_sets_loading_and_emits_effect() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::WeatherFetch("  London ".into()));

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request_id: 1,
                city: "London".into(),
            }]
        );
    }

    #[test]
    fn test_blank_city_is_ignored() {
        let mut state = AppState::default();

        for city in ["", "   ", "\t"] {
            let result = reducer(&mut state, Action::WeatherFetch(city.into()));
            assert!(!result.changed);
            assert!(!result.has_effects());
        }
        assert!(!state.weather.is_loading());
        assert_eq!(state.request_seq, 0);
    }

    #[test]
    fn test_weather_fetch_clears_previous_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidError("Network Error".into()));
        assert!(state.weather.error_message().is_some());

        reducer(&mut state, Action::WeatherFetch("London".into()));

        assert!(state.weather.error_message().is_none());
        assert!(state.weather.is_loading());
    }

    #[test]
    fn test_weather_did_load_clears_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch("London".into()));

        let result = reducer(&mut state, Action::WeatherDidLoad(london()));

        assert!(result.changed);
        assert!(!state.weather.is_loading());
        assert_eq!(state.weather.result(), Some(&london()));
    }

    #[test]
    fn test_weather_did_error_keeps_previous_result() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch("London".into()));
        reducer(&mut state, Action::WeatherDidLoad(london()));
        reducer(&mut state, Action::WeatherFetch("Atlantis".into()));

        reducer(&mut state, Action::WeatherDidError("Network Error".into()));

        assert!(!state.weather.is_loading());
        assert_eq!(state.weather.error_message(), Some("Network Error"));
        assert_eq!(state.weather.result(), Some(&london()));
    }

    #[test]
    fn test_clear_stale_policy_drops_result_on_fetch() {
        let mut state = AppState::new(StalePolicy::ClearOnFetch);
        reducer(&mut state, Action::WeatherFetch("London".into()));
        reducer(&mut state, Action::WeatherDidLoad(london()));

        reducer(&mut state, Action::WeatherFetch("Atlantis".into()));

        assert!(state.weather.result().is_none());
    }

    #[test]
    fn test_each_fetch_gets_its_own_request_id() {
        let mut state = AppState::default();
        let first = reducer(&mut state, Action::WeatherFetch("London".into()));
        let second = reducer(&mut state, Action::WeatherFetch("Paris".into()));

        assert_ne!(first.effects[0].task_key(), second.effects[0].task_key());
    }

    #[test]
    fn test_last_result_to_arrive_wins() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch("London".into()));
        reducer(&mut state, Action::WeatherFetch("Paris".into()));

        let paris = WeatherPayload {
            city: "Paris".into(),
            temperature_kelvin: 290.0,
            description: "few clouds".into(),
        };
        // Paris was submitted last but resolves first
        reducer(&mut state, Action::WeatherDidLoad(paris));
        reducer(&mut state, Action::WeatherDidLoad(london()));

        assert_eq!(state.weather.result(), Some(&london()));
    }

    #[test]
    fn test_tick_only_rerenders_when_loading() {
        let mut state = AppState::default();

        assert!(!reducer(&mut state, Action::Tick).changed);

        reducer(&mut state, Action::WeatherFetch("London".into()));
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 2);
    }
}
