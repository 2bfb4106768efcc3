//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and handled by the main loop.
//! This keeps the reducer pure while making async operations explicit.

use cityweather_core::TaskKey;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the current weather for `city`
    FetchWeather { request_id: u64, city: String },
}

impl Effect {
    /// Task key for this effect.
    ///
    /// Every request gets its own key, so a newer fetch never aborts one that
    /// is still in flight.
    pub fn task_key(&self) -> TaskKey {
        match self {
            Effect::FetchWeather { request_id, .. } => {
                TaskKey::new(format!("weather#{request_id}"))
            }
        }
    }
}
