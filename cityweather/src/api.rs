//! OpenWeatherMap "current weather" client
//!
//! FRAMEWORK PATTERN: Async Side Effects
//! - The reducer emits `Effect::FetchWeather`
//! - The effect handler spawns `current_weather` as a task
//! - The task resolves to `WeatherDidLoad` or `WeatherDidError`

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::state::{WeatherPayload, FALLBACK_ERROR};

/// Everything that can go wrong while fetching weather.
///
/// The UI does not distinguish between variants; see [`failure_message`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body transfer failure
    #[error("{0}")]
    Transport(reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// The body was not the JSON shape we expect
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The JSON parsed but cannot be displayed
    #[error("Invalid weather data: {0}")]
    InvalidPayload(&'static str),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The URL carries the API key
        FetchError::Transport(e.without_url())
    }
}

/// Collapse any fetch error into the single message shown to the user.
pub fn failure_message(err: &FetchError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainBlock,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

impl TryFrom<CurrentWeatherResponse> for WeatherPayload {
    type Error = FetchError;

    fn try_from(raw: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let description = raw
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or(FetchError::InvalidPayload("no weather conditions"))?;

        if !raw.main.temp.is_finite() || raw.main.temp < 0.0 {
            return Err(FetchError::InvalidPayload("temperature out of range"));
        }

        Ok(WeatherPayload {
            city: raw.name,
            temperature_kelvin: raw.main.temp,
            description,
        })
    }
}

/// Decode and validate a response body.
pub fn parse_payload(body: &[u8]) -> Result<WeatherPayload, FetchError> {
    let raw: CurrentWeatherResponse = serde_json::from_slice(body)?;
    WeatherPayload::try_from(raw)
}

/// HTTP client for the weather API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: ClientConfig,
}

impl WeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn request_url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&appid={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(city),
            urlencoding::encode(&self.config.api_key)
        )
    }

    /// One GET, no retries, no timeout.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn current_weather(&self, city: &str) -> Result<WeatherPayload, FetchError> {
        debug!("Fetching current weather");

        let result = async {
            let response = self.http.get(self.request_url(city)).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            parse_payload(&body)
        }
        .await;

        match &result {
            Ok(payload) => debug!(city = %payload.city, "Weather loaded"),
            Err(e) => warn!(error = %e, "Weather fetch failed"),
        }
        result
    }
}
