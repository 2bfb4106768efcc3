//! Command-line and environment configuration

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::state::StalePolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Look up the current weather for a city
#[derive(Parser, Debug)]
#[command(name = "cityweather")]
#[command(about = "Terminal form that looks up the current weather for a city")]
pub struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API root, without the /data/2.5 path
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pre-fill the form with this city and fetch it on start
    #[arg(long, short)]
    pub city: Option<String>,

    /// Hide the previous result as soon as a new lookup starts
    #[arg(long)]
    pub clear_stale: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is empty")]
    MissingApiKey,

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Validated settings for [`crate::api::WeatherClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Args {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = self.base_url.trim();
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl(base_url.to_string())),
        }

        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn stale_policy(&self) -> StalePolicy {
        if self.clear_stale {
            StalePolicy::ClearOnFetch
        } else {
            StalePolicy::Keep
        }
    }

    /// City to fetch on start, if one was given and is not blank
    pub fn initial_city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}
