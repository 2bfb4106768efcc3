//! Integration tests for the weather client using WireMock
//!
//! These tests mock the OpenWeatherMap API to verify request shape and
//! response handling without network access.

use cityweather::api::{failure_message, FetchError, WeatherClient};
use cityweather::config::ClientConfig;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Test Helpers
// =============================================================================

const API_KEY: &str = "test_api_key";

fn client(base_url: &str) -> WeatherClient {
    WeatherClient::new(ClientConfig {
        base_url: base_url.to_string(),
        api_key: API_KEY.to_string(),
    })
    .expect("Failed to create client")
}

fn london_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "main": { "temp": 288, "feels_like": 287.3, "pressure": 1012, "humidity": 62 },
        "name": "London",
        "cod": 200
    })
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_current_weather_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server.uri())
        .current_weather("London")
        .await
        .expect("weather should load");

    assert_eq!(payload.city, "London");
    assert_eq!(payload.description, "clear sky");
    assert_eq!(payload.fahrenheit(), 59);
}

#[tokio::test]
async fn test_city_with_spaces_is_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "New York",
            "main": { "temp": 300.0 },
            "weather": [{ "description": "haze" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server.uri())
        .current_weather("New York")
        .await
        .expect("weather should load");

    assert_eq!(payload.city, "New York");
    assert_eq!(payload.fahrenheit(), 80);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unknown_city_returns_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .current_weather("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
    assert_eq!(failure_message(&err), "Request failed with status code 404");
}

#[tokio::test]
async fn test_unauthorized_returns_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(401)));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
    assert!(failure_message(&err).starts_with("Invalid response body"));
}

#[tokio::test]
async fn test_empty_weather_array_is_invalid_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "London",
            "main": { "temp": 288 },
            "weather": []
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidPayload(_)));
}

#[tokio::test]
async fn test_connection_failure_does_not_leak_api_key() {
    // Nothing listens on port 1
    let err = client("http://127.0.0.1:1")
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    let message = failure_message(&err);
    assert!(!message.is_empty());
    assert!(!message.contains(API_KEY));
}
