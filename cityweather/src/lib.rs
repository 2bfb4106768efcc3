//! City weather lookup
//!
//! A terminal form that takes a city name, fetches the current conditions from
//! OpenWeatherMap and shows the temperature in °F with a short description.
//!
//! Modules are exported for integration tests.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
