pub mod city_form;
pub mod help_bar;
pub mod text_input;
pub mod weather_app;
pub mod weather_panel;

// Re-export core Component trait
pub use cityweather_core::Component;

pub use city_form::{CityForm, CityFormProps, LOADING_LABEL, SPINNERS, SUBMIT_LABEL};
pub use help_bar::{HelpBar, HelpBarProps};
pub use text_input::{TextInput, TextInputProps};
pub use weather_app::{WeatherApp, WeatherAppProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps, ERROR_ICON};
