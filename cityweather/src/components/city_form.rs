//! City form: text input plus the submit button
//!
//! FRAMEWORK PATTERN: Component with local UI state
//! - The typed city lives in the component, not in `AppState`
//! - Only a valid submit reaches the store, as `WeatherFetch`

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Component, TextInput, TextInputProps};
use crate::action::Action;
use cityweather_core::EventKind;

pub const SUBMIT_LABEL: &str = "Get Weather";
pub const LOADING_LABEL: &str = "Loading...";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct CityFormProps {
    pub is_loading: bool,
    pub is_focused: bool,
    /// Animation frame counter for the loading spinner
    pub tick_count: u32,
}

#[derive(Debug, Default)]
pub struct CityForm {
    input: TextInput,
}

impl CityForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self) -> &str {
        self.input.value()
    }

    /// Pre-fill the input, e.g. from `--city`
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.input.set_value(city);
    }

    fn button_line(props: &CityFormProps) -> Line<'static> {
        if props.is_loading {
            let spinner = SPINNERS[(props.tick_count as usize / 2) % SPINNERS.len()];
            Line::from(vec![
                Span::raw("[ "),
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Yellow)),
                Span::raw(LOADING_LABEL),
                Span::raw(" ]"),
            ])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        } else {
            Line::from(vec![
                Span::raw("[ "),
                Span::raw(SUBMIT_LABEL).bold(),
                Span::raw(" ]"),
            ])
            .style(Style::default().fg(Color::Cyan))
        }
    }
}

impl Component<Action> for CityForm {
    type Props<'a> = CityFormProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if event.is_quit() {
            return vec![Action::Quit];
        }

        let input_props = TextInputProps {
            placeholder: "",
            title: "",
            is_focused: props.is_focused,
            is_dimmed: props.is_loading,
            on_submit: Action::WeatherFetch,
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .filter_map(|action| match action {
                // The button is inert while loading, and blank input is not submitted
                Action::WeatherFetch(city) => {
                    let city = city.trim();
                    (!props.is_loading && !city.is_empty())
                        .then(|| Action::WeatherFetch(city.to_string()))
                }
                other => Some(other),
            })
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area);

        let input_props = TextInputProps::<Action> {
            placeholder: "Enter city name",
            title: " City ",
            is_focused: props.is_focused,
            is_dimmed: props.is_loading,
            on_submit: Action::WeatherFetch,
        };
        self.input.render(frame, chunks[0], input_props);

        frame.render_widget(Paragraph::new(Self::button_line(&props)), chunks[1]);
    }
}
