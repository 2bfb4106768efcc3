//! Root view: city form, weather panel and help bar
//!
//! FRAMEWORK PATTERN: Component Trait
//! - Props<'a>: Read-only data for rendering (borrowed from state)
//! - handle_event: Receives EventKind, returns actions
//! - render: Pure function of props plus the form's local input

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};

use super::{
    CityForm, CityFormProps, Component, HelpBar, HelpBarProps, WeatherPanel, WeatherPanelProps,
};
use crate::action::Action;
use crate::state::AppState;
use cityweather_core::EventKind;

pub struct WeatherAppProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Debug, Default)]
pub struct WeatherApp {
    form: CityForm,
}

impl WeatherApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &CityForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CityForm {
        &mut self.form
    }

    fn form_props(props: &WeatherAppProps<'_>) -> CityFormProps {
        CityFormProps {
            is_loading: props.state.weather.is_loading(),
            is_focused: props.is_focused,
            tick_count: props.state.tick_count,
        }
    }
}

impl Component<Action> for WeatherApp {
    type Props<'a> = WeatherAppProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let form_props = Self::form_props(&props);
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" ☁ City Weather ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let chunks = Layout::vertical([
            Constraint::Length(4), // Input + button
            Constraint::Length(1),
            Constraint::Min(1),    // Error line + result block
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let form_props = Self::form_props(&props);
        self.form.render(frame, chunks[0], form_props);

        let weather = &props.state.weather;
        WeatherPanel.render(
            frame,
            chunks[2],
            WeatherPanelProps {
                error: weather.error_message(),
                result: weather.result(),
            },
        );

        HelpBar.render(frame, chunks[3], HelpBarProps);
    }
}
