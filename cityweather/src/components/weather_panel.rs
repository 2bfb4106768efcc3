use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::WeatherPayload;

pub const ERROR_ICON: &str = "⚠";

/// Error line and result block, each shown only when present
pub struct WeatherPanelProps<'a> {
    pub error: Option<&'a str>,
    pub result: Option<&'a WeatherPayload>,
}

pub struct WeatherPanel;

impl WeatherPanel {
    fn lines(props: &WeatherPanelProps<'_>) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(error) = props.error {
            lines.push(Line::from(vec![
                Span::styled(format!("{ERROR_ICON} "), Style::default().fg(Color::Red)),
                Span::styled(error.to_string(), Style::default().fg(Color::Red)),
            ]));
            lines.push(Line::default());
        }

        if let Some(weather) = props.result {
            let label = Style::default().fg(Color::DarkGray);
            lines.push(Line::from(format!("Weather in {}", weather.city)).bold());
            lines.push(Line::from(vec![
                Span::styled("Temperature: ", label),
                Span::styled(
                    format!("{} °F", weather.fahrenheit()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Description: ", label),
                Span::raw(weather.description.clone()),
            ]));
        }

        lines
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let paragraph = Paragraph::new(Self::lines(&props)).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
