use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;

const KEYS: [(&str, &str); 4] = [
    ("Enter", "get weather"),
    ("←/→", "move"),
    ("Ctrl+U", "clear"),
    ("Esc", "quit"),
];

pub struct HelpBar;

pub struct HelpBarProps;

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let spans: Vec<Span> = KEYS
            .iter()
            .flat_map(|(key, what)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {what} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
