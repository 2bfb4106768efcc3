//! Component trait for UI elements driven by props

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// Something that draws itself from props and turns terminal events into actions.
///
/// - Props carry everything borrowed from application state for this frame.
/// - `handle_event` reports what the user asked for as actions. It never
///   reaches into application state.
/// - `render` draws props plus whatever local UI state the component keeps.
///
/// Local UI state (a text buffer, a cursor offset) may live in `&mut self`
/// when nothing outside the component needs to react to it.
///
/// # Example
///
/// ```ignore
/// use cityweather_core::{Component, EventKind, Frame, Rect};
///
/// struct SubmitButton;
///
/// struct SubmitButtonProps {
///     is_loading: bool,
/// }
///
/// impl Component<AppAction> for SubmitButton {
///     type Props<'a> = SubmitButtonProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event {
///             EventKind::Key(key) if key.code == KeyCode::Enter && !props.is_loading => {
///                 Some(AppAction::Submit)
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let label = if props.is_loading { "Loading..." } else { "Submit" };
///         frame.render_widget(Paragraph::new(label), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Read-only data for one render or one event
    type Props<'a>;

    /// Translate an event into zero or more actions.
    ///
    /// `None`, `Some(action)` and `Vec<A>` all work as return values.
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
