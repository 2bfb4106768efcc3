//! The event/action/render loop.
//!
//! ```text
//! terminal event -> map_event -> actions -> store.dispatch -> effects -> tasks
//!                                   ^                                     |
//!                                   +------------- result actions --------+
//! ```
//!
//! Everything that touches state happens on the loop's task, so the store
//! needs no locking.

use std::io;
use std::marker::PhantomData;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
use crate::effect::EffectStoreLike;
use crate::event::EventKind;
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timings for the crossterm event poller.
#[derive(Debug, Clone, Copy)]
struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    poll_timeout: Duration,
    /// Sleep between poll cycles.
    loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions
    ///
    /// Useful for converting `Component::handle_event` results.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Send an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime helper for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    _state: PhantomData<S>,
    _effect: PhantomData<E>,
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            tasks,
            subscriptions,
            _state: PhantomData,
            _effect: PhantomData,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Access subscriptions.
    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            action_tx: &self.action_tx,
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    // A local-only render request from an earlier event must survive
                    // an unchanged dispatch
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Go,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Go"
        }
    }

    #[test]
    fn test_event_outcome_builders() {
        let outcome: EventOutcome<TestAction> = EventOutcome::ignored();
        assert!(outcome.actions.is_empty());
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::from_actions(Some(TestAction::Go)).with_render();
        assert_eq!(outcome.actions, vec![TestAction::Go]);
        assert!(outcome.needs_render);

        let outcome: EventOutcome<TestAction> = TestAction::Go.into();
        assert_eq!(outcome, EventOutcome::action(TestAction::Go));
    }

    #[tokio::test]
    async fn test_effect_context_emit_and_spawn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut ctx = EffectContext {
            action_tx: &tx,
            tasks: &mut tasks,
        };

        ctx.emit(TestAction::Go);
        ctx.tasks().spawn("go", async { TestAction::Go });

        assert_eq!(rx.recv().await, Some(TestAction::Go));
        assert_eq!(rx.recv().await, Some(TestAction::Go));
    }
}
