//! Dispatch loop and state-management primitives for cityweather
//!
//! A small Redux/Elm-style core:
//!
//! - **Action**: describes something that happened (user intent or async result)
//! - **Reducer**: `fn(&mut S, A) -> DispatchResult<E>`, the only place state changes
//! - **Effect**: data returned by the reducer asking the runtime to do I/O
//! - **Component**: renders from props and turns terminal events into actions
//! - **EffectRuntime**: polls the terminal, dispatches actions, runs effects, redraws
//!
//! # Async pattern
//!
//! Async work uses two actions. An *intent* (`WeatherFetch`) makes the reducer
//! emit an effect. The effect handler spawns a task on the [`TaskManager`].
//! The task resolves to a *result* action (`WeatherDidLoad` / `WeatherDidError`)
//! that flows back through the same channel. The `Did` prefix marks result
//! actions.

pub mod action;
pub mod bus;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use component::Component;
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, EffectStoreLike, EffectStoreWithMiddleware,
};
pub use event::EventKind;
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use store::{LoggingMiddleware, Middleware};
pub use subscriptions::Subscriptions;
pub use tasks::{TaskKey, TaskManager};

pub use ratatui::{layout::Rect, Frame};
