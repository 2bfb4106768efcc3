//! Effect-based state management
//!
//! Reducers mutate state and return a [`DispatchResult`] that names any
//! side effects to run. Effects are plain data: the reducer stays pure and
//! the runtime decides how to execute them (usually by spawning a task on
//! the [`TaskManager`](crate::TaskManager)).
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::WeatherFetch(city) => {
//!             state.weather.start();
//!             DispatchResult::changed_with(Effect::FetchWeather { city })
//!         }
//!         Action::WeatherDidLoad(payload) => {
//!             state.weather.succeed(payload);
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::store::Middleware;

/// Result of dispatching an action to an effect-aware store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and a single effect should run.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store whose reducer returns [`DispatchResult<E>`].
///
/// The store owns the application state. Nothing else mutates it.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch an action to the store.
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// An effect store with middleware support.
///
/// Middleware sees each action before and after the reducer runs, along
/// with the state change indicator. It does not see the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

/// Store interface used by [`EffectRuntime`](crate::EffectRuntime).
pub trait EffectStoreLike<S, A: Action, E> {
    /// Dispatch an action and return state changes plus effects.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    /// Get the current state.
    fn state(&self) -> &S;
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        NoOp,
        Save,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::NoOp => "NoOp",
                TestAction::Save => "Save",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Persist(i32),
    }

    #[derive(Default)]
    struct TestState {
        count: i32,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Increment => {
                state.count += 1;
                DispatchResult::changed()
            }
            TestAction::NoOp => DispatchResult::unchanged(),
            TestAction::Save => DispatchResult::changed_with(TestEffect::Persist(state.count)),
        }
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(TestEffect::Persist(1));
        assert!(r.changed);
        assert!(r.has_effects());
        assert_eq!(r.effects, vec![TestEffect::Persist(1)]);
    }

    #[test]
    fn test_effect_store_basic() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::Increment);
        assert!(result.changed);
        assert_eq!(store.state().count, 1);

        let result = store.dispatch(TestAction::NoOp);
        assert!(!result.changed);

        let result = store.dispatch(TestAction::Save);
        assert_eq!(result.effects, vec![TestEffect::Persist(1)]);
    }

    #[test]
    fn test_effect_store_with_middleware() {
        let mut store = EffectStoreWithMiddleware::new(
            TestState::default(),
            test_reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().changed_count, 1);
        assert_eq!(store.state().count, 1);
    }
}
