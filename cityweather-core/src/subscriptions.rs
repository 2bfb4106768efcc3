//! Interval subscriptions: long-lived sources of actions
//!
//! ```ignore
//! let mut subs = Subscriptions::new(action_tx);
//! subs.interval("tick", Duration::from_millis(100), || Action::Tick);
//! subs.cancel_all();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::Action;

/// Manages interval subscriptions keyed by name.
pub struct Subscriptions<A> {
    handles: HashMap<String, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> Subscriptions<A>
where
    A: Action,
{
    /// Create a new subscription manager.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit an action every `duration`, starting one period from now.
    ///
    /// If a subscription with the same key exists, it is cancelled first.
    pub fn interval<F>(
        &mut self,
        key: impl Into<String>,
        duration: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> A + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(duration);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Cancel a subscription by key.
    pub fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    /// Cancel all subscriptions.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if there are no active subscriptions.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for Subscriptions<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
