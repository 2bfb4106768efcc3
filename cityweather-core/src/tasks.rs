//! Task manager for async operations
//!
//! Each task runs a future that resolves to an action; the action is sent
//! back to the main loop when the future completes.
//!
//! Keys identify tasks for cancellation. Spawning with a key that is already
//! running replaces (aborts) the old task. Callers that must never abort an
//! in-flight request give every request its own key.
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! tasks.spawn(TaskKey::new("weather#1"), async move {
//!     match client.current_weather(&city).await {
//!         Ok(payload) => Action::WeatherDidLoad(payload),
//!         Err(e) => Action::WeatherDidError(e.to_string()),
//!     }
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Manages async task lifecycle.
///
/// Finished tasks are pruned lazily on the next spawn.
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager.
    ///
    /// The `action_tx` channel is used to send actions back to the main loop
    /// when tasks complete.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// If the task is cancelled before completion, no action is sent.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();

        self.prune_finished();
        self.cancel(&key);

        tracing::debug!(task = %key, "Spawning task");

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key.
    ///
    /// If no task exists with the given key, this is a no-op.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Check if a task with the given key is currently running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tracked tasks that have not finished yet.
    pub fn running_count(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn prune_finished(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
