//! Fire-and-forget background work observed on later ticks
//!
//! The tick loop never awaits. Work such as a translation lookup is spawned
//! onto a tokio runtime and its result is picked up by [`TaskQueue::drain`]
//! on whichever tick it happens to be ready.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Cancellable background tasks producing values of type `T`
pub struct TaskQueue<T> {
    handle: Handle,
    result_tx: UnboundedSender<(TaskId, T)>,
    result_rx: UnboundedReceiver<(TaskId, T)>,
    running: HashMap<TaskId, AbortHandle>,
    next_id: u64,
}

impl<T: Send + 'static> TaskQueue<T> {
    pub fn new(handle: Handle) -> Self {
        let (result_tx, result_rx) = unbounded_channel();
        Self {
            handle,
            result_tx,
            result_rx,
            running: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn spawn<F>(&mut self, future: F) -> TaskId
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let (future, abort) = abortable(future);
        let tx = self.result_tx.clone();

        self.handle.spawn(async move {
            if let Ok(value) = future.await {
                let _ = tx.send((id, value));
            }
        });
        self.running.insert(id, abort);
        debug!("Spawned task {}", id.0);
        id
    }

    /// Run `future` after `delay`
    pub fn spawn_after<F>(&mut self, delay: Duration, future: F) -> TaskId
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            future.await
        })
    }

    /// Returns false when the task already finished or was cancelled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.running.remove(&id) {
            Some(abort) => {
                abort.abort();
                debug!("Cancelled task {}", id.0);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, abort) in self.running.drain() {
            abort.abort();
        }
    }

    /// Results that became ready since the last call, without blocking.
    /// Results of cancelled tasks are never returned.
    pub fn drain(&mut self) -> Vec<(TaskId, T)> {
        let mut ready = Vec::new();
        while let Ok((id, value)) = self.result_rx.try_recv() {
            if self.running.remove(&id).is_some() {
                ready.push((id, value));
            }
        }
        ready
    }

    /// Tasks spawned but not yet drained or cancelled
    pub fn pending(&self) -> usize {
        self.running.len()
    }
}

impl<T> Drop for TaskQueue<T> {
    fn drop(&mut self) {
        for (_, abort) in self.running.drain() {
            abort.abort();
        }
    }
}

impl<T> std::fmt::Debug for TaskQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("running", &self.running.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
