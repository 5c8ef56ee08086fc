//! Named interval timers.
//!
//! Each timer runs as a tokio task. Starting a timer under an id that is
//! already running replaces it. Hiding the scheduler (visibility loss) stops
//! every task but remembers them, so they restart when it becomes visible
//! again. Must be used from within a tokio runtime.

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type TimerTask = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

struct TimerEntry {
    interval: Duration,
    task: TimerTask,
    handle: Option<JoinHandle<()>>,
}

impl TimerEntry {
    fn halt(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub struct Scheduler {
    timers: HashMap<String, TimerEntry>,
    visible: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_timer(interval: Duration, task: TimerTask) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            task().await;
        }
    })
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            visible: true,
        }
    }

    /// Starts (or replaces) the timer `id`, running `task` every `interval`.
    /// The first run happens immediately.
    pub fn start<F, Fut>(&mut self, id: impl Into<String>, interval: Duration, task: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = id.into();
        let task: TimerTask = Arc::new(move || -> BoxFuture<'static, ()> { Box::pin(task()) });

        if let Some(mut previous) = self.timers.remove(&id) {
            tracing::debug!("Replacing timer {}", id);
            previous.halt();
        }

        let handle = self
            .visible
            .then(|| spawn_timer(interval, Arc::clone(&task)));
        self.timers.insert(
            id,
            TimerEntry {
                interval,
                task,
                handle,
            },
        );
    }

    /// Stops and forgets timer `id`. Returns false if it did not exist.
    pub fn stop(&mut self, id: &str) -> bool {
        match self.timers.remove(id) {
            Some(mut entry) => {
                entry.halt();
                true
            }
            None => false,
        }
    }

    /// Stops and forgets every timer.
    pub fn stop_all(&mut self) {
        for (_, mut entry) in self.timers.drain() {
            entry.halt();
        }
    }

    /// Visibility loss pauses every timer; regaining it restarts them.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;

        for (id, entry) in self.timers.iter_mut() {
            if visible {
                tracing::debug!("Resuming timer {}", id);
                entry.handle = Some(spawn_timer(entry.interval, Arc::clone(&entry.task)));
            } else {
                tracing::debug!("Pausing timer {}", id);
                entry.halt();
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True when `id` is registered and its task is live.
    pub fn is_running(&self, id: &str) -> bool {
        self.timers
            .get(id)
            .and_then(|entry| entry.handle.as_ref())
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn timer_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.timers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}
