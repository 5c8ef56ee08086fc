//! In-flight guards for operations whose side effects must not repeat.
//!
//! A [`GuardToken`] is held for the duration of a guarded operation and
//! releases its key when dropped. A second caller asking for a held key gets
//! `None` and should drop its request rather than wait.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default, Clone)]
pub struct GuardSet {
    held: Arc<Mutex<HashSet<String>>>,
}

impl GuardSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` if another operation holds it.
    pub fn try_acquire(&self, key: impl Into<String>) -> Option<GuardToken> {
        let key = key.into();
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(key.clone()) {
            return None;
        }
        Some(GuardToken {
            key,
            held: Arc::clone(&self.held),
        })
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct GuardToken {
    key: String,
    held: Arc<Mutex<HashSet<String>>>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

pub fn daily_reset_key(player_id: &str) -> String {
    format!("daily-reset:{}", player_id)
}

pub fn battle_timeout_key(player_id: &str, boss_id: &str) -> String {
    format!("battle-timeout:{}:{}", player_id, boss_id)
}
