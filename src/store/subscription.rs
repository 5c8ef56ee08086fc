//! Change subscriptions: callbacks run after a player's record commits.

use crate::core::profile::PlayerProfile;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

pub type ChangeCallback = Arc<dyn Fn(&PlayerProfile) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_player: HashMap<String, Vec<(u64, ChangeCallback)>>,
}

/// Per-store list of subscribers.
#[derive(Default, Clone)]
pub struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub fn add(&self, player_id: &str, on_change: ChangeCallback) -> Subscription {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.next_id += 1;
        let id = registry.next_id;
        registry
            .by_player
            .entry(player_id.to_string())
            .or_default()
            .push((id, on_change));

        Subscription {
            id,
            player_id: player_id.to_string(),
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Calls every subscriber of `profile.player_id`. Callbacks run outside
    /// the registry lock.
    pub fn publish(&self, profile: &PlayerProfile) {
        let callbacks: Vec<ChangeCallback> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry
                .by_player
                .get(&profile.player_id)
                .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default()
        };
        for callback in callbacks {
            callback(profile);
        }
    }

}

/// Handle for one subscription. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    player_id: String,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(subs) = registry.by_player.get_mut(&self.player_id) {
            subs.retain(|(id, _)| *id != self.id);
            if subs.is_empty() {
                registry.by_player.remove(&self.player_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_publish_reaches_only_matching_player() {
        let subscribers = Subscribers::default();
        let seen = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&seen);
        let _sub = subscribers.add(
            "a",
            Arc::new(move |p: &PlayerProfile| {
                counter.store(p.level, Ordering::SeqCst);
            }),
        );

        let mut profile = PlayerProfile::new("a", Utc::now());
        profile.level = 7;
        subscribers.publish(&profile);
        assert_eq!(seen.load(Ordering::SeqCst), 7);

        let mut other = PlayerProfile::new("b", Utc::now());
        other.level = 9;
        subscribers.publish(&other);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_unsubscribe_on_drop() {
        let subscribers = Subscribers::default();
        let calls = Arc::new(AtomicU32::new(0));
        let tally = |calls: &Arc<AtomicU32>| -> ChangeCallback {
            let calls = Arc::clone(calls);
            Arc::new(move |_: &PlayerProfile| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        let sub = subscribers.add("a", tally(&calls));
        let _keep = subscribers.add("a", tally(&calls));
        let profile = PlayerProfile::new("a", Utc::now());

        subscribers.publish(&profile);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        sub.unsubscribe();
        subscribers.publish(&profile);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
