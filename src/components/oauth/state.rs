use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a login attempt may take before its state is forgotten
pub const STATE_TTL: Duration = Duration::from_secs(10 * 60);

/// Server-side registry of outstanding OAuth `state` nonces
#[derive(Debug)]
pub struct StateStore {
    pending: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(STATE_TTL)
    }
}

impl StateStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Generate and remember a fresh random nonce
    pub fn issue(&self) -> String {
        let state = Uuid::new_v4().simple().to_string();
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        self.prune(&mut pending);
        pending.insert(state.clone(), Instant::now());
        state
    }

    /// Accept a nonce once; unknown, reused or expired nonces are rejected
    pub fn consume(&self, state: &str) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        self.prune(&mut pending);
        pending.remove(state).is_some()
    }

    fn prune(&self, pending: &mut HashMap<String, Instant>) {
        let ttl = self.ttl;
        pending.retain(|_, issued| issued.elapsed() < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_single_use() {
        let store = StateStore::default();
        let state = store.issue();

        assert!(store.consume(&state));
        assert!(!store.consume(&state));
    }

    #[test]
    fn test_states_are_unique() {
        let store = StateStore::default();
        assert_ne!(store.issue(), store.issue());
    }

    #[test]
    fn test_unknown_state_rejected() {
        let store = StateStore::default();
        store.issue();

        assert!(!store.consume("randomstate"));
        assert!(!store.consume(""));
    }

    #[test]
    fn test_expired_state_rejected() {
        let store = StateStore::new(Duration::ZERO);
        let state = store.issue();

        assert!(!store.consume(&state));
    }
}
