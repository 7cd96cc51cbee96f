//! Bounded in-memory session table.
//!
//! Sessions idle for longer than the configured timeout are swept on
//! every lookup. When the table is full, the least recently seen
//! session is evicted to make room for a new one.

use crate::config::SessionConfig;
use crate::random::SecureRandom;
use crate::session::Session;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct Entry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by opaque id, capped in count and idle time.
pub struct SessionStore {
    entries: HashMap<String, Entry>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Creates an empty store. A `max_sessions` of zero is treated as one.
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    /// Creates a store with the configured limits.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.max_sessions,
            Duration::from_secs(config.idle_timeout_secs),
        )
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no sessions are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the id of the caller's session, creating one if needed.
    ///
    /// A known `requested` id is refreshed and returned. Otherwise a new
    /// session is built with `create` under a fresh random id.
    pub fn resolve(
        &mut self,
        requested: Option<&str>,
        now: Instant,
        create: impl FnOnce() -> Session,
    ) -> String {
        self.sweep(now);

        if let Some(id) = requested {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.last_seen = now;
                return id.to_owned();
            }
        }

        while self.entries.len() >= self.max_sessions {
            self.evict_least_recent();
        }

        let id = SecureRandom::from_os_entropy().token_hex(16);
        self.entries.insert(
            id.clone(),
            Entry {
                session: create(),
                last_seen: now,
            },
        );
        tracing::debug!(sessions = self.entries.len(), "Session created");
        id
    }

    /// Returns the session with `id`.
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.entries.get(id).map(|entry| &entry.session)
    }

    /// Returns the session with `id` for modification.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.entries.get_mut(id).map(|entry| &mut entry.session)
    }

    fn sweep(&mut self, now: Instant) {
        let before = self.entries.len();
        let timeout = self.idle_timeout;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_seen) < timeout);

        let expired = before - self.entries.len();
        if expired > 0 {
            tracing::debug!(expired, "Idle sessions expired");
        }
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            self.entries.remove(&id);
            tracing::debug!("Session table full, evicted least recent session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Policy, PolicyUpdate};

    fn store(max_sessions: usize, idle_secs: u64) -> SessionStore {
        SessionStore::new(max_sessions, Duration::from_secs(idle_secs))
    }

    fn fresh() -> Session {
        Session::new(Policy::default(), 5)
    }

    #[test]
    fn test_known_id_reused() {
        let mut sessions = store(4, 60);
        let now = Instant::now();

        let id = sessions.resolve(None, now, fresh);
        let again = sessions.resolve(Some(&id), now, fresh);

        assert_eq!(id, again);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_new_session() {
        let mut sessions = store(4, 60);
        let id = sessions.resolve(Some("forged"), Instant::now(), fresh);

        assert_ne!(id, "forged");
        assert!(sessions.get("forged").is_none());
        assert!(sessions.get(&id).is_some());
    }

    #[test]
    fn test_cap_holds_under_headerless_flood() {
        let mut sessions = store(16, 3600);
        let now = Instant::now();

        for _ in 0..1000 {
            sessions.resolve(None, now, fresh);
        }

        assert_eq!(sessions.len(), 16);
    }

    #[test]
    fn test_full_table_evicts_least_recent() {
        let mut sessions = store(2, 3600);
        let start = Instant::now();

        let first = sessions.resolve(None, start, fresh);
        let second = sessions.resolve(None, start + Duration::from_secs(1), fresh);
        // Touching the first makes the second the least recent
        sessions.resolve(Some(&first), start + Duration::from_secs(2), fresh);
        let third = sessions.resolve(None, start + Duration::from_secs(3), fresh);

        assert_eq!(sessions.len(), 2);
        assert!(sessions.get(&first).is_some());
        assert!(sessions.get(&second).is_none());
        assert!(sessions.get(&third).is_some());
    }

    #[test]
    fn test_idle_sessions_expire() {
        let mut sessions = store(8, 60);
        let start = Instant::now();

        let stale = sessions.resolve(None, start, fresh);
        let later = start + Duration::from_secs(61);
        let id = sessions.resolve(Some(&stale), later, fresh);

        assert_ne!(id, stale);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_activity_keeps_session_alive() {
        let mut sessions = store(8, 60);
        let start = Instant::now();

        let id = sessions.resolve(None, start, fresh);
        for step in 1..=5 {
            let now = start + Duration::from_secs(step * 50);
            assert_eq!(sessions.resolve(Some(&id), now, fresh), id);
        }
    }

    #[test]
    fn test_get_mut_changes_session() {
        let mut sessions = store(4, 60);
        let id = sessions.resolve(None, Instant::now(), fresh);

        let update = PolicyUpdate {
            min_length: Some(20),
            ..PolicyUpdate::default()
        };
        sessions.get_mut(&id).unwrap().set_policy(&update).unwrap();

        assert_eq!(sessions.get(&id).unwrap().policy().min_length, 20);
    }
}
