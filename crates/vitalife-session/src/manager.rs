//! Session registry with a cap on live sessions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::session::SessionContext;

pub type SharedSession = Arc<Mutex<SessionContext>>;

/// Default cap on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 100;

struct Entry {
    created_at: DateTime<Utc>,
    session: SharedSession,
}

/// Holds live sessions, each behind its own lock.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Entry>>,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Create a session, evicting the oldest one when at capacity.
    pub fn create(&self) -> SharedSession {
        let id = uuid::Uuid::new_v4().to_string();
        let context = SessionContext::new(id.clone());
        let created_at = context.created_at();
        let session = Arc::new(Mutex::new(context));

        let mut sessions = self.sessions.write();
        while sessions.len() >= self.max_sessions {
            let Some(oldest_id) = sessions
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest_id);
            info!("Session evicted: {}", oldest_id);
        }

        sessions.insert(
            id.clone(),
            Entry {
                created_at,
                session: session.clone(),
            },
        );
        info!("Session created: {}", id);
        session
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.read().get(id).map(|e| e.session.clone())
    }

    /// Remove a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            info!("Session ended: {}", id);
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let mgr = SessionManager::default();
        let session = mgr.create();
        let id = session.lock().id().to_string();

        let fetched = mgr.get(&id).unwrap();
        assert!(Arc::ptr_eq(&session, &fetched));
        assert_eq!(mgr.count(), 1);
        assert!(mgr.get("missing").is_none());
    }

    #[test]
    fn test_remove() {
        let mgr = SessionManager::default();
        let id = mgr.create().lock().id().to_string();
        assert!(mgr.remove(&id));
        assert!(!mgr.remove(&id));
        assert_eq!(mgr.count(), 0);
    }

    #[test]
    fn test_evicts_oldest() {
        let mgr = SessionManager::new(2);
        let first = mgr.create().lock().id().to_string();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = mgr.create().lock().id().to_string();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let third = mgr.create().lock().id().to_string();

        assert_eq!(mgr.count(), 2);
        assert!(mgr.get(&first).is_none());
        assert!(mgr.get(&second).is_some());
        assert!(mgr.get(&third).is_some());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mgr = SessionManager::default();
        let a = mgr.create();
        let b = mgr.create();
        a.lock()
            .save_profile("u1", vitalife_core::UserProfile::new("Lee", 40))
            .unwrap();
        assert_eq!(a.lock().profile_count(), 1);
        assert_eq!(b.lock().profile_count(), 0);
    }
}
