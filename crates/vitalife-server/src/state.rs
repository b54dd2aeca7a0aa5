//! Shared application state.

use vitalife_core::VitaLifeConfig;
use vitalife_session::{SessionManager, SharedSession};
use vitalife_triage::TriageEngine;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: VitaLifeConfig,
    pub engine: TriageEngine,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: VitaLifeConfig, engine: TriageEngine) -> Self {
        let sessions = SessionManager::new(config.max_sessions);
        Self {
            config,
            engine,
            sessions,
        }
    }

    pub fn session(&self, id: &str) -> vitalife_core::Result<SharedSession> {
        self.sessions
            .get(id)
            .ok_or_else(|| vitalife_core::Error::NotFound(format!("session {}", id)))
    }
}
