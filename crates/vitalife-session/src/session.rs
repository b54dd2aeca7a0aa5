//! Per-conversation state: chat log, saved profiles, current user id.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vitalife_core::{Error, Result, UserProfile};
use vitalife_triage::{ConfidenceTier, TriageEngine};

/// One exchange in the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub timestamp: DateTime<Utc>,
    pub user_text: String,
    /// Auto-fill interpretation of `user_text`, if requested.
    pub normalized_text: Option<String>,
    pub response_text: String,
    pub is_emergency: bool,
    pub confidence_tier: ConfidenceTier,
    pub matched_condition_id: Option<String>,
    /// Profile used for personalization.
    pub user_id: Option<String>,
}

/// Generate a short user id (first 8 chars of a v4 uuid).
pub fn generate_user_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    id: String,
    created_at: DateTime<Utc>,
    chat_history: Vec<ChatTurn>,
    user_profiles: HashMap<String, UserProfile>,
    current_user_id: String,
}

impl SessionContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            chat_history: Vec::new(),
            user_profiles: HashMap::new(),
            current_user_id: generate_user_id(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }

    /// Rotate the current user id and return the new one.
    pub fn new_user_id(&mut self) -> &str {
        self.current_user_id = generate_user_id();
        &self.current_user_id
    }

    pub fn append_turn(&mut self, turn: ChatTurn) {
        self.chat_history.push(turn);
    }

    /// Full chat log, oldest first.
    pub fn history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    /// Up to `n` most recent turns, newest first.
    pub fn recent_turns(&self, n: usize) -> Vec<&ChatTurn> {
        self.chat_history.iter().rev().take(n).collect()
    }

    pub fn clear_history(&mut self) -> usize {
        let cleared = self.chat_history.len();
        self.chat_history.clear();
        info!(session = %self.id, cleared, "chat history cleared");
        cleared
    }

    /// Store `profile` under `user_id`, replacing any earlier profile.
    pub fn save_profile(&mut self, user_id: &str, mut profile: UserProfile) -> Result<&UserProfile> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(Error::InvalidInput("user id must not be empty".into()));
        }
        profile.validate()?;
        profile.last_updated = Utc::now();

        self.user_profiles.insert(user_id.to_string(), profile);
        info!(session = %self.id, user_id, "profile saved");
        self.user_profiles
            .get(user_id)
            .ok_or_else(|| Error::Internal(format!("profile {} vanished after save", user_id)))
    }

    pub fn load_profile(&self, user_id: &str) -> Result<&UserProfile> {
        self.user_profiles
            .get(user_id)
            .ok_or_else(|| Error::NotFound(format!("profile {}", user_id)))
    }

    pub fn delete_profile(&mut self, user_id: &str) -> Result<UserProfile> {
        let removed = self
            .user_profiles
            .remove(user_id)
            .ok_or_else(|| Error::NotFound(format!("profile {}", user_id)))?;
        info!(session = %self.id, user_id, "profile deleted");
        Ok(removed)
    }

    /// Saved profiles sorted by user id.
    pub fn list_profiles(&self) -> Vec<(&str, &UserProfile)> {
        let mut profiles: Vec<_> = self
            .user_profiles
            .iter()
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        profiles.sort_by(|a, b| a.0.cmp(b.0));
        profiles
    }

    pub fn profile_count(&self) -> usize {
        self.user_profiles.len()
    }

    /// Run one message through `engine` and log the exchange.
    ///
    /// The profile is looked up by `user_id` when given; an unknown id
    /// means an unpersonalized answer, not an error.
    pub fn record_chat(
        &mut self,
        engine: &TriageEngine,
        text: &str,
        user_id: Option<&str>,
        auto_fill: bool,
    ) -> Result<ChatTurn> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("message must not be empty".into()));
        }

        let user_id = user_id.map(str::trim).filter(|id| !id.is_empty());
        let profile = user_id.and_then(|id| self.user_profiles.get(id));
        if user_id.is_some() && profile.is_none() {
            debug!(session = %self.id, "no saved profile for user, answering without one");
        }

        let assessment = engine.assess(text, profile, auto_fill);
        let response = assessment.response;

        let turn = ChatTurn {
            timestamp: Utc::now(),
            user_text: text.to_string(),
            normalized_text: assessment.normalized_text,
            response_text: response.text,
            is_emergency: response.is_emergency,
            confidence_tier: response.confidence_tier,
            matched_condition_id: response.matched_condition_id,
            user_id: user_id.map(str::to_string),
        };
        debug!(
            session = %self.id,
            emergency = turn.is_emergency,
            tier = %turn.confidence_tier,
            "chat turn recorded"
        );

        self.append_turn(turn.clone());
        Ok(turn)
    }
}
