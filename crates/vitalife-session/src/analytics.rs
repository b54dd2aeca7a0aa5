//! Session analytics — counts over the chat log.

use serde::Serialize;
use vitalife_triage::{ConfidenceTier, EngineStatus, KnowledgeBase};

use crate::session::{ChatTurn, SessionContext};

/// Turns listed under recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
/// Characters of user text kept per recent-activity entry.
pub const ACTIVITY_TEXT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionCount {
    pub condition_id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub timestamp: String,
    pub text: String,
    pub is_emergency: bool,
    pub confidence_tier: ConfidenceTier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_conversations: usize,
    pub emergency_detections: usize,
    pub registered_users: usize,
    pub condition_counts: Vec<ConditionCount>,
    pub unmatched: usize,
    pub tiers: TierCounts,
    pub recent_activity: Vec<ActivityEntry>,
    pub system: EngineStatus,
}

impl Analytics {
    pub fn from_session(
        session: &SessionContext,
        knowledge: &KnowledgeBase,
        system: EngineStatus,
    ) -> Self {
        let history = session.history();

        let mut condition_counts: Vec<ConditionCount> = knowledge
            .records()
            .iter()
            .map(|r| ConditionCount {
                condition_id: r.id.clone(),
                name: r.name.clone(),
                count: 0,
            })
            .collect();
        let mut unmatched = 0;
        let mut tiers = TierCounts::default();

        for turn in history {
            match turn
                .matched_condition_id
                .as_deref()
                .and_then(|id| condition_counts.iter_mut().find(|c| c.condition_id == id))
            {
                Some(entry) => entry.count += 1,
                None => unmatched += 1,
            }
            match turn.confidence_tier {
                ConfidenceTier::Low => tiers.low += 1,
                ConfidenceTier::Medium => tiers.medium += 1,
                ConfidenceTier::High => tiers.high += 1,
            }
        }

        Self {
            total_conversations: history.len(),
            emergency_detections: history.iter().filter(|t| t.is_emergency).count(),
            registered_users: session.profile_count(),
            condition_counts,
            unmatched,
            tiers,
            recent_activity: session
                .recent_turns(RECENT_ACTIVITY_LIMIT)
                .into_iter()
                .map(activity_entry)
                .collect(),
            system,
        }
    }
}

fn activity_entry(turn: &ChatTurn) -> ActivityEntry {
    let mut text: String = turn.user_text.chars().take(ACTIVITY_TEXT_LIMIT).collect();
    if turn.user_text.chars().count() > ACTIVITY_TEXT_LIMIT {
        text.push_str("...");
    }
    ActivityEntry {
        timestamp: turn.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        text,
        is_emergency: turn.is_emergency,
        confidence_tier: turn.confidence_tier,
    }
}
