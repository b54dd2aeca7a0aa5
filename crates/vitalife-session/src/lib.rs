//! VitaLife Session — chat log, saved profiles, analytics.
//!
//! A `SessionContext` is one conversation: its chat turns, the profiles
//! saved during it and the current user id. `SessionManager` keeps many
//! of them for the server, each behind its own lock.

pub mod analytics;
pub mod manager;
pub mod session;

pub use analytics::{ActivityEntry, Analytics, ConditionCount, TierCounts};
pub use manager::{SessionManager, SharedSession, DEFAULT_MAX_SESSIONS};
pub use session::{generate_user_id, ChatTurn, SessionContext};
