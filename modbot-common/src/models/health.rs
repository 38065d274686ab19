// File: modbot-common/src/models/health.rs

use serde::{Deserialize, Serialize};

/// Coarse per-chat health classification. Anything other than `Healthy`
/// excludes the chat from cross-chat moderation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthLevel {
    Unknown,
    Healthy,
    Warning,
    Error,
    NotApplicable,
}

/// Snapshot of what the bot can currently do in one chat, produced by the
/// periodic health-check collaborator and cached process-wide. The
/// orchestrator only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHealthStatus {
    pub chat_id: i64,
    pub reachable: bool,
    pub is_admin: bool,
    pub can_delete_messages: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_invite_users: bool,
    pub level: HealthLevel,
    pub warnings: Vec<String>,
}

impl ChatHealthStatus {
    /// Fully capable chat, no warnings.
    pub fn healthy(chat_id: i64) -> Self {
        Self {
            chat_id,
            reachable: true,
            is_admin: true,
            can_delete_messages: true,
            can_restrict_members: true,
            can_promote_members: true,
            can_invite_users: true,
            level: HealthLevel::Healthy,
            warnings: Vec::new(),
        }
    }

    /// Chat we know nothing about yet. Treated the same as an absent cache
    /// entry: excluded from action.
    pub fn unknown(chat_id: i64) -> Self {
        Self {
            chat_id,
            reachable: false,
            is_admin: false,
            can_delete_messages: false,
            can_restrict_members: false,
            can_promote_members: false,
            can_invite_users: false,
            level: HealthLevel::Unknown,
            warnings: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: HealthLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}
