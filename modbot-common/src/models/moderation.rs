// File: modbot-common/src/models/moderation.rs
//
// Intent and result value objects for the moderation engine. Intents are
// input-only: callers build one, hand it to the orchestrator by value, and
// the orchestrator consumes it exactly once.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::actor::Actor;

/// Platform identity of the user a moderation intent targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: i64,
    pub username: Option<String>,
}

impl UserRef {
    pub fn new(user_id: i64) -> Self {
        Self { user_id, username: None }
    }

    pub fn with_username(user_id: i64, username: &str) -> Self {
        Self {
            user_id,
            username: Some(username.to_string()),
        }
    }

    /// Log-friendly identity, preferring the handle when known.
    pub fn describe(&self) -> String {
        match &self.username {
            Some(name) => format!("{} ({})", name, self.user_id),
            None => self.user_id.to_string(),
        }
    }
}

/// Permanently ban a user across every chat the bot manages.
#[derive(Debug, Clone, PartialEq)]
pub struct BanIntent {
    pub target: UserRef,
    /// Group chat the ban originated from, if any. Presence of a chat marks
    /// the ban as a group-chat ban and makes it eligible for a celebratory
    /// announcement.
    pub chat_id: Option<i64>,
    /// Message that triggered the ban, if any.
    pub message_id: Option<i64>,
    pub actor: Actor,
    pub reason: String,
    /// Confirmed-spammer bans feed the training-sample capture.
    pub known_spammer: bool,
}

/// Ban a user for a limited time.
#[derive(Debug, Clone, PartialEq)]
pub struct TempBanIntent {
    pub target: UserRef,
    pub chat_id: Option<i64>,
    pub message_id: Option<i64>,
    pub actor: Actor,
    pub reason: String,
    pub duration: Duration,
}

impl TempBanIntent {
    /// Absolute expiry for the platform call, measured from "now".
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.duration
    }
}

/// Record a warning against a user; may escalate to an automatic ban once
/// the per-chat threshold is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct WarnIntent {
    pub target: UserRef,
    pub chat_id: Option<i64>,
    /// Offending message; scheduled for delayed cleanup when present.
    pub message_id: Option<i64>,
    pub actor: Actor,
    pub reason: String,
}

/// Mark a user as trusted (exempt from automated moderation).
#[derive(Debug, Clone, PartialEq)]
pub struct TrustIntent {
    pub target: UserRef,
    pub actor: Actor,
    pub reason: String,
}

/// Remove a user's trusted status.
#[derive(Debug, Clone, PartialEq)]
pub struct UntrustIntent {
    pub target: UserRef,
    pub actor: Actor,
    pub reason: String,
}

/// Lift a ban, optionally restoring the trust that the ban revoked.
#[derive(Debug, Clone, PartialEq)]
pub struct UnbanIntent {
    pub target: UserRef,
    pub actor: Actor,
    pub reason: String,
    pub restore_trust: bool,
}

/// Mute or otherwise limit a user's permissions, indefinitely or for a
/// fixed period.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictIntent {
    pub target: UserRef,
    pub chat_id: Option<i64>,
    pub actor: Actor,
    pub reason: String,
    pub duration: Option<Duration>,
}

/// Remove a user from a single chat without recording a ban.
#[derive(Debug, Clone, PartialEq)]
pub struct KickIntent {
    pub target: UserRef,
    pub chat_id: i64,
    pub actor: Actor,
    pub reason: String,
}

/// Undo restrictions and hand full member permissions back.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePermissionsIntent {
    pub target: UserRef,
    pub chat_id: Option<i64>,
    pub actor: Actor,
    pub reason: String,
}

/// Delete one message from one chat.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteMessageIntent {
    pub target: UserRef,
    pub chat_id: i64,
    pub message_id: i64,
    pub actor: Actor,
    pub reason: String,
}

/// Replay an existing ban into a single chat, typically one that has just
/// become actionable again.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncBanIntent {
    pub target: UserRef,
    pub chat_id: i64,
    pub actor: Actor,
    pub reason: String,
}

/// A file-scanner hit: remove the message and raise an administrative
/// report. Deliberately does not ban; an infected upload is usually an
/// accident, not an attack by the sender.
#[derive(Debug, Clone, PartialEq)]
pub struct MalwareViolationIntent {
    pub target: UserRef,
    pub chat_id: i64,
    pub message_id: i64,
    pub actor: Actor,
    pub file_name: Option<String>,
}

/// Content from a trusted or privileged sender that still violates policy:
/// remove it and tell the sender why, without punishing them.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalViolationIntent {
    pub target: UserRef,
    pub chat_id: i64,
    pub message_id: i64,
    pub actor: Actor,
    pub violations: Vec<String>,
}

/// Fixed error text returned when a moderation intent targets a protected
/// platform service account.
pub const PROTECTED_TARGET_ERROR: &str = "target is a protected platform service account";

/// Outcome of one orchestrated moderation action. Always fully formed: early
/// exits default every flag to false/zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub success: bool,
    pub error: Option<String>,
    pub message_deleted: bool,
    pub trust_removed: bool,
    pub trust_restored: bool,
    pub warning_count: u32,
    pub auto_ban_triggered: bool,
    pub chats_affected: u32,
}

impl ModerationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// The protection-gate result: not a handler failure, just a refusal.
    pub fn blocked() -> Self {
        Self::failure(PROTECTED_TARGET_ERROR)
    }

    pub fn is_blocked(&self) -> bool {
        !self.success && self.error.as_deref() == Some(PROTECTED_TARGET_ERROR)
    }
}

/// What a primary-effect handler reports on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub chats_affected: u32,
}

impl HandlerOutcome {
    pub fn affecting(chats_affected: u32) -> Self {
        Self { chats_affected }
    }
}

/// Success report from the warning handler: the count is the user's total
/// after this warning was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarnOutcome {
    pub warning_count: u32,
    pub chats_affected: u32,
}

/// A stored message enriched with sender identity, used when notifying a
/// user about content that was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub sender: UserRef,
    pub text: Option<String>,
    pub sent_at: DateTime<Utc>,
}
