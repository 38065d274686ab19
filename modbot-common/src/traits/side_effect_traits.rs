// File: modbot-common/src/traits/side_effect_traits.rs
//
// Collaborators the orchestrator calls on a best-effort basis, plus the
// config lookup. Failures from the best-effort group are logged and
// swallowed at the call site; none of them may affect the outcome of the
// primary action.

use async_trait::async_trait;

use crate::error::Error;
use crate::models::actor::Actor;
use crate::models::config::WarningPolicy;
use crate::models::moderation::UserRef;

/// One logging method per action kind, mirroring the audit-log schema.
#[async_trait]
pub trait AuditHandler: Send + Sync {
    async fn log_ban(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        temporary: bool,
    ) -> Result<(), Error>;

    async fn log_unban(&self, target: &UserRef, actor: &Actor, reason: &str) -> Result<(), Error>;

    async fn log_warning(
        &self,
        target: &UserRef,
        chat_id: Option<i64>,
        actor: &Actor,
        reason: &str,
        warning_count: u32,
    ) -> Result<(), Error>;

    async fn log_trust_change(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        trusted: bool,
    ) -> Result<(), Error>;

    /// `restored == true` records a lift, otherwise a new restriction.
    async fn log_restriction(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        restored: bool,
    ) -> Result<(), Error>;

    async fn log_kick(
        &self,
        chat_id: i64,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
    ) -> Result<(), Error>;

    async fn log_message_deletion(
        &self,
        chat_id: i64,
        message_id: i64,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
    ) -> Result<(), Error>;
}

#[async_trait]
pub trait NotificationHandler: Send + Sync {
    /// Post to the admin channel.
    async fn notify_admins(&self, text: &str) -> Result<(), Error>;

    /// Direct-message a platform user.
    async fn notify_user(&self, user_id: i64, text: &str) -> Result<(), Error>;

    /// Post celebratory media into a group chat after a ban. `auto`
    /// distinguishes automated bans from operator-issued ones in the caption.
    async fn announce_celebration(
        &self,
        chat_id: i64,
        media_id: i64,
        auto: bool,
    ) -> Result<(), Error>;
}

/// Capture of confirmed-spam samples for classifier training.
#[async_trait]
pub trait TrainingHandler: Send + Sync {
    async fn capture_spam_sample(
        &self,
        target: &UserRef,
        chat_id: Option<i64>,
        message_id: Option<i64>,
    ) -> Result<(), Error>;
}

/// Resolves the effective warning-escalation policy for a chat.
#[async_trait]
pub trait WarningPolicyProvider: Send + Sync {
    async fn effective_policy(&self, chat_id: Option<i64>) -> Result<WarningPolicy, Error>;
}

/// Opens administrative report records (malware path).
#[async_trait]
pub trait ReportingService: Send + Sync {
    async fn open_report(
        &self,
        target: &UserRef,
        chat_id: i64,
        message_id: i64,
        summary: &str,
    ) -> Result<(), Error>;
}
