// File: src/services/moderation_service.rs
//
// The moderation orchestrator. Every public method follows the same shape:
//
//   1) protection gate (platform service accounts are never moderated)
//   2) exactly one primary handler call; its failure is terminal
//   3) mandatory business-rule follow-ups (ban revokes trust, warning
//      escalation, optional trust restore on unban)
//   4) best-effort side effects (audit, notify, train, celebrate) that are
//      logged and swallowed on failure
//   5) one fully-formed ModerationResult
//
// There is no retry loop and no per-user serialization: two concurrent
// warns for the same user may interleave their count-then-escalate
// sequences. Callers that need strict ordering must queue intents at a
// higher layer.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use modbot_common::error::Error;
use modbot_common::models::actor::Actor;
use modbot_common::models::health::HealthLevel;
use modbot_common::models::moderation::{
    BanIntent, CriticalViolationIntent, DeleteMessageIntent, HandlerOutcome, KickIntent,
    MalwareViolationIntent, ModerationResult, RestorePermissionsIntent, RestrictIntent,
    SyncBanIntent, TempBanIntent, TrustIntent, UnbanIntent, UntrustIntent, UserRef, WarnIntent,
};
use modbot_common::traits::handler_traits::{
    BanHandler, MessageHandler, RestrictHandler, TrustHandler, WarnHandler,
};
use modbot_common::traits::side_effect_traits::{
    AuditHandler, NotificationHandler, ReportingService, TrainingHandler, WarningPolicyProvider,
};

use crate::cache::health_cache::ChatHealthCache;
use crate::services::celebration::CelebrationService;

/// Platform service accounts that must never be moderated: the anonymous
/// group admin bot, the service-notification account, the channel relay
/// bot, and the internal system sentinel.
pub const RESERVED_ACCOUNT_IDS: &[i64] = &[0, 136817688, 777000, 1087968824];

/// Offending messages referenced by a warning are removed after this grace
/// period (minutes) so admins get a chance to review them.
const WARNED_MESSAGE_CLEANUP_MINUTES: i64 = 5;

pub struct ModerationService {
    ban_handler: Arc<dyn BanHandler>,
    restrict_handler: Arc<dyn RestrictHandler>,
    warn_handler: Arc<dyn WarnHandler>,
    trust_handler: Arc<dyn TrustHandler>,
    message_handler: Arc<dyn MessageHandler>,
    audit: Arc<dyn AuditHandler>,
    notifier: Arc<dyn NotificationHandler>,
    training: Arc<dyn TrainingHandler>,
    policy_provider: Arc<dyn WarningPolicyProvider>,
    reporting: Arc<dyn ReportingService>,
    health_cache: Arc<ChatHealthCache>,
    celebrations: Arc<CelebrationService>,
}

impl ModerationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ban_handler: Arc<dyn BanHandler>,
        restrict_handler: Arc<dyn RestrictHandler>,
        warn_handler: Arc<dyn WarnHandler>,
        trust_handler: Arc<dyn TrustHandler>,
        message_handler: Arc<dyn MessageHandler>,
        audit: Arc<dyn AuditHandler>,
        notifier: Arc<dyn NotificationHandler>,
        training: Arc<dyn TrainingHandler>,
        policy_provider: Arc<dyn WarningPolicyProvider>,
        reporting: Arc<dyn ReportingService>,
        health_cache: Arc<ChatHealthCache>,
        celebrations: Arc<CelebrationService>,
    ) -> Self {
        debug!("Initializing ModerationService");
        Self {
            ban_handler,
            restrict_handler,
            warn_handler,
            trust_handler,
            message_handler,
            audit,
            notifier,
            training,
            policy_provider,
            reporting,
            health_cache,
            celebrations,
        }
    }

    /// Permanently ban a user everywhere the bot can act.
    pub async fn ban_user(&self, intent: BanIntent, ct: &CancellationToken) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("ban", &intent.target);
        }

        // 1) Primary effect + mandatory trust revocation.
        let (outcome, trust_removed) = match self
            .ban_primitive(&intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(pair) => pair,
            Err(e) => {
                error!("Ban failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;
        result.trust_removed = trust_removed;

        if ct.is_cancelled() {
            debug!("Cancelled after ban of user {}; skipping side effects", intent.target.user_id);
            return result;
        }

        // 2) Best-effort side effects.
        best_effort(
            "audit ban",
            &intent.target,
            intent.chat_id,
            self.audit.log_ban(&intent.target, &intent.actor, &intent.reason, false),
        )
        .await;

        if intent.known_spammer {
            best_effort(
                "training capture",
                &intent.target,
                intent.chat_id,
                self.training
                    .capture_spam_sample(&intent.target, intent.chat_id, intent.message_id),
            )
            .await;
        }

        if let Some(chat_id) = intent.chat_id {
            self.celebrate_ban(chat_id, &intent.target, &intent.actor).await;
        }

        best_effort(
            "admin notification",
            &intent.target,
            intent.chat_id,
            self.notifier.notify_admins(&format!(
                "Banned {} in {} chat(s): {} (by {})",
                intent.target.describe(),
                result.chats_affected,
                intent.reason,
                intent.actor
            )),
        )
        .await;

        result
    }

    /// Ban a user for a limited period.
    pub async fn temp_ban_user(
        &self,
        intent: TempBanIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("temp-ban", &intent.target);
        }

        let until = intent.expires_at();
        let outcome = match self
            .ban_handler
            .temp_ban_user(&intent.target, &intent.actor, &intent.reason, until, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Temp ban failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        // A temporary ban still revokes trust.
        let trust_removed = self
            .revoke_trust_for_ban(&intent.target, &intent.actor, &intent.reason, ct)
            .await;

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;
        result.trust_removed = trust_removed;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit temp ban",
            &intent.target,
            intent.chat_id,
            self.audit.log_ban(&intent.target, &intent.actor, &intent.reason, true),
        )
        .await;

        if let Some(chat_id) = intent.chat_id {
            self.celebrate_ban(chat_id, &intent.target, &intent.actor).await;
        }

        best_effort(
            "user notification",
            &intent.target,
            intent.chat_id,
            self.notifier.notify_user(
                intent.target.user_id,
                &format!("You are banned until {}: {}", until.format("%Y-%m-%d %H:%M UTC"), intent.reason),
            ),
        )
        .await;

        result
    }

    /// Record a warning; escalates to an automatic ban once the effective
    /// per-chat threshold is reached.
    pub async fn warn_user(&self, intent: WarnIntent, ct: &CancellationToken) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("warn", &intent.target);
        }

        // 1) Write the warning first; its count drives escalation.
        let warn_outcome = match self
            .warn_handler
            .warn_user(&intent.target, intent.chat_id, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Warning failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.warning_count = warn_outcome.warning_count;
        result.chats_affected = warn_outcome.chats_affected;

        // 2) Escalation check. A failed policy lookup leaves the warning in
        //    place and skips escalation.
        let mut auto_ban_reason: Option<String> = None;
        match self.policy_provider.effective_policy(intent.chat_id).await {
            Ok(policy) => {
                if policy.auto_ban_enabled && warn_outcome.warning_count >= policy.max_warnings {
                    let reason = policy.render_auto_ban_reason(warn_outcome.warning_count);
                    info!(
                        "User {} hit warning threshold ({}/{}); auto-banning",
                        intent.target.describe(),
                        warn_outcome.warning_count,
                        policy.max_warnings
                    );
                    // Inline primitive, not ban_user(): the public path would
                    // re-run side effects and double-apply business rules.
                    match self
                        .ban_primitive(&intent.target, &Actor::auto_ban(), &reason, ct)
                        .await
                    {
                        Ok((outcome, trust_removed)) => {
                            result.auto_ban_triggered = true;
                            result.trust_removed = trust_removed;
                            result.chats_affected = outcome.chats_affected;
                            auto_ban_reason = Some(reason);
                        }
                        Err(e) => {
                            warn!(
                                "Auto-ban after warning threshold failed for user {}: {}",
                                intent.target.describe(),
                                e
                            );
                        }
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Warning policy lookup failed for chat {:?}: {}; skipping escalation",
                    intent.chat_id, e
                );
            }
        }

        if ct.is_cancelled() {
            debug!("Cancelled after warning user {}; skipping side effects", intent.target.user_id);
            return result;
        }

        // 3) Side effects.
        best_effort(
            "audit warning",
            &intent.target,
            intent.chat_id,
            self.audit.log_warning(
                &intent.target,
                intent.chat_id,
                &intent.actor,
                &intent.reason,
                result.warning_count,
            ),
        )
        .await;

        if let (Some(chat_id), Some(message_id)) = (intent.chat_id, intent.message_id) {
            best_effort(
                "message cleanup scheduling",
                &intent.target,
                intent.chat_id,
                self.message_handler.schedule_cleanup(
                    chat_id,
                    message_id,
                    chrono::Duration::minutes(WARNED_MESSAGE_CLEANUP_MINUTES),
                ),
            )
            .await;
        }

        if let Some(reason) = auto_ban_reason {
            best_effort(
                "audit auto-ban",
                &intent.target,
                intent.chat_id,
                self.audit.log_ban(&intent.target, &Actor::auto_ban(), &reason, false),
            )
            .await;
            if let Some(chat_id) = intent.chat_id {
                self.celebrate_ban(chat_id, &intent.target, &Actor::auto_ban()).await;
            }
        } else {
            best_effort(
                "user notification",
                &intent.target,
                intent.chat_id,
                self.notifier.notify_user(
                    intent.target.user_id,
                    &format!("Warning {}: {}", result.warning_count, intent.reason),
                ),
            )
            .await;
        }

        result
    }

    /// Mark a user as trusted.
    pub async fn trust_user(&self, intent: TrustIntent, ct: &CancellationToken) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("trust", &intent.target);
        }

        let outcome = match self
            .trust_handler
            .grant_trust(&intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Trust grant failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;
        result.trust_restored = true;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit trust grant",
            &intent.target,
            None,
            self.audit.log_trust_change(&intent.target, &intent.actor, &intent.reason, true),
        )
        .await;

        result
    }

    /// Remove a user's trusted status.
    pub async fn untrust_user(
        &self,
        intent: UntrustIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("untrust", &intent.target);
        }

        let outcome = match self
            .trust_handler
            .revoke_trust(&intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Trust revocation failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;
        result.trust_removed = true;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit trust revocation",
            &intent.target,
            None,
            self.audit.log_trust_change(&intent.target, &intent.actor, &intent.reason, false),
        )
        .await;

        result
    }

    /// Lift a ban; optionally restore the trust the ban revoked.
    pub async fn unban_user(&self, intent: UnbanIntent, ct: &CancellationToken) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("unban", &intent.target);
        }

        let outcome = match self
            .ban_handler
            .unban_user(&intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Unban failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;

        // Optional internal trust grant, folded into the parent result.
        if intent.restore_trust {
            let reason = format!("Trust restored after unban: {}", intent.reason);
            match self
                .trust_handler
                .grant_trust(&intent.target, &intent.actor, &reason, ct)
                .await
            {
                Ok(_) => result.trust_restored = true,
                Err(e) => {
                    warn!(
                        "Trust restore after unban failed for user {}: {}",
                        intent.target.describe(),
                        e
                    );
                }
            }
        }

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit unban",
            &intent.target,
            None,
            self.audit.log_unban(&intent.target, &intent.actor, &intent.reason),
        )
        .await;

        best_effort(
            "admin notification",
            &intent.target,
            None,
            self.notifier.notify_admins(&format!(
                "Unbanned {}: {} (by {})",
                intent.target.describe(),
                intent.reason,
                intent.actor
            )),
        )
        .await;

        result
    }

    /// Mute or limit a user's permissions.
    pub async fn restrict_user(
        &self,
        intent: RestrictIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("restrict", &intent.target);
        }

        let until = intent.duration.map(|d| Utc::now() + d);
        let outcome = match self
            .restrict_handler
            .restrict_user(&intent.target, &intent.actor, &intent.reason, until, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("Restriction failed for user {}: {}", intent.target.describe(), e);
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit restriction",
            &intent.target,
            intent.chat_id,
            self.audit.log_restriction(&intent.target, &intent.actor, &intent.reason, false),
        )
        .await;

        result
    }

    /// Remove a user from one chat without recording a ban.
    pub async fn kick_user(&self, intent: KickIntent, ct: &CancellationToken) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("kick", &intent.target);
        }

        let outcome = match self
            .restrict_handler
            .kick_user(intent.chat_id, &intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!(
                    "Kick failed for user {} in chat {}: {}",
                    intent.target.describe(),
                    intent.chat_id,
                    e
                );
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit kick",
            &intent.target,
            Some(intent.chat_id),
            self.audit.log_kick(intent.chat_id, &intent.target, &intent.actor, &intent.reason),
        )
        .await;

        result
    }

    /// Lift restrictions and hand full member permissions back.
    pub async fn restore_permissions(
        &self,
        intent: RestorePermissionsIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("restore-permissions", &intent.target);
        }

        let outcome = match self
            .restrict_handler
            .restore_permissions(&intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!(
                    "Permission restore failed for user {}: {}",
                    intent.target.describe(),
                    e
                );
                return ModerationResult::failure(e.to_string());
            }
        };

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit permission restore",
            &intent.target,
            intent.chat_id,
            self.audit.log_restriction(&intent.target, &intent.actor, &intent.reason, true),
        )
        .await;

        result
    }

    /// Delete one message from one chat.
    pub async fn delete_message(
        &self,
        intent: DeleteMessageIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("delete-message", &intent.target);
        }

        // Backfill the local record first so the audit entry has something
        // to point at; the deletion itself does not depend on it.
        best_effort(
            "message backfill",
            &intent.target,
            Some(intent.chat_id),
            self.message_handler.ensure_message_exists(intent.chat_id, intent.message_id),
        )
        .await;

        if let Err(e) = self
            .message_handler
            .delete_message(intent.chat_id, intent.message_id, ct)
            .await
        {
            error!(
                "Message deletion failed for message {} in chat {}: {}",
                intent.message_id, intent.chat_id, e
            );
            return ModerationResult::failure(e.to_string());
        }

        let mut result = ModerationResult::ok();
        result.message_deleted = true;
        result.chats_affected = 1;

        if ct.is_cancelled() {
            return result;
        }

        best_effort(
            "audit message deletion",
            &intent.target,
            Some(intent.chat_id),
            self.audit.log_message_deletion(
                intent.chat_id,
                intent.message_id,
                &intent.target,
                &intent.actor,
                &intent.reason,
            ),
        )
        .await;

        result
    }

    /// Replay an existing ban into a single chat. Fail-closed: the chat
    /// must be cached as exactly `Healthy`, otherwise the sync is skipped
    /// (successfully, touching zero chats) rather than attempted blind.
    pub async fn sync_ban_to_chat(
        &self,
        intent: SyncBanIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("ban-sync", &intent.target);
        }

        if !self.health_cache.is_healthy(intent.chat_id) {
            let level = self
                .health_cache
                .get_cached(intent.chat_id)
                .map(|s| s.level)
                .unwrap_or(HealthLevel::Unknown);
            info!(
                "Skipping ban sync for user {} to chat {}: health is {:?}",
                intent.target.describe(),
                intent.chat_id,
                level
            );
            return ModerationResult::ok();
        }

        let outcome = match self
            .ban_handler
            .ban_user_in_chat(intent.chat_id, &intent.target, &intent.actor, &intent.reason, ct)
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!(
                    "Ban sync failed for user {} in chat {}: {}",
                    intent.target.describe(),
                    intent.chat_id,
                    e
                );
                return ModerationResult::failure(e.to_string());
            }
        };

        // The ban being replayed already revoked trust when it was issued;
        // re-revoking here keeps the flag honest if that write was missed.
        let trust_removed = self
            .revoke_trust_for_ban(&intent.target, &intent.actor, &intent.reason, ct)
            .await;

        let mut result = ModerationResult::ok();
        result.chats_affected = outcome.chats_affected;
        result.trust_removed = trust_removed;
        result
    }

    /// File-scanner hit: remove the message and raise an administrative
    /// report. Deliberately no ban or warning; an infected upload is
    /// usually an accident.
    pub async fn handle_malware_violation(
        &self,
        intent: MalwareViolationIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("malware-violation", &intent.target);
        }

        best_effort(
            "message backfill",
            &intent.target,
            Some(intent.chat_id),
            self.message_handler.ensure_message_exists(intent.chat_id, intent.message_id),
        )
        .await;

        if let Err(e) = self
            .message_handler
            .delete_message(intent.chat_id, intent.message_id, ct)
            .await
        {
            error!(
                "Malware message deletion failed for message {} in chat {}: {}",
                intent.message_id, intent.chat_id, e
            );
            return ModerationResult::failure(e.to_string());
        }

        let mut result = ModerationResult::ok();
        result.message_deleted = true;
        result.chats_affected = 1;

        if ct.is_cancelled() {
            return result;
        }

        let summary = match &intent.file_name {
            Some(name) => format!("Malware detected in upload '{}'", name),
            None => "Malware detected in upload".to_string(),
        };

        best_effort(
            "administrative report",
            &intent.target,
            Some(intent.chat_id),
            self.reporting.open_report(&intent.target, intent.chat_id, intent.message_id, &summary),
        )
        .await;

        best_effort(
            "admin notification",
            &intent.target,
            Some(intent.chat_id),
            self.notifier.notify_admins(&format!(
                "{}: removed upload from {} in chat {}",
                summary,
                intent.target.describe(),
                intent.chat_id
            )),
        )
        .await;

        result
    }

    /// Policy violation by a trusted or privileged sender: remove the
    /// content and tell the sender why. No escalation; these paths exist
    /// precisely to avoid punishing privileged-but-mistaken behavior.
    pub async fn handle_critical_violation(
        &self,
        intent: CriticalViolationIntent,
        ct: &CancellationToken,
    ) -> ModerationResult {
        if self.is_protected(&intent.target) {
            return self.blocked("critical-violation", &intent.target);
        }

        if let Err(e) = self
            .message_handler
            .delete_message(intent.chat_id, intent.message_id, ct)
            .await
        {
            error!(
                "Violation message deletion failed for message {} in chat {}: {}",
                intent.message_id, intent.chat_id, e
            );
            return ModerationResult::failure(e.to_string());
        }

        let mut result = ModerationResult::ok();
        result.message_deleted = true;
        result.chats_affected = 1;

        if ct.is_cancelled() {
            return result;
        }

        // Enrich the user notification with the original text when the
        // message store still has it.
        let mut text = format!(
            "Your message was removed for violating chat rules: {}.",
            intent.violations.join(", ")
        );
        match self
            .message_handler
            .get_message_for_notification(intent.chat_id, intent.message_id)
            .await
        {
            Ok(Some(msg)) => {
                if let Some(original) = msg.text {
                    text.push_str(&format!("\n\nRemoved message:\n{}", original));
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Could not load message {} in chat {} for notification: {}",
                    intent.message_id, intent.chat_id, e
                );
            }
        }

        best_effort(
            "user notification",
            &intent.target,
            Some(intent.chat_id),
            self.notifier.notify_user(intent.target.user_id, &text),
        )
        .await;

        best_effort(
            "audit message deletion",
            &intent.target,
            Some(intent.chat_id),
            self.audit.log_message_deletion(
                intent.chat_id,
                intent.message_id,
                &intent.target,
                &intent.actor,
                &intent.violations.join(", "),
            ),
        )
        .await;

        result
    }

    // ---------------------------------------------------------------
    // internals
    // ---------------------------------------------------------------

    fn is_protected(&self, target: &UserRef) -> bool {
        RESERVED_ACCOUNT_IDS.contains(&target.user_id)
    }

    fn blocked(&self, op: &str, target: &UserRef) -> ModerationResult {
        info!(
            "Refusing to {} user {}: protected platform service account",
            op,
            target.user_id
        );
        ModerationResult::blocked()
    }

    /// Ban plus mandatory trust revocation, without any of the public
    /// path's side effects. The warning-escalation path calls this instead
    /// of `ban_user` so business rules are never applied twice.
    async fn ban_primitive(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<(HandlerOutcome, bool), Error> {
        let outcome = self.ban_handler.ban_user(target, actor, reason, ct).await?;
        let trust_removed = self.revoke_trust_for_ban(target, actor, reason, ct).await;
        Ok((outcome, trust_removed))
    }

    /// Ban-revokes-trust business rule. Returns whether the revocation
    /// went through; failure never reverses the ban.
    async fn revoke_trust_for_ban(
        &self,
        target: &UserRef,
        actor: &Actor,
        ban_reason: &str,
        ct: &CancellationToken,
    ) -> bool {
        let reason = format!("Trust revoked due to ban: {}", ban_reason);
        match self.trust_handler.revoke_trust(target, actor, &reason, ct).await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Trust revocation after ban failed for user {}: {}",
                    target.describe(),
                    e
                );
                false
            }
        }
    }

    /// Celebratory announcement for a group-chat ban. Media comes from the
    /// shuffle bags; an empty pool just skips the announcement.
    async fn celebrate_ban(&self, chat_id: i64, target: &UserRef, actor: &Actor) {
        let auto = actor.is_system();
        let Some(media_id) = self.celebrations.pick(auto) else {
            debug!("No celebration media configured; skipping announcement");
            return;
        };
        best_effort(
            "celebration announcement",
            target,
            Some(chat_id),
            self.notifier.announce_celebration(chat_id, media_id, auto),
        )
        .await;
    }
}

/// Awaits a side-effect future and swallows its failure, logging enough
/// context (operation, user, chat) to diagnose later. Applied uniformly to
/// every audit/notify/train/celebrate call instead of scattering
/// match-and-ignore blocks around.
async fn best_effort<T>(
    op: &str,
    target: &UserRef,
    chat_id: Option<i64>,
    fut: impl Future<Output = Result<T, Error>>,
) {
    if let Err(e) = fut.await {
        warn!(
            "Best-effort {} failed for user {} (chat {:?}): {}",
            op,
            target.describe(),
            chat_id,
            e
        );
    }
}
