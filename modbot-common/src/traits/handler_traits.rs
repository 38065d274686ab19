// File: modbot-common/src/traits/handler_traits.rs
//
// Primary-effect collaborator interfaces. Each method performs the
// platform-level action plus the matching local state write; the
// orchestrator treats `Err` from any of them as terminal for the
// invocation. All of them take a cancellation token and are expected to
// stop issuing new platform calls once it fires.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::models::actor::Actor;
use crate::models::moderation::{EnrichedMessage, HandlerOutcome, UserRef, WarnOutcome};

#[async_trait]
pub trait BanHandler: Send + Sync {
    /// Ban across every chat the bot can currently act in; reports how many
    /// chats were touched.
    async fn ban_user(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    async fn temp_ban_user(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        until: DateTime<Utc>,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    async fn unban_user(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    /// Apply an already-recorded ban inside a single chat. Used when a chat
    /// comes back into the healthy set and needs to catch up.
    async fn ban_user_in_chat(
        &self,
        chat_id: i64,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;
}

#[async_trait]
pub trait RestrictHandler: Send + Sync {
    /// Mute/limit permissions, indefinitely when `until` is `None`.
    async fn restrict_user(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        until: Option<DateTime<Utc>>,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    async fn kick_user(
        &self,
        chat_id: i64,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    async fn restore_permissions(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;
}

#[async_trait]
pub trait WarnHandler: Send + Sync {
    /// Write a warning record and return the user's post-write total.
    async fn warn_user(
        &self,
        target: &UserRef,
        chat_id: Option<i64>,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<WarnOutcome, Error>;
}

#[async_trait]
pub trait TrustHandler: Send + Sync {
    async fn grant_trust(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    async fn revoke_trust(
        &self,
        target: &UserRef,
        actor: &Actor,
        reason: &str,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;
}

#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Backfill the local record for a message we only know by id.
    async fn ensure_message_exists(&self, chat_id: i64, message_id: i64) -> Result<(), Error>;

    async fn delete_message(
        &self,
        chat_id: i64,
        message_id: i64,
        ct: &CancellationToken,
    ) -> Result<HandlerOutcome, Error>;

    /// Queue a message for removal after the given delay.
    async fn schedule_cleanup(
        &self,
        chat_id: i64,
        message_id: i64,
        delete_after: Duration,
    ) -> Result<(), Error>;

    async fn get_message_for_notification(
        &self,
        chat_id: i64,
        message_id: i64,
    ) -> Result<Option<EnrichedMessage>, Error>;
}
