// File: modbot-common/src/models/mod.rs
pub mod actor;
pub mod config;
pub mod health;
pub mod moderation;

pub use actor::Actor;
pub use config::WarningPolicy;
pub use health::{ChatHealthStatus, HealthLevel};
pub use moderation::{
    BanIntent, CriticalViolationIntent, DeleteMessageIntent, EnrichedMessage, HandlerOutcome,
    KickIntent, MalwareViolationIntent, ModerationResult, RestorePermissionsIntent, RestrictIntent,
    SyncBanIntent, TempBanIntent, TrustIntent, UnbanIntent, UntrustIntent, UserRef, WarnIntent,
    WarnOutcome,
};
