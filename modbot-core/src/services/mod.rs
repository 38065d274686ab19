// File: src/services/mod.rs
pub mod celebration;
pub mod moderation_service;

pub use celebration::CelebrationService;
pub use moderation_service::ModerationService;
