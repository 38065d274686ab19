// src/lib.rs

pub mod cache;
pub mod services;
pub mod utils;

pub use cache::ChatHealthCache;
pub use modbot_common::error::Error;
pub use services::ModerationService;
