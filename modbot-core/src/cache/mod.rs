// File: src/cache/mod.rs
pub mod health_cache;

pub use health_cache::{ChatHealthCache, HealthChange};
