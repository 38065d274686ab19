// File: modbot-common/src/traits/mod.rs
pub mod handler_traits;
pub mod side_effect_traits;
