// File: modbot-common/src/models/config.rs

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the post-warning count when rendering the
/// auto-ban reason.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Effective warning-escalation settings for one chat, resolved by the
/// config collaborator (chat override falling back to the global default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningPolicy {
    /// Warnings at or above this count trigger escalation.
    pub max_warnings: u32,
    pub auto_ban_enabled: bool,
    /// Template for the automatic ban reason; `{count}` is replaced with
    /// the warning count that tripped the threshold.
    pub auto_ban_reason_template: String,
}

impl Default for WarningPolicy {
    fn default() -> Self {
        Self {
            max_warnings: 3,
            auto_ban_enabled: true,
            auto_ban_reason_template: "Exceeded warning threshold ({count}/3 warnings)".to_string(),
        }
    }
}

impl WarningPolicy {
    pub fn render_auto_ban_reason(&self, count: u32) -> String {
        self.auto_ban_reason_template
            .replace(COUNT_PLACEHOLDER, &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_renders_count() {
        let policy = WarningPolicy::default();
        assert_eq!(
            policy.render_auto_ban_reason(3),
            "Exceeded warning threshold (3/3 warnings)"
        );
    }

    #[test]
    fn test_template_without_placeholder_is_left_alone() {
        let policy = WarningPolicy {
            max_warnings: 5,
            auto_ban_enabled: true,
            auto_ban_reason_template: "Too many warnings".to_string(),
        };
        assert_eq!(policy.render_auto_ban_reason(5), "Too many warnings");
    }
}
