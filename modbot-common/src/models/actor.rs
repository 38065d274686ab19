// File: modbot-common/src/models/actor.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known identifiers for the automated subsystems that can originate
/// moderation actions. Stored verbatim in audit records, so treat them as
/// part of the persisted vocabulary and do not rename casually.
pub mod system_actors {
    pub const AUTO_BAN: &str = "auto-ban";
    pub const AUTO_TRUST: &str = "auto-trust";
    pub const AUTO_DETECTION: &str = "auto-detection";
    pub const FILE_SCANNER: &str = "file-scanner";
}

/// Who performed a moderation action: a web operator, a platform user, or an
/// automated subsystem. Exactly one identity per value; the three `from_*`
/// constructors are the only way to build one, which keeps that invariant
/// unconditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    WebOperator {
        operator_id: Uuid,
        display: Option<String>,
    },
    PlatformUser {
        user_id: i64,
        display: Option<String>,
    },
    System {
        identifier: String,
        display: Option<String>,
    },
}

impl Actor {
    pub fn from_operator(operator_id: Uuid, email: Option<&str>) -> Self {
        Actor::WebOperator {
            operator_id,
            display: email.map(String::from),
        }
    }

    pub fn from_platform_user(user_id: i64, username: Option<&str>) -> Self {
        Actor::PlatformUser {
            user_id,
            display: username.map(|u| format!("@{}", u.trim_start_matches('@'))),
        }
    }

    pub fn from_system(identifier: &str) -> Self {
        Actor::System {
            identifier: identifier.to_string(),
            display: system_label(identifier).map(String::from),
        }
    }

    pub fn auto_ban() -> Self {
        Self::from_system(system_actors::AUTO_BAN)
    }

    pub fn auto_trust() -> Self {
        Self::from_system(system_actors::AUTO_TRUST)
    }

    pub fn auto_detection() -> Self {
        Self::from_system(system_actors::AUTO_DETECTION)
    }

    pub fn file_scanner() -> Self {
        Self::from_system(system_actors::FILE_SCANNER)
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Actor::System { .. })
    }

    /// Log-friendly full description, e.g.
    /// `web operator 1b4e28ba-... (mod@example.org)` or `system (auto-ban)`.
    pub fn detail(&self) -> String {
        match self {
            Actor::WebOperator { operator_id, display } => match display {
                Some(d) => format!("web operator {} ({})", operator_id, d),
                None => format!("web operator {}", operator_id),
            },
            Actor::PlatformUser { user_id, display } => match display {
                Some(d) => format!("platform user {} ({})", user_id, d),
                None => format!("platform user {}", user_id),
            },
            Actor::System { identifier, .. } => format!("system ({})", identifier),
        }
    }
}

/// Short UI label: display name when resolved, otherwise the raw identity.
impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::WebOperator { operator_id, display } => match display {
                Some(d) => write!(f, "{}", d),
                None => write!(f, "operator {}", operator_id),
            },
            Actor::PlatformUser { user_id, display } => match display {
                Some(d) => write!(f, "{}", d),
                None => write!(f, "user {}", user_id),
            },
            Actor::System { identifier, display } => match display {
                Some(d) => write!(f, "{}", d),
                None => write!(f, "{}", identifier),
            },
        }
    }
}

fn system_label(identifier: &str) -> Option<&'static str> {
    match identifier {
        system_actors::AUTO_BAN => Some("Automatic ban"),
        system_actors::AUTO_TRUST => Some("Automatic trust"),
        system_actors::AUTO_DETECTION => Some("Automatic detection"),
        system_actors::FILE_SCANNER => Some("File scanner"),
        _ => None,
    }
}
