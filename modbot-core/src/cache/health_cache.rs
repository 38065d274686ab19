// File: src/cache/health_cache.rs
//
// Process-wide snapshot of which chats the bot currently has sufficient
// capability in. Written by the periodic health-check collaborator (and by
// membership-change events); read continuously by the orchestrator. The
// design is fail-closed: a chat is actionable only while its cached level
// is exactly `Healthy`, so on cold start the healthy set is empty and
// cross-chat actions are skipped instead of attempted blind.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use modbot_common::models::health::{ChatHealthStatus, HealthLevel};

/// Broadcast on every cache write so a live UI can mirror health
/// transitions. Removal is reported as a transition to `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthChange {
    pub chat_id: i64,
    pub level: HealthLevel,
}

const CHANGE_BUFFER_SIZE: usize = 64;

/// Many readers (one per in-flight orchestrator call), occasional writers.
/// DashMap keeps reads off any global lock; subscribers that fall behind
/// the broadcast buffer lose old transitions, which is fine for a UI.
pub struct ChatHealthCache {
    entries: DashMap<i64, ChatHealthStatus>,
    change_tx: broadcast::Sender<HealthChange>,
}

impl ChatHealthCache {
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_BUFFER_SIZE);
        Self {
            entries: DashMap::new(),
            change_tx,
        }
    }

    /// Chats currently eligible for cross-chat moderation actions. Only
    /// `Healthy` qualifies; `Unknown`, `Warning`, `Error`, `NotApplicable`,
    /// and absent entries are all excluded.
    pub fn get_healthy(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .entries
            .iter()
            .filter(|entry| entry.value().level == HealthLevel::Healthy)
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn set_health(&self, status: ChatHealthStatus) {
        let chat_id = status.chat_id;
        let level = status.level;
        self.entries.insert(chat_id, status);
        debug!("Health cache updated: chat {} is now {:?}", chat_id, level);
        let _ = self.change_tx.send(HealthChange { chat_id, level });
    }

    pub fn remove_health(&self, chat_id: i64) {
        if self.entries.remove(&chat_id).is_some() {
            debug!("Health cache dropped chat {}", chat_id);
            let _ = self.change_tx.send(HealthChange {
                chat_id,
                level: HealthLevel::Unknown,
            });
        }
    }

    pub fn get_cached(&self, chat_id: i64) -> Option<ChatHealthStatus> {
        self.entries.get(&chat_id).map(|entry| entry.value().clone())
    }

    pub fn is_healthy(&self, chat_id: i64) -> bool {
        self.entries
            .get(&chat_id)
            .map(|entry| entry.value().level == HealthLevel::Healthy)
            .unwrap_or(false)
    }

    /// Returns a receiver on which health transitions will be delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<HealthChange> {
        self.change_tx.subscribe()
    }
}

impl Default for ChatHealthCache {
    fn default() -> Self {
        Self::new()
    }
}
