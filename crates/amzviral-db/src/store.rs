use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::automations::AutomationRecord;
use crate::users::User;

/// In-memory users and automation records.
///
/// Automation records are append-only and kept in insertion order; ids come
/// from a counter starting at 1.
#[derive(Debug)]
pub struct MemoryStore {
    pub(crate) users: RwLock<HashMap<Uuid, User>>,
    pub(crate) automations: RwLock<Vec<AutomationRecord>>,
    next_automation_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            automations: RwLock::new(Vec::new()),
            next_automation_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn next_automation_id(&self) -> u64 {
        self.next_automation_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}
