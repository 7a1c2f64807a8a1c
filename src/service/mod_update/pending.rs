//! In-memory store for proposed updates awaiting confirmation.
//!
//! Proposals are keyed by the id of the status message that carries their
//! Confirm/Edit buttons. Each entry can be taken exactly once, and entries that
//! nobody acts on expire after the configured TTL instead of living for the whole
//! process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::model::update::PendingUpdate;

/// Stored proposal with expiration timestamp.
#[derive(Clone)]
struct StoredUpdate {
    update: PendingUpdate,
    expires_at: Instant,
}

impl StoredUpdate {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared store of pending updates.
///
/// Constructed once at startup and cloned into the bot handler; clones share the
/// same entries.
#[derive(Clone)]
pub struct PendingUpdateStore {
    updates: Arc<RwLock<HashMap<u64, StoredUpdate>>>,
    ttl: Duration,
}

impl PendingUpdateStore {
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            updates: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores a proposal under its prompt id, replacing any previous one.
    ///
    /// Expired entries are pruned on every insert.
    pub async fn put(&self, update: PendingUpdate) {
        let now = Instant::now();
        let mut updates = self.updates.write().await;

        let before = updates.len();
        updates.retain(|_, stored| !stored.is_expired(now));
        let pruned = before - updates.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} expired pending updates", pruned);
        }

        updates.insert(
            update.prompt_id,
            StoredUpdate {
                update,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Removes and returns the proposal for a prompt.
    ///
    /// # Returns
    /// - `Some(PendingUpdate)` - The proposal; later calls for the same prompt return `None`
    /// - `None` - Nothing pending for this prompt, or it expired
    pub async fn take(&self, prompt_id: u64) -> Option<PendingUpdate> {
        let stored = self.updates.write().await.remove(&prompt_id)?;

        if stored.is_expired(Instant::now()) {
            return None;
        }

        Some(stored.update)
    }

    /// Returns a copy of the proposal for a prompt without consuming it.
    pub async fn peek(&self, prompt_id: u64) -> Option<PendingUpdate> {
        let updates = self.updates.read().await;
        let stored = updates.get(&prompt_id)?;

        if stored.is_expired(Instant::now()) {
            return None;
        }

        Some(stored.update.clone())
    }

    /// Number of proposals that haven't expired.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.updates
            .read()
            .await
            .values()
            .filter(|stored| !stored.is_expired(now))
            .count()
    }
}
