use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

/// In-memory set of revoked session tokens.
///
/// Tokens are self-contained, so logout cannot delete them; instead the
/// exact token string is remembered here until its own signed expiry has
/// passed. The store is process-local and not durable: a restart forgives
/// all revocations, at which point only signature and expiry checks apply.
///
/// Shared across request handlers behind an `Arc`; the mutex guards only
/// short map operations, so it is safe to use from async tasks.
pub struct RevocationStore {
    // token string -> Unix timestamp of the token's own expiry
    entries: Mutex<HashMap<String, i64>>,
}

impl RevocationStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Mark a token as revoked until `expires_at` (its signed expiry).
    ///
    /// Idempotent: revoking an already-revoked token is a no-op.
    pub fn revoke(&self, token: &str, expires_at: i64) {
        let mut entries = self.entries.lock().expect("revocation lock poisoned");
        entries.entry(token.to_string()).or_insert(expires_at);
    }

    /// Check whether a token has been revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        let entries = self.entries.lock().expect("revocation lock poisoned");
        entries.contains_key(token)
    }

    /// Drop entries whose own expiry has passed.
    ///
    /// Entries for still-unexpired tokens are retained, so a revoked token
    /// stays revoked for its entire signed lifetime. Once a token's expiry
    /// has passed, signature validation rejects it anyway and the entry is
    /// dead weight. The boundary is inclusive: a token is still accepted
    /// at the exact second of its expiry, so its entry must survive a
    /// compaction pass at that second.
    ///
    /// # Returns
    /// Number of entries removed
    pub fn compact(&self, now: i64) -> usize {
        let mut entries = self.entries.lock().expect("revocation lock poisoned");
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at >= now);
        before - entries.len()
    }

    /// Number of tracked revocations.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("revocation lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start the background compaction task, ticking every `every`.
    ///
    /// The task holds only a weak reference and exits once the store is
    /// dropped; abort the returned handle on shutdown to stop it earlier.
    pub fn spawn_compaction(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick fires immediately; skip it.
            interval.tick().await;

            loop {
                interval.tick().await;

                let Some(store) = store.upgrade() else {
                    break;
                };

                let removed = store.compact(Utc::now().timestamp());
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Compacted revocation store");
                }
            }
        })
    }
}

impl Default for RevocationStore {
    fn default() -> Self {
        Self::new()
    }
}
