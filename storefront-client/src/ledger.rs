//! Per-page fetch deduplication ledger

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::config::RetryPolicy;

/// At-most-one-fetch-per-key gate.
///
/// An entry is created the first time a key is claimed and stays claimed
/// until explicitly released with [`mark_retryable`](Self::mark_retryable)
/// (or until it ages out under a TTL policy). There is no other cleanup: a
/// claimed entry keeps blocking its key, including after a failed fetch.
#[derive(Debug, Clone)]
pub struct FetchLedger {
    inner: Arc<Mutex<HashMap<String, LedgerEntry>>>,
    policy: RetryPolicy,
}

#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    requested: bool,
    marked_at: Instant,
}

impl FetchLedger {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            policy,
        }
    }

    /// Atomically claim a key. Returns true when the caller may proceed
    /// with a fetch.
    pub async fn try_begin(&self, key: &str) -> bool {
        let mut entries = self.inner.lock().await;
        let now = Instant::now();

        match entries.get_mut(key) {
            None => {
                entries.insert(
                    key.to_string(),
                    LedgerEntry {
                        requested: true,
                        marked_at: now,
                    },
                );
                true
            }
            Some(entry) if !entry.requested => {
                entry.requested = true;
                entry.marked_at = now;
                true
            }
            Some(entry) => match self.policy {
                RetryPolicy::Ttl(ttl) if now.duration_since(entry.marked_at) >= ttl => {
                    entry.marked_at = now;
                    true
                }
                _ => false,
            },
        }
    }

    /// Explicit re-fetch override: the next `try_begin` for this key wins.
    pub async fn mark_retryable(&self, key: &str) {
        if let Some(entry) = self.inner.lock().await.get_mut(key) {
            entry.requested = false;
        }
    }

    pub async fn is_claimed(&self, key: &str) -> bool {
        self.inner
            .lock()
            .await
            .get(key)
            .map(|entry| entry.requested)
            .unwrap_or(false)
    }

    /// Drop every entry. Reserved for full-invalidation flows.
    pub async fn reset_all(&self) {
        self.inner.lock().await.clear();
    }
}

impl Default for FetchLedger {
    fn default() -> Self {
        Self::new(RetryPolicy::Manual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn fresh_key_claims_exactly_once() {
        let ledger = FetchLedger::default();

        assert!(ledger.try_begin("1").await);
        assert!(!ledger.try_begin("1").await);
        assert!(!ledger.try_begin("1").await);

        // other keys are unaffected
        assert!(ledger.try_begin("26").await);
    }

    #[tokio::test]
    async fn released_key_can_be_claimed_again() {
        let ledger = FetchLedger::default();

        assert!(ledger.try_begin("1").await);
        ledger.mark_retryable("1").await;
        assert!(ledger.try_begin("1").await);
        assert!(!ledger.try_begin("1").await);
    }

    #[tokio::test]
    async fn releasing_unknown_key_is_a_noop() {
        let ledger = FetchLedger::default();
        ledger.mark_retryable("99").await;
        assert!(!ledger.is_claimed("99").await);
        assert!(ledger.try_begin("99").await);
    }

    #[tokio::test]
    async fn ttl_policy_reopens_stale_claims() {
        let ledger = FetchLedger::new(RetryPolicy::Ttl(Duration::from_millis(50)));

        assert!(ledger.try_begin("1").await);
        assert!(!ledger.try_begin("1").await);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(ledger.try_begin("1").await);
        // the reclaim refreshed the entry
        assert!(!ledger.try_begin("1").await);
    }

    #[tokio::test]
    async fn concurrent_claims_admit_exactly_one() {
        let ledger = FetchLedger::default();

        let a = {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.try_begin("1").await })
        };
        let b = {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.try_begin("1").await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a ^ b, "exactly one concurrent claim may win");
    }

    #[tokio::test]
    async fn reset_all_forgets_every_claim() {
        let ledger = FetchLedger::default();
        assert!(ledger.try_begin("1").await);
        assert!(ledger.try_begin("26").await);

        ledger.reset_all().await;

        assert!(ledger.try_begin("1").await);
        assert!(ledger.try_begin("26").await);
    }
}
