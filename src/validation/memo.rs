//! Time-limited memoization of probe outcomes.
//!
//! Each key maps to a shared cell. The first caller fills it; concurrent
//! callers for the same key await that same computation instead of starting
//! their own. Entries expire `ttl` after their computation finished and are
//! then recomputed on the next access; an entry still in flight never expires.

use rustc_hash::FxHashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tokio::time::{Duration, Instant};

use crate::core::constants::timeouts;
use crate::core::types::LivenessResult;

/// Identity of a memoized probe: the URL plus every option that can change
/// its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub url: String,
    pub base_url: Option<String>,
    pub retries: u32,
}

impl MemoKey {
    pub fn new(url: impl Into<String>, base_url: Option<&str>, retries: u32) -> Self {
        Self {
            url: url.into(),
            base_url: base_url.map(str::to_string),
            retries,
        }
    }
}

/// A finished computation and the moment it finished.
#[derive(Debug)]
struct Computed {
    result: LivenessResult,
    completed: Instant,
}

type Slot = Arc<OnceCell<Computed>>;

#[derive(Debug)]
pub struct MemoCache {
    ttl: Duration,
    entries: Mutex<FxHashMap<MemoKey, Slot>>,
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(timeouts::MEMO_TTL_SECONDS))
    }
}

impl MemoCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached outcome for `key`, running `compute` if there is no
    /// fresh entry.
    pub async fn get_or_compute<F, Fut>(&self, key: MemoKey, compute: F) -> LivenessResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LivenessResult>,
    {
        let slot = self.slot_for(key);
        let computed = slot
            .get_or_init(|| async move {
                let result = compute().await;
                Computed {
                    result,
                    completed: Instant::now(),
                }
            })
            .await;
        computed.result.clone()
    }

    /// Drop every expired entry. Computations still in flight are kept.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.lock().retain(|_, slot| self.is_fresh(slot, now));
    }

    /// Number of entries that are in flight or still fresh.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .values()
            .filter(|slot| self.is_fresh(slot, now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An entry expires `ttl` after its computation finished; an unfinished
    /// one never does.
    fn is_fresh(&self, slot: &Slot, now: Instant) -> bool {
        match slot.get() {
            Some(computed) => now.duration_since(computed.completed) < self.ttl,
            None => true,
        }
    }

    fn slot_for(&self, key: MemoKey) -> Slot {
        let now = Instant::now();
        let mut entries = self.lock();

        if let Some(slot) = entries.get(&key)
            && self.is_fresh(slot, now)
        {
            return slot.clone();
        }

        let slot = Slot::default();
        entries.insert(key, slot.clone());
        slot
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<MemoKey, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
