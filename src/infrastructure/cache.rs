//! Time-bounded snapshot cache
//!
//! Short-circuits expensive fetches (the club index needs a full
//! headless-browser session) by serving a point-in-time snapshot under a
//! logical key until its TTL elapses. No capacity bound: the dataset is
//! one league's worth of teams. Constructed explicitly and handed to the
//! orchestrator; there is no ambient global instance.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct SnapshotEntry<V> {
    value: V,
    stored_at: Instant,
}

pub struct SnapshotCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, SnapshotEntry<V>>>,
}

impl<V: Clone + Send + Sync> SnapshotCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot under `key`, or `None` once the TTL has elapsed.
    /// Expired entries are dropped on read.
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        self.entries.write().await.remove(key);
        None
    }

    pub async fn set(&self, key: impl Into<String>, value: V) {
        let entry = SnapshotEntry {
            value,
            stored_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
