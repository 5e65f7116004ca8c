//! Short-lived memo of derived tables, keyed by a fingerprint of the table contents.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use blake3::Hasher;
use polars::prelude::*;

use crate::error::Result;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// blake3 digest over column names, dtypes and every value of `df`.
pub fn fingerprint(df: &DataFrame) -> Result<blake3::Hash> {
    let mut hasher = Hasher::new();
    hasher.update(&(df.height() as u64).to_le_bytes());

    for column in df.get_columns() {
        hasher.update(column.name().as_str().as_bytes());
        hasher.update(&[0x1e]);
        hasher.update(column.dtype().to_string().as_bytes());
        hasher.update(&[0x1e]);

        let series = column.as_materialized_series();
        for idx in 0..series.len() {
            let value = series.get(idx)?;
            hasher.update(format!("{value:?}").as_bytes());
            hasher.update(&[0x1f]);
        }
    }

    Ok(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: blake3::Hash,
    /// Grouping/parameter tuple the cached value was computed with.
    pub params: String,
}

impl CacheKey {
    pub fn new(fingerprint: blake3::Hash, params: impl Into<String>) -> Self {
        Self {
            fingerprint,
            params: params.into(),
        }
    }
}

/// Whether a cached value was served or freshly computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    value: DataFrame,
}

#[derive(Debug)]
pub struct SummaryCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SummaryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live entry for `key`, evicting anything older than the TTL.
    pub fn lookup(&self, key: &CacheKey) -> Option<DataFrame> {
        let mut entries = self.lock();
        self.evict_expired(&mut entries, Instant::now());
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: CacheKey, value: DataFrame) {
        let now = Instant::now();
        let mut entries = self.lock();
        self.evict_expired(&mut entries, now);
        entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
    }

    /// Computes outside the lock, so two racing misses may both compute; the later insert wins.
    pub fn get_or_try_insert_with<F>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<(DataFrame, CacheStatus)>
    where
        F: FnOnce() -> Result<DataFrame>,
    {
        if let Some(hit) = self.lookup(&key) {
            return Ok((hit, CacheStatus::Hit));
        }

        let value = compute()?;
        self.insert(key, value.clone());
        Ok((value, CacheStatus::Miss))
    }

    pub fn len(&self) -> usize {
        let mut entries = self.lock();
        self.evict_expired(&mut entries, Instant::now());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn evict_expired(&self, entries: &mut HashMap<CacheKey, CacheEntry>, now: Instant) {
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
