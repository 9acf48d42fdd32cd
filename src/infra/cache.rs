//! In-memory, per-league cache in front of the merge engine.
//!
//! - Entries younger than the TTL are served as-is.
//! - Older entries are recomputed; if that fails the old entry is served as
//!   stale instead of surfacing the error.
//! - Concurrent callers for one league share a single recomputation.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use tokio::sync::Mutex;

use crate::domain::{ItemDataset, League};
use crate::infra::item_data::{ItemDataEngine, ItemDataError};

/// Default revalidation window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<League, Cached<ItemDataset>>,
    refresh_locks: HashMap<League, Arc<Mutex<()>>>,
}

#[derive(Clone)]
pub struct ItemCache {
    engine: ItemDataEngine,
    state: Arc<Mutex<CacheState>>,
    ttl: Duration,
}

impl ItemCache {
    pub fn new(engine: ItemDataEngine) -> Self {
        Self {
            engine,
            state: Arc::new(Mutex::new(CacheState::default())),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn get(&self, league: League) -> Result<CachedPayload<ItemDataset>, ItemDataError> {
        if let Some(payload) = self.cached(league).await {
            tracing::debug!(league = league.api_name(), "serving cached item data");
            return Ok(payload);
        }
        self.refresh(league, false).await
    }

    /// Recomputes the league now, regardless of entry age.
    pub async fn revalidate(
        &self,
        league: League,
    ) -> Result<CachedPayload<ItemDataset>, ItemDataError> {
        tracing::info!(league = league.api_name(), "revalidation requested");
        self.refresh(league, true).await
    }

    pub async fn clear(&self) {
        self.state.lock().await.entries.clear();
    }

    async fn refresh(
        &self,
        league: League,
        force: bool,
    ) -> Result<CachedPayload<ItemDataset>, ItemDataError> {
        let requested_at = SystemTime::now();
        let lock = self.refresh_lock(league).await;
        let _guard = lock.lock().await;

        // Another caller may have finished a computation while we waited.
        if let Some(payload) = self.cached_since(league, force.then_some(requested_at)).await {
            return Ok(payload);
        }

        match self.engine.load(league).await {
            Ok(dataset) => {
                let fetched_at = dataset.last_updated;
                self.state
                    .lock()
                    .await
                    .entries
                    .insert(league, Cached::new(dataset.clone(), fetched_at));
                Ok(CachedPayload::new(dataset, fetched_at, CacheStatus::Fresh))
            }
            Err(error) => {
                let state = self.state.lock().await;
                match state.entries.get(&league) {
                    Some(entry) => {
                        tracing::warn!(
                            league = league.api_name(),
                            %error,
                            "refresh failed, serving stale item data"
                        );
                        Ok(entry.stale())
                    }
                    None => {
                        tracing::error!(league = league.api_name(), %error, "failed to load item data");
                        Err(error)
                    }
                }
            }
        }
    }

    async fn cached(&self, league: League) -> Option<CachedPayload<ItemDataset>> {
        let state = self.state.lock().await;
        state
            .entries
            .get(&league)
            .and_then(|entry| entry.if_fresh(self.ttl))
    }

    /// Fresh entry, optionally required to be newer than `since`.
    async fn cached_since(
        &self,
        league: League,
        since: Option<SystemTime>,
    ) -> Option<CachedPayload<ItemDataset>> {
        match since {
            None => self.cached(league).await,
            Some(since) => {
                let state = self.state.lock().await;
                state
                    .entries
                    .get(&league)
                    .filter(|entry| entry.fetched_at >= since)
                    .and_then(|entry| entry.if_fresh(self.ttl))
            }
        }
    }

    async fn refresh_lock(&self, league: League) -> Arc<Mutex<()>> {
        let mut state = self.state.lock().await;
        state
            .refresh_locks
            .entry(league)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
