//! In-memory cache of API resources with explicit invalidation.
//!
//! Reads populate the cache; every mutation the client performs is turned
//! into a [`Mutation`] whose [`Mutation::affected`] predicate decides which
//! entries are dropped. Entries also expire after the configured TTL.
//!
//! Every invalidation bumps a generation counter. A read that fetched over
//! the network stores its result with [`ResourceCache::put_if_current`], so a
//! response that raced an invalidation is discarded instead of cached.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::storage::CacheConfig;

/// Identity of a cached resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    CurrentUser,
    Goals,
    Goal(String),
    /// Action list, optionally filtered by goal
    Actions(Option<String>),
    Habits,
    Reports,
}

/// A write performed through the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    GoalCreated,
    GoalUpdated(String),
    GoalDeleted(String),
    /// Action created, completed or deleted. `goal_id` is `None` when the
    /// owning goal is not known, which drops every cached goal.
    ActionChanged { goal_id: Option<String> },
    HabitLogged,
    ReportGenerated,
    LoggedOut,
}

impl Mutation {
    /// Whether the entry for `key` is stale after this mutation.
    pub fn affected(&self, key: &ResourceKey) -> bool {
        match self {
            Mutation::LoggedOut => true,
            Mutation::GoalCreated => matches!(key, ResourceKey::Goals),
            Mutation::GoalUpdated(id) => match key {
                ResourceKey::Goals => true,
                ResourceKey::Goal(g) => g == id,
                _ => false,
            },
            Mutation::GoalDeleted(id) => match key {
                ResourceKey::Goals => true,
                ResourceKey::Goal(g) => g == id,
                ResourceKey::Actions(None) => true,
                ResourceKey::Actions(Some(g)) => g == id,
                _ => false,
            },
            Mutation::ActionChanged { goal_id } => match key {
                ResourceKey::Actions(_) | ResourceKey::Goals => true,
                ResourceKey::Goal(g) => goal_id.as_ref().map_or(true, |id| id == g),
                _ => false,
            },
            Mutation::HabitLogged => matches!(key, ResourceKey::Habits),
            Mutation::ReportGenerated => matches!(key, ResourceKey::Reports),
        }
    }
}

struct CacheEntry {
    value: serde_json::Value,
    inserted_at: Instant,
}

/// Thread-safe resource cache owned by one client.
pub struct ResourceCache {
    entries: Mutex<HashMap<ResourceKey, CacheEntry>>,
    generation: AtomicU64,
    ttl: Duration,
    enabled: bool,
}

impl ResourceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
            ttl,
            enabled: true,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(Duration::from_secs(config.ttl_secs))
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ResourceKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fresh cached value for `key`, if any.
    pub fn get<T: DeserializeOwned>(&self, key: &ResourceKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let mut entries = self.lock();
        let fresh = entries
            .get(key)
            .map(|entry| entry.inserted_at.elapsed() < self.ttl)?;
        if !fresh {
            entries.remove(key);
            tracing::debug!(?key, "cache entry expired");
            return None;
        }
        let value = entries.get(key)?.value.clone();
        match serde_json::from_value(value) {
            Ok(v) => {
                tracing::debug!(?key, "cache hit");
                Some(v)
            }
            Err(e) => {
                tracing::warn!(?key, error = %e, "cached value has unexpected shape, dropping");
                entries.remove(key);
                None
            }
        }
    }

    /// Invalidation counter; take it before starting a fetch.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn put<T: Serialize>(&self, key: ResourceKey, value: &T) {
        self.store(key, value, None);
    }

    /// Store `value` only if nothing was invalidated since `generation` was
    /// read. Returns whether the value was stored.
    pub fn put_if_current<T: Serialize>(&self, key: ResourceKey, value: &T, generation: u64) -> bool {
        self.store(key, value, Some(generation))
    }

    fn store<T: Serialize>(&self, key: ResourceKey, value: &T, generation: Option<u64>) -> bool {
        if !self.enabled {
            return false;
        }
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(?key, error = %e, "value not cacheable");
                return false;
            }
        };
        let mut entries = self.lock();
        if generation.is_some_and(|seen| seen != self.generation()) {
            tracing::debug!(?key, "discarding response fetched before an invalidation");
            return false;
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        true
    }

    pub fn invalidate(&self, key: &ResourceKey) {
        let mut entries = self.lock();
        self.bump();
        entries.remove(key);
    }

    /// Drop every entry made stale by `mutation`. Returns how many were dropped.
    pub fn apply(&self, mutation: &Mutation) -> usize {
        let mut entries = self.lock();
        self.bump();
        let before = entries.len();
        entries.retain(|key, _| !mutation.affected(key));
        let dropped = before - entries.len();
        tracing::debug!(?mutation, dropped, "cache invalidated");
        dropped
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.lock();
        self.bump();
        entries.clear();
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
