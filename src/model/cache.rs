//! File-backed cache-aside store for catalog data
//!
//! One generic utility replaces a hand-written hook per resource: give it a
//! key, a freshness window and a fetcher.

use std::fmt::Display;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Cached payload plus the time it was fetched
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh(&self, freshness: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp) <= freshness
    }
}

/// Where a `fetch_cached` result came from
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    Cache,
    Network,
    /// Fetch failed, cached value served instead
    CacheFallback { error: String },
}

#[derive(Clone, Debug)]
pub struct FetchOutcome<T> {
    pub data: T,
    pub source: DataSource,
}

#[derive(Clone, Debug)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let path = self.path_for(key);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    pub async fn store<T: Serialize>(&self, key: &str, data: &T, timestamp: DateTime<Utc>) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let entry = CacheEntry { data, timestamp };
        let content = serde_json::to_string(&entry)?;
        tokio::fs::write(self.path_for(key), content).await?;
        Ok(())
    }

    /// Drop an entry. A missing entry is not an error.
    pub async fn remove(&self, key: &str) {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => tracing::debug!(key, "Cache entry removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, error = %e, "Failed to remove cache entry"),
        }
    }
}

/// Cache-aside read.
///
/// A fresh entry is returned without calling `fetcher` unless `force` is set.
/// A failed fetch falls back to an entry still inside its freshness window.
pub async fn fetch_cached<T, E, F, Fut>(
    cache: &LocalCache,
    key: &str,
    freshness: Duration,
    force: bool,
    fetcher: F,
) -> Result<FetchOutcome<T>, E>
where
    T: Serialize + DeserializeOwned,
    E: Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let cached = cache.load::<T>(key).await;
    let fresh = cached.filter(|entry| entry.is_fresh(freshness, Utc::now()));

    let fresh = match fresh {
        Some(entry) if !force => {
            tracing::debug!(key, fetched_at = %entry.timestamp, "Serving from cache");
            return Ok(FetchOutcome {
                data: entry.data,
                source: DataSource::Cache,
            });
        }
        other => other,
    };

    match fetcher().await {
        Ok(data) => {
            if let Err(e) = cache.store(key, &data, Utc::now()).await {
                tracing::warn!(key, error = %e, "Failed to write cache entry");
            }
            Ok(FetchOutcome {
                data,
                source: DataSource::Network,
            })
        }
        Err(e) => match fresh {
            Some(entry) => {
                tracing::warn!(key, error = %e, "Fetch failed, falling back to cache");
                Ok(FetchOutcome {
                    data: entry.data,
                    source: DataSource::CacheFallback { error: e.to_string() },
                })
            }
            None => {
                tracing::error!(key, error = %e, "Fetch failed with no usable cache");
                Err(e)
            }
        },
    }
}
