//! Board schema cache.
//!
//! Keeps fetched board schemas per board id. An entry is served from memory
//! while it is fresh, refetched once it turns stale, and dropped after it has
//! gone unused for the eviction window. Concurrent reads of a missing entry
//! share a single fetch.

use super::{BoardGateway, BoardSchema, MondayError, RetryPolicy};
use log::*;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Freshness, retention and retry settings for the schema cache.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    pub stale_time: Duration,
    pub eviction_time: Duration,
    pub retry: RetryPolicy,
    pub max_boards: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            stale_time: Duration::from_secs(5 * 60),
            eviction_time: Duration::from_secs(10 * 60),
            retry: RetryPolicy::default(),
            max_boards: 64,
        }
    }
}

#[derive(Clone)]
struct CachedSchema {
    schema: Arc<BoardSchema>,
    fetched_at: Instant,
}

/// Schema cache in front of a board gateway.
///
#[derive(Clone)]
pub struct SchemaCache {
    gateway: Arc<dyn BoardGateway>,
    policy: CachePolicy,
    entries: Cache<String, CachedSchema>,
}

impl SchemaCache {
    /// Returns a new empty cache reading through the given gateway.
    ///
    pub fn new(gateway: Arc<dyn BoardGateway>, policy: CachePolicy) -> Self {
        SchemaCache {
            gateway,
            policy,
            entries: Cache::builder()
                .max_capacity(policy.max_boards)
                .time_to_idle(policy.eviction_time)
                .build(),
        }
    }

    /// Returns the schema of the board, fetching it when it is not cached or
    /// no longer fresh. Failed fetches are retried according to the policy;
    /// the error of the last attempt is returned to every waiting caller.
    ///
    pub async fn get_columns(&self, board_id: &str) -> Result<Arc<BoardSchema>, Arc<MondayError>> {
        if let Some(cached) = self.entries.get(board_id).await {
            if cached.fetched_at.elapsed() < self.policy.stale_time {
                debug!("Serving cached schema for board {}.", board_id);
                return Ok(cached.schema);
            }
            debug!("Cached schema for board {} is stale.", board_id);
            self.entries.invalidate(board_id).await;
        }

        let gateway = Arc::clone(&self.gateway);
        let retry = self.policy.retry;
        let id = board_id.to_owned();
        let cached = self
            .entries
            .try_get_with(board_id.to_owned(), async move {
                info!("Fetching columns for board {}...", id);
                let schema = retry
                    .run("Board schema fetch", || gateway.fetch_columns(&id))
                    .await?;
                info!(
                    "Received {} columns for board '{}'.",
                    schema.columns.len(),
                    schema.board_name
                );
                Ok::<_, MondayError>(CachedSchema {
                    schema: Arc::new(schema),
                    fetched_at: Instant::now(),
                })
            })
            .await?;
        Ok(cached.schema)
    }

    /// Drop the entry for the board so the next read fetches it again.
    ///
    pub async fn invalidate(&self, board_id: &str) {
        debug!("Invalidating cached schema for board {}.", board_id);
        self.entries.invalidate(board_id).await;
    }

    /// Returns true if a fresh schema for the board is cached.
    ///
    pub async fn is_fresh(&self, board_id: &str) -> bool {
        match self.entries.get(board_id).await {
            Some(cached) => cached.fetched_at.elapsed() < self.policy.stale_time,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monday::testing::FakeGateway;

    fn policy() -> CachePolicy {
        CachePolicy {
            retry: RetryPolicy::fixed(3, Duration::from_millis(1)),
            ..CachePolicy::default()
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let gateway = Arc::new(FakeGateway::new());
        let cache = SchemaCache::new(gateway.clone(), policy());

        let first = cache.get_columns("42").await.unwrap();
        let second = cache.get_columns("42").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(gateway.fetch_calls(), 1);
        assert!(cache.is_fresh("42").await);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let gateway = Arc::new(FakeGateway::new().with_delay(Duration::from_millis(50)));
        let cache = SchemaCache::new(gateway.clone(), policy());

        let (a, b) = tokio::join!(cache.get_columns("42"), cache.get_columns("42"));

        assert_eq!(gateway.fetch_calls(), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_boards_are_cached_separately() {
        let gateway = Arc::new(FakeGateway::new());
        let cache = SchemaCache::new(gateway.clone(), policy());

        cache.get_columns("1").await.unwrap();
        cache.get_columns("2").await.unwrap();

        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_unused_entry_is_evicted() {
        let gateway = Arc::new(FakeGateway::new());
        let cache = SchemaCache::new(
            gateway.clone(),
            CachePolicy {
                stale_time: Duration::from_secs(60),
                eviction_time: Duration::from_millis(100),
                retry: RetryPolicy::none(),
                ..CachePolicy::default()
            },
        );

        cache.get_columns("42").await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        cache.entries.run_pending_tasks().await;

        assert_eq!(cache.entries.entry_count(), 0);
        assert!(!cache.is_fresh("42").await);
        cache.get_columns("42").await.unwrap();
        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let gateway = Arc::new(FakeGateway::new());
        let cache = SchemaCache::new(gateway.clone(), policy());

        cache.get_columns("42").await.unwrap();
        cache.invalidate("42").await;
        assert!(!cache.is_fresh("42").await);

        cache.get_columns("42").await.unwrap();
        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched() {
        let gateway = Arc::new(FakeGateway::new());
        let cache = SchemaCache::new(
            gateway.clone(),
            CachePolicy {
                stale_time: Duration::ZERO,
                ..policy()
            },
        );

        cache.get_columns("42").await.unwrap();
        cache.get_columns("42").await.unwrap();

        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_retried() {
        let gateway = Arc::new(FakeGateway::new().failing_fetches(2));
        let cache = SchemaCache::new(gateway.clone(), policy());

        let schema = cache.get_columns("42").await.unwrap();

        assert_eq!(schema.board_name, "Roadmap");
        assert_eq!(gateway.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_error_after_retries_is_reported_and_not_cached() {
        let gateway = Arc::new(FakeGateway::new().failing_fetches(10));
        let cache = SchemaCache::new(gateway.clone(), policy());

        let error = cache.get_columns("42").await.unwrap_err();

        assert!(error.to_string().contains("fetch failed"));
        assert_eq!(gateway.fetch_calls(), 4);
        assert!(!cache.is_fresh("42").await);
    }
}
