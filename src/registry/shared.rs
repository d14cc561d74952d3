//! Shared registry for multi-threaded hosts
//!
//! [`Wormhole`] has no internal synchronization. `SharedWormhole` wraps the
//! whole registry in a single `RwLock`, so each operation is atomic with
//! respect to every other one. Queries return owned values because
//! references cannot outlive the lock guard.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use super::config::RegistryConfig;
use super::entry::TargetStats;
use super::error::RegistryError;
use super::route::{Route, RouteKey};
use super::store::Wormhole;

/// Cloneable, thread-safe handle to a [`Wormhole`]
///
/// Read-heavy workloads (targets polling for content) benefit from the
/// concurrent read access.
pub struct SharedWormhole<P> {
    inner: Arc<RwLock<Wormhole<P>>>,
    prune_interval: Duration,
}

impl<P> Clone for SharedWormhole<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            prune_interval: self.prune_interval,
        }
    }
}

impl<P> SharedWormhole<P> {
    /// Create a new shared registry with default configuration
    pub fn new() -> Self {
        Self::from_wormhole(Wormhole::new())
    }

    /// Create a new shared registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::from_wormhole(Wormhole::with_config(config))
    }

    /// Share an existing (possibly seeded) registry
    pub fn from_wormhole(wormhole: Wormhole<P>) -> Self {
        Self {
            prune_interval: wormhole.config().prune_interval,
            inner: Arc::new(RwLock::new(wormhole)),
        }
    }

    /// Run `f` with shared access to the registry
    pub async fn read<R>(&self, f: impl FnOnce(&Wormhole<P>) -> R) -> R {
        f(&*self.inner.read().await)
    }

    /// Run `f` with exclusive access to the registry
    pub async fn write<R>(&self, f: impl FnOnce(&mut Wormhole<P>) -> R) -> R {
        f(&mut *self.inner.write().await)
    }

    /// Open a route, see [`Wormhole::open`]
    pub async fn open(&self, route: Route<P>) -> Result<Option<Route<P>>, RegistryError> {
        self.inner.write().await.open(route)
    }

    /// Close a route, see [`Wormhole::close`]
    pub async fn close(&self, key: &RouteKey, force: bool) -> Result<usize, RegistryError> {
        self.inner.write().await.close(key, force)
    }

    /// Force-close every route to `to`
    pub async fn close_target(&self, to: &str) -> Result<usize, RegistryError> {
        self.inner.write().await.close_target(to)
    }

    pub async fn has_target(&self, to: &str) -> bool {
        self.inner.read().await.has_target(to)
    }

    pub async fn has_content_for(&self, to: &str) -> bool {
        self.inner.read().await.has_content_for(to)
    }

    /// Source whose content currently has top priority for `to`
    pub async fn source_for(&self, to: &str) -> Option<String> {
        self.inner.read().await.source_for(to).map(str::to_owned)
    }

    pub async fn stats(&self, to: &str) -> Option<TargetStats> {
        self.inner.read().await.stats(to)
    }

    pub async fn target_count(&self) -> usize {
        self.inner.read().await.target_count()
    }

    pub async fn prune_empty(&self) -> usize {
        self.inner.write().await.prune_empty()
    }

    pub async fn register_target(
        &self,
        name: &str,
        instance_id: u64,
        force: bool,
    ) -> Result<(), RegistryError> {
        self.inner
            .write()
            .await
            .register_target(name, instance_id, force)
    }

    pub async fn unregister_target(&self, name: &str) -> bool {
        self.inner.write().await.unregister_target(name)
    }

    pub async fn register_source(
        &self,
        name: &str,
        instance_id: u64,
        force: bool,
    ) -> Result<(), RegistryError> {
        self.inner
            .write()
            .await
            .register_source(name, instance_id, force)
    }

    pub async fn unregister_source(&self, name: &str) -> bool {
        self.inner.write().await.unregister_source(name)
    }

    pub async fn is_target_mounted(&self, name: &str) -> bool {
        self.inner.read().await.is_target_mounted(name)
    }

    pub async fn has_source(&self, name: &str) -> bool {
        self.inner.read().await.has_source(name)
    }
}

impl<P: Clone> SharedWormhole<P> {
    /// Content that currently has top priority for `to`
    ///
    /// Cloned out of the registry; prefer cheap-to-clone payloads such as
    /// `Arc<[T]>` or `bytes::Bytes`.
    pub async fn content_for(&self, to: &str) -> Option<P> {
        self.inner.read().await.content_for(to).cloned()
    }

    /// All routes to `to` in display order
    pub async fn routes_for(&self, to: &str) -> Vec<Route<P>> {
        self.inner.read().await.routes_for(to).to_vec()
    }
}

impl<P: Send + Sync + 'static> SharedWormhole<P> {
    /// Spawn background prune task
    ///
    /// Removes empty targets every `prune_interval`. Returns a handle that
    /// can be used to abort the task.
    pub fn spawn_prune_task(&self) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        let interval = self.prune_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                registry.prune_empty().await;
            }
        })
    }
}

impl<P> Default for SharedWormhole<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[tokio::test]
    async fn test_open_and_query() {
        let registry = SharedWormhole::new();

        registry
            .open(Route::new("source", "target", Bytes::from_static(b"<p>hi</p>")))
            .await
            .unwrap();

        assert!(registry.has_target("target").await);
        assert!(registry.has_content_for("target").await);
        assert_eq!(registry.source_for("target").await.as_deref(), Some("source"));
        assert_eq!(
            registry.content_for("target").await,
            Some(Bytes::from_static(b"<p>hi</p>"))
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let registry = SharedWormhole::new();
        let other = registry.clone();

        registry.open(Route::new("a", "t", Bytes::new())).await.unwrap();
        assert!(other.has_target("t").await);

        other.close(&RouteKey::new("a", "t"), false).await.unwrap();
        assert!(!registry.has_target("t").await);
        assert_eq!(registry.target_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_opens_keep_one_route_per_source() {
        let registry = SharedWormhole::new();

        let mut handles = Vec::new();
        for i in 0..16i64 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let from = format!("source-{}", i % 4);
                registry
                    .open(Route::new(from, "target", Bytes::new()).order(i % 4))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let routes = registry.routes_for("target").await;
        let sources: Vec<_> = routes.iter().map(|r| r.from.as_str()).collect();
        assert_eq!(sources, vec!["source-0", "source-1", "source-2", "source-3"]);
    }

    #[tokio::test]
    async fn test_force_close_and_prune() {
        let registry = SharedWormhole::new();
        registry.open(Route::new("a", "t", Bytes::new())).await.unwrap();
        registry.open(Route::new("b", "t", Bytes::new())).await.unwrap();

        assert_eq!(registry.close_target("t").await, Ok(2));
        assert_eq!(registry.content_for("t").await, None);
        assert_eq!(registry.prune_empty().await, 1);
        assert_eq!(registry.target_count().await, 0);
    }

    #[tokio::test]
    async fn test_prune_task() {
        let config = RegistryConfig::default().prune_interval(Duration::from_millis(10));
        let registry = SharedWormhole::with_config(config);
        registry.open(Route::new("a", "t", Bytes::new())).await.unwrap();
        registry.close_target("t").await.unwrap();

        let handle = registry.spawn_prune_task();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_eq!(registry.target_count().await, 0);
    }

    #[tokio::test]
    async fn test_close_target_rejects_empty_name() {
        let registry = SharedWormhole::new();
        registry.open(Route::new("a", "t", Bytes::new())).await.unwrap();

        assert!(matches!(
            registry.close_target("").await,
            Err(RegistryError::InvalidRoute { field: "to", .. })
        ));
        assert!(registry.has_target("t").await);
    }

    #[tokio::test]
    async fn test_mounts() {
        let registry: SharedWormhole<Bytes> = SharedWormhole::new();

        registry.register_target("modal", 1, false).await.unwrap();
        assert!(registry.register_target("modal", 2, false).await.is_err());
        assert!(registry.is_target_mounted("modal").await);
        assert!(registry.unregister_target("modal").await);

        registry.register_source("header", 3, false).await.unwrap();
        assert!(registry.has_source("header").await);
        assert!(registry.unregister_source("header").await);
        assert!(!registry.has_source("header").await);
    }

    #[test]
    fn test_from_seeded_wormhole_blocking() {
        let seeded = Wormhole::seeded(
            RegistryConfig::default(),
            vec![
                Route::new("a", "t", Bytes::from_static(b"a")).order(1),
                Route::new("b", "t", Bytes::from_static(b"b")),
            ],
        )
        .unwrap();
        let registry = SharedWormhole::from_wormhole(seeded);

        let (source, count) = tokio_test::block_on(async {
            let source = registry.source_for("t").await;
            let count = registry.read(|w| w.routes_for("t").len()).await;
            (source, count)
        });

        assert_eq!(source.as_deref(), Some("b"));
        assert_eq!(count, 2);

        let stats = tokio_test::block_on(registry.write(|w| {
            w.close_target("t").unwrap();
            w.stats("t")
        }));
        assert_eq!(stats.map(|s| s.route_count), Some(0));
    }
}
