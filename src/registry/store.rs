//! Route registry implementation
//!
//! The central registry that tracks which sources route content to which
//! targets, and in what order.

use std::collections::HashMap;

use super::config::RegistryConfig;
use super::entry::{TargetEntry, TargetStats};
use super::error::RegistryError;
use super::mount::MountTable;
use super::route::{Route, RouteKey};

/// Registry of open routes, keyed by target name
///
/// Single-threaded: mutation takes `&mut self` and every call runs to
/// completion. Use [`SharedWormhole`](super::SharedWormhole) to share one
/// registry between tasks or threads.
#[derive(Debug)]
pub struct Wormhole<P> {
    /// Map of target name to its ordered routes
    transports: HashMap<String, TargetEntry<P>>,

    /// Mounted target instances
    targets: MountTable,

    /// Mounted source instances
    sources: MountTable,

    /// Configuration
    config: RegistryConfig,
}

fn invalid(field: &'static str, key: RouteKey) -> RegistryError {
    tracing::warn!(route = %key, field, "Rejected route with empty identity");
    RegistryError::InvalidRoute { field, key }
}

impl<P> Wormhole<P> {
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            transports: HashMap::new(),
            targets: MountTable::new(),
            sources: MountTable::new(),
            config,
        }
    }

    /// Create a registry pre-populated with `routes`
    ///
    /// Routes are opened in iteration order, so later routes from the same
    /// source replace earlier ones and ties keep their iteration order.
    pub fn seeded<I>(config: RegistryConfig, routes: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Route<P>>,
    {
        let mut wormhole = Self::with_config(config);
        for route in routes {
            wormhole.open(route)?;
        }
        Ok(wormhole)
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Open a route
    ///
    /// Replaces any route from the same source to the same target and
    /// re-sorts the target's routes by order. Returns the replaced route.
    /// Fails if `from` or `to` is empty.
    pub fn open(&mut self, route: Route<P>) -> Result<Option<Route<P>>, RegistryError> {
        if route.from.is_empty() {
            return Err(invalid("from", route.key()));
        }
        if route.to.is_empty() {
            return Err(invalid("to", route.key()));
        }

        let key = route.key();
        let order = route.order;

        let config = &self.config;
        let entry = self
            .transports
            .entry(key.to.clone())
            .or_insert_with(|| TargetEntry::new(config));
        let replaced = entry.insert(route);

        tracing::debug!(
            route = %key,
            order = ?order,
            replaced = replaced.is_some(),
            routes = entry.len(),
            "Route opened"
        );

        Ok(replaced)
    }

    /// Close a route
    ///
    /// Without `force`, removes only the route from `key.from`. With `force`,
    /// removes every route to `key.to` regardless of source. Closing routes
    /// to an unknown target is a no-op. Returns the number of routes removed.
    pub fn close(&mut self, key: &RouteKey, force: bool) -> Result<usize, RegistryError> {
        if key.to.is_empty() {
            return Err(invalid("to", key.clone()));
        }
        if !force && key.from.is_empty() {
            return Err(invalid("from", key.clone()));
        }

        let Some(entry) = self.transports.get_mut(&key.to) else {
            return Ok(0);
        };

        let removed = if force {
            entry.clear()
        } else {
            entry.remove_source(&key.from)
        };

        if force {
            tracing::info!(route = %key, removed, "Target force-closed");
        } else {
            tracing::debug!(route = %key, removed, remaining = entry.len(), "Route closed");
        }

        if entry.is_empty() && !self.config.retain_empty_targets {
            self.transports.remove(&key.to);
        }

        Ok(removed)
    }

    /// Force-close every route to `to`
    ///
    /// Fails if `to` is empty, like [`close`](Self::close).
    pub fn close_target(&mut self, to: &str) -> Result<usize, RegistryError> {
        self.close(&RouteKey::new("", to), true)
    }

    /// Check if `to` currently has any routed content
    pub fn has_target(&self, to: &str) -> bool {
        self.transports.get(to).is_some_and(|entry| !entry.is_empty())
    }

    /// Check if `to` currently has any routed content
    ///
    /// Alias of [`has_target`](Self::has_target); both always agree.
    pub fn has_content_for(&self, to: &str) -> bool {
        self.has_target(to)
    }

    /// Source whose content currently has top priority for `to`
    pub fn source_for(&self, to: &str) -> Option<&str> {
        self.first_route(to).map(|r| r.from.as_str())
    }

    /// Content that currently has top priority for `to`
    pub fn content_for(&self, to: &str) -> Option<&P> {
        self.first_route(to).map(|r| &r.passengers)
    }

    fn first_route(&self, to: &str) -> Option<&Route<P>> {
        self.transports.get(to).and_then(TargetEntry::first)
    }

    /// All routes to `to` in display order
    pub fn routes_for(&self, to: &str) -> &[Route<P>] {
        self.transports
            .get(to)
            .map(TargetEntry::routes)
            .unwrap_or(&[])
    }

    /// Look up a single route by identity
    pub fn route(&self, key: &RouteKey) -> Option<&Route<P>> {
        self.transports.get(&key.to)?.get(&key.from)
    }

    /// Check if `to` has a sequence, even an empty one
    pub fn contains_target(&self, to: &str) -> bool {
        self.transports.contains_key(to)
    }

    /// Names of all known targets, including empty ones
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.transports.keys().map(String::as_str)
    }

    /// Get total number of known targets
    pub fn target_count(&self) -> usize {
        self.transports.len()
    }

    /// Get target statistics
    pub fn stats(&self, to: &str) -> Option<TargetStats> {
        self.transports.get(to).map(TargetEntry::stats)
    }

    /// Remove targets whose sequence is empty
    ///
    /// Returns how many targets were removed.
    pub fn prune_empty(&mut self) -> usize {
        let before = self.transports.len();
        self.transports.retain(|_, entry| !entry.is_empty());
        let pruned = before - self.transports.len();

        if pruned > 0 {
            tracing::info!(pruned, remaining = self.transports.len(), "Pruned empty targets");
        }

        pruned
    }

    /// Mount a target instance under `name`
    ///
    /// Returns an error if another instance is mounted there, unless `force`.
    pub fn register_target(
        &mut self,
        name: &str,
        instance_id: u64,
        force: bool,
    ) -> Result<(), RegistryError> {
        match self.targets.mount(name, instance_id, force) {
            Ok(Some(previous)) => {
                tracing::warn!(
                    target_name = name,
                    previous,
                    instance_id,
                    "Target re-registered by force"
                );
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(target_name = name, instance_id, "Target registered");
                Ok(())
            }
            Err(_) => Err(RegistryError::TargetAlreadyRegistered(name.to_string())),
        }
    }

    /// Unmount the target instance for `name`
    pub fn unregister_target(&mut self, name: &str) -> bool {
        self.targets.unmount(name).is_some()
    }

    /// Mount a source instance under `name`
    ///
    /// Returns an error if another instance is mounted there, unless `force`.
    pub fn register_source(
        &mut self,
        name: &str,
        instance_id: u64,
        force: bool,
    ) -> Result<(), RegistryError> {
        match self.sources.mount(name, instance_id, force) {
            Ok(Some(previous)) => {
                tracing::warn!(
                    source_name = name,
                    previous,
                    instance_id,
                    "Source re-registered by force"
                );
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(source_name = name, instance_id, "Source registered");
                Ok(())
            }
            Err(_) => Err(RegistryError::SourceAlreadyRegistered(name.to_string())),
        }
    }

    /// Unmount the source instance for `name`
    pub fn unregister_source(&mut self, name: &str) -> bool {
        self.sources.unmount(name).is_some()
    }

    /// Check if a target instance is mounted under `name`
    pub fn is_target_mounted(&self, name: &str) -> bool {
        self.targets.contains(name)
    }

    /// Check if a source instance is mounted under `name`
    pub fn has_source(&self, name: &str) -> bool {
        self.sources.contains(name)
    }

    pub fn target_instance(&self, name: &str) -> Option<u64> {
        self.targets.get(name)
    }

    pub fn source_instance(&self, name: &str) -> Option<u64> {
        self.sources.get(name)
    }
}

impl<P> Default for Wormhole<P> {
    fn default() -> Self {
        Self::new()
    }
}
