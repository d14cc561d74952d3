//! Per-target route sequence
//!
//! This module defines the ordered list of routes stored for each target.

use std::time::{Duration, Instant};

use super::config::RegistryConfig;
use super::route::Route;

/// Ordered routes for a single target
///
/// Routes are kept sorted by `order` ascending, with `None` first. `sort_by_key`
/// is a stable sort, so routes with equal order keep their insertion order.
#[derive(Debug, Clone)]
pub struct TargetEntry<P> {
    routes: Vec<Route<P>>,

    /// When the target was first opened
    pub created_at: Instant,
}

impl<P> TargetEntry<P> {
    /// Create an empty entry
    pub(super) fn new(config: &RegistryConfig) -> Self {
        Self {
            routes: Vec::with_capacity(config.initial_target_capacity),
            created_at: Instant::now(),
        }
    }

    /// Insert a route, replacing the one from the same source
    ///
    /// Returns the replaced route, if any.
    pub(super) fn insert(&mut self, route: Route<P>) -> Option<Route<P>> {
        let replaced = self
            .routes
            .iter()
            .position(|r| r.from == route.from)
            .map(|idx| self.routes.remove(idx));

        self.routes.push(route);
        self.routes.sort_by_key(|r| r.order);

        replaced
    }

    /// Remove every route from `from`, returning how many were removed
    pub(super) fn remove_source(&mut self, from: &str) -> usize {
        let before = self.routes.len();
        self.routes.retain(|r| r.from != from);
        before - self.routes.len()
    }

    /// Remove all routes, returning how many were removed
    pub(super) fn clear(&mut self) -> usize {
        let removed = self.routes.len();
        self.routes.clear();
        removed
    }

    /// Routes in display order
    pub fn routes(&self) -> &[Route<P>] {
        &self.routes
    }

    /// The route with top priority
    pub fn first(&self) -> Option<&Route<P>> {
        self.routes.first()
    }

    /// Find the route sent by `from`
    pub fn get(&self, from: &str) -> Option<&Route<P>> {
        self.routes.iter().find(|r| r.from == from)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Snapshot of this target's state
    pub fn stats(&self) -> TargetStats {
        TargetStats {
            route_count: self.routes.len(),
            sources: self.routes.iter().map(|r| r.from.clone()).collect(),
            top_source: self.first().map(|r| r.from.clone()),
            age: self.created_at.elapsed(),
        }
    }
}

/// Statistics for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStats {
    /// Number of open routes
    pub route_count: usize,
    /// Source names in display order
    pub sources: Vec<String>,
    /// Source currently shown first
    pub top_source: Option<String>,
    /// Time since the target was first opened
    pub age: Duration,
}
