//! Portal routing demo
//!
//! Run with: cargo run --example portal_demo
//!
//! Simulates two UI sources (a page header and a toast notifier) sending
//! content to one "overlay" target, and a renderer task that prints whatever
//! currently has top priority for that target.
//!
//! Set `RUST_LOG=wormhole_rs=debug` to see every open/close.

use std::time::Duration;

use bytes::Bytes;
use wormhole_rs::{RegistryConfig, Route, RouteKey, SharedWormhole};

const OVERLAY: &str = "overlay";

/// Print the overlay the way a target component would render it
async fn render(registry: &SharedWormhole<Bytes>) {
    let routes = registry.routes_for(OVERLAY).await;
    if routes.is_empty() {
        println!("[{}] <empty placeholder>", OVERLAY);
        return;
    }

    let top = registry.source_for(OVERLAY).await.unwrap_or_default();
    println!("[{}] top source: {}", OVERLAY, top);
    for route in routes {
        println!(
            "    {:<10} order={:<6} {}",
            route.from,
            format!("{:?}", route.order),
            String::from_utf8_lossy(&route.passengers)
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wormhole_rs=debug".parse()?)
                .add_directive("portal_demo=debug".parse()?),
        )
        .init();

    let config = RegistryConfig::default().prune_interval(Duration::from_millis(100));
    let registry = SharedWormhole::with_config(config);
    let pruner = registry.spawn_prune_task();

    registry.register_target(OVERLAY, 1, false).await?;
    render(&registry).await;

    // Source side: mount and send content
    registry.register_source("header", 10, false).await?;
    registry
        .open(
            Route::new("header", OVERLAY, Bytes::from_static(b"<h1>Dashboard</h1>"))
                .order(1)
                .class(["sticky"]),
        )
        .await?;
    registry
        .open(Route::new("toast", OVERLAY, Bytes::from_static(b"<div>Saved!</div>")).order(0))
        .await?;
    render(&registry).await;

    // Header updates its content; it keeps one route
    registry
        .open(Route::new("header", OVERLAY, Bytes::from_static(b"<h1>Reports</h1>")).order(1))
        .await?;
    render(&registry).await;

    // Toast unmounts
    registry.close(&RouteKey::new("toast", OVERLAY), false).await?;
    render(&registry).await;

    // Target tears down, evicting every source
    let evicted = registry.close_target(OVERLAY).await?;
    registry.unregister_target(OVERLAY).await;
    println!("evicted {} route(s)", evicted);
    render(&registry).await;

    tokio::time::sleep(Duration::from_millis(250)).await;
    println!("targets after prune: {}", registry.target_count().await);

    pruner.abort();
    Ok(())
}
