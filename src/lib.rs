//! # wormhole-rs
//!
//! An in-process registry that routes content from named sources to named
//! targets, keeping a caller-chosen display order when several sources feed
//! the same target. This is the state behind "portal"/"teleport" UI
//! primitives: a component declares that its content belongs somewhere else
//! in the output tree, and the component rendering that location asks the
//! registry what to show.
//!
//! ```
//! use wormhole_rs::{Route, RouteKey, Wormhole};
//!
//! let mut wormhole = Wormhole::new();
//! wormhole.open(Route::new("sidebar-portal", "sidebar", vec!["menu"]).order(1))?;
//! wormhole.open(Route::new("banner-portal", "sidebar", vec!["banner"]).order(0))?;
//!
//! assert_eq!(wormhole.source_for("sidebar"), Some("banner-portal"));
//!
//! wormhole.close(&RouteKey::new("banner-portal", "sidebar"), false)?;
//! assert_eq!(wormhole.content_for("sidebar"), Some(&vec!["menu"]));
//! # Ok::<(), wormhole_rs::RegistryError>(())
//! ```

pub mod registry;

pub use registry::{
    MountTable, RegistryConfig, RegistryError, Route, RouteKey, SharedWormhole, TargetEntry,
    TargetStats, Wormhole,
};
