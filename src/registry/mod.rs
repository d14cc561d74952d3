//! Route registry for portal content
//!
//! The registry tracks, for every target, which sources currently have content
//! routed to it and in what order that content should be shown.
//!
//! # Architecture
//!
//! ```text
//!                            Wormhole<P>
//!                     ┌─────────────────────────┐
//!                     │ transports: HashMap<to, │
//!                     │   TargetEntry {         │
//!                     │     routes: Vec<Route>, │  sorted by `order`,
//!                     │   }                     │  stable on ties
//!                     │ >                       │
//!                     │ mounts: MountTable      │
//!                     └───────────┬─────────────┘
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!     [Source]                [Source]                [Target]
//!     open()/close()          open()/close()          content_for()
//!                                                     source_for()
//! ```
//!
//! `Wormhole` is single-threaded and owned. Hosts that share it across
//! threads wrap it in [`SharedWormhole`], which puts one lock around the
//! whole map.

pub mod config;
pub mod entry;
pub mod error;
pub mod mount;
pub mod route;
pub mod shared;
pub mod store;

pub use config::RegistryConfig;
pub use entry::{TargetEntry, TargetStats};
pub use error::RegistryError;
pub use mount::MountTable;
pub use route::{Route, RouteKey};
pub use shared::SharedWormhole;
pub use store::Wormhole;
