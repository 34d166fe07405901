//! world-points: geocoded real-world points
//!
//! A library and CLI tool for looking up addresses with a geocoding provider
//! and keeping a persisted, observable list of the points you chose.
//!
//! ## Features
//!
//! - MapQuest address geocoding with best-effort result parsing
//! - Insertion-ordered point store persisted under a single key
//! - Change notifications via subscription handles
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use world_points::coord::Coordinates;
//! use world_points::geo::GeoCodeResult;
//! use world_points::store::{MemoryStore, RealWorldLocations};
//!
//! let mut store = RealWorldLocations::load(MemoryStore::new()).unwrap();
//! let _subscription = store.subscribe(|n| println!("changed: {}", n));
//!
//! let here = Coordinates::new(39.94601, -105.0215);
//! store
//!     .append(GeoCodeResult::new("13562 Vallejo St", here, here, "Westminster", "CO"))
//!     .unwrap();
//!
//! assert!(store.has(&here));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod notify;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{GeoCodeResult, GeoCodeService, Geocoder};
pub use notify::{Notification, Observers, Subscription};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, RealWorldLocations};
