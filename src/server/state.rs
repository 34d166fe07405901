//! Server shared state
//!
//! Owns the point store, the geocoder and the configuration for the lifetime
//! of the server.

use crate::config::Config;
use crate::error::Result;
use crate::geo::GeoCodeService;
use crate::notify::Subscription;
use crate::store::{JsonFileStore, RealWorldLocations, SharedStorage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Geocoding client
    pub geocoder: GeoCodeService,

    /// Saved points; all mutations go through the write lock
    pub points: RwLock<RealWorldLocations<SharedStorage>>,

    /// Bumped on every change notification so clients can poll for updates
    revision: Arc<AtomicU64>,

    _subscription: Subscription,
}

impl AppState {
    /// Create state over the configured store file
    pub fn open(config: Config) -> Result<Self> {
        let storage: SharedStorage = Arc::new(JsonFileStore::new(config.store_path()?));
        Self::new(config, storage)
    }

    /// Create state over an explicit storage backend
    pub fn new(config: Config, storage: SharedStorage) -> Result<Self> {
        let geocoder = GeoCodeService::new(&config.geocode);
        let points = RealWorldLocations::load(storage)?;

        let revision = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&revision);
        let subscription = points.subscribe(move |notification| {
            let rev = counter.fetch_add(1, Ordering::SeqCst) + 1;
            info!(%notification, revision = rev, "points changed");
        });

        Ok(Self {
            config,
            geocoder,
            points: RwLock::new(points),
            revision,
            _subscription: subscription,
        })
    }

    /// Number of changes seen since the server started
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}
