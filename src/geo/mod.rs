//! Geocoding module
//!
//! Turns free-text addresses into [`GeoCodeResult`] candidates.

pub mod mapquest;
pub mod result;

pub use mapquest::GeoCodeService;
pub use result::{GeoCodeResult, JsonMap};

use crate::error::Result;

/// Trait for geocoding backends
pub trait Geocoder: Send + Sync {
    /// Geocode an address into every candidate match the provider returns.
    ///
    /// Candidates that fail to parse are skipped; request-level failures are
    /// returned as errors.
    fn geocode(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GeoCodeResult>>> + Send;
}

impl Geocoder for GeoCodeService {
    async fn geocode(&self, address: &str) -> Result<Vec<GeoCodeResult>> {
        GeoCodeService::geocode(self, address).await
    }
}
