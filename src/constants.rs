//! Centralized constants for the world-points crate
//!
//! Values shared by the geocoder, the point store and the configuration
//! defaults.

/// Geocoding provider endpoint
pub mod api {
    /// MapQuest API host
    pub const GEOCODE_BASE_URL: &str = "https://www.mapquestapi.com";

    /// Address geocoding path
    pub const GEOCODE_PATH: &str = "/geocoding/v1/address";

    /// Demo key shipped with the sample app; override via `geocode.api_key`
    pub const GEOCODE_API_KEY: &str = "lYrP4vF3Uk5zgTiGGuEzQGwGIVDGuy24";

    pub const IN_FORMAT: &str = "kvp";
    pub const OUT_FORMAT: &str = "json";
    pub const THUMB_MAPS: &str = "false";
}

/// Persistence settings
pub mod storage {
    /// Key the saved point collection lives under
    pub const WORLD_POINTS_KEY: &str = "world.points";

    /// Key-value store file name (inside the data directory)
    pub const STORE_FILE_NAME: &str = "store.json";
}

/// Change notification names
pub mod notify {
    pub const LOCATIONS_UPDATED: &str = "world.points.updated";
}
