//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api;

/// Default geocoding provider base URL
pub const DEFAULT_GEOCODE_BASE_URL: &str = api::GEOCODE_BASE_URL;

/// Default geocoding path
pub const DEFAULT_GEOCODE_PATH: &str = api::GEOCODE_PATH;

/// Default geocoding API key
pub const DEFAULT_GEOCODE_API_KEY: &str = api::GEOCODE_API_KEY;

/// Default output format for listing points
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "world-points";
