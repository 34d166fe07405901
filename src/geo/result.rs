//! Geocoded address match
//!
//! A `GeoCodeResult` is built either from one element of the provider's
//! `locations` array or from a map previously produced by [`GeoCodeResult::to_map`].
//! Both paths share the same coordinate extraction, so a record can only exist
//! with both `latLng` and `displayLatLng` present.

use crate::coord::Coordinates;
use serde_json::{json, Map, Value};

/// JSON object as handed out by the provider and stored on disk
pub type JsonMap = Map<String, Value>;

/// Number of `adminArea<i>` slots the provider may populate
const ADMIN_AREA_SLOTS: usize = 6;

const CITY_TYPE: &str = "City";
const STATE_TYPE: &str = "State";

/// One geocoded address match
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCodeResult {
    location_string: String,
    location: Coordinates,
    display_location: Coordinates,
    city: String,
    state: String,
}

impl GeoCodeResult {
    /// Build a result from already-known values
    pub fn new(
        location_string: impl Into<String>,
        location: Coordinates,
        display_location: Coordinates,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            location_string: location_string.into(),
            location,
            display_location,
            city: city.into(),
            state: state.into(),
        }
    }

    /// Parse one provider match, tagging it with the query it answered.
    ///
    /// Returns `None` unless both `latLng` and `displayLatLng` carry numeric
    /// `lat`/`lng` values.
    pub fn from_fragment(map: &JsonMap, location_string: impl Into<String>) -> Option<Self> {
        let location = lat_lng(map, "latLng")?;
        let display_location = lat_lng(map, "displayLatLng")?;

        Some(Self {
            location_string: location_string.into(),
            location,
            display_location,
            city: Self::city_from(map),
            state: Self::state_from(map),
        })
    }

    /// Parse a map produced by [`GeoCodeResult::to_map`]
    pub fn from_map(map: &JsonMap) -> Option<Self> {
        let location_string = map.get("locationString")?.as_str()?;
        Self::from_fragment(map, location_string)
    }

    /// Serialize into the persisted map shape.
    ///
    /// City is always written to slot 1 and state to slot 2, and only when
    /// non-empty. Parsing scans all six slots, so maps coming straight from the
    /// provider (where the slots vary by country) still read back correctly.
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(
            "latLng".to_string(),
            json!({ "lat": self.location.lat, "lng": self.location.lng }),
        );
        map.insert(
            "displayLatLng".to_string(),
            json!({ "lat": self.display_location.lat, "lng": self.display_location.lng }),
        );
        map.insert(
            "locationString".to_string(),
            Value::String(self.location_string.clone()),
        );
        if !self.city.is_empty() {
            map.insert("adminArea1Type".to_string(), Value::from(CITY_TYPE));
            map.insert("adminArea1".to_string(), Value::String(self.city.clone()));
        }
        if !self.state.is_empty() {
            map.insert("adminArea2Type".to_string(), Value::from(STATE_TYPE));
            map.insert("adminArea2".to_string(), Value::String(self.state.clone()));
        }
        map
    }

    /// Text shown for this result in a list: the query, then city/state on
    /// a second line when known.
    pub fn cell_display_text(&self) -> String {
        let mut text = self.location_string.clone();
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => text.push_str(&format!("\n{}, {}", self.city, self.state)),
            (false, true) => text.push_str(&format!("\n{}", self.city)),
            (true, false) => text.push_str(&format!("\n{}", self.state)),
            (true, true) => {}
        }
        text
    }

    /// First admin area whose type is "City", or empty
    pub fn city_from(map: &JsonMap) -> String {
        admin_area(map, CITY_TYPE)
    }

    /// First admin area whose type is "State", or empty
    pub fn state_from(map: &JsonMap) -> String {
        admin_area(map, STATE_TYPE)
    }

    pub fn location_string(&self) -> &str {
        &self.location_string
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    pub fn display_location(&self) -> Coordinates {
        self.display_location
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

fn lat_lng(map: &JsonMap, key: &str) -> Option<Coordinates> {
    let inner = map.get(key)?.as_object()?;
    let lat = inner.get("lat")?.as_f64()?;
    let lng = inner.get("lng")?.as_f64()?;
    Some(Coordinates::new(lat, lng))
}

fn admin_area(map: &JsonMap, area_type: &str) -> String {
    (1..=ADMIN_AREA_SLOTS)
        .find(|i| {
            map.get(&format!("adminArea{}Type", i))
                .and_then(Value::as_str)
                == Some(area_type)
        })
        .and_then(|i| map.get(&format!("adminArea{}", i)))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
