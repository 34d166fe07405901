//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeoCodeResult;
use serde_json::Value;

/// JSON formatter - the same maps the store persists, pretty-printed
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array in the saved-point shape"
    }

    fn format(&self, points: &[GeoCodeResult]) -> Result<String> {
        let maps: Vec<Value> = points.iter().map(|p| Value::Object(p.to_map())).collect();
        Ok(serde_json::to_string_pretty(&maps)?)
    }
}
