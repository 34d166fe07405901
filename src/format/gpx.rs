//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeoCodeResult;

/// GPX formatter - one waypoint per saved point
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, points: &[GeoCodeResult]) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="world-points">"#);
        gpx.push('\n');

        for point in points {
            let location = point.location();
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                location.lat, location.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(point.location_string())));

            let place = [point.city(), point.state()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if !place.is_empty() {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&place)));
            }

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::format::tests::sample_points;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter.format(&sample_points()).unwrap();

        assert!(output.starts_with(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains(r#"<wpt lat="39.94601" lon="-105.0215">"#));
        assert!(output.contains("<desc>Westminster, CO</desc>"));
        assert_eq!(output.matches("<wpt").count(), 2);
        assert_eq!(output.matches("<desc>").count(), 1);
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_gpx_escapes_names() {
        let point = GeoCodeResult::new(
            "Smith & Sons <HQ>",
            Coordinates::new(1.0, 2.0),
            Coordinates::new(1.0, 2.0),
            "",
            "",
        );
        let output = GpxFormatter.format(&[point]).unwrap();
        assert!(output.contains("<name>Smith &amp; Sons &lt;HQ&gt;</name>"));
    }
}
