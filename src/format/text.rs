//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeoCodeResult;

/// Text formatter - numbered list of display text and coordinates
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Numbered, human-readable list"
    }

    fn format(&self, points: &[GeoCodeResult]) -> Result<String> {
        if points.is_empty() {
            return Ok("No saved points.\n".to_string());
        }

        let mut output = String::new();
        for (index, point) in points.iter().enumerate() {
            let text = point.cell_display_text();
            let mut lines = text.lines();
            let first = lines.next().unwrap_or_default();
            output.push_str(&format!("[{}] {}\n", index, first));
            for line in lines {
                output.push_str(&format!("    {}\n", line));
            }
            let location = point.location();
            output.push_str(&format!("    ({:.6}, {:.6})\n", location.lat, location.lng));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_points;

    #[test]
    fn test_text_format() {
        let output = TextFormatter.format(&sample_points()).unwrap();

        assert_eq!(
            output,
            "[0] 13562 Vallejo St Westminster, CO\n    Westminster, CO\n    (39.946010, -105.021500)\n\
             [1] Pikes Peak\n    (38.840900, -105.042300)\n"
        );
    }

    #[test]
    fn test_text_format_empty() {
        assert_eq!(TextFormatter.format(&[]).unwrap(), "No saved points.\n");
    }
}
