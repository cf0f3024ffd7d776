use plotters::style::{Color, HSLColor, RGBAColor, RGBColor};
use serde::{Serialize, Serializer};
use std::fmt;

pub const PIE_SATURATION: f64 = 70.0;
pub const PIE_LIGHTNESS: f64 = 60.0;

/// A colour in HSL space: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_plotters(self) -> HSLColor {
        HSLColor(
            self.hue / 360.0,
            self.saturation / 100.0,
            self.lightness / 100.0,
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `count` colours with hues spread evenly over the colour wheel,
/// starting at 0 degrees.
pub fn generate_colors(count: usize) -> Vec<Hsl> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| Hsl {
            hue: i as f64 * step,
            saturation: PIE_SATURATION,
            lightness: PIE_LIGHTNESS,
        })
        .collect()
}

/// A fixed series colour with alpha, as used for single-series charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_plotters(self) -> RGBAColor {
        RGBColor(self.r, self.g, self.b).mix(self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_color_is_hue_zero() {
        let colors = generate_colors(1);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].hue, 0.0);
        assert_eq!(colors[0].to_string(), "hsl(0, 70%, 60%)");
    }

    #[test]
    fn test_hues_evenly_spaced_and_distinct() {
        let colors = generate_colors(6);
        let hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
        assert_eq!(hues, vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
        for c in &colors {
            assert_eq!(c.saturation, 70.0);
            assert_eq!(c.lightness, 60.0);
        }
    }

    #[test]
    fn test_distinct_for_odd_counts() {
        let colors = generate_colors(7);
        for pair in colors.windows(2) {
            assert!(pair[1].hue > pair[0].hue);
        }
        assert!(colors.last().unwrap().hue < 360.0);
    }

    #[test]
    fn test_zero_colors() {
        assert!(generate_colors(0).is_empty());
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(
            Rgba::new(54, 162, 235, 0.7).to_string(),
            "rgba(54, 162, 235, 0.7)"
        );
        assert_eq!(
            serde_json::to_string(&generate_colors(2)).unwrap(),
            r#"["hsl(0, 70%, 60%)","hsl(180, 70%, 60%)"]"#
        );
    }
}
