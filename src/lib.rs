// Library exports for csvchart

pub mod chart;
pub mod csv_reader;
pub mod data;
pub mod describe;
pub mod error;
pub mod graph;
pub mod histogram;
pub mod palette;
pub mod parser;
pub mod scale;
pub mod series;
pub mod session;
pub mod value;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub use chart::{AxisRole, AxisSelection, ChartKind};
pub use data::Dataset;
pub use error::ChartError;
pub use series::{build_series, Series, SeriesData};
pub use session::ChartSession;
pub use value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

/// Largest width or height accepted for a rendered chart.
pub const MAX_DIMENSION: u32 = 8192;

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: OutputFormat::Png,
        }
    }
}

impl RenderOptions {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }
}

/// Render a series in the requested output format.
pub fn render(series: &Series, options: &RenderOptions) -> Result<Vec<u8>> {
    if options.width == 0 || options.height == 0 {
        anyhow::bail!("Chart size must be non-zero (got {}x{})", options.width, options.height);
    }
    if options.width > MAX_DIMENSION || options.height > MAX_DIMENSION {
        anyhow::bail!(
            "Chart size {}x{} exceeds the {}px limit",
            options.width,
            options.height,
            MAX_DIMENSION
        );
    }
    tracing::debug!(
        kind = %series.kind,
        format = ?options.format,
        width = options.width,
        height = options.height,
        "rendering chart"
    );
    match options.format {
        OutputFormat::Png => graph::render_png(series, options.width, options.height),
        OutputFormat::Svg => graph::render_svg(series, options.width, options.height),
        OutputFormat::Json => describe::render_json(series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let opts: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.width, 800);
        assert_eq!(opts.height, 600);
        assert_eq!(opts.format, OutputFormat::Png);
    }

    #[test]
    fn test_render_options_partial() {
        let opts: RenderOptions =
            serde_json::from_str(r#"{"width": 1024, "type": "svg"}"#).unwrap();
        assert_eq!(opts.width, 1024);
        assert_eq!(opts.height, 600);
        assert_eq!(opts.format, OutputFormat::Svg);
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let data = Dataset::new(
            vec!["x".to_string(), "y".to_string()],
            vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
        );
        let series = build_series(&data, ChartKind::Bar, &AxisSelection::xy("x", "y")).unwrap();
        let opts = RenderOptions { width: 0, ..RenderOptions::default() };
        assert!(render(&series, &opts).is_err());

        let json = RenderOptions { format: OutputFormat::Json, ..RenderOptions::default() };
        assert!(render(&series, &json).unwrap().starts_with(b"{"));
    }

    #[test]
    fn test_render_rejects_oversized_image() {
        let data = Dataset::new(
            vec!["x".to_string(), "y".to_string()],
            vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
        );
        let series = build_series(&data, ChartKind::Bar, &AxisSelection::xy("x", "y")).unwrap();
        let opts = RenderOptions { width: 70_000, height: 70_000, format: OutputFormat::Png };
        let err = render(&series, &opts).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_render_png_and_svg() {
        let data = Dataset::new(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec![CellValue::String("a".into()), CellValue::Number(1.0)],
                vec![CellValue::String("b".into()), CellValue::Number(3.0)],
            ],
        );
        let series = build_series(&data, ChartKind::Bar, &AxisSelection::xy("x", "y")).unwrap();

        let sized = |format| RenderOptions { width: 320, height: 240, format };

        let png = render(&series, &sized(OutputFormat::Png)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let svg = render(&series, &sized(OutputFormat::Svg)).unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("<svg"));
    }
}
