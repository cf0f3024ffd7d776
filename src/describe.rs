// Declarative chart description, serialized as JSON

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::chart::ChartKind;
use crate::palette::Rgba;
use crate::series::{Series, SeriesData};

/// A renderer-agnostic description of one chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    pub datasets: Vec<DatasetDescription>,
    pub options: AxisOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDescription {
    pub label: String,
    pub data: Value,
    pub background_color: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    pub begin_at_zero: bool,
}

impl ChartDescription {
    pub fn from_series(series: &Series) -> Result<Self> {
        let (labels, data, background_color) = match &series.data {
            SeriesData::Categorical { labels, values } => (
                Some(serde_json::to_value(labels)?),
                serde_json::to_value(values)?,
                color_value(series.color)?,
            ),
            SeriesData::Pie {
                labels,
                values,
                colors,
            } => (
                Some(serde_json::to_value(labels)?),
                serde_json::to_value(values)?,
                serde_json::to_value(colors)?,
            ),
            SeriesData::Scatter { points } => (
                None,
                serde_json::to_value(points)?,
                color_value(series.color)?,
            ),
            SeriesData::Histogram { labels, counts, .. } => (
                Some(serde_json::to_value(labels)?),
                serde_json::to_value(counts)?,
                color_value(series.color)?,
            ),
        };

        Ok(ChartDescription {
            kind: series.kind,
            title: series.title.clone(),
            labels,
            datasets: vec![DatasetDescription {
                label: series.dataset_label.clone(),
                data,
                background_color,
            }],
            options: AxisOptions {
                x_title: series.x_title.clone(),
                y_title: series.y_title.clone(),
                begin_at_zero: series.begin_at_zero,
            },
        })
    }
}

fn color_value(color: Option<Rgba>) -> serde_json::Result<Value> {
    serde_json::to_value(color)
}

/// Pretty-printed JSON description of `series`.
pub fn render_json(series: &Series) -> Result<Vec<u8>> {
    let description = ChartDescription::from_series(series)?;
    let mut bytes = serde_json::to_vec_pretty(&description)
        .context("Failed to serialize chart description")?;
    bytes.push(b'\n');
    Ok(bytes)
}
