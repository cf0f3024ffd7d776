// Row-to-series transformation for each chart kind

use serde::Serialize;

use crate::chart::{AxisRole, AxisSelection, ChartKind};
use crate::data::Dataset;
use crate::error::{ChartError, Result};
use crate::histogram::{self, Histogram};
use crate::palette::{generate_colors, Hsl, Rgba};
use crate::value::CellValue;

pub const BAR_COLOR: Rgba = Rgba::new(54, 162, 235, 0.7);
pub const LINE_COLOR: Rgba = Rgba::new(75, 192, 192, 1.0);
pub const SCATTER_COLOR: Rgba = Rgba::new(255, 99, 132, 0.7);
pub const HISTOGRAM_COLOR: Rgba = Rgba::new(153, 102, 255, 0.7);

/// One (x, y) pair of a scatter series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: CellValue,
    pub y: CellValue,
}

/// The chart-ready values of a series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// Bar and line charts: one label and one value per row
    Categorical {
        labels: Vec<CellValue>,
        values: Vec<CellValue>,
    },
    Pie {
        labels: Vec<CellValue>,
        values: Vec<CellValue>,
        colors: Vec<Hsl>,
    },
    Scatter {
        points: Vec<Point>,
    },
    Histogram {
        labels: Vec<String>,
        counts: Vec<usize>,
        histogram: Histogram,
    },
}

/// A series plus the presentation text a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub begin_at_zero: bool,
    pub color: Option<Rgba>,
    pub data: SeriesData,
}

impl Series {
    /// Number of data points in the series.
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Categorical { values, .. } | SeriesData::Pie { values, .. } => {
                values.len()
            }
            SeriesData::Scatter { points } => points.len(),
            SeriesData::Histogram { counts, .. } => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the series for `kind` from `dataset` using the columns in `selection`.
///
/// Fails with [`ChartError::EmptyData`] when the dataset has no rows, before
/// any column is looked up.
pub fn build_series(
    dataset: &Dataset,
    kind: ChartKind,
    selection: &AxisSelection,
) -> Result<Series> {
    if dataset.is_empty() {
        return Err(ChartError::EmptyData);
    }

    match kind {
        ChartKind::Bar => {
            let (x, y) = xy_columns(selection)?;
            let (labels, values) = paired_columns(dataset, x, y, false)?;
            Ok(Series {
                kind,
                title: format!("{} by {}", y, x),
                dataset_label: y.to_string(),
                x_title: Some(x.to_string()),
                y_title: Some(y.to_string()),
                begin_at_zero: true,
                color: Some(BAR_COLOR),
                data: SeriesData::Categorical { labels, values },
            })
        }
        ChartKind::Line => {
            let (x, y) = xy_columns(selection)?;
            let (labels, values) = paired_columns(dataset, x, y, true)?;
            Ok(Series {
                kind,
                title: format!("{} vs {}", y, x),
                dataset_label: y.to_string(),
                x_title: Some(x.to_string()),
                y_title: Some(y.to_string()),
                begin_at_zero: false,
                color: Some(LINE_COLOR),
                data: SeriesData::Categorical { labels, values },
            })
        }
        ChartKind::Pie => {
            let label = selection.column(AxisRole::Label)?;
            let value = selection.column(AxisRole::Value)?;
            let (labels, values) = paired_columns(dataset, label, value, false)?;
            let colors = generate_colors(values.len());
            Ok(Series {
                kind,
                title: format!("{} Distribution by {}", value, label),
                dataset_label: value.to_string(),
                x_title: None,
                y_title: None,
                begin_at_zero: false,
                color: None,
                data: SeriesData::Pie {
                    labels,
                    values,
                    colors,
                },
            })
        }
        ChartKind::Scatter => {
            let (x, y) = xy_columns(selection)?;
            let points = scatter_points(dataset, x, y)?;
            Ok(Series {
                kind,
                title: format!("Scatter Plot: {} vs {}", y, x),
                dataset_label: format!("{} vs {}", y, x),
                x_title: Some(x.to_string()),
                y_title: Some(y.to_string()),
                begin_at_zero: false,
                color: Some(SCATTER_COLOR),
                data: SeriesData::Scatter { points },
            })
        }
        ChartKind::Histogram => {
            let column = selection.column(AxisRole::Data)?;
            let histogram = column_histogram(dataset, column)?;
            Ok(Series {
                kind,
                title: format!("Histogram of {}", column),
                dataset_label: format!("Frequency of {}", column),
                x_title: Some(format!("{} Ranges", column)),
                y_title: Some("Frequency".to_string()),
                begin_at_zero: true,
                color: Some(HISTOGRAM_COLOR),
                data: SeriesData::Histogram {
                    labels: histogram.labels(),
                    counts: histogram.counts(),
                    histogram,
                },
            })
        }
    }
}

/// Bin the numeric values of `column`; other values are skipped.
pub fn column_histogram(dataset: &Dataset, column: &str) -> Result<Histogram> {
    let values = dataset.column(column)?;
    histogram::bin_values(column, values.into_iter().filter_map(CellValue::as_f64))
}

fn xy_columns(selection: &AxisSelection) -> Result<(&str, &str)> {
    Ok((selection.column(AxisRole::X)?, selection.column(AxisRole::Y)?))
}

/// Extract two columns side by side, optionally stably sorted by the first.
fn paired_columns(
    dataset: &Dataset,
    key: &str,
    value: &str,
    sort_by_key: bool,
) -> Result<(Vec<CellValue>, Vec<CellValue>)> {
    let key_idx = dataset.column_index(key)?;
    let value_idx = dataset.column_index(value)?;

    let mut rows: Vec<_> = dataset.rows().iter().collect();
    if sort_by_key {
        // sort_by is stable, so equal keys keep file order
        rows.sort_by(|a, b| a.values()[key_idx].natural_cmp(&b.values()[key_idx]));
    }

    Ok(rows
        .into_iter()
        .map(|row| (row.values()[key_idx].clone(), row.values()[value_idx].clone()))
        .unzip())
}

fn scatter_points(dataset: &Dataset, x: &str, y: &str) -> Result<Vec<Point>> {
    let x_idx = dataset.column_index(x)?;
    let y_idx = dataset.column_index(y)?;
    Ok(dataset
        .rows()
        .iter()
        .map(|row| Point {
            x: row.values()[x_idx].clone(),
            y: row.values()[y_idx].clone(),
        })
        .collect())
}
