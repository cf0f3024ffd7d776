// Value domains for chart axes

use std::ops::Range;

use crate::series::{Series, SeriesData};

/// Observed extent of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Extent of the finite values, or `None` when there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            None
        } else {
            Some(MinMax { min, max })
        }
    }

    /// Stretch the extent so it contains zero.
    pub fn include_zero(self) -> Self {
        MinMax {
            min: self.min.min(0.0),
            max: self.max.max(0.0),
        }
    }

    /// Padded axis range: 5% either side, or ±1 around a single value.
    /// A bound sitting exactly on zero stays there so bars start at the axis.
    pub fn padded(self) -> Range<f64> {
        let (mut lo, mut hi) = pad_range(self.min, self.max);
        if self.min == 0.0 && self.max != 0.0 {
            lo = 0.0;
        }
        if self.max == 0.0 && self.min != 0.0 {
            hi = 0.0;
        }
        lo..hi
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

/// Y range for a categorical (bar, line, histogram) series.
pub fn value_range(series: &Series) -> Range<f64> {
    let values: Vec<f64> = match &series.data {
        SeriesData::Categorical { values, .. } => {
            values.iter().filter_map(|v| v.as_f64()).collect()
        }
        SeriesData::Histogram { counts, .. } => counts.iter().map(|&c| c as f64).collect(),
        SeriesData::Scatter { points } => points.iter().filter_map(|p| p.y.as_f64()).collect(),
        SeriesData::Pie { .. } => Vec::new(),
    };
    axis_range(values, series.begin_at_zero)
}

/// X range for a scatter series.
pub fn scatter_x_range(series: &Series) -> Range<f64> {
    let values: Vec<f64> = match &series.data {
        SeriesData::Scatter { points } => points.iter().filter_map(|p| p.x.as_f64()).collect(),
        _ => Vec::new(),
    };
    axis_range(values, false)
}

fn axis_range(values: Vec<f64>, begin_at_zero: bool) -> Range<f64> {
    match MinMax::of(values) {
        Some(mm) if begin_at_zero => mm.include_zero().padded(),
        Some(mm) => mm.padded(),
        None => 0.0..1.0,
    }
}
