// Square-root-rule histogram binning

use serde::Serialize;

use crate::error::{ChartError, Result};

/// A numeric interval `[start, end)`; the last bin of a histogram is closed
/// at `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    /// Human-readable range, e.g. `"1.00 - 3.25"`.
    pub fn label(&self) -> String {
        format!("{:.2} - {:.2}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
}

impl Histogram {
    /// Total number of values counted across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.bins.iter().map(Bin::label).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }
}

/// Number of bins for `n` values: `ceil(sqrt(n))`, at least 1.
pub fn bin_count(n: usize) -> usize {
    let mut k = (n as f64).sqrt().ceil() as usize;
    // Correct float error around perfect squares.
    while k > 1 && (k - 1) * (k - 1) >= n {
        k -= 1;
    }
    while k * k < n {
        k += 1;
    }
    k.max(1)
}

/// Bin the finite values of `values` into a frequency distribution.
///
/// Non-finite values are ignored. `column` names the source column in the
/// error returned when nothing is left to bin.
pub fn bin_values<I>(column: &str, values: I) -> Result<Histogram>
where
    I: IntoIterator<Item = f64>,
{
    let data: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if data.is_empty() {
        return Err(ChartError::NoNumericValues {
            column: column.to_string(),
        });
    }

    let n_bins = bin_count(data.len());
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = if min == max {
        0.0
    } else {
        (max - min) / n_bins as f64
    };

    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            start: min + i as f64 * bin_width,
            end: if i + 1 == n_bins {
                max
            } else {
                min + (i + 1) as f64 * bin_width
            },
            count: 0,
        })
        .collect();

    let last = n_bins - 1;
    for &v in &data {
        let idx = if bin_width == 0.0 {
            0
        } else if v == max {
            last
        } else {
            let raw = ((v - min) / bin_width).floor();
            if raw <= 0.0 {
                0
            } else {
                (raw as usize).min(last)
            }
        };
        bins[idx].count += 1;
    }

    Ok(Histogram {
        bins,
        min,
        max,
        bin_width,
    })
}
