use thiserror::Error;

use crate::chart::AxisRole;

/// Errors surfaced to the user while loading data or building a chart.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The input could not be read or is not well-formed CSV
    #[error("Error parsing CSV file. Please check the format and try again.")]
    Parse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No dataset is loaded, or the loaded dataset has no rows
    #[error("Please upload a CSV file first.")]
    EmptyData,

    /// Histogram requested on a column with no finite numeric values
    #[error("Column '{column}' has no numeric values to bin.")]
    NoNumericValues { column: String },

    #[error("Chart type not supported.")]
    UnsupportedKind(String),

    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    #[error("No column selected for {0}")]
    MissingAxis(AxisRole),

    #[error("Invalid chart expression: {0}")]
    InvalidExpression(String),
}

impl ChartError {
    pub fn parse<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ChartError::Parse {
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
