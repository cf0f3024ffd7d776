use crate::error::{ChartError, Result};
use crate::value::CellValue;

/// One parsed record, aligned positionally with [`Dataset::headers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<CellValue>,
}

impl Row {
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }
}

/// Parsed CSV rows plus their column headers, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short records with `Null` and dropping
    /// surplus cells so every row has exactly one value per header.
    pub fn new(headers: Vec<String>, records: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = records
            .into_iter()
            .map(|mut values| {
                values.resize(width, CellValue::Null);
                Row { values }
            })
            .collect();
        Self { headers, rows }
    }

    /// Build a dataset from raw cell text, inferring each cell's type.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let records = rows
            .iter()
            .map(|row| row.iter().map(|cell| CellValue::infer(cell)).collect())
            .collect();
        Self::new(headers, records)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ChartError::UnknownColumn(name.to_string()))
    }

    /// All values of a column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row.values[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_data() -> Dataset {
        Dataset::from_text_rows(
            vec!["city".to_string(), "temp".to_string(), "rain".to_string()],
            vec![
                vec!["Oslo".to_string(), "4.5".to_string(), "true".to_string()],
                vec!["Rome".to_string(), "18".to_string()],
                vec![
                    "Lima".to_string(),
                    "".to_string(),
                    "false".to_string(),
                    "extra".to_string(),
                ],
            ],
        )
    }

    #[test]
    fn test_rows_match_headers() {
        let data = make_data();
        assert_eq!(data.len(), 3);
        for row in data.rows() {
            assert_eq!(row.values().len(), data.headers().len());
        }
        assert_eq!(data.rows()[1].values()[2], CellValue::Null);
    }

    #[test]
    fn test_column_extraction() {
        let data = make_data();
        let temps = data.column("temp").unwrap();
        assert_eq!(
            temps,
            vec![&CellValue::Number(4.5), &CellValue::Number(18.0), &CellValue::Null]
        );
    }

    #[test]
    fn test_unknown_column() {
        let data = make_data();
        assert!(matches!(
            data.column("humidity"),
            Err(ChartError::UnknownColumn(name)) if name == "humidity"
        ));
        assert!(data.has_column("rain"));
        assert!(!data.has_column("Rain"));
    }
}
