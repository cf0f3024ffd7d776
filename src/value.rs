use nom::{
    character::complete::multispace0,
    combinator::all_consuming,
    number::complete::recognize_float,
    sequence::delimited,
    IResult,
};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A single CSV cell after type inference.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Boolean(bool),
    String(String),
    Null,
}

impl CellValue {
    /// Infer the type of a raw cell.
    ///
    /// Numeric text becomes `Number`, `true`/`false` (lower or upper case)
    /// become `Boolean`, empty text becomes `Null`, anything else is kept as
    /// a `String`.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Null;
        }
        match raw {
            "true" | "TRUE" => return CellValue::Boolean(true),
            "false" | "FALSE" => return CellValue::Boolean(false),
            _ => {}
        }
        if let Ok((_, text)) = numeric_text(raw) {
            if let Ok(n) = text.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }
        CellValue::String(raw.to_string())
    }

    /// The finite numeric value of this cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Natural ordering used when sorting rows by a column.
    ///
    /// Values of the same kind compare naturally (numbers numerically,
    /// strings lexicographically, `false < true`). Mixed kinds order as
    /// Null < Boolean < Number < String.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Boolean(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::String(_) => 3,
        }
    }
}

/// Recognize a whole cell as a decimal number with optional surrounding whitespace.
fn numeric_text(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(multispace0, recognize_float, multispace0))(input)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::String(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}
