//! Cell value representation for the changeover matrix

use serde::{Deserialize, Serialize};

/// A present value in a matrix cell. Absent cells are `None` at the table level.
///
/// Values coming from spreadsheets are not validated, so a cell may hold text
/// or a flag instead of a changeover time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Changeover time (or any numeric cell)
    Number(f64),
    /// Text cell, passed through from an imported sheet
    Text(String),
    /// Boolean cell, passed through from an imported sheet
    Flag(bool),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Flag(b) => write!(f, "{}", b),
        }
    }
}
