//! Built-in example table loaded at startup

use super::table::{CellList, ChangeoverTable};
use super::value::CellValue;

const PARTS: [&str; 6] = ["TG11111", "TG22222", "TG33333", "TG44444", "TG55555", "TG66666"];

const ROWS: [[Option<f64>; 6]; 6] = [
    [None, Some(12.0), Some(22.0), Some(2.0), Some(33.43), Some(22.12)],
    [Some(34.0), None, Some(12.0), Some(3.45), Some(34.0), Some(66.76)],
    [Some(2.0), Some(8.0), None, Some(2.0), Some(34.0), Some(54.3)],
    [Some(3.0), Some(8.0), Some(34.2), None, Some(33.0), Some(23.0)],
    [Some(4.0), Some(9.0), Some(7.0), None, None, Some(44.0)],
    [Some(5.0), Some(7.0), Some(8.0), Some(32.3), Some(34.0), None],
];

/// The 6×6 example matrix
pub fn default_table() -> ChangeoverTable {
    let part_order = PARTS.iter().map(|p| p.to_string()).collect();
    let columns = PARTS.iter().zip(ROWS.iter()).map(|(part, row)| {
        let values: CellList = row.iter().map(|v| v.map(CellValue::Number)).collect();
        (part.to_string(), values)
    });

    ChangeoverTable::from_columns(part_order, columns)
}
