//! Read a ChangeoverTable from spreadsheet bytes

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::Context;
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::matrix::{CellList, CellValue, ChangeoverTable, MatrixError, PART_COLUMN};

/// Parse the first worksheet into a table.
///
/// The first row holds the headers. `"Part No"` supplies the part order, every
/// other column becomes a keyed list with one entry per data row.
pub fn read_matrix_excel(bytes: &[u8]) -> Result<ChangeoverTable, MatrixError> {
    let rows = read_first_sheet(bytes).map_err(MatrixError::Spreadsheet)?;

    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();
    let names = header_names(&header);

    let part_col = names
        .iter()
        .position(|n| n == PART_COLUMN)
        .ok_or(MatrixError::MissingPartColumn)?;

    let data_rows: Vec<Vec<Data>> = rows.filter(|row| !is_blank_row(row)).collect();

    let part_order = data_rows
        .iter()
        .map(|row| row.get(part_col).map(part_string).unwrap_or_default())
        .collect();

    let columns = names
        .into_iter()
        .enumerate()
        .filter(|(col, _)| *col != part_col)
        .map(|(col, name)| {
            let values: CellList = data_rows
                .iter()
                .map(|row| row.get(col).and_then(cell_value))
                .collect();
            (name, values)
        });

    Ok(ChangeoverTable::from_columns(part_order, columns))
}

fn read_first_sheet(bytes: &[u8]) -> anyhow::Result<Vec<Vec<Data>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .context("Failed to open spreadsheet")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Spreadsheet has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    Ok(range.rows().map(|row| row.to_vec()).collect())
}

/// Empty headers become `Unnamed: <col>`, repeats get `.1`, `.2`, ...
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let base = cell_string(cell).unwrap_or_else(|| format!("Unnamed: {}", col));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| cell_string(c).is_none())
}

fn part_string(cell: &Data) -> String {
    cell_string(cell).unwrap_or_default()
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Flag(*b)),
        other => Some(CellValue::Text(other.to_string())),
    }
}
