//! Write a ChangeoverTable to Excel format

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::matrix::{CellValue, ChangeoverTable, PART_COLUMN};

const SHEET_NAME: &str = "Sheet1";

/// Write the table to an `.xlsx` file, one spreadsheet column per keyed list
pub fn write_matrix_excel(table: &ChangeoverTable, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(table)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

/// Same layout as [`write_matrix_excel`], kept in memory
#[cfg(test)]
pub fn write_matrix_excel_to_buffer(table: &ChangeoverTable) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook
        .save_to_buffer()
        .context("Failed to serialize Excel workbook")
}

fn build_workbook(table: &ChangeoverTable) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // Header
    worksheet.write_string(0, 0, PART_COLUMN)?;
    for (col_idx, key) in table.column_order().iter().enumerate() {
        worksheet.write_string(0, (col_idx + 1) as u16, key)?;
    }

    // One row per listed part
    for (row_idx, part) in table.part_order().iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, part)?;

        for (col_idx, key) in table.column_order().iter().enumerate() {
            let col = (col_idx + 1) as u16; // +1 for Part No
            let value = table
                .column(key)
                .and_then(|values| values.get(row_idx))
                .and_then(Option::as_ref);
            if let Some(value) = value {
                write_value(worksheet, row, col, value)?;
            }
        }
    }

    Ok(workbook)
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Number(n) if n.is_finite() => {
            ws.write_number(row, col, *n)?;
        }
        CellValue::Number(_) => { /* Leave NaN/inf empty */ }
        CellValue::Text(s) => {
            ws.write_string(row, col, s)?;
        }
        CellValue::Flag(b) => {
            ws.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
