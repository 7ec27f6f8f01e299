//! The changeover table: part order plus per-part value lists

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::MatrixError;
use super::value::CellValue;

/// Header of the part number column, also the part list key in `updated_data`
pub const PART_COLUMN: &str = "Part No";

/// One list of optional values per keyed part, indexed by position in `part_order`
pub type CellList = Vec<Option<CellValue>>;

/// Changeover table as stored by the server.
///
/// `cells[key][i]` is the value between `key` (the target) and
/// `part_order[i]` (the source). The lists are positional, so they only line
/// up with `part_order` as long as every mutation keeps them in step. Import
/// and the add/delete rules can leave them out of step; `matrix_view` reports
/// that instead of guessing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeoverTable {
    part_order: Vec<String>,
    column_order: Vec<String>,
    cells: HashMap<String, CellList>,
}

/// Square read model returned by GET /matrix-data
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatrixView {
    pub parts: Vec<String>,
    pub matrix: Vec<Vec<Option<CellValue>>>,
}

impl ChangeoverTable {
    /// Build a table from a part list and keyed value lists.
    ///
    /// Lists are stored as given; a repeated key replaces the earlier list but
    /// keeps its original position.
    pub fn from_columns<I>(part_order: Vec<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (String, CellList)>,
    {
        let mut table = Self {
            part_order,
            ..Self::default()
        };
        for (key, values) in columns {
            table.insert_column(key, values);
        }
        table
    }

    pub fn part_order(&self) -> &[String] {
        &self.part_order
    }

    /// Keys of `cells` in insertion order
    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn column(&self, key: &str) -> Option<&[Option<CellValue>]> {
        self.cells.get(key).map(|v| v.as_slice())
    }

    pub fn contains_part(&self, part_no: &str) -> bool {
        self.part_order.iter().any(|p| p == part_no)
    }

    fn position(&self, part_no: &str) -> Option<usize> {
        self.part_order.iter().position(|p| p == part_no)
    }

    fn insert_column(&mut self, key: String, values: CellList) {
        if !self.cells.contains_key(&key) {
            self.column_order.push(key.clone());
        }
        self.cells.insert(key, values);
    }

    /// `matrix[i][j] = cells[part_order[i]][j]`
    pub fn matrix_view(&self) -> Result<MatrixView, MatrixError> {
        let size = self.part_order.len();
        let mut matrix = Vec::with_capacity(size);

        for part in &self.part_order {
            let row = self
                .cells
                .get(part)
                .ok_or_else(|| MatrixError::Inconsistent(format!("no row for part '{}'", part)))?;

            if row.len() < size {
                return Err(MatrixError::Inconsistent(format!(
                    "row '{}' has {} values but {} parts are listed",
                    part,
                    row.len(),
                    size
                )));
            }

            matrix.push(row[..size].to_vec());
        }

        Ok(MatrixView {
            parts: self.part_order.clone(),
            matrix,
        })
    }

    /// Append a part: one new empty slot in every existing list, then a fresh
    /// all-empty list sized by the new part count.
    pub fn add_part(&mut self, part_no: &str) -> Result<(), MatrixError> {
        if part_no == PART_COLUMN {
            return Err(MatrixError::ReservedPartNumber(part_no.to_string()));
        }
        if self.contains_part(part_no) {
            return Err(MatrixError::PartExists(part_no.to_string()));
        }

        self.part_order.push(part_no.to_string());
        for values in self.cells.values_mut() {
            values.push(None);
        }
        let size = self.part_order.len();
        self.insert_column(part_no.to_string(), vec![None; size]);

        Ok(())
    }

    /// Remove a part. Every remaining list loses the element at the part's old
    /// position (if it is long enough), not the element keyed by the part.
    pub fn delete_part(&mut self, part_no: &str) -> Result<(), MatrixError> {
        let index = self
            .position(part_no)
            .ok_or_else(|| MatrixError::PartNotFound(part_no.to_string()))?;

        self.part_order.remove(index);
        for values in self.cells.values_mut() {
            if values.len() > index {
                values.remove(index);
            }
        }
        if self.cells.remove(part_no).is_some() {
            self.column_order.retain(|k| k != part_no);
        }

        Ok(())
    }

    /// Set `cells[target_part_no][position(part_no)]`, i.e. the target row and
    /// source column of the matrix view.
    pub fn update_cell(
        &mut self,
        part_no: &str,
        target_part_no: &str,
        value: CellValue,
    ) -> Result<(), MatrixError> {
        let not_found = || MatrixError::CellNotFound {
            part_no: part_no.to_string(),
            target_part_no: target_part_no.to_string(),
        };

        let index = self.position(part_no).ok_or_else(not_found)?;
        let row = self.cells.get_mut(target_part_no).ok_or_else(not_found)?;

        let len = row.len();
        let slot = row.get_mut(index).ok_or_else(|| {
            MatrixError::MissingSlot(format!(
                "row '{}' has {} values, no slot for '{}' at {}",
                target_part_no, len, part_no, index
            ))
        })?;
        *slot = Some(value);

        Ok(())
    }
}

/// Serializes as the raw `updated_data` object: `"Part No"` first, then every
/// keyed list in insertion order.
impl Serialize for ChangeoverTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.column_order.len() + 1))?;
        map.serialize_entry(PART_COLUMN, &self.part_order)?;
        for key in &self.column_order {
            if let Some(values) = self.cells.get(key) {
                map.serialize_entry(key, values)?;
            }
        }
        map.end()
    }
}
