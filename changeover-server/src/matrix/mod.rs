//! Changeover time matrix: table model, mutation rules and the shared store

mod error;
mod seed;
mod store;
mod table;
mod value;

pub use error::{ErrorKind, MatrixError};
#[cfg(test)]
pub use seed::default_table;
pub use store::MatrixStore;
pub use table::{CellList, ChangeoverTable, MatrixView, PART_COLUMN};
pub use value::CellValue;
