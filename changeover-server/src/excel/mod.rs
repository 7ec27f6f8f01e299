//! Excel import/export for the changeover matrix

mod reader;
mod writer;

pub use reader::read_matrix_excel;
pub use writer::write_matrix_excel;
#[cfg(test)]
pub use writer::write_matrix_excel_to_buffer;
