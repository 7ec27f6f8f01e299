//! Shared matrix store used by every request handler

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use log::info;
use tokio::sync::Mutex;

use super::error::MatrixError;
use super::seed::default_table;
use super::table::{ChangeoverTable, MatrixView};
use super::value::CellValue;
use crate::excel;

/// The one changeover table of the process, behind a single lock.
///
/// Clones share the same table.
#[derive(Debug, Clone)]
pub struct MatrixStore {
    table: Arc<Mutex<ChangeoverTable>>,
}

impl MatrixStore {
    pub fn new(table: ChangeoverTable) -> Self {
        Self {
            table: Arc::new(Mutex::new(table)),
        }
    }

    /// Store holding the built-in 6×6 example
    pub fn seeded() -> Self {
        Self::new(default_table())
    }

    /// Copy of the current table
    pub async fn snapshot(&self) -> ChangeoverTable {
        self.table.lock().await.clone()
    }

    pub async fn matrix(&self) -> Result<MatrixView, MatrixError> {
        self.table.lock().await.matrix_view().inspect_err(log_rejection)
    }

    /// Write the current table to `path` (overwriting) and return the file contents
    pub async fn export(&self, path: &Path) -> Result<Vec<u8>, MatrixError> {
        self.write_export(path).await.inspect_err(log_rejection)
    }

    async fn write_export(&self, path: &Path) -> Result<Vec<u8>, MatrixError> {
        let table = self.snapshot().await;
        let path: PathBuf = path.to_path_buf();

        let write_path = path.clone();
        tokio::task::spawn_blocking(move || excel::write_matrix_excel(&table, &write_path))
            .await
            .context("Excel export task failed")
            .and_then(|result| result)
            .map_err(MatrixError::Export)?;

        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read exported file: {}", path.display()))
            .map_err(MatrixError::Export)?;

        info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(bytes)
    }

    /// Replace the whole table with the parsed spreadsheet. On error the
    /// current table is kept.
    pub async fn import(&self, bytes: Vec<u8>) -> Result<(), MatrixError> {
        let parsed = tokio::task::spawn_blocking(move || excel::read_matrix_excel(&bytes))
            .await
            .map_err(|e| MatrixError::Spreadsheet(anyhow::Error::new(e)))?;

        let table = parsed.inspect_err(log_rejection)?;

        info!(
            "Imported matrix with {} parts and {} columns",
            table.part_order().len(),
            table.column_order().len()
        );
        *self.table.lock().await = table;
        Ok(())
    }

    pub async fn add_part(&self, part_no: &str) -> Result<ChangeoverTable, MatrixError> {
        let mut table = self.table.lock().await;
        table.add_part(part_no).inspect_err(log_rejection)?;
        info!("Added part {}", part_no);
        Ok(table.clone())
    }

    pub async fn delete_part(&self, part_no: &str) -> Result<ChangeoverTable, MatrixError> {
        let mut table = self.table.lock().await;
        table.delete_part(part_no).inspect_err(log_rejection)?;
        info!("Deleted part {}", part_no);
        Ok(table.clone())
    }

    pub async fn update_cell(
        &self,
        part_no: &str,
        target_part_no: &str,
        value: CellValue,
    ) -> Result<ChangeoverTable, MatrixError> {
        let mut table = self.table.lock().await;
        table
            .update_cell(part_no, target_part_no, value.clone())
            .inspect_err(log_rejection)?;
        info!("Set {} -> {} to {}", part_no, target_part_no, value);
        Ok(table.clone())
    }
}

fn log_rejection(err: &MatrixError) {
    let parts = err.parts();
    if parts.is_empty() {
        log::log!(err.log_level(), "{}", err);
    } else {
        log::log!(err.log_level(), "{} [{}]", err, parts.join(" -> "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ErrorKind;

    fn temp_export_path() -> PathBuf {
        std::env::temp_dir().join(format!("matrix_data_{}.xlsx", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_clones_share_table() {
        let store = MatrixStore::seeded();
        let other = store.clone();

        store.add_part("TG77777").await.unwrap();

        let view = other.matrix().await.unwrap();
        assert_eq!(view.parts.len(), 7);
    }

    #[tokio::test]
    async fn test_export_then_import_round_trips() {
        let store = MatrixStore::seeded();
        store
            .update_cell("TG11111", "TG22222", CellValue::Number(99.5))
            .await
            .unwrap();
        let before = store.matrix().await.unwrap();

        let path = temp_export_path();
        let bytes = store.export(&path).await.unwrap();
        assert!(path.exists());

        let fresh = MatrixStore::new(ChangeoverTable::default());
        fresh.import(bytes).await.unwrap();

        assert_eq!(fresh.matrix().await.unwrap(), before);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_export_overwrites_previous_file() {
        let store = MatrixStore::seeded();
        let path = temp_export_path();

        let first = store.export(&path).await.unwrap();
        store.delete_part("TG66666").await.unwrap();
        let second = store.export(&path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), second);
        assert_ne!(first, second);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_export_to_missing_directory_is_internal() {
        let store = MatrixStore::seeded();
        let path = std::env::temp_dir()
            .join(format!("missing_{}", uuid::Uuid::new_v4()))
            .join("matrix_data.xlsx");

        let err = store.export(&path).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.log_level(), log::Level::Error);
        assert!(err.to_string().starts_with("Error exporting matrix:"));
    }

    #[tokio::test]
    async fn test_failed_import_keeps_table() {
        let store = MatrixStore::seeded();
        let before = store.snapshot().await;

        let err = store.import(b"garbage".to_vec()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_mutations_return_updated_table() {
        let store = MatrixStore::seeded();

        let table = store.add_part("TG77777").await.unwrap();
        assert!(table.contains_part("TG77777"));

        let table = store.delete_part("TG11111").await.unwrap();
        assert!(!table.contains_part("TG11111"));
        assert_eq!(table, store.snapshot().await);
    }
}
