//! Errors produced by matrix operations

/// The two families of failure, split by who is at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Part number already present (or reserved)
    Conflict,
    /// Client-supplied data failed a structural check
    Validation,
    /// A referenced part does not exist
    NotFound,
    /// Anything unexpected while processing, parsing or serializing
    Internal,
}

impl ErrorKind {
    /// Whether the caller caused the failure
    pub fn is_client(&self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

/// Error from a matrix store operation
#[derive(Debug)]
pub enum MatrixError {
    PartExists(String),
    ReservedPartNumber(String),
    PartNotFound(String),
    CellNotFound { part_no: String, target_part_no: String },
    MissingPartColumn,
    /// The table no longer lines up with its part list
    Inconsistent(String),
    /// A keyed list is too short to hold the cell being written
    MissingSlot(String),
    /// Spreadsheet could not be parsed
    Spreadsheet(anyhow::Error),
    /// Spreadsheet could not be written or read back
    Export(anyhow::Error),
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::PartExists(_) | MatrixError::ReservedPartNumber(_) => ErrorKind::Conflict,
            MatrixError::MissingPartColumn => ErrorKind::Validation,
            MatrixError::PartNotFound(_) | MatrixError::CellNotFound { .. } => ErrorKind::NotFound,
            MatrixError::Inconsistent(_)
            | MatrixError::MissingSlot(_)
            | MatrixError::Spreadsheet(_)
            | MatrixError::Export(_) => ErrorKind::Internal,
        }
    }

    /// Part numbers the error is about, for log lines
    pub fn parts(&self) -> Vec<&str> {
        match self {
            MatrixError::PartExists(p)
            | MatrixError::ReservedPartNumber(p)
            | MatrixError::PartNotFound(p) => vec![p.as_str()],
            MatrixError::CellNotFound {
                part_no,
                target_part_no,
            } => vec![part_no.as_str(), target_part_no.as_str()],
            _ => Vec::new(),
        }
    }

    /// Client mistakes are warnings, everything else is an error
    pub fn log_level(&self) -> log::Level {
        if self.kind().is_client() {
            log::Level::Warn
        } else {
            log::Level::Error
        }
    }
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::PartExists(_) => write!(f, "Part already exists"),
            MatrixError::ReservedPartNumber(p) => {
                write!(f, "'{}' is reserved and cannot be used as a part number", p)
            }
            MatrixError::PartNotFound(_) => write!(f, "Part not found"),
            MatrixError::CellNotFound { .. } => write!(f, "Part or target part not found"),
            MatrixError::MissingPartColumn => {
                write!(f, "Uploaded file is missing 'Part No' column")
            }
            MatrixError::Inconsistent(msg) => write!(f, "Error generating matrix data: {}", msg),
            MatrixError::MissingSlot(msg) => write!(f, "Error updating changeover time: {}", msg),
            // {:#} keeps the anyhow context chain on one line
            MatrixError::Spreadsheet(err) => write!(f, "Error processing file: {:#}", err),
            MatrixError::Export(err) => write!(f, "Error exporting matrix: {:#}", err),
        }
    }
}

impl std::error::Error for MatrixError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(MatrixError::PartExists("A".into()).kind(), ErrorKind::Conflict);
        assert_eq!(MatrixError::MissingPartColumn.kind(), ErrorKind::Validation);
        assert_eq!(MatrixError::PartNotFound("A".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            MatrixError::Spreadsheet(anyhow::anyhow!("bad zip")).kind(),
            ErrorKind::Internal
        );
        assert!(ErrorKind::NotFound.is_client());
        assert!(!ErrorKind::Internal.is_client());
    }

    #[test]
    fn test_parts_and_log_level() {
        let err = MatrixError::CellNotFound {
            part_no: "TG11111".into(),
            target_part_no: "TG99999".into(),
        };
        assert_eq!(err.parts(), vec!["TG11111", "TG99999"]);
        assert_eq!(err.log_level(), log::Level::Warn);

        assert_eq!(MatrixError::PartExists("TG1".into()).parts(), vec!["TG1"]);

        let err = MatrixError::Export(anyhow::anyhow!("disk full"));
        assert!(err.parts().is_empty());
        assert_eq!(err.log_level(), log::Level::Error);
        assert_eq!(
            MatrixError::Inconsistent("no row".into()).log_level(),
            log::Level::Error
        );
    }

    #[test]
    fn test_missing_slot_message() {
        let err = MatrixError::MissingSlot("row 'A' has 1 values".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().starts_with("Error updating changeover time:"));
    }

    #[test]
    fn test_spreadsheet_message_includes_cause() {
        let err = anyhow::anyhow!("invalid zip header").context("Failed to open workbook");
        let msg = MatrixError::Spreadsheet(err).to_string();
        assert_eq!(
            msg,
            "Error processing file: Failed to open workbook: invalid zip header"
        );
    }
}
