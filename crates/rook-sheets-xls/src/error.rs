//! XLS writer error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for XLS operations
pub type XlsResult<T> = std::result::Result<T, XlsError>;

/// Errors that can occur while writing an XLS file
#[derive(Debug, Error)]
pub enum XlsError {
    /// The BIFF8 record stream could not be written
    #[error("failed to write BIFF8 data: {0}")]
    Biff(#[source] std::io::Error),

    /// The CFB container could not be written
    #[error("failed to write CFB container: {0}")]
    Cfb(#[source] std::io::Error),

    /// The output file could not be created
    #[error("failed to create file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid sheet name
    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Row count beyond the BIFF8 worksheet grid
    #[error("row count {0} exceeds the BIFF8 limit of 65536 rows")]
    TooManyRows(usize),

    /// Column count beyond the BIFF8 worksheet grid
    #[error("column count {0} exceeds the BIFF8 limit of 256 columns")]
    TooManyColumns(usize),

    /// Cell text beyond the per-cell character limit
    #[error("cell text of {0} characters exceeds the 32767 character limit")]
    TextTooLong(usize),

    /// Workbook stream beyond what the single-FAT-sector container holds
    #[error("workbook stream of {0} bytes exceeds the container limit of 64512 bytes")]
    WorkbookTooLarge(usize),
}
