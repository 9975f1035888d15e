//! # rook-sheets-xls
//!
//! XLS (BIFF8) writer for rook-sheets.
//!
//! This crate produces the legacy Excel binary format (.xls) used by
//! Excel 97, 2000, 2002, and 2003: a BIFF8 record stream for one
//! worksheet, wrapped in a Compound File Binary (CFB/OLE2) container as
//! the `Workbook` stream.
//!
//! # Example
//!
//! ```rust,no_run
//! use rook_sheets_xls::XlsWriter;
//!
//! let mut writer = XlsWriter::new();
//! writer.set_sheet_name("Inventory");
//! writer.set_data(vec![
//!     vec!["Item".into(), "Count".into()],
//!     vec!["Apple".into(), 10.into()],
//! ]);
//! writer.save_as("inventory.xls").unwrap();
//! ```

pub mod biff;
pub mod cfb;
pub mod error;
pub mod writer;

pub use error::{XlsError, XlsResult};
pub use writer::{write_to_file, XlsWriteOptions, XlsWriter};

/// Maximum number of rows in a BIFF8 worksheet
pub const MAX_ROWS: usize = 65_536;

/// Maximum number of columns in a BIFF8 worksheet
pub const MAX_COLS: usize = 256;

/// Maximum number of characters in one cell's text
pub const MAX_CELL_TEXT_LEN: usize = 32_767;
