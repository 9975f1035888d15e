//! XLS (BIFF8) writer facade.
//!
//! Serializes a table of [`rook_sheets_core::CellValue`] rows into a
//! BIFF8 stream in memory, wraps it in a CFB container, and writes the
//! bytes out.

use std::fs::File;
use std::path::Path;

use rook_sheets_core::Row;

use crate::biff::stream::encode_workbook_stream;
use crate::cfb::write_cfb;
use crate::error::{XlsError, XlsResult};

/// XLS file writer.
///
/// Holds the table and sheet name; nothing is serialized until
/// [`save_as`](Self::save_as).
#[derive(Debug, Default)]
pub struct XlsWriter {
    rows: Vec<Row>,
    sheet_name: Option<String>,
}

/// Default worksheet name.
const DEFAULT_SHEET_NAME: &str = "Sheet1";

impl XlsWriter {
    /// Create a writer with the default sheet name ("Sheet1") and no
    /// data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the worksheet name.
    ///
    /// The name is validated when the file is written.
    pub fn set_sheet_name<S: Into<String>>(&mut self, name: S) {
        self.sheet_name = Some(name.into());
    }

    /// Current worksheet name.
    pub fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }

    /// Store the table to be written. Does not serialize.
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Serialize the workbook and write it to `path`.
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> XlsResult<()> {
        let path = path.as_ref();
        let biff8 = encode_workbook_stream(&self.rows, self.sheet_name())?;

        let mut file = File::create(path).map_err(|source| XlsError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        write_cfb(&mut file, &biff8)
    }

    /// Serialize the workbook to any sink.
    pub fn write<W: std::io::Write>(&self, sink: &mut W) -> XlsResult<()> {
        let biff8 = encode_workbook_stream(&self.rows, self.sheet_name())?;
        write_cfb(sink, &biff8)
    }

    /// Release held resources.
    ///
    /// Currently a no-op (the writer holds nothing beyond its buffers)
    /// but part of the contract and always safe to call.
    pub fn close(&mut self) {}
}

/// Options for [`write_to_file`].
#[derive(Debug, Clone, Default)]
pub struct XlsWriteOptions {
    /// Worksheet name (default: "Sheet1")
    pub sheet_name: Option<String>,
}

/// Write `rows` to an XLS file at `path` in one call.
///
/// ```rust,no_run
/// use rook_sheets_xls::{write_to_file, XlsWriteOptions};
///
/// let rows = vec![vec!["Item".into(), "Count".into()]];
/// let options = XlsWriteOptions {
///     sheet_name: Some("Inventory".into()),
/// };
/// write_to_file("inventory.xls", rows, options).unwrap();
/// ```
pub fn write_to_file<P: AsRef<Path>>(
    path: P,
    rows: Vec<Row>,
    options: XlsWriteOptions,
) -> XlsResult<()> {
    let mut writer = XlsWriter::new();
    if let Some(name) = options.sheet_name {
        writer.set_sheet_name(name);
    }
    writer.set_data(rows);
    writer.save_as(path)
}
