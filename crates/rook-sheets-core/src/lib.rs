//! # rook-sheets-core
//!
//! Core data types for the rook-sheets spreadsheet writers.
//!
//! This crate provides the fundamental types shared by the format
//! backends:
//! - [`CellValue`] - Represents cell values (text, numbers, booleans)
//! - [`Row`] - One table row, an ordered sequence of cell values
//!
//! ## Example
//!
//! ```rust
//! use rook_sheets_core::CellValue;
//!
//! let row: Vec<CellValue> = vec![
//!     "Name".into(),
//!     42.into(),
//!     3.14.into(),
//!     true.into(),
//! ];
//! assert_eq!(row[1].as_number(), Some(42.0));
//! ```

pub mod cell;

// Re-exports for convenience
pub use cell::CellValue;

/// One table row: an ordered sequence of cell values.
pub type Row = Vec<CellValue>;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
