//! BIFF8 workbook stream serialization.
//!
//! Builds the complete record sequence for workbook globals followed by
//! a single worksheet. The globals block is almost entirely fixed
//! payloads; the parts that depend on input are the SST, the
//! BOUNDSHEET record (sheet name plus the absolute byte offset of the
//! worksheet BOF), and the row/cell block.
//!
//! The BOUNDSHEET offset depends on the SST's encoded length, so the
//! SST is serialized into a scratch buffer first; once its length is
//! known the offset is fixed and everything is appended in order. The
//! builder only ever writes forward.

use std::io::Write;

use rook_sheets_core::{CellValue, Row, MAX_SHEET_NAME_LEN};

use super::records;
use super::sst::SharedStringTable;
use super::strings::{char_count, encode_short_string};
use super::RecordWriter;
use crate::error::{XlsError, XlsResult};
use crate::{MAX_CELL_TEXT_LEN, MAX_COLS, MAX_ROWS};

/// Author stamp carried in the WRITEACCESS record.
const WRITE_ACCESS_STAMP: &str = "rook-sheets-xls";

/// Characters Excel rejects in sheet names.
const INVALID_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Serialize `rows` into a complete BIFF8 workbook stream.
pub fn encode_workbook_stream(rows: &[Row], sheet_name: &str) -> XlsResult<Vec<u8>> {
    validate_sheet_name(sheet_name)?;
    validate_grid(rows)?;

    let sst = collect_strings(rows)?;
    let sheet_name_bytes = encode_short_string(sheet_name)?;

    encode(rows, &sheet_name_bytes, &sst).map_err(XlsError::Biff)
}

fn encode(
    rows: &[Row],
    sheet_name_bytes: &[u8],
    sst: &SharedStringTable,
) -> std::io::Result<Vec<u8>> {
    let mut w = RecordWriter::new(Vec::new());

    // ── Workbook globals ─────────────────────────────────────────────
    write_bof(&mut w, records::BOF_WORKBOOK_GLOBALS)?;
    record_u16(&mut w, records::INTERFACEHDR, 0x04B0)?;
    record_u16(&mut w, records::MMS, 0)?;
    w.record(records::INTERFACEEND, &[])?;
    write_write_access(&mut w)?;
    record_u16(&mut w, records::CODEPAGE, 0x04B0)?; // UTF-16 (1200)
    record_u16(&mut w, records::DSF, 0)?;
    record_u16(&mut w, records::FNGROUPCOUNT, 1)?;
    record_u16(&mut w, records::BUILTINFNGROUPCOUNT, 0x000E)?;
    record_u16(&mut w, records::WINDOWPROTECT, 0)?;
    record_u16(&mut w, records::PROTECT, 0)?;
    record_u16(&mut w, records::OBJPROTECT, 0)?;
    record_u16(&mut w, records::PASSWORD, 0)?;
    record_u16(&mut w, records::PROT4REV, 0)?;
    record_u16(&mut w, records::PASSWORDREV4, 0)?;
    record_u16(&mut w, records::BACKUP, 0)?;
    record_u16(&mut w, records::HIDEOBJ, 0)?;
    write_window1(&mut w)?;
    record_u16(&mut w, records::DATEMODE, 0)?; // 1900 date system
    record_u16(&mut w, records::PRECISION, 1)?;
    record_u16(&mut w, records::REFRESHALL, 0)?;
    record_u16(&mut w, records::BOOKBOOL, 0)?;

    // BIFF8 requires seven default FONT records
    for _ in 0..7 {
        write_font(&mut w)?;
    }
    write_format(&mut w)?;

    // The first 16 XF records are style XFs
    for _ in 0..16 {
        write_xf(&mut w, XfKind::Style, 6)?;
    }
    write_xf(&mut w, XfKind::Cell, 6)?;
    write_xf(&mut w, XfKind::Cell, 7)?;

    write_style(&mut w)?;
    record_u16(&mut w, records::USESELFS, 1)?;

    // BOUNDSHEET carries the absolute offset of the worksheet BOF,
    // which depends on the SST's encoded length. Serialize the SST to
    // a scratch buffer so the offset is known before anything else is
    // appended.
    let sst_bytes = sst.encode()?;
    let boundsheet_len = 4 + 6 + sheet_name_bytes.len();
    let worksheet_offset = w.len() + sst_bytes.len() + boundsheet_len + 4; // + EOF record

    w.get_mut().write_all(&sst_bytes)?;
    write_boundsheet(&mut w, worksheet_offset as u32, sheet_name_bytes)?;
    w.record(records::EOF, &[])?;
    debug_assert_eq!(w.len(), worksheet_offset);

    // ── Worksheet ────────────────────────────────────────────────────
    write_bof(&mut w, records::BOF_WORKSHEET)?;
    record_u16(&mut w, records::CALCMODE, 1)?; // automatic calculation
    record_u16(&mut w, records::CALCCOUNT, 100)?;
    record_u16(&mut w, records::REFMODE, 1)?; // A1 reference style
    record_u16(&mut w, records::ITERATION, 0)?;
    record_f64(&mut w, records::DELTA, 0.001)?;
    record_u16(&mut w, records::SAVERECALC, 1)?;
    w.record(records::GUTS, &[0u8; 8])?;
    write_default_row_height(&mut w)?;
    record_u16(&mut w, records::WSBOOL, 0x04C1)?;

    // DIMENSIONS must come before ROW records
    write_dimensions(&mut w, rows)?;

    record_u16(&mut w, records::PRINTHEADERS, 0)?;
    record_u16(&mut w, records::PRINTGRIDLINES, 0)?;
    record_u16(&mut w, records::GRIDSET, 1)?;
    record_u16(&mut w, records::HBREAK, 0)?;
    record_u16(&mut w, records::VBREAK, 0)?;
    w.record(records::HEADER, &[0u8; 5])?;
    w.record(records::FOOTER, &[0u8; 5])?;
    record_u16(&mut w, records::HCENTER, 0)?;
    record_u16(&mut w, records::VCENTER, 0)?;
    record_f64(&mut w, records::LEFTMARGIN, 0.75)?;
    record_f64(&mut w, records::RIGHTMARGIN, 0.75)?;
    record_f64(&mut w, records::TOPMARGIN, 1.0)?;
    record_f64(&mut w, records::BOTTOMMARGIN, 1.0)?;
    write_setup(&mut w)?;
    record_u16(&mut w, records::PROTECT, 0)?;
    record_u16(&mut w, records::SCENPROTECT, 0)?;
    record_u16(&mut w, records::WINDOWPROTECT, 0)?;
    record_u16(&mut w, records::OBJPROTECT, 0)?;
    record_u16(&mut w, records::PASSWORD, 0)?;

    write_rows_and_cells(&mut w, rows, sst)?;

    // WINDOW2 must come after the cell data
    write_window2(&mut w)?;
    w.record(records::EOF, &[])?;

    Ok(w.into_inner())
}

// ── Input validation ─────────────────────────────────────────────────

fn validate_sheet_name(name: &str) -> XlsResult<()> {
    if name.is_empty() {
        return Err(XlsError::InvalidSheetName(
            "sheet name cannot be empty".into(),
        ));
    }
    if char_count(name) > MAX_SHEET_NAME_LEN {
        return Err(XlsError::InvalidSheetName(format!(
            "sheet name too long (max {MAX_SHEET_NAME_LEN} characters)"
        )));
    }
    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(XlsError::InvalidSheetName(format!(
            "sheet name contains invalid character {c:?}"
        )));
    }
    Ok(())
}

fn validate_grid(rows: &[Row]) -> XlsResult<()> {
    if rows.len() > MAX_ROWS {
        return Err(XlsError::TooManyRows(rows.len()));
    }
    for row in rows {
        if row.len() > MAX_COLS {
            return Err(XlsError::TooManyColumns(row.len()));
        }
    }
    Ok(())
}

/// Pre-walk the table and register every string cell in the SST.
///
/// Both plain text cells and "other" cells (already rendered to text)
/// are registered, so the emit phase resolves every LABELSST index from
/// the table.
fn collect_strings(rows: &[Row]) -> XlsResult<SharedStringTable> {
    let mut sst = SharedStringTable::new();
    for row in rows {
        for cell in row {
            if let Some(s) = cell.as_str() {
                let count = char_count(s);
                if count > MAX_CELL_TEXT_LEN {
                    return Err(XlsError::TextTooLong(count));
                }
                sst.add(s);
            }
        }
    }
    Ok(sst)
}

// ── Fixed-payload helpers ────────────────────────────────────────────

fn record_u16(w: &mut RecordWriter<Vec<u8>>, record_type: u16, value: u16) -> std::io::Result<()> {
    w.record(record_type, &value.to_le_bytes())
}

fn record_f64(w: &mut RecordWriter<Vec<u8>>, record_type: u16, value: f64) -> std::io::Result<()> {
    w.record(record_type, &value.to_le_bytes())
}

fn write_bof(w: &mut RecordWriter<Vec<u8>>, substream_type: u16) -> std::io::Result<()> {
    let mut body = [0u8; 16];
    body[0..2].copy_from_slice(&records::BIFF8_VERSION.to_le_bytes());
    body[2..4].copy_from_slice(&substream_type.to_le_bytes());
    body[4..6].copy_from_slice(&0x0DBBu16.to_le_bytes()); // build identifier
    body[6..8].copy_from_slice(&0x07CCu16.to_le_bytes()); // build year
    // bytes 8..12: file history flags (none)
    body[12..16].copy_from_slice(&6u32.to_le_bytes()); // lowest BIFF version
    w.record(records::BOF, &body)
}

fn write_write_access(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    // Fixed 112 bytes, space-padded
    let mut body = [0x20u8; 112];
    let stamp = WRITE_ACCESS_STAMP.as_bytes();
    body[..stamp.len()].copy_from_slice(stamp);
    w.record(records::WRITEACCESS, &body)
}

fn write_window1(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    let mut body = [0u8; 18];
    body[4..6].copy_from_slice(&0x4000u16.to_le_bytes()); // window width
    body[6..8].copy_from_slice(&0x3000u16.to_le_bytes()); // window height
    body[8..10].copy_from_slice(&0x0038u16.to_le_bytes()); // option flags
    body[14..16].copy_from_slice(&1u16.to_le_bytes()); // selected tab count
    body[16..18].copy_from_slice(&600u16.to_le_bytes()); // tab ratio
    w.record(records::WINDOW1, &body)
}

fn write_font(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    const FONT_NAME: &str = "Arial";
    let name = FONT_NAME.as_bytes();

    // FONT carries its name as a compressed (8-bit) string
    let mut body = vec![0u8; 16 + name.len()];
    body[0..2].copy_from_slice(&200u16.to_le_bytes()); // height in twips (10pt)
    // bytes 2..4: option flags
    body[4..6].copy_from_slice(&0x7FFFu16.to_le_bytes()); // automatic color
    body[6..8].copy_from_slice(&400u16.to_le_bytes()); // regular weight
    // bytes 8..12: escapement, underline, family
    body[12] = 1; // character set
    body[14] = name.len() as u8;
    body[15] = 0x00; // compressed 8-bit name
    body[16..].copy_from_slice(name);
    w.record(records::FONT, &body)
}

fn write_format(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    const GENERAL: &str = "General";
    let text = GENERAL.as_bytes();

    let mut body = vec![0u8; 5 + text.len()];
    body[0..2].copy_from_slice(&0x00A4u16.to_le_bytes()); // first user-defined format id
    body[2..4].copy_from_slice(&(text.len() as u16).to_le_bytes());
    body[4] = 0x00; // compressed 8-bit
    body[5..].copy_from_slice(text);
    w.record(records::FORMAT, &body)
}

enum XfKind {
    Style,
    Cell,
}

fn write_xf(w: &mut RecordWriter<Vec<u8>>, kind: XfKind, font_index: u16) -> std::io::Result<()> {
    let (parent, used_flags) = match kind {
        XfKind::Style => (0xFFF5u16, 0x0000_F400u32),
        XfKind::Cell => (0x0001u16, 0x0000_F800u32),
    };

    let mut body = [0u8; 20];
    body[0..2].copy_from_slice(&font_index.to_le_bytes());
    body[2..4].copy_from_slice(&0x00A4u16.to_le_bytes()); // format index
    body[4..6].copy_from_slice(&parent.to_le_bytes());
    body[6..8].copy_from_slice(&0x0020u16.to_le_bytes());
    body[8..12].copy_from_slice(&used_flags.to_le_bytes());
    // bytes 12..16: border and fill (none)
    body[16..20].copy_from_slice(&0x20C0_0000u32.to_le_bytes());
    w.record(records::XF, &body)
}

fn write_style(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    let mut body = [0u8; 4];
    body[0..2].copy_from_slice(&0x8000u16.to_le_bytes()); // built-in style, XF 0
    body[2] = 0; // Normal
    body[3] = 0xFF;
    w.record(records::STYLE, &body)
}

fn write_boundsheet(
    w: &mut RecordWriter<Vec<u8>>,
    worksheet_offset: u32,
    sheet_name_bytes: &[u8],
) -> std::io::Result<()> {
    let mut body = Vec::with_capacity(6 + sheet_name_bytes.len());
    body.extend_from_slice(&worksheet_offset.to_le_bytes());
    body.push(0); // visible
    body.push(0); // worksheet (not chart or macro)
    body.extend_from_slice(sheet_name_bytes);
    w.record(records::BOUNDSHEET, &body)
}

fn write_default_row_height(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    let mut body = [0u8; 4];
    body[2..4].copy_from_slice(&0x00FFu16.to_le_bytes()); // 1/20 pt units (12.75pt)
    w.record(records::DEFAULTROWHEIGHT, &body)
}

fn write_dimensions(w: &mut RecordWriter<Vec<u8>>, rows: &[Row]) -> std::io::Result<()> {
    let row_count = rows.len() as u32;
    let col_count = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u16;

    let mut body = [0u8; 14];
    // bytes 0..4: first row (0)
    body[4..8].copy_from_slice(&row_count.to_le_bytes()); // last row + 1
    // bytes 8..10: first column (0)
    body[10..12].copy_from_slice(&col_count.to_le_bytes()); // last column + 1
    w.record(records::DIMENSIONS, &body)
}

fn write_setup(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    let mut body = [0u8; 34];
    body[0..2].copy_from_slice(&1u16.to_le_bytes()); // paper size: letter
    body[2..4].copy_from_slice(&100u16.to_le_bytes()); // scale
    body[4..6].copy_from_slice(&1u16.to_le_bytes()); // start page
    body[6..8].copy_from_slice(&1u16.to_le_bytes()); // fit to width
    body[8..10].copy_from_slice(&1u16.to_le_bytes()); // fit to height
    // bytes 10..12: option flags
    body[12..14].copy_from_slice(&600u16.to_le_bytes()); // print resolution
    body[14..16].copy_from_slice(&600u16.to_le_bytes()); // vertical resolution
    body[16..18].copy_from_slice(&1u16.to_le_bytes());
    w.record(records::SETUP, &body)
}

fn write_window2(w: &mut RecordWriter<Vec<u8>>) -> std::io::Result<()> {
    let mut body = [0u8; 18];
    body[0..2].copy_from_slice(&0x06B6u16.to_le_bytes()); // option flags
    body[6..8].copy_from_slice(&0x0040u16.to_le_bytes()); // grid color: automatic
    w.record(records::WINDOW2, &body)
}

// ── Row and cell records ─────────────────────────────────────────────

fn write_rows_and_cells(
    w: &mut RecordWriter<Vec<u8>>,
    rows: &[Row],
    sst: &SharedStringTable,
) -> std::io::Result<()> {
    for (row_index, row) in rows.iter().enumerate() {
        write_row(w, row_index as u16, row.len() as u16)?;

        for (col_index, cell) in row.iter().enumerate() {
            write_cell(w, row_index as u16, col_index as u16, cell, sst)?;
        }
    }
    Ok(())
}

fn write_row(w: &mut RecordWriter<Vec<u8>>, row: u16, col_count: u16) -> std::io::Result<()> {
    let mut body = [0u8; 16];
    body[0..2].copy_from_slice(&row.to_le_bytes());
    // bytes 2..4: first defined column (0)
    body[4..6].copy_from_slice(&col_count.to_le_bytes()); // last defined column + 1
    body[6..8].copy_from_slice(&0x00FFu16.to_le_bytes()); // default height
    body[12..16].copy_from_slice(&0x000F_0000u32.to_le_bytes()); // option flags
    w.record(records::ROW, &body)
}

fn write_cell(
    w: &mut RecordWriter<Vec<u8>>,
    row: u16,
    col: u16,
    value: &CellValue,
    sst: &SharedStringTable,
) -> std::io::Result<()> {
    match value {
        CellValue::Text(s) | CellValue::Other(s) => {
            write_labelsst(w, row, col, sst.index_of(s))
        }
        CellValue::Boolean(b) => write_boolerr(w, row, col, *b),
        CellValue::Int(n) => write_number(w, row, col, *n as f64),
        CellValue::UInt(n) => write_number(w, row, col, *n as f64),
        CellValue::Float(n) => write_number(w, row, col, *n),
        CellValue::Empty => write_blank(w, row, col),
    }
}

/// Shared `(row, col, xf)` prefix of every cell record.
fn cell_prefix(body: &mut [u8], row: u16, col: u16) {
    body[0..2].copy_from_slice(&row.to_le_bytes());
    body[2..4].copy_from_slice(&col.to_le_bytes());
    // bytes 4..6: XF index 0
}

fn write_labelsst(
    w: &mut RecordWriter<Vec<u8>>,
    row: u16,
    col: u16,
    sst_index: u32,
) -> std::io::Result<()> {
    let mut body = [0u8; 10];
    cell_prefix(&mut body, row, col);
    body[6..10].copy_from_slice(&sst_index.to_le_bytes());
    w.record(records::LABELSST, &body)
}

fn write_number(
    w: &mut RecordWriter<Vec<u8>>,
    row: u16,
    col: u16,
    value: f64,
) -> std::io::Result<()> {
    let mut body = [0u8; 14];
    cell_prefix(&mut body, row, col);
    body[6..14].copy_from_slice(&value.to_le_bytes());
    w.record(records::NUMBER, &body)
}

fn write_boolerr(
    w: &mut RecordWriter<Vec<u8>>,
    row: u16,
    col: u16,
    value: bool,
) -> std::io::Result<()> {
    let mut body = [0u8; 8];
    cell_prefix(&mut body, row, col);
    body[6] = value as u8;
    body[7] = 0; // boolean, not an error code
    w.record(records::BOOLERR, &body)
}

fn write_blank(w: &mut RecordWriter<Vec<u8>>, row: u16, col: u16) -> std::io::Result<()> {
    let mut body = [0u8; 6];
    cell_prefix(&mut body, row, col);
    w.record(records::BLANK, &body)
}
