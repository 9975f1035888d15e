//! Integration tests writing .xls files to disk and reading the
//! containers back with the `cfb` crate.

mod common;

use common::{cleanup_fixture, find_record, read_workbook_stream, temp_fixture_path, walk_records};
use rook_sheets_core::{CellValue, Row};
use rook_sheets_xls::biff::records;
use rook_sheets_xls::{write_to_file, XlsWriteOptions, XlsWriter};

const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

fn sample_rows() -> Vec<Row> {
    vec![
        vec!["Name".into(), "Age".into(), "City".into()],
        vec!["Alice".into(), 30.into(), "Tokyo".into()],
    ]
}

#[test]
fn test_save_as_writes_valid_container() {
    let path = temp_fixture_path();
    let mut writer = XlsWriter::new();
    writer.set_data(sample_rows());
    writer.save_as(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[0..8], &CFB_SIGNATURE);
    // header + padded payload + FAT + directory, in whole sectors
    assert!(bytes.len() >= 512 + 4096 + 512 + 512);
    assert_eq!(bytes.len() % 512, 0);

    cleanup_fixture(&path);
}

#[test]
fn test_sst_counts_in_written_file() {
    let path = temp_fixture_path();
    let mut writer = XlsWriter::new();
    writer.set_data(sample_rows());
    writer.save_as(&path).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);
    let sst = find_record(&recs, records::SST).expect("SST record");

    let total = u32::from_le_bytes(sst[0..4].try_into().unwrap());
    let unique = u32::from_le_bytes(sst[4..8].try_into().unwrap());
    assert_eq!(total, 5); // Name, Age, City, Alice, Tokyo
    assert_eq!(unique, 5);

    cleanup_fixture(&path);
}

#[test]
fn test_empty_table() {
    let path = temp_fixture_path();
    let writer = XlsWriter::new();
    writer.save_as(&path).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);

    assert!(find_record(&recs, records::ROW).is_none());
    let dims = find_record(&recs, records::DIMENSIONS).expect("DIMENSIONS record");
    assert_eq!(&dims[4..8], &0u32.to_le_bytes());
    assert_eq!(&dims[10..12], &0u16.to_le_bytes());
    assert_eq!(recs.last().unwrap().0, records::EOF);

    cleanup_fixture(&path);
}

#[test]
fn test_write_to_file_convenience() {
    let path = temp_fixture_path();
    let rows = vec![
        vec!["Header1".into(), "Header2".into(), "Header3".into()],
        vec![1.into(), 2.into(), 3.into()],
        vec!["A".into(), "B".into(), "C".into()],
    ];
    write_to_file(&path, rows, XlsWriteOptions::default()).unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);

    cleanup_fixture(&path);
}

#[test]
fn test_write_to_file_with_sheet_name() {
    let path = temp_fixture_path();
    let rows = vec![
        vec!["Item".into(), "Quantity".into()],
        vec!["Apple".into(), 10.into()],
        vec!["Banana".into(), 20.into()],
    ];
    let options = XlsWriteOptions {
        sheet_name: Some("Product List".into()),
    };
    write_to_file(&path, rows, options).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);
    let boundsheet = find_record(&recs, records::BOUNDSHEET).expect("BOUNDSHEET record");

    // offset(4) + visibility + type, then the short string
    assert_eq!(boundsheet[6], 12); // "Product List" is 12 characters
    assert_eq!(boundsheet[7], 0x01); // UTF-16LE flag
    assert_eq!(boundsheet.len(), 8 + 24);

    cleanup_fixture(&path);
}

#[test]
fn test_mixed_types() {
    let path = temp_fixture_path();
    let rows: Vec<Row> = vec![
        vec!["String".into(), "Int".into(), "Float".into(), "Bool".into()],
        vec!["text".into(), 42.into(), 3.14.into(), true.into()],
        vec!["another".into(), (-10).into(), (-2.5).into(), false.into()],
    ];
    write_to_file(&path, rows, XlsWriteOptions::default()).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);

    let labels = recs.iter().filter(|(t, _)| *t == records::LABELSST).count();
    let numbers = recs.iter().filter(|(t, _)| *t == records::NUMBER).count();
    let bools = recs.iter().filter(|(t, _)| *t == records::BOOLERR).count();
    assert_eq!(labels, 6);
    assert_eq!(numbers, 4);
    assert_eq!(bools, 2);

    // The NUMBER payloads carry the exact doubles.
    let values: Vec<f64> = recs
        .iter()
        .filter(|(t, _)| *t == records::NUMBER)
        .map(|(_, body)| f64::from_le_bytes(body[6..14].try_into().unwrap()))
        .collect();
    assert_eq!(values, [42.0, 3.14, -10.0, -2.5]);

    cleanup_fixture(&path);
}

#[test]
fn test_large_grid() {
    let path = temp_fixture_path();

    // 100 rows x 10 columns, mixed text and numbers
    let rows: Vec<Row> = (0..100i64)
        .map(|i| {
            (0..10i64)
                .map(|j| {
                    if j == 0 {
                        CellValue::text(format!("Row {i}"))
                    } else {
                        CellValue::Int(i * 10 + j)
                    }
                })
                .collect()
        })
        .collect();
    write_to_file(&path, rows, XlsWriteOptions::default()).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);

    let dims = find_record(&recs, records::DIMENSIONS).expect("DIMENSIONS record");
    assert_eq!(&dims[4..8], &100u32.to_le_bytes());
    assert_eq!(&dims[10..12], &10u16.to_le_bytes());

    let row_records = recs.iter().filter(|(t, _)| *t == records::ROW).count();
    assert_eq!(row_records, 100);

    // Each ROW record precedes the cells of its row: walking the cell
    // block, a row index may only appear after its ROW record.
    let mut seen_rows = 0u16;
    for (record_type, body) in &recs {
        match *record_type {
            records::ROW => {
                let idx = u16::from_le_bytes([body[0], body[1]]);
                assert_eq!(idx, seen_rows);
                seen_rows += 1;
            }
            records::LABELSST | records::NUMBER => {
                let idx = u16::from_le_bytes([body[0], body[1]]);
                assert!(idx < seen_rows, "cell record before its ROW record");
            }
            _ => {}
        }
    }

    cleanup_fixture(&path);
}

#[test]
fn test_workbook_stream_prefix_is_biff8() {
    let path = temp_fixture_path();
    let mut writer = XlsWriter::new();
    writer.set_data(sample_rows());
    writer.save_as(&path).unwrap();

    let stream = read_workbook_stream(&path);

    // The stream opens with a workbook-globals BOF for BIFF8.
    assert_eq!(&stream[0..2], &records::BOF.to_le_bytes());
    assert_eq!(&stream[4..6], &0x0600u16.to_le_bytes());
    assert_eq!(&stream[6..8], &0x0005u16.to_le_bytes());

    cleanup_fixture(&path);
}

#[test]
fn test_record_walk_reaches_eof() {
    let path = temp_fixture_path();
    let mut writer = XlsWriter::new();
    writer.set_sheet_name("Data");
    writer.set_data(sample_rows());
    writer.save_as(&path).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);

    let eof_count = recs.iter().filter(|(t, _)| *t == records::EOF).count();
    assert_eq!(eof_count, 2); // globals and worksheet
    assert_eq!(recs.last().unwrap().0, records::EOF);

    cleanup_fixture(&path);
}

#[test]
fn test_supplementary_plane_text() {
    let path = temp_fixture_path();
    let rows: Vec<Row> = vec![vec!["😀 ok".into()]];
    write_to_file(&path, rows, XlsWriteOptions::default()).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);
    let sst = find_record(&recs, records::SST).expect("SST record");

    // cch counts code points (4), the data holds 5 UTF-16 code units.
    let cch = u16::from_le_bytes([sst[8], sst[9]]);
    assert_eq!(cch, 4);
    assert_eq!(sst[10], 0x01);
    assert_eq!(sst.len(), 8 + 3 + 10);
    // Surrogate pair for U+1F600 comes first.
    assert_eq!(&sst[11..15], &[0x3D, 0xD8, 0x00, 0xDE]);

    cleanup_fixture(&path);
}

#[test]
fn test_duplicate_strings_share_sst_entries() {
    let path = temp_fixture_path();
    let rows: Vec<Row> = vec![
        vec!["Hello".into()],
        vec!["World".into()],
        vec!["Hello".into()],
    ];
    write_to_file(&path, rows, XlsWriteOptions::default()).unwrap();

    let stream = read_workbook_stream(&path);
    let recs = walk_records(&stream);

    let sst = find_record(&recs, records::SST).expect("SST record");
    assert_eq!(u32::from_le_bytes(sst[0..4].try_into().unwrap()), 3);
    assert_eq!(u32::from_le_bytes(sst[4..8].try_into().unwrap()), 2);

    let indices: Vec<u32> = recs
        .iter()
        .filter(|(t, _)| *t == records::LABELSST)
        .map(|(_, body)| u32::from_le_bytes(body[6..10].try_into().unwrap()))
        .collect();
    assert_eq!(indices, [0, 1, 0]);

    cleanup_fixture(&path);
}

#[test]
fn test_invalid_sheet_name_creates_no_file() {
    let path = temp_fixture_path();
    let options = XlsWriteOptions {
        sheet_name: Some("a:b".into()),
    };
    let result = write_to_file(&path, vec![], options);
    assert!(result.is_err());
    assert!(!path.exists());

    cleanup_fixture(&path);
}
