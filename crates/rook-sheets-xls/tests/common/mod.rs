//! Common utilities for XLS writer integration tests.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn temp_fixture_path() -> PathBuf {
    let n = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let pid = std::process::id();
    std::env::temp_dir().join(format!("rook_sheets_xls_{pid}_{n}.xls"))
}

pub fn cleanup_fixture(path: &Path) {
    let _ = std::fs::remove_file(path);
}

/// Open a written file as a compound document and pull out the
/// `Workbook` stream.
pub fn read_workbook_stream(path: &Path) -> Vec<u8> {
    let file = std::fs::File::open(path).expect("open fixture");
    let mut cfb = cfb::CompoundFile::open(file).expect("open CFB container");
    let mut data = Vec::new();
    cfb.open_stream("/Workbook")
        .expect("Workbook stream")
        .read_to_end(&mut data)
        .expect("read Workbook stream");
    data
}

/// Walk a BIFF8 stream into (type, body) records, panicking on any
/// framing error.
///
/// The `Workbook` stream is zero-padded up to the container's 4096-byte
/// stream floor; a zeroed record header marks the start of that padding
/// and ends the walk (after checking the rest really is zeros).
pub fn walk_records(stream: &[u8]) -> Vec<(u16, Vec<u8>)> {
    let mut records = Vec::new();
    let mut pos = 0;
    while pos < stream.len() {
        assert!(pos + 4 <= stream.len(), "truncated record header at {pos}");
        let record_type = u16::from_le_bytes([stream[pos], stream[pos + 1]]);
        let len = u16::from_le_bytes([stream[pos + 2], stream[pos + 3]]) as usize;
        if record_type == 0 && len == 0 {
            assert!(
                stream[pos..].iter().all(|&b| b == 0),
                "non-zero bytes in stream padding at {pos}"
            );
            break;
        }
        assert!(pos + 4 + len <= stream.len(), "truncated record body at {pos}");
        records.push((record_type, stream[pos + 4..pos + 4 + len].to_vec()));
        pos += 4 + len;
    }
    records
}

/// First record of the given type, if any.
pub fn find_record(records: &[(u16, Vec<u8>)], record_type: u16) -> Option<&[u8]> {
    records
        .iter()
        .find(|(t, _)| *t == record_type)
        .map(|(_, body)| body.as_slice())
}
