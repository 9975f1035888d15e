//! Shared String Table construction and serialization.
//!
//! Every text cell in the workbook stores only a 4-byte index into the
//! SST; the strings themselves live once, in insertion order, inside
//! the SST record in workbook globals. The table tracks two counters:
//! the total number of references (`total_count`) and the number of
//! unique strings (`unique_count`).
//!
//! The serialized table can exceed the 8224-byte record body limit, in
//! which case it spills into CONTINUE records. A string header (2-byte
//! character count + flags byte) is never split across records; when
//! character data is split, the continuation restates the flags byte
//! before the remaining bytes, and splits always fall on UTF-16 code
//! unit boundaries outside surrogate pairs.

use std::collections::HashMap;

use super::records;
use super::strings::{char_count, encode_utf16le, FLAG_UTF16};
use super::{RecordWriter, MAX_RECORD_BODY};

/// Deduplicating string table for LABELSST cells.
#[derive(Debug, Default)]
pub struct SharedStringTable {
    /// Unique strings in insertion order.
    strings: Vec<String>,
    /// String -> index into `strings`.
    index: HashMap<String, u32>,
    /// Total references, duplicates included.
    total_count: u32,
}

impl SharedStringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one reference to `s`, assigning it the next index if it
    /// has not been seen before.
    pub fn add(&mut self, s: &str) {
        self.total_count += 1;
        if !self.index.contains_key(s) {
            self.index.insert(s.to_owned(), self.strings.len() as u32);
            self.strings.push(s.to_owned());
        }
    }

    /// Index assigned to `s` on its first [`add`](Self::add).
    ///
    /// Strings that were never added resolve to index 0.
    pub fn index_of(&self, s: &str) -> u32 {
        self.index.get(s).copied().unwrap_or(0)
    }

    /// Total string references, duplicates included.
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Number of unique strings.
    pub fn unique_count(&self) -> u32 {
        self.strings.len() as u32
    }

    /// Serialize the table as a complete record sequence: one SST
    /// record, then CONTINUE records for whatever does not fit.
    pub fn encode(&self) -> std::io::Result<Vec<u8>> {
        let mut out = RecordWriter::new(Vec::new());
        let mut body: Vec<u8> = Vec::with_capacity(MAX_RECORD_BODY);
        let mut records_written = 0usize;

        let flush = |body: &mut Vec<u8>,
                         out: &mut RecordWriter<Vec<u8>>,
                         records_written: &mut usize|
         -> std::io::Result<()> {
            let record_type = if *records_written == 0 {
                records::SST
            } else {
                records::CONTINUE
            };
            out.record(record_type, body)?;
            *records_written += 1;
            body.clear();
            Ok(())
        };

        body.extend_from_slice(&self.total_count.to_le_bytes());
        body.extend_from_slice(&self.unique_count().to_le_bytes());

        for s in &self.strings {
            let cch = char_count(s).min(u16::MAX as usize) as u16;
            let data = encode_utf16le(s);

            // The 3-byte string header plus at least one whole code
            // unit must fit in the current record.
            if body.len() + 5 > MAX_RECORD_BODY {
                flush(&mut body, &mut out, &mut records_written)?;
            }
            body.extend_from_slice(&cch.to_le_bytes());
            body.push(FLAG_UTF16);

            let mut off = 0;
            while off < data.len() {
                let room = MAX_RECORD_BODY - body.len();
                let mut take = room.min(data.len() - off);
                take -= take % 2;
                if take > 0 && take < data.len() - off {
                    // Never leave the high half of a surrogate pair
                    // dangling at a record boundary.
                    let last = u16::from_le_bytes([data[off + take - 2], data[off + take - 1]]);
                    if (0xD800..0xDC00).contains(&last) {
                        take -= 2;
                    }
                }
                if take == 0 {
                    flush(&mut body, &mut out, &mut records_written)?;
                    // Continued character data restates the flags byte.
                    body.push(FLAG_UTF16);
                    continue;
                }
                body.extend_from_slice(&data[off..off + take]);
                off += take;
            }
        }

        flush(&mut body, &mut out, &mut records_written)?;

        if records_written > 1 {
            log::debug!(
                "SST spilled into {} CONTINUE record(s)",
                records_written - 1
            );
        }

        Ok(out.into_inner())
    }
}
