//! CFB (Compound File Binary / OLE2) container writer.
//!
//! Wraps a finished BIFF8 byte stream as the single `Workbook` stream
//! of a minimal compound file: one 512-byte header, the payload padded
//! to whole sectors, one FAT sector, one directory sector. The payload
//! is padded up to 4096 bytes so the stream never falls below the
//! mini-stream cutoff.
//!
//! Sector layout (512-byte sectors, numbered from 0 right after the
//! header):
//!
//! ```text
//! 0 .. data_sectors-1   workbook payload, zero-padded
//! data_sectors          FAT
//! data_sectors + 1      directory
//! ```
//!
//! One FAT sector maps 128 sectors, which bounds the payload at 126
//! sectors (64512 bytes); larger streams are rejected up front.

use std::io::Write;

use crate::error::{XlsError, XlsResult};

/// CFB file signature.
pub const SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Sector size implied by sector shift 9.
pub const SECTOR_SIZE: usize = 512;

/// Number of FAT sector ids held in the header DIFAT.
pub const DIFAT_ENTRIES: usize = 109;

/// Streams smaller than this cutoff would live in the mini-stream;
/// the payload is padded up to it instead.
pub const MIN_STREAM_SIZE: usize = 4096;

/// Largest payload a single FAT sector can map (126 data sectors plus
/// the FAT and directory sectors themselves).
pub const MAX_STREAM_SIZE: usize = (SECTOR_SIZE / 4 - 2) * SECTOR_SIZE;

// Special sector ids.
pub const MAX_REG_SECTOR: u32 = 0xFFFF_FFFA;
pub const FAT_SECTOR: u32 = 0xFFFF_FFFD;
pub const END_OF_CHAIN: u32 = 0xFFFF_FFFE;
pub const FREE_SECTOR: u32 = 0xFFFF_FFFF;

// Directory entry object types.
const TYPE_UNUSED: u8 = 0;
const TYPE_STREAM: u8 = 2;
const TYPE_ROOT: u8 = 5;

const COLOR_BLACK: u8 = 1;

/// Name of the stream holding the BIFF8 workbook.
const STREAM_NAME: &str = "Workbook";

/// Wrap `workbook` in a CFB container and write it to `sink`.
pub fn write_cfb<W: Write>(sink: &mut W, workbook: &[u8]) -> XlsResult<()> {
    if workbook.len() > MAX_STREAM_SIZE {
        return Err(XlsError::WorkbookTooLarge(workbook.len()));
    }
    write_container(sink, workbook).map_err(XlsError::Cfb)
}

fn write_container<W: Write>(sink: &mut W, workbook: &[u8]) -> std::io::Result<()> {
    let data_size = workbook.len().max(MIN_STREAM_SIZE);
    let data_sectors = data_size.div_ceil(SECTOR_SIZE);
    let fat_sector = data_sectors as u32;
    let dir_sector = fat_sector + 1;

    sink.write_all(&build_header(fat_sector, dir_sector))?;

    let mut padded = vec![0u8; data_sectors * SECTOR_SIZE];
    padded[..workbook.len()].copy_from_slice(workbook);
    sink.write_all(&padded)?;

    sink.write_all(&build_fat(data_sectors))?;
    sink.write_all(&build_directory(data_size as u64))?;
    Ok(())
}

fn build_header(fat_sector: u32, dir_sector: u32) -> [u8; SECTOR_SIZE] {
    let mut header = [0u8; SECTOR_SIZE];
    header[0..8].copy_from_slice(&SIGNATURE);
    // bytes 8..24: CLSID (zero)
    header[24..26].copy_from_slice(&0x003Eu16.to_le_bytes()); // minor version
    header[26..28].copy_from_slice(&0x0003u16.to_le_bytes()); // major version
    header[28..30].copy_from_slice(&0xFFFEu16.to_le_bytes()); // little-endian marker
    header[30..32].copy_from_slice(&9u16.to_le_bytes()); // sector shift
    header[32..34].copy_from_slice(&6u16.to_le_bytes()); // mini sector shift
    // bytes 34..40: reserved
    // bytes 40..44: directory sector count, must stay 0 for 512-byte sectors
    header[44..48].copy_from_slice(&1u32.to_le_bytes()); // FAT sector count
    header[48..52].copy_from_slice(&dir_sector.to_le_bytes());
    // bytes 52..56: transaction signature
    header[56..60].copy_from_slice(&(MIN_STREAM_SIZE as u32).to_le_bytes()); // mini stream cutoff
    header[60..64].copy_from_slice(&END_OF_CHAIN.to_le_bytes()); // first mini-FAT sector
    // bytes 64..68: mini-FAT sector count
    header[68..72].copy_from_slice(&END_OF_CHAIN.to_le_bytes()); // first DIFAT sector
    // bytes 72..76: DIFAT sector count

    // DIFAT[0] points at the single FAT sector, the rest are free.
    header[76..80].copy_from_slice(&fat_sector.to_le_bytes());
    for i in 1..DIFAT_ENTRIES {
        let offset = 76 + i * 4;
        header[offset..offset + 4].copy_from_slice(&FREE_SECTOR.to_le_bytes());
    }
    header
}

fn build_fat(data_sectors: usize) -> [u8; SECTOR_SIZE] {
    let mut fat = [FREE_SECTOR; SECTOR_SIZE / 4];

    // The workbook stream is one linear chain over the data sectors.
    for (i, entry) in fat.iter_mut().enumerate().take(data_sectors) {
        *entry = if i == data_sectors - 1 {
            END_OF_CHAIN
        } else {
            i as u32 + 1
        };
    }
    fat[data_sectors] = FAT_SECTOR;
    fat[data_sectors + 1] = END_OF_CHAIN; // one-sector directory chain

    let mut buf = [0u8; SECTOR_SIZE];
    for (i, value) in fat.iter().enumerate() {
        buf[i * 4..i * 4 + 4].copy_from_slice(&value.to_le_bytes());
    }
    buf
}

struct DirEntry<'a> {
    name: &'a str,
    object_type: u8,
    color: u8,
    child: u32,
    start_sector: u32,
    stream_size: u64,
}

fn build_directory(data_size: u64) -> [u8; SECTOR_SIZE] {
    let root = DirEntry {
        name: "Root Entry",
        object_type: TYPE_ROOT,
        color: COLOR_BLACK,
        child: 1, // the Workbook entry
        start_sector: END_OF_CHAIN,
        stream_size: 0,
    };
    let workbook = DirEntry {
        name: STREAM_NAME,
        object_type: TYPE_STREAM,
        color: COLOR_BLACK,
        child: FREE_SECTOR,
        start_sector: 0,
        stream_size: data_size,
    };
    let unused = DirEntry {
        name: "",
        object_type: TYPE_UNUSED,
        color: 0,
        child: FREE_SECTOR,
        start_sector: END_OF_CHAIN,
        stream_size: 0,
    };

    let mut buf = [0u8; SECTOR_SIZE];
    for (slot, entry) in [&root, &workbook, &unused, &unused].into_iter().enumerate() {
        buf[slot * 128..(slot + 1) * 128].copy_from_slice(&encode_entry(entry));
    }
    buf
}

/// Encode one 128-byte directory entry.
fn encode_entry(entry: &DirEntry) -> [u8; 128] {
    let mut buf = [0u8; 128];

    // 64-byte UTF-16LE name buffer; the length field counts the bytes
    // used including one null terminator.
    let utf16: Vec<u16> = entry.name.encode_utf16().collect();
    for (i, unit) in utf16.iter().enumerate() {
        buf[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    if !entry.name.is_empty() {
        buf[64..66].copy_from_slice(&(((utf16.len() + 1) * 2) as u16).to_le_bytes());
    }

    buf[66] = entry.object_type;
    buf[67] = entry.color;
    buf[68..72].copy_from_slice(&FREE_SECTOR.to_le_bytes()); // left sibling: none
    buf[72..76].copy_from_slice(&FREE_SECTOR.to_le_bytes()); // right sibling: none
    buf[76..80].copy_from_slice(&entry.child.to_le_bytes());
    // bytes 80..96: CLSID; 96..100: state bits; 100..116: timestamps
    buf[116..120].copy_from_slice(&entry.start_sector.to_le_bytes());
    buf[120..128].copy_from_slice(&entry.stream_size.to_le_bytes());
    buf
}
