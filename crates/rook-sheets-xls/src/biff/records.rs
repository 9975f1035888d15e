//! BIFF8 record type constants.
//!
//! Reference: [MS-XLS] §2.3 — Record Enumeration

// ── Stream structure ────────────────────────────────────────────────────
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;

// ── Workbook globals ────────────────────────────────────────────────────
pub const INTERFACEHDR: u16 = 0x00E1;
pub const MMS: u16 = 0x00C1;
pub const INTERFACEEND: u16 = 0x00E2;
pub const WRITEACCESS: u16 = 0x005C; // Last-author stamp, space-padded to 112 bytes
pub const CODEPAGE: u16 = 0x0042; // Code page (1200 = UTF-16 for BIFF8)
pub const DSF: u16 = 0x0161; // Double Stream File marker
pub const FNGROUPCOUNT: u16 = 0x013D;
pub const BUILTINFNGROUPCOUNT: u16 = 0x009C; // Excel writes 0x000E (14 built-in groups)
pub const WINDOWPROTECT: u16 = 0x0019;
pub const PROTECT: u16 = 0x0012;
pub const OBJPROTECT: u16 = 0x0063;
pub const PASSWORD: u16 = 0x0013;
pub const PROT4REV: u16 = 0x01AF;
pub const PASSWORDREV4: u16 = 0x01BC;
pub const BACKUP: u16 = 0x0040;
pub const HIDEOBJ: u16 = 0x008D;
pub const WINDOW1: u16 = 0x003D;
pub const DATEMODE: u16 = 0x0022; // 1900 vs 1904 date system
pub const PRECISION: u16 = 0x000E;
pub const REFRESHALL: u16 = 0x01B7;
pub const BOOKBOOL: u16 = 0x00DA;
pub const FONT: u16 = 0x0031; // Font definition (BIFF8 needs seven defaults)
pub const FORMAT: u16 = 0x041E; // Number format string
pub const XF: u16 = 0x00E0; // Extended Format (16 style XFs precede cell XFs)
pub const STYLE: u16 = 0x0293; // Named cell style
pub const USESELFS: u16 = 0x0160; // Natural language formulas flag
pub const SST: u16 = 0x00FC; // Shared String Table
pub const BOUNDSHEET: u16 = 0x0085; // Sheet name, type, visibility, stream offset

// ── Worksheet settings ──────────────────────────────────────────────────
pub const CALCMODE: u16 = 0x000D;
pub const CALCCOUNT: u16 = 0x000C;
pub const REFMODE: u16 = 0x000F;
pub const ITERATION: u16 = 0x0011;
pub const DELTA: u16 = 0x0010;
pub const SAVERECALC: u16 = 0x005F;
pub const GUTS: u16 = 0x0080;
pub const DEFAULTROWHEIGHT: u16 = 0x0225;
pub const WSBOOL: u16 = 0x0081;
pub const DIMENSIONS: u16 = 0x0200; // Used range (first/last row/col)
pub const PRINTHEADERS: u16 = 0x002A;
pub const PRINTGRIDLINES: u16 = 0x002B;
pub const GRIDSET: u16 = 0x0082;
pub const HBREAK: u16 = 0x001B;
pub const VBREAK: u16 = 0x001A;
pub const HEADER: u16 = 0x0014;
pub const FOOTER: u16 = 0x0015;
pub const HCENTER: u16 = 0x0083;
pub const VCENTER: u16 = 0x0084;
pub const LEFTMARGIN: u16 = 0x0026;
pub const RIGHTMARGIN: u16 = 0x0027;
pub const TOPMARGIN: u16 = 0x0028;
pub const BOTTOMMARGIN: u16 = 0x0029;
pub const SETUP: u16 = 0x00A1;
pub const SCENPROTECT: u16 = 0x00DD;
pub const WINDOW2: u16 = 0x023E;

// ── Cell records ────────────────────────────────────────────────────────
pub const ROW: u16 = 0x0208; // Row extent and default format
pub const LABELSST: u16 = 0x00FD; // Cell containing SST string index
pub const NUMBER: u16 = 0x0203; // Cell with IEEE 754 double
pub const BOOLERR: u16 = 0x0205; // Boolean or error cell
pub const BLANK: u16 = 0x0201; // Empty cell with formatting

// ── BOF subtypes (the `dt` field) ───────────────────────────────────────
pub const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const BOF_WORKSHEET: u16 = 0x0010;

/// BIFF version we write.
pub const BIFF8_VERSION: u16 = 0x0600;
