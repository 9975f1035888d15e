//! Cell value types

use std::fmt;

/// Represents the value stored in a cell
///
/// The format backends widen every numeric variant to an IEEE 754
/// double at serialization time; the distinct integer variants exist so
/// callers can hand over their values without a lossy cast up front.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Signed integer value
    Int(i64),

    /// Unsigned integer value
    UInt(u64),

    /// Floating point value
    Float(f64),

    /// String value
    Text(String),

    /// A value of some other type, already rendered to text by the
    /// caller. Written to the sheet as a plain string.
    Other(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Create an "other" value from anything that can display itself
    pub fn other<T: fmt::Display>(value: T) -> Self {
        CellValue::Other(value.to_string())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell holds any numeric variant
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::UInt(_) | CellValue::Float(_)
        )
    }

    /// Try to get the value as a number (integers widen to f64)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::UInt(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    ///
    /// Returns the text for both [`CellValue::Text`] and the
    /// pre-rendered [`CellValue::Other`] variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::Other(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Int(_) => "integer",
            CellValue::UInt(_) => "unsigned integer",
            CellValue::Float(_) => "float",
            CellValue::Text(_) => "text",
            CellValue::Other(_) => "other",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::UInt(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) | CellValue::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i8> for CellValue {
    fn from(n: i8) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<i16> for CellValue {
    fn from(n: i16) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<u8> for CellValue {
    fn from(n: u8) -> Self {
        CellValue::UInt(n as u64)
    }
}

impl From<u16> for CellValue {
    fn from(n: u16) -> Self {
        CellValue::UInt(n as u64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::UInt(n as u64)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::UInt(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Float(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellValue::Empty,
        }
    }
}
