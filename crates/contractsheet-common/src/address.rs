//! A1-style cell addresses.
//!
//! Addresses are 1-based on both axes, matching how spreadsheet users and the
//! xlsx format name cells. Only the plain `[A-Z]+[0-9]+` form is accepted: no
//! sheet prefix, no `$` anchors, no lowercase.

use core::fmt;
use std::error::Error;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MAX_ROW: u32 = 1_048_576;
pub const MAX_COL: u32 = 16_384;

/// Errors returned when parsing an A1 reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// The input did not match `[A-Z]+[0-9]+`.
    Malformed(String),
    /// Row was zero or above [`MAX_ROW`].
    RowOutOfBounds(String),
    /// Column letters resolved past `XFD`.
    ColOutOfBounds(String),
}

impl AddressError {
    /// The offending input as supplied by the caller.
    pub fn input(&self) -> &str {
        match self {
            AddressError::Malformed(s)
            | AddressError::RowOutOfBounds(s)
            | AddressError::ColOutOfBounds(s) => s,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Malformed(input) => {
                write!(f, "malformed cell address `{input}`")
            }
            AddressError::RowOutOfBounds(input) => {
                write!(f, "row of `{input}` must be within 1..={MAX_ROW}")
            }
            AddressError::ColOutOfBounds(input) => {
                write!(f, "column of `{input}` exceeds XFD")
            }
        }
    }
}

impl Error for AddressError {}

/// A single cell on a sheet, 1-based.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    /// Construct from 1-based coordinates. Callers are trusted to stay in bounds.
    pub const fn new(row: u32, col: u32) -> Self {
        CellAddress { row, col }
    }

    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let split = input
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| AddressError::Malformed(input.to_string()))?;
        let (letters, digits) = input.split_at(split);
        if letters.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::Malformed(input.to_string()));
        }
        let col = column_index(letters).ok_or_else(|| {
            if letters.bytes().all(|b| b.is_ascii_uppercase()) {
                AddressError::ColOutOfBounds(input.to_string())
            } else {
                AddressError::Malformed(input.to_string())
            }
        })?;
        let row: u32 = digits
            .parse()
            .map_err(|_| AddressError::RowOutOfBounds(input.to_string()))?;
        if row == 0 || row > MAX_ROW {
            return Err(AddressError::RowOutOfBounds(input.to_string()));
        }
        Ok(CellAddress { row, col })
    }

    pub fn to_a1(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellAddress::parse(s)
    }
}

impl TryFrom<&str> for CellAddress {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        CellAddress::parse(value)
    }
}

/// `(col, row)`, the tuple order umya-spreadsheet uses for coordinates.
impl From<CellAddress> for (u32, u32) {
    fn from(addr: CellAddress) -> Self {
        (addr.col, addr.row)
    }
}

/// 1-based column number to letters (`1 -> "A"`, `27 -> "AA"`).
pub fn column_letters(col: u32) -> String {
    let mut n = col;
    let mut buf = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        buf.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// Uppercase letters to a 1-based column number, `None` past `XFD`.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.bytes() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (ch - b'A') as u32 + 1;
    }
    (col <= MAX_COL).then_some(col)
}
