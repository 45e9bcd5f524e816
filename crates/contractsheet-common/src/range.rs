use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::address::{AddressError, CellAddress};

/// Rectangular block of cells, inclusive on both ends.
///
/// Used for merged regions: the top-left cell is the anchor and the only one
/// that holds a value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Build from two corners in any order.
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        CellRange {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `"C3:D3"`; a lone `"C3"` yields a single-cell range.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        match input.split_once(':') {
            Some((a, b)) => Ok(CellRange::new(CellAddress::parse(a)?, CellAddress::parse(b)?)),
            None => {
                let cell = CellAddress::parse(input)?;
                Ok(CellRange::new(cell, cell))
            }
        }
    }

    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    pub fn anchor(&self) -> CellAddress {
        self.start
    }

    pub fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    pub fn to_a1(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
