use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WellSplitError};

use super::scan_path::scan_ordinal;

/// Row/column shape of a microtiter plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateLayout {
    pub rows: u32,
    pub cols: u32,
}

impl PlateLayout {
    /// Shape for one of the supported standard plate sizes.
    pub fn from_well_count(wells: u32) -> Result<Self> {
        match wells {
            96 => Ok(Self { rows: 8, cols: 12 }),
            384 => Ok(Self { rows: 16, cols: 24 }),
            other => Err(WellSplitError::UnsupportedPlateSize(other)),
        }
    }

    /// Caller-validated shape. Both dimensions must be non-zero.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(WellSplitError::InvalidConfig(format!(
                "plate shape {rows}x{cols} has no wells"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn well_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Row-major position of a well. Used for genotype lookup and
    /// occurrence ranks, never for input filenames.
    pub fn grid_index(&self, well: Well) -> usize {
        well.row as usize * self.cols as usize + well.col as usize
    }

    /// Position of a well in the microscope's serpentine acquisition order.
    /// Used for input filenames, never for genotype lookup.
    pub fn scan_ordinal(&self, well: Well) -> u32 {
        scan_ordinal(well.row, well.col, self.rows, self.cols)
    }

    pub fn contains(&self, well: Well) -> bool {
        well.row < self.rows && well.col < self.cols
    }

    /// Every well in row-major (grid index) order.
    pub fn wells(&self) -> impl Iterator<Item = Well> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Well { row, col }))
    }
}

impl fmt::Display for PlateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wells ({}x{})", self.well_count(), self.rows, self.cols)
    }
}

/// A 0-indexed well coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Well {
    pub row: u32,
    pub col: u32,
}

impl Well {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Conventional plate notation: row letter(s) followed by a 1-based column,
/// e.g. `A1`, `P24`.
impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.row + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let row: String = letters.into_iter().rev().collect();
        write!(f, "{}{}", row, self.col + 1)
    }
}
