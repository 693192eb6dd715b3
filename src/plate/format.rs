use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PlateError;

/// Physical plate layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PlateFormat {
    /// 8 rows x 12 columns
    #[default]
    Wells96,
    /// 16 rows x 24 columns
    Wells384,
}

impl PlateFormat {
    /// Number of rows
    pub fn rows(&self) -> usize {
        match self {
            PlateFormat::Wells96 => 8,
            PlateFormat::Wells384 => 16,
        }
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        match self {
            PlateFormat::Wells96 => 12,
            PlateFormat::Wells384 => 24,
        }
    }

    /// Total well count
    pub fn wells(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Smallest format able to hold `count` wells
    pub fn for_well_count(count: usize) -> Result<Self, PlateError> {
        match count {
            0..=96 => Ok(PlateFormat::Wells96),
            97..=384 => Ok(PlateFormat::Wells384),
            _ => Err(PlateError::UnsupportedFormat(count)),
        }
    }
}

impl TryFrom<usize> for PlateFormat {
    type Error = PlateError;

    fn try_from(wells: usize) -> Result<Self, Self::Error> {
        match wells {
            96 => Ok(PlateFormat::Wells96),
            384 => Ok(PlateFormat::Wells384),
            other => Err(PlateError::UnsupportedFormat(other)),
        }
    }
}

impl From<PlateFormat> for usize {
    fn from(format: PlateFormat) -> Self {
        format.wells()
    }
}

impl FromStr for PlateFormat {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wells = s
            .trim()
            .parse::<usize>()
            .map_err(|_| PlateError::UnsupportedFormat(0))?;
        Self::try_from(wells)
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wells())
    }
}

/// Coordinate for the 1-based row-major `index`
pub fn index_to_well(index: usize, format: PlateFormat) -> Result<String, PlateError> {
    if index == 0 || index > format.wells() {
        return Err(PlateError::IndexOutOfRange {
            index,
            wells: format.wells(),
        });
    }
    let zero_based = index - 1;
    let row = zero_based / format.columns();
    let column = zero_based % format.columns() + 1;
    // rows never exceed 'P'
    let letter = char::from(b'A' + row as u8);
    Ok(format!("{letter}{column}"))
}

/// 1-based row-major index of a coordinate such as `"B7"`, `"b07"` or `"P24"`
pub fn well_to_index(well_id: &str, format: PlateFormat) -> Result<usize, PlateError> {
    let invalid = || PlateError::InvalidWellId {
        well_id: well_id.to_string(),
        wells: format.wells(),
    };

    let trimmed = well_id.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return Err(invalid());
    }
    let row = (letter as u8 - b'A') as usize;
    let column: usize = chars.as_str().parse().map_err(|_| invalid())?;

    if row >= format.rows() || column == 0 || column > format.columns() {
        return Err(invalid());
    }
    Ok(row * format.columns() + column)
}
