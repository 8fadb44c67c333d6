//! Inventory header recognition.
//!
//! The export places a header row above the data using fixed labels in
//! fixed columns. A row is only treated as a header when every tracked
//! column carries its own label; a row where only some of them do means the
//! export layout changed and is rejected.

use crate::constants::{
    ARRIVAL_COLUMN, ARRIVAL_LABEL, LAST_NAME_COLUMN, LAST_NAME_LABEL, LOCATION_COLUMN,
    LOCATION_LABEL, RESERVATION_COLUMN, RESERVATION_LABEL,
};

/// One of the four inventory columns read by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryColumn {
    Arrival,
    Location,
    Reservation,
    LastName,
}

impl InventoryColumn {
    /// Columns in report field order
    pub const ALL: [InventoryColumn; 4] = [
        InventoryColumn::Arrival,
        InventoryColumn::Location,
        InventoryColumn::Reservation,
        InventoryColumn::LastName,
    ];

    /// Zero-based absolute column index
    pub fn index(self) -> u32 {
        match self {
            InventoryColumn::Arrival => ARRIVAL_COLUMN,
            InventoryColumn::Location => LOCATION_COLUMN,
            InventoryColumn::Reservation => RESERVATION_COLUMN,
            InventoryColumn::LastName => LAST_NAME_COLUMN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InventoryColumn::Arrival => ARRIVAL_LABEL,
            InventoryColumn::Location => LOCATION_LABEL,
            InventoryColumn::Reservation => RESERVATION_LABEL,
            InventoryColumn::LastName => LAST_NAME_LABEL,
        }
    }

    /// Spreadsheet column letter, for messages
    pub fn letter(self) -> char {
        (b'A' + self.index() as u8) as char
    }
}

/// How a row relates to the expected header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Every column carries its label
    Full,
    /// No column carries its label
    None,
    /// Some columns carry their label; the rest are listed with what was found
    Partial(Vec<(InventoryColumn, String)>),
}

/// Compare the text of a row's four cells (in [`InventoryColumn::ALL`]
/// order) against the expected labels
pub fn match_header(cells: &[Option<String>; 4]) -> HeaderMatch {
    let mut mismatched = Vec::new();

    for (column, cell) in InventoryColumn::ALL.iter().zip(cells.iter()) {
        if cell.as_deref() != Some(column.label()) {
            mismatched.push((*column, cell.clone().unwrap_or_default()));
        }
    }

    match mismatched.len() {
        0 => HeaderMatch::Full,
        n if n == InventoryColumn::ALL.len() => HeaderMatch::None,
        _ => HeaderMatch::Partial(mismatched),
    }
}

/// Human readable description of the columns that did not match
pub fn describe_mismatch(mismatched: &[(InventoryColumn, String)]) -> String {
    mismatched
        .iter()
        .map(|(column, found)| {
            format!(
                "column {} expected '{}', found '{}'",
                column.letter(),
                column.label(),
                found
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
