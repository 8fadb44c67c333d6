//! Inventory spreadsheet reader.
//!
//! Reads the four report columns row by row. Blank and header rows are
//! skipped as a whole, so the columns of a data row always belong to the
//! same reservation.

use crate::constants::ARRIVAL_TEXT_FORMATS;
use crate::error::{RackError, Result};
use crate::header::{HeaderMatch, InventoryColumn, describe_mismatch, match_header};

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use std::path::PathBuf;
use tracing::debug;

/// One populated data row of the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based spreadsheet row number
    pub row: u32,
    pub arrival_time: NaiveDateTime,
    pub location: String,
    pub reservation_number: String,
    pub last_name: String,
}

/// Reader for one sheet of an inventory workbook
#[derive(Debug, Clone)]
pub struct InventoryReader {
    path: PathBuf,
    sheet_name: String,
}

impl InventoryReader {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Open the workbook and return its data rows in sheet order
    pub fn read_rows(&self) -> Result<Vec<SourceRow>> {
        if !self.path.exists() {
            return Err(RackError::SourceNotFound {
                path: self.path.clone(),
                reason: "file does not exist".to_string(),
            });
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| RackError::SourceFormat {
            path: self.path.clone(),
            reason: format!("failed to open workbook: {}", e),
        })?;

        if !workbook.sheet_names().iter().any(|name| name == &self.sheet_name) {
            return Err(RackError::SourceNotFound {
                path: self.path.clone(),
                reason: format!("sheet '{}' not found", self.sheet_name),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(|e| RackError::SourceFormat {
                path: self.path.clone(),
                reason: format!("failed to read sheet '{}': {}", self.sheet_name, e),
            })?;

        let rows = self.extract_rows(&range)?;

        debug!(
            "Read {} data rows from {} [{}]",
            rows.len(),
            self.path.display(),
            self.sheet_name
        );

        Ok(rows)
    }

    /// Walk the sheet by absolute row index and keep the populated data rows
    fn extract_rows(&self, range: &Range<Data>) -> Result<Vec<SourceRow>> {
        let Some((last_row, _)) = range.end() else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        let mut header_seen = false;

        for row in 0..=last_row {
            let raw = InventoryColumn::ALL.map(|column| range.get_value((row, column.index())));
            let text = raw.map(|cell| cell.and_then(cell_text));

            if text.iter().all(Option::is_none) {
                continue;
            }

            match match_header(&text) {
                HeaderMatch::Full => {
                    debug!("Header row at {}", row + 1);
                    header_seen = true;
                    continue;
                }
                HeaderMatch::Partial(mismatched) => {
                    return Err(RackError::SourceFormat {
                        path: self.path.clone(),
                        reason: format!(
                            "unexpected header at row {}: {}",
                            row + 1,
                            describe_mismatch(&mismatched)
                        ),
                    });
                }
                HeaderMatch::None => {}
            }

            if !header_seen {
                return Err(RackError::SourceFormat {
                    path: self.path.clone(),
                    reason: format!("data at row {} precedes the header row", row + 1),
                });
            }

            let missing: Vec<String> = InventoryColumn::ALL
                .iter()
                .zip(text.iter())
                .filter(|(_, cell)| cell.is_none())
                .map(|(column, _)| format!("'{}' ({})", column.label(), column.letter()))
                .collect();

            if !missing.is_empty() {
                return Err(RackError::MisalignedColumns {
                    path: self.path.clone(),
                    row: row + 1,
                    missing: missing.join(", "),
                });
            }

            let [arrival_cell, _, _, _] = raw;
            let [_, location, reservation_number, last_name] = text;

            let arrival_time = arrival_cell
                .and_then(parse_arrival)
                .ok_or_else(|| RackError::SourceFormat {
                    path: self.path.clone(),
                    reason: format!(
                        "row {}: cannot read arrival time from {:?}",
                        row + 1,
                        arrival_cell
                    ),
                })?;

            rows.push(SourceRow {
                row: row + 1,
                arrival_time,
                location: location.unwrap_or_default(),
                reservation_number: reservation_number.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
            });
        }

        Ok(rows)
    }
}

/// Text of a cell, or `None` when the cell counts as blank
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => {
            if s.trim().is_empty() {
                return None;
            }
            s.clone()
        }
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => value.to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    Some(text)
}

/// Arrival timestamp from a date cell, an Excel serial number or text.
///
/// Serial values are floating point days, so they are rounded to the
/// nearest second before use.
fn parse_arrival(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_arrival_text(s),
        other => other
            .as_datetime()
            .and_then(|value| value.duration_round(TimeDelta::seconds(1)).ok()),
    }
}

fn parse_arrival_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    ARRIVAL_TEXT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
