//! Pipeline tests for the processor module
//!
//! Tests build real inventory workbooks in temporary directories and run
//! them through the reader, assembler and writer.


use crate::header::InventoryColumn;
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const SHEET: &str = "ParkedLocationInventory";

/// Cell content in a fixture row
#[derive(Debug, Clone)]
pub enum Cell {
    Blank,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Row values in arrival, location, reservation, last name order
pub type FixtureRow = [Cell; 4];

pub fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn header_row() -> FixtureRow {
    InventoryColumn::ALL.map(|column| Cell::from(column.label()))
}

pub fn data_row(arrival: NaiveDateTime, location: &str, reservation: &str, name: &str) -> FixtureRow {
    [
        Cell::DateTime(arrival),
        location.into(),
        reservation.into(),
        name.into(),
    ]
}

/// Write `rows` to a new workbook; rows are placed from the first sheet row
pub fn write_inventory(path: &Path, sheet: &str, rows: &[FixtureRow]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32;
        for (column, cell) in InventoryColumn::ALL.iter().zip(row.iter()) {
            let col_num = column.index() as u16;
            match cell {
                Cell::Blank => {}
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col_num, text).unwrap();
                }
                Cell::Number(value) => {
                    worksheet.write_number(row_num, col_num, *value).unwrap();
                }
                Cell::DateTime(value) => {
                    worksheet
                        .write_datetime_with_format(row_num, col_num, value, &date_format)
                        .unwrap();
                }
            }
        }
        // Unrelated export column that the report ignores
        if !matches!(row, [Cell::Blank, Cell::Blank, Cell::Blank, Cell::Blank]) {
            worksheet.write_string(row_num, 2, "Sedan").unwrap();
        }
    }

    workbook.save(path).unwrap();
}
