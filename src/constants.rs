//! Constants describing the inventory spreadsheet layout and report defaults.
//!
//! Column positions are part of the external contract with the parking
//! inventory export: they are zero-based absolute column indices, so
//! `LOCATION_COLUMN = 0` is spreadsheet column A regardless of where the
//! sheet's used range begins.

// =============================================================================
// Source Spreadsheet
// =============================================================================

/// Default inventory workbook path
pub const DEFAULT_SOURCE_PATH: &str = "ParkedLocationInventory.xlsx";

/// Default sheet holding the inventory
pub const DEFAULT_SHEET_NAME: &str = "ParkedLocationInventory";

/// Column L
pub const ARRIVAL_COLUMN: u32 = 11;

/// Column A
pub const LOCATION_COLUMN: u32 = 0;

/// Column E
pub const RESERVATION_COLUMN: u32 = 4;

/// Column G
pub const LAST_NAME_COLUMN: u32 = 6;

pub const ARRIVAL_LABEL: &str = "Arrival Scheduled";
pub const LOCATION_LABEL: &str = "Parked Location";
pub const RESERVATION_LABEL: &str = "Reservation#";
pub const LAST_NAME_LABEL: &str = "Last Name";

/// Formats accepted for arrival cells stored as text
pub const ARRIVAL_TEXT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

// =============================================================================
// Report Windows
// =============================================================================

/// Minimum lead time before arrival for a vehicle to be racked (3 days)
pub const RACK_LEAD_HOURS: i64 = 72;

/// Look-ahead window for vehicles to pull from the rack (1.5 days)
pub const PULL_WINDOW_HOURS: i64 = 36;

/// Location code of the long-term rack itself
pub const RACK_LOCATION: &str = "RACK";

/// Terminal zone excluded from both reports
pub const TERMINAL_3_MARKER: &str = "T3";

/// Terminal zone excluded from the pull report
pub const TERMINAL_4_MARKER: &str = "T4";

// =============================================================================
// Report Output
// =============================================================================

pub const DEFAULT_TO_RACK_FILE: &str = "to_rack.txt";
pub const DEFAULT_FROM_RACK_FILE: &str = "from_rack.txt";
pub const DEFAULT_COMBINED_FILE: &str = "parking_report.txt";

/// Unix mode given to report files that do not exist yet
pub const NEW_REPORT_MODE: u32 = 0o644;

/// Timestamp layout used in every report line
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const TO_RACK_HEADING: &str = "TO RACK:";
pub const FROM_RACK_HEADING: &str = "FROM RACK:";

// =============================================================================
// Logging
// =============================================================================

/// Target used for the default `EnvFilter` directive
pub const LOG_TARGET: &str = "rack_report";
