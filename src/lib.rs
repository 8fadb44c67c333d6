//! Rack Report Library
//!
//! Generates the daily valet racking reports from a parked-location
//! inventory spreadsheet.
//!
//! This library provides tools for:
//! - Reading the inventory sheet row by row with header validation
//! - Assembling reservations into a keyed, insertion-ordered record set
//! - Selecting vehicles to move onto the rack (arrivals 3+ days out)
//! - Selecting vehicles to pull from the rack (arrivals within 36 hours)
//! - Writing split or combined text reports atomically

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod header;
pub mod models;
pub mod processor;

pub use config::ReportConfig;
pub use error::{RackError, Result};
pub use filters::{ReportWindows, needs_pulling, needs_racking};
pub use models::{KeyField, OutputMode, ParkingRecord, RecordSet, ReportStats};
pub use processor::ReportProcessor;
