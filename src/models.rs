//! Core data structures for report generation.
//!
//! Defines the parking record, the insertion-ordered record set produced by
//! the assembler, and the statistics reported at the end of a run.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single vehicle reservation taken from the inventory sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingRecord {
    pub last_name: String,
    pub location: String,
    pub reservation_number: String,
    pub arrival_time: NaiveDateTime,
}

impl ParkingRecord {
    pub fn new(
        last_name: impl Into<String>,
        location: impl Into<String>,
        reservation_number: impl Into<String>,
        arrival_time: NaiveDateTime,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            location: location.into(),
            reservation_number: reservation_number.into(),
            arrival_time,
        }
    }

    /// Value of the field selected as the record set key
    pub fn key(&self, key_field: KeyField) -> &str {
        match key_field {
            KeyField::LastName => &self.last_name,
            KeyField::ReservationNumber => &self.reservation_number,
        }
    }
}

/// Field used to key records within a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyField {
    /// Guest last name (later rows replace earlier ones with the same name)
    #[default]
    LastName,
    /// Reservation number
    ReservationNumber,
}

/// How the reports are laid out on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Separate to-rack and from-rack files, overwritten on every run
    Split,
    /// One report with both sections, appended on every run
    #[default]
    Combined,
}

/// Insertion-ordered mapping from key to record.
///
/// Replacing an existing key keeps the key's original position, so iteration
/// order is the order in which each key was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<(String, ParkingRecord)>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced
    pub fn insert(&mut self, key: String, record: ParkingRecord) -> Option<ParkingRecord> {
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.records[position].1, record)),
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push((key, record));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParkingRecord> {
        self.index.get(key).map(|&position| &self.records[position].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ParkingRecord> {
        self.records.iter().map(|(_, record)| record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(key, _)| key.as_str())
    }
}

/// Report generation statistics
#[derive(Debug, Default)]
pub struct ReportStats {
    pub rows_read: usize,
    pub records: usize,
    pub duplicate_keys: usize,
    pub to_rack: usize,
    pub from_rack: usize,
    pub output_paths: Vec<PathBuf>,
    pub processing_time_ms: u128,
}
