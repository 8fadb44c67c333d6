//! Folds inventory rows into a keyed record set.

use super::reader::SourceRow;
use crate::models::{KeyField, ParkingRecord, RecordSet};
use tracing::warn;

/// Result of assembling rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub records: RecordSet,
    /// Rows that replaced an earlier record with the same key
    pub duplicate_keys: usize,
}

/// Build the record set; a later row with an existing key replaces the
/// earlier record but keeps its position
pub fn assemble(rows: Vec<SourceRow>, key_field: KeyField) -> Assembly {
    let mut assembly = Assembly::default();

    for row in rows {
        let line = row.row;
        let record = ParkingRecord::new(
            row.last_name,
            row.location,
            row.reservation_number,
            row.arrival_time,
        );
        let key = record.key(key_field).to_string();

        if let Some(previous) = assembly.records.insert(key.clone(), record) {
            assembly.duplicate_keys += 1;
            warn!(
                "Row {} replaces earlier record for '{}' (reservation {})",
                line, key, previous.reservation_number
            );
        }
    }

    assembly
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn arrival(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn row(row: u32, name: &str, location: &str, reservation: &str, hour: u32) -> SourceRow {
        SourceRow {
            row,
            arrival_time: arrival(hour),
            location: location.to_string(),
            reservation_number: reservation.to_string(),
            last_name: name.to_string(),
        }
    }

    #[test]
    fn test_assemble_keyed_by_last_name() {
        let rows = vec![
            row(2, "Smith", "A12", "R001", 9),
            row(3, "Jones", "RACK", "R002", 10),
        ];

        let assembly = assemble(rows, KeyField::LastName);

        assert_eq!(assembly.records.len(), 2);
        assert_eq!(assembly.duplicate_keys, 0);
        let smith = assembly.records.get("Smith").unwrap();
        assert_eq!(smith.location, "A12");
        assert_eq!(smith.reservation_number, "R001");
        assert_eq!(smith.arrival_time, arrival(9));
    }

    #[test]
    fn test_name_collision_last_write_wins() {
        let rows = vec![
            row(2, "Smith", "A12", "R001", 9),
            row(3, "Jones", "RACK", "R002", 10),
            row(4, "Smith", "C7", "R003", 11),
        ];

        let assembly = assemble(rows, KeyField::LastName);

        assert_eq!(assembly.records.len(), 2);
        assert_eq!(assembly.duplicate_keys, 1);
        assert_eq!(assembly.records.get("Smith").unwrap().reservation_number, "R003");
        let keys: Vec<_> = assembly.records.keys().collect();
        assert_eq!(keys, vec!["Smith", "Jones"]);
    }

    #[test]
    fn test_reservation_key_keeps_namesakes() {
        let rows = vec![
            row(2, "Smith", "A12", "R001", 9),
            row(3, "Smith", "C7", "R003", 11),
        ];

        let assembly = assemble(rows, KeyField::ReservationNumber);

        assert_eq!(assembly.records.len(), 2);
        assert_eq!(assembly.duplicate_keys, 0);
        assert_eq!(assembly.records.get("R003").unwrap().last_name, "Smith");
    }

    #[test]
    fn test_assemble_empty() {
        let assembly = assemble(Vec::new(), KeyField::LastName);
        assert!(assembly.records.is_empty());
    }
}
