//! Racking and pulling predicates.
//!
//! Both predicates are pure functions of a record and a reference time. The
//! reference time is always supplied by the caller; nothing in this module
//! reads the clock.

use crate::constants::{
    PULL_WINDOW_HOURS, RACK_LEAD_HOURS, RACK_LOCATION, TERMINAL_3_MARKER, TERMINAL_4_MARKER,
};
use crate::models::ParkingRecord;
use chrono::{NaiveDateTime, TimeDelta};

/// Time thresholds applied by the report predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    /// Arrivals at least this far away are racked
    pub rack_lead: TimeDelta,
    /// Arrivals closer than this are pulled
    pub pull_window: TimeDelta,
}

impl Default for ReportWindows {
    fn default() -> Self {
        Self {
            rack_lead: TimeDelta::hours(RACK_LEAD_HOURS),
            pull_window: TimeDelta::hours(PULL_WINDOW_HOURS),
        }
    }
}

impl ReportWindows {
    pub fn new(rack_lead: TimeDelta, pull_window: TimeDelta) -> Self {
        Self {
            rack_lead,
            pull_window,
        }
    }

    /// Vehicle is not needed for at least the rack lead time and is not
    /// already racked or parked at terminal 3
    pub fn needs_racking(&self, record: &ParkingRecord, now: NaiveDateTime) -> bool {
        let Some(threshold) = now.checked_add_signed(self.rack_lead) else {
            return false;
        };

        record.arrival_time >= threshold
            && record.location != RACK_LOCATION
            && !record.location.contains(TERMINAL_3_MARKER)
    }

    /// Guest arrives within the pull window and the vehicle is not parked at
    /// terminal 3 or 4
    pub fn needs_pulling(&self, record: &ParkingRecord, now: NaiveDateTime) -> bool {
        let within_window = match now.checked_add_signed(self.pull_window) {
            Some(end) => now <= record.arrival_time && record.arrival_time < end,
            None => now <= record.arrival_time,
        };

        within_window
            && !record.location.contains(TERMINAL_3_MARKER)
            && !record.location.contains(TERMINAL_4_MARKER)
    }
}

/// [`ReportWindows::needs_racking`] with the standard 3 day lead time
pub fn needs_racking(record: &ParkingRecord, now: NaiveDateTime) -> bool {
    ReportWindows::default().needs_racking(record, now)
}

/// [`ReportWindows::needs_pulling`] with the standard 36 hour window
pub fn needs_pulling(record: &ParkingRecord, now: NaiveDateTime) -> bool {
    ReportWindows::default().needs_pulling(record, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn record(location: &str, offset: TimeDelta) -> ParkingRecord {
        ParkingRecord::new("Guest", location, "R100", now() + offset)
    }

    /// Offsets spanning the past, both windows and their boundaries
    fn sample_offsets() -> Vec<TimeDelta> {
        let mut offsets: Vec<TimeDelta> = (-48..=24 * 14).step_by(6).map(TimeDelta::hours).collect();
        offsets.extend([
            TimeDelta::zero(),
            TimeDelta::hours(36) - TimeDelta::seconds(1),
            TimeDelta::hours(36),
            TimeDelta::hours(72) - TimeDelta::seconds(1),
            TimeDelta::hours(72),
        ]);
        offsets
    }

    const SAMPLE_LOCATIONS: &[&str] = &["A12", "RACK", "B3-T3", "T4-07", "T3T4", "rack", "C1"];

    #[test]
    fn test_predicates_are_disjoint() {
        for location in SAMPLE_LOCATIONS {
            for offset in sample_offsets() {
                let record = record(location, offset);
                assert!(
                    !(needs_racking(&record, now()) && needs_pulling(&record, now())),
                    "both predicates matched {:?}",
                    record
                );
            }
        }
    }

    #[test]
    fn test_rack_location_never_racked() {
        for offset in sample_offsets() {
            assert!(!needs_racking(&record("RACK", offset), now()));
        }
    }

    #[test]
    fn test_terminal_3_excluded_from_both_reports() {
        for location in ["T3", "B3-T3", "T3-01", "xT3x"] {
            for offset in sample_offsets() {
                let record = record(location, offset);
                assert!(!needs_racking(&record, now()));
                assert!(!needs_pulling(&record, now()));
            }
        }
    }

    #[test]
    fn test_terminal_4_only_excluded_from_pulling() {
        let soon = record("T4-07", TimeDelta::hours(12));
        assert!(!needs_pulling(&soon, now()));

        let later = record("T4-07", TimeDelta::days(5));
        assert!(needs_racking(&later, now()));
    }

    #[test]
    fn test_rack_boundary_is_inclusive() {
        assert!(needs_racking(&record("A12", TimeDelta::days(3)), now()));
        assert!(!needs_racking(
            &record("A12", TimeDelta::days(3) - TimeDelta::seconds(1)),
            now()
        ));
    }

    #[test]
    fn test_pull_window_bounds() {
        assert!(needs_pulling(&record("C1", TimeDelta::zero()), now()));
        assert!(needs_pulling(
            &record("C1", TimeDelta::hours(36) - TimeDelta::seconds(1)),
            now()
        ));
        assert!(!needs_pulling(&record("C1", TimeDelta::hours(36)), now()));
        assert!(!needs_pulling(&record("C1", -TimeDelta::seconds(1)), now()));
    }

    #[test]
    fn test_location_matching_is_case_sensitive() {
        // Lower-case "rack" is just another location code
        assert!(needs_racking(&record("rack", TimeDelta::days(4)), now()));
        assert!(needs_pulling(&record("t3", TimeDelta::hours(1)), now()));
    }

    #[test]
    fn test_custom_windows() {
        let windows = ReportWindows::new(TimeDelta::days(1), TimeDelta::hours(6));
        let record = record("A12", TimeDelta::hours(30));

        assert!(windows.needs_racking(&record, now()));
        assert!(!windows.needs_pulling(&record, now()));
        assert!(!needs_racking(&record, now()));
        assert!(needs_pulling(&record, now()));
    }

    #[test]
    fn test_overflowing_threshold() {
        let far_future = NaiveDateTime::MAX - TimeDelta::hours(1);
        let record = ParkingRecord::new("Guest", "A12", "R100", NaiveDateTime::MAX);

        assert!(!needs_racking(&record, far_future));
        assert!(needs_pulling(&record, far_future));
    }
}
