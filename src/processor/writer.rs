//! Report writing for racking and pulling lists.
//!
//! Selects the matching records for each report, formats them, and writes
//! each output file atomically: the new contents go to a temporary file in
//! the target directory which is then renamed over the target.

use crate::config::ReportConfig;
use crate::constants::{FROM_RACK_HEADING, REPORT_TIMESTAMP_FORMAT, TO_RACK_HEADING};
#[cfg(unix)]
use crate::constants::NEW_REPORT_MODE;
use crate::error::{RackError, Result};
use crate::filters::ReportWindows;
use crate::models::{OutputMode, ParkingRecord, RecordSet};

use chrono::NaiveDateTime;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Records matched by each report, in output order
#[derive(Debug, Default)]
pub struct Selection<'a> {
    pub to_rack: Vec<&'a ParkingRecord>,
    pub from_rack: Vec<&'a ParkingRecord>,
}

/// Outcome of writing the reports
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub to_rack: usize,
    pub from_rack: usize,
    pub paths: Vec<PathBuf>,
}

/// Writer for the racking reports
#[derive(Debug)]
pub struct ReportWriter {
    config: ReportConfig,
    windows: ReportWindows,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            windows: ReportWindows::default(),
        }
    }

    /// Use non-standard report windows
    pub fn with_windows(mut self, windows: ReportWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Apply both predicates to every record
    pub fn select<'a>(&self, records: &'a RecordSet, now: NaiveDateTime) -> Selection<'a> {
        let mut selection = Selection::default();

        for record in records.records() {
            if self.windows.needs_racking(record, now) {
                selection.to_rack.push(record);
            }
            if self.windows.needs_pulling(record, now) {
                selection.from_rack.push(record);
            }
        }

        if self.config.sort_by_arrival {
            selection.to_rack.sort_by_key(|record| record.arrival_time);
            selection.from_rack.sort_by_key(|record| record.arrival_time);
        }

        selection
    }

    /// Write the reports for the configured output mode
    pub fn write(&self, records: &RecordSet, now: NaiveDateTime) -> Result<WriteSummary> {
        let selection = self.select(records, now);

        debug!(
            "Selected {} records to rack and {} to pull at {}",
            selection.to_rack.len(),
            selection.from_rack.len(),
            now
        );

        let paths = match self.config.output_mode {
            OutputMode::Split => {
                // Both files are staged before either target is replaced
                let to_rack = stage(
                    &self.config.to_rack_path,
                    &render_detail(&selection.to_rack),
                    false,
                )?;
                let from_rack = stage(
                    &self.config.from_rack_path,
                    &render_detail(&selection.from_rack),
                    false,
                )?;
                commit(to_rack, &self.config.to_rack_path)?;
                commit(from_rack, &self.config.from_rack_path)?;
                vec![
                    self.config.to_rack_path.clone(),
                    self.config.from_rack_path.clone(),
                ]
            }
            OutputMode::Combined => {
                let report =
                    stage(&self.config.combined_path, &render_combined(&selection), true)?;
                commit(report, &self.config.combined_path)?;
                vec![self.config.combined_path.clone()]
            }
        };

        Ok(WriteSummary {
            to_rack: selection.to_rack.len(),
            from_rack: selection.from_rack.len(),
            paths,
        })
    }
}

/// Split-mode line
pub fn format_detail_line(record: &ParkingRecord) -> String {
    format!(
        "Last Name: {}, Parked Location: {}, Reservation Number: {}, Arrival Date: {}",
        record.last_name,
        record.location,
        record.reservation_number,
        record.arrival_time.format(REPORT_TIMESTAMP_FORMAT)
    )
}

/// Combined-mode line
pub fn format_summary_line(record: &ParkingRecord) -> String {
    format!(
        "{}, {}, {}, {}",
        record.arrival_time.format(REPORT_TIMESTAMP_FORMAT),
        record.last_name,
        record.reservation_number,
        record.location
    )
}

/// Body of a split-mode report file
pub fn render_detail(records: &[&ParkingRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format_detail_line(record));
        out.push('\n');
    }
    out
}

/// One combined-mode section: both headings with their records
pub fn render_combined(selection: &Selection<'_>) -> String {
    let mut out = String::new();

    out.push_str(TO_RACK_HEADING);
    out.push('\n');
    for record in &selection.to_rack {
        out.push_str(&format_summary_line(record));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(FROM_RACK_HEADING);
    out.push('\n');
    for record in &selection.from_rack {
        out.push_str(&format_summary_line(record));
        out.push('\n');
    }

    out
}

/// Write the new contents of `path` to a temporary file beside it: either
/// `contents` alone, or the current file followed by `contents` when
/// appending. The target itself is not touched.
fn stage(path: &Path, contents: &str, append: bool) -> Result<NamedTempFile> {
    let existing = if append {
        match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(RackError::io_write(path, e)),
        }
    } else {
        Vec::new()
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(directory).map_err(|e| RackError::io_write(path, e))?;

    temp.write_all(&existing)
        .and_then(|_| temp.write_all(contents.as_bytes()))
        .and_then(|_| temp.flush())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| RackError::io_write(path, e))?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_report_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| RackError::io_write(path, e))?;
    }

    debug!(
        "Staged {} bytes for {} ({})",
        contents.len(),
        path.display(),
        if append { "append" } else { "overwrite" }
    );

    Ok(temp)
}

/// Rename a staged file over its target
fn commit(temp: NamedTempFile, path: &Path) -> Result<()> {
    temp.persist(path)
        .map_err(|e| RackError::io_write(path, e.error))?;
    debug!("Replaced {}", path.display());
    Ok(())
}

/// Temporary files are created owner-only; new reports get the usual mode
#[cfg(unix)]
fn new_report_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(NEW_REPORT_MODE))
}

#[cfg(not(unix))]
fn new_report_permissions() -> Option<fs::Permissions> {
    None
}
