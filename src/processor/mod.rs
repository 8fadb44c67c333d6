//! Report generation pipeline.
//!
//! Orchestrates one run: read the inventory sheet, assemble records, apply
//! the racking and pulling predicates, and write the reports. The reference
//! time is always passed in by the caller.

pub mod assembler;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{assembler::assemble, reader::InventoryReader, writer::ReportWriter};

use crate::config::ReportConfig;
use crate::error::{RackError, Result};
use crate::filters::ReportWindows;
use crate::models::{ReportStats, RecordSet};

use chrono::NaiveDateTime;
use std::time::Instant;
use tracing::info;

/// Main processor for inventory reports
#[derive(Debug)]
pub struct ReportProcessor {
    config: ReportConfig,
    reader: InventoryReader,
    writer: ReportWriter,
}

impl ReportProcessor {
    /// Create a processor for a validated configuration
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;

        if !config.source_path.exists() {
            return Err(RackError::SourceNotFound {
                path: config.source_path.clone(),
                reason: "file does not exist".to_string(),
            });
        }

        Ok(Self {
            reader: InventoryReader::new(&config.source_path, &config.sheet_name),
            writer: ReportWriter::new(config.clone()),
            config,
        })
    }

    /// Use non-standard report windows
    pub fn with_windows(mut self, windows: ReportWindows) -> Self {
        self.writer = self.writer.with_windows(windows);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read and assemble the inventory without writing anything
    pub fn load_records(&self) -> Result<(RecordSet, ReportStats)> {
        let rows = self.reader.read_rows()?;
        let rows_read = rows.len();
        let assembly = assemble(rows, self.config.key_field);

        let stats = ReportStats {
            rows_read,
            records: assembly.records.len(),
            duplicate_keys: assembly.duplicate_keys,
            ..Default::default()
        };

        Ok((assembly.records, stats))
    }

    /// Run the full pipeline against the given reference time
    pub fn process(&self, now: NaiveDateTime) -> Result<ReportStats> {
        let start_time = Instant::now();

        info!(
            "Generating reports from {} [{}] at {}",
            self.config.source_path.display(),
            self.config.sheet_name,
            now
        );

        let (records, mut stats) = self.load_records()?;
        info!(
            "Assembled {} records from {} rows",
            stats.records, stats.rows_read
        );

        let summary = self.writer.write(&records, now)?;

        stats.to_rack = summary.to_rack;
        stats.from_rack = summary.from_rack;
        stats.output_paths = summary.paths;
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Reports written: {} to rack, {} from rack",
            stats.to_rack, stats.from_rack
        );

        Ok(stats)
    }
}
