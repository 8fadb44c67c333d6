//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then command-line overrides applied by the CLI layer.

use crate::constants::{
    DEFAULT_COMBINED_FILE, DEFAULT_FROM_RACK_FILE, DEFAULT_SHEET_NAME, DEFAULT_SOURCE_PATH,
    DEFAULT_TO_RACK_FILE,
};
use crate::error::{RackError, Result};
use crate::models::{KeyField, OutputMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Inventory workbook
    pub source_path: PathBuf,

    /// Sheet holding the inventory
    pub sheet_name: String,

    /// Split files or one combined report
    pub output_mode: OutputMode,

    /// Split mode: vehicles to move onto the rack
    pub to_rack_path: PathBuf,

    /// Split mode: vehicles to bring back from the rack
    pub from_rack_path: PathBuf,

    /// Combined mode report, appended on every run
    pub combined_path: PathBuf,

    /// Field keying records within a run
    pub key_field: KeyField,

    /// Order each report section by arrival time instead of sheet order
    pub sort_by_arrival: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_mode: OutputMode::default(),
            to_rack_path: PathBuf::from(DEFAULT_TO_RACK_FILE),
            from_rack_path: PathBuf::from(DEFAULT_FROM_RACK_FILE),
            combined_path: PathBuf::from(DEFAULT_COMBINED_FILE),
            key_field: KeyField::default(),
            sort_by_arrival: false,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RackError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: ReportConfig = toml::from_str(&text).map_err(|e| {
            RackError::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Set both split-mode report paths
    pub fn with_split_paths(
        mut self,
        to_rack: impl Into<PathBuf>,
        from_rack: impl Into<PathBuf>,
    ) -> Self {
        self.to_rack_path = to_rack.into();
        self.from_rack_path = from_rack.into();
        self
    }

    pub fn with_combined_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.combined_path = path.into();
        self
    }

    pub fn with_key_field(mut self, key_field: KeyField) -> Self {
        self.key_field = key_field;
        self
    }

    pub fn with_sort_by_arrival(mut self) -> Self {
        self.sort_by_arrival = true;
        self
    }

    /// Report files this configuration writes
    pub fn output_paths(&self) -> Vec<&Path> {
        match self.output_mode {
            OutputMode::Split => vec![self.to_rack_path.as_path(), self.from_rack_path.as_path()],
            OutputMode::Combined => vec![self.combined_path.as_path()],
        }
    }

    /// Check the configuration is usable before touching any file
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(RackError::configuration("Source path must not be empty"));
        }

        if self.sheet_name.trim().is_empty() {
            return Err(RackError::configuration("Sheet name must not be empty"));
        }

        for path in self.output_paths() {
            if path.as_os_str().is_empty() {
                return Err(RackError::configuration("Output paths must not be empty"));
            }
            if path == self.source_path.as_path() {
                return Err(RackError::configuration(format!(
                    "Output path {} would overwrite the source spreadsheet",
                    path.display()
                )));
            }
        }

        if self.output_mode == OutputMode::Split && self.to_rack_path == self.from_rack_path {
            return Err(RackError::configuration(format!(
                "To-rack and from-rack reports share the same path: {}",
                self.to_rack_path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_inventory_export() {
        let config = ReportConfig::default();
        assert_eq!(config.source_path, PathBuf::from("ParkedLocationInventory.xlsx"));
        assert_eq!(config.sheet_name, "ParkedLocationInventory");
        assert_eq!(config.output_mode, OutputMode::Combined);
        assert_eq!(config.to_rack_path, PathBuf::from("to_rack.txt"));
        assert_eq!(config.from_rack_path, PathBuf::from("from_rack.txt"));
        assert_eq!(config.combined_path, PathBuf::from("parking_report.txt"));
        assert_eq!(config.key_field, KeyField::LastName);
        assert!(!config.sort_by_arrival);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sheet_name = \"Inventory\"").unwrap();
        writeln!(file, "output_mode = \"split\"").unwrap();
        writeln!(file, "key_field = \"reservation-number\"").unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.sheet_name, "Inventory");
        assert_eq!(config.output_mode, OutputMode::Split);
        assert_eq!(config.key_field, KeyField::ReservationNumber);
        assert_eq!(config.to_rack_path, PathBuf::from("to_rack.txt"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sheet = \"Inventory\"").unwrap();

        match ReportConfig::from_file(file.path()) {
            Err(RackError::Configuration { message }) => {
                assert!(message.contains("Failed to parse"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_config_file() {
        let result = ReportConfig::from_file(Path::new("/nonexistent/rack_report.toml"));
        assert!(matches!(result, Err(RackError::Configuration { .. })));
    }

    #[test]
    fn test_split_paths_must_differ() {
        let config = ReportConfig::default()
            .with_output_mode(OutputMode::Split)
            .with_split_paths("report.txt", "report.txt");
        assert!(config.validate().is_err());

        // Combined mode ignores the split paths
        let config = config.with_output_mode(OutputMode::Combined);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_must_not_overwrite_source() {
        let config = ReportConfig::default()
            .with_source_path("inventory.xlsx")
            .with_combined_path("inventory.xlsx");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sheet_name_rejected() {
        let config = ReportConfig::default().with_sheet_name("  ");
        assert!(config.validate().is_err());
    }
}
