use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analyzer::records::CensusReport;
use crate::error::Result;

/// JSON exporter for census reports
pub struct JsonExporter {
    pretty_print: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter with default settings
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    /// Enable or disable pretty printing
    pub fn pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Serialize the report to a JSON string
    pub fn format_json(&self, report: &CensusReport) -> Result<String> {
        let json = if self.pretty_print {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    /// Write the report as JSON to the given file path
    pub fn export_to_file(&self, report: &CensusReport, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        if self.pretty_print {
            serde_json::to_writer_pretty(&mut writer, report)?;
        } else {
            serde_json::to_writer(&mut writer, report)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::records::{AggregateRecord, CensusConfig, CountRecord};
    use chrono::Utc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_report() -> CensusReport {
        let files = vec![CountRecord {
            path: PathBuf::from("app.py"),
            total_lines: 10,
            non_blank_lines: 8,
            statement_count: 5,
            comment_lines: 1,
        }];
        let totals = AggregateRecord::accumulate(&files);

        CensusReport {
            files,
            excluded: vec![],
            totals,
            config: CensusConfig {
                root: PathBuf::from("."),
                exclude_paths: vec![],
                exclude_names: vec![],
                include_hidden: false,
                follow_symlinks: true,
            },
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_json_pretty() {
        let exporter = JsonExporter::new();
        let json = exporter.format_json(&sample_report()).unwrap();
        assert!(json.contains("\"files\""));
        assert!(json.contains("\"totals\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_format_json_compact() {
        let exporter = JsonExporter::new().pretty_print(false);
        let json = exporter.format_json(&sample_report()).unwrap();
        assert!(json.contains("\"statement_count\":5"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        let exporter = JsonExporter::new();
        exporter.export_to_file(&sample_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: CensusReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.totals.statement_count, 5);
    }
}
