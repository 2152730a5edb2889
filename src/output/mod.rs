pub mod json;
pub mod terminal;

pub use json::JsonExporter;
pub use terminal::TerminalReporter;

use std::fs;

use crate::analyzer::records::CensusReport;
use crate::cli::{CliArgs, OutputFormat};
use crate::error::Result;

/// Coordinates terminal and JSON output according to the CLI arguments
pub struct OutputManager {
    format: OutputFormat,
    reporter: TerminalReporter,
    exporter: JsonExporter,
    report_file: Option<std::path::PathBuf>,
    json_path: std::path::PathBuf,
}

impl OutputManager {
    /// Build an output manager from the parsed CLI arguments
    pub fn from_cli_args(args: &CliArgs) -> Self {
        let reporter = TerminalReporter::new().color_enabled(args.should_use_colors());

        // With table-only output, --output-file captures the rendered
        // text report instead of JSON
        let report_file = match args.output {
            OutputFormat::Table => args.output_file.clone(),
            _ => None,
        };

        Self {
            format: args.output.clone(),
            reporter,
            exporter: JsonExporter::new(),
            report_file,
            json_path: args.json_output_path(),
        }
    }

    /// Produce all requested output artifacts for the report
    pub fn generate_output(&self, report: &CensusReport) -> Result<()> {
        if matches!(self.format, OutputFormat::Table | OutputFormat::Both) {
            self.reporter.display_report(report)?;

            if let Some(path) = &self.report_file {
                let text = self.reporter.render_report(report)?;
                fs::write(path, text)?;
                println!("Report written to: {}", path.display());
            }
        }

        if matches!(self.format, OutputFormat::Json | OutputFormat::Both) {
            self.exporter.export_to_file(report, &self.json_path)?;
            println!("JSON report written to: {}", self.json_path.display());
        }

        Ok(())
    }
}
