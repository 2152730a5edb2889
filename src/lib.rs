//! # pycensus
//!
//! A static census of Python source trees. The crate walks a root
//! directory, parses each Python file with tree-sitter, and reports
//! per-file and aggregate counts of total lines, non-blank lines,
//! statements, and commented lines.
//!
//! ## Features
//!
//! - AST-driven statement counting (multi-line statements count once,
//!   every control-flow header counts once)
//! - Comment metric that distinguishes `#` comments and bare
//!   triple-quoted strings from string literals that merely contain `#`
//! - Regex exclusion of files by path and of def/class bodies by name
//! - Files that fail to parse are listed as excluded and contribute
//!   nothing to the totals
//! - Terminal table and JSON report output
//!
//! ## Usage
//!
//! ```no_run
//! use pycensus::census_directory;
//!
//! let report = census_directory("./my-project").unwrap();
//! println!("{} statements", report.totals.statement_count);
//! ```

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod output;

pub use analyzer::{
    analyze_file, AggregateRecord, CensusEngine, CensusReport, CountRecord, ExcludedFile,
    ExclusionReason, ExclusionRules, FileOutcome,
};
pub use cli::{CliArgs, OutputFormat};
pub use error::{CensusError, Result};
pub use output::OutputManager;

use std::path::Path;

/// Run the full census pipeline for the given CLI arguments:
/// validate, discover, analyze, aggregate, and produce output.
pub fn run_census(args: &CliArgs) -> Result<()> {
    args.validate()?;

    let engine = CensusEngine::from_cli_args(args)?;
    let report = engine.run(args.target_path())?;

    let output = OutputManager::from_cli_args(args);
    output.generate_output(&report)?;

    Ok(())
}

/// Convenience function to census a directory with default settings
pub fn census_directory<P: AsRef<Path>>(path: P) -> Result<CensusReport> {
    let args = CliArgs {
        path: Some(path.as_ref().to_path_buf()),
        ..Default::default()
    };

    let engine = CensusEngine::from_cli_args(&args)?;
    engine.run(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_census_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("main.py"),
            "x = 1\ny = 2\n\nprint(x + y)\n",
        )
        .unwrap();

        let report = census_directory(dir.path()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.totals.total_lines, 4);
        assert_eq!(report.totals.non_blank_lines, 3);
        assert_eq!(report.totals.statement_count, 3);
    }

    #[test]
    fn test_census_directory_nonexistent() {
        let args = CliArgs {
            path: Some("/definitely/not/here".into()),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_run_census_json_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "import sys\n").unwrap();
        let json_path = dir.path().join("report.json");

        let args = CliArgs {
            path: Some(dir.path().to_path_buf()),
            output: OutputFormat::Json,
            output_file: Some(json_path.clone()),
            ..Default::default()
        };

        run_census(&args).unwrap();
        assert!(json_path.exists());

        let content = fs::read_to_string(&json_path).unwrap();
        let report: CensusReport = serde_json::from_str(&content).unwrap();
        assert_eq!(report.totals.files, 1);
        assert_eq!(report.totals.statement_count, 1);
    }
}
