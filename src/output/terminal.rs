use prettytable::{format, row, Cell, Row, Table};

use crate::analyzer::records::{AggregateRecord, CensusReport, CountRecord, ExcludedFile};
use crate::error::Result;

/// Terminal reporter rendering the census in three parts: the
/// exclusion manifest, the per-file metrics table, and the aggregate
/// totals line
pub struct TerminalReporter {
    show_manifest: bool,
    color_enabled: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings
    pub fn new() -> Self {
        Self {
            show_manifest: true,
            color_enabled: true,
        }
    }

    /// Enable or disable the exclusion manifest section
    pub fn show_manifest(mut self, show: bool) -> Self {
        self.show_manifest = show;
        self
    }

    /// Enable or disable colored output
    pub fn color_enabled(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    /// Print the complete report to stdout
    pub fn display_report(&self, report: &CensusReport) -> Result<()> {
        print!("{}", self.render_report(report)?);
        Ok(())
    }

    /// Render the complete report as text (same layout as the terminal
    /// output, suitable for writing to a report file)
    pub fn render_report(&self, report: &CensusReport) -> Result<String> {
        let mut out = String::new();

        out.push_str("Python Code Census\n");
        out.push_str("==================\n\n");

        if self.show_manifest {
            out.push_str(&render_manifest(&report.excluded));
            out.push('\n');
        }

        if report.files.is_empty() {
            out.push_str("No Python files counted.\n");
        } else {
            let table = self.format_metrics_table(&report.files);
            out.push_str(&table.to_string());
        }

        out.push('\n');
        out.push_str(&render_totals_line(&report.totals));
        out.push('\n');

        Ok(out)
    }

    /// Format the per-file metrics as a table
    pub fn format_metrics_table(&self, files: &[CountRecord]) -> Table {
        let mut table = Table::new();

        if self.color_enabled {
            table.set_format(*format::consts::FORMAT_DEFAULT);
        } else {
            table.set_format(*format::consts::FORMAT_NO_COLSEP);
        }

        table.add_row(row![
            bFg->"File",
            bFg->"Lines",
            bFg->"Non-blank",
            bFg->"Statements",
            bFg->"Comments"
        ]);

        for file in files {
            table.add_row(Row::new(vec![
                Cell::new(&format_file_path(&file.path)),
                Cell::new(&file.total_lines.to_string()).style_spec("r"),
                Cell::new(&file.non_blank_lines.to_string()).style_spec("r"),
                Cell::new(&file.statement_count.to_string()).style_spec("r"),
                Cell::new(&file.comment_lines.to_string()).style_spec("r"),
            ]));
        }

        table
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the exclusion manifest section
fn render_manifest(excluded: &[ExcludedFile]) -> String {
    if excluded.is_empty() {
        return "No files excluded.\n".to_string();
    }

    let mut out = format!("Excluded files ({}):\n", excluded.len());
    for entry in excluded {
        out.push_str(&format!(
            "  {} ({})\n",
            format_file_path(&entry.path),
            entry.reason
        ));
    }
    out
}

/// Render the final aggregate totals line
fn render_totals_line(totals: &AggregateRecord) -> String {
    format!(
        "Total: {} files, {} lines, {} non-blank, {} statements, {} commented",
        totals.files,
        totals.total_lines,
        totals.non_blank_lines,
        totals.statement_count,
        totals.comment_lines
    )
}

/// Format file path for display (truncate if too long)
fn format_file_path(path: &std::path::Path) -> String {
    let path_str = path.display().to_string();
    const MAX_PATH_LENGTH: usize = 60;

    if path_str.len() > MAX_PATH_LENGTH {
        let start = path_str.len() - MAX_PATH_LENGTH + 3;
        // The byte offset may land inside a multi-byte character; cut
        // at the next char boundary instead
        let cut = path_str
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| i >= start)
            .unwrap_or(path_str.len());
        format!("...{}", &path_str[cut..])
    } else {
        path_str
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::records::{CensusConfig, ExclusionReason};
    use chrono::Utc;
    use std::path::PathBuf;

    fn sample_report() -> CensusReport {
        let files = vec![
            CountRecord {
                path: PathBuf::from("src/app.py"),
                total_lines: 120,
                non_blank_lines: 95,
                statement_count: 48,
                comment_lines: 12,
            },
            CountRecord {
                path: PathBuf::from("src/util.py"),
                total_lines: 30,
                non_blank_lines: 22,
                statement_count: 11,
                comment_lines: 4,
            },
        ];
        let totals = AggregateRecord::accumulate(&files);

        CensusReport {
            files,
            excluded: vec![
                ExcludedFile {
                    path: PathBuf::from("src/broken.py"),
                    reason: ExclusionReason::ParseError,
                },
                ExcludedFile {
                    path: PathBuf::from("tests/test_app.py"),
                    reason: ExclusionReason::PathPattern {
                        pattern: ".*test.*".to_string(),
                    },
                },
            ],
            totals,
            config: CensusConfig {
                root: PathBuf::from("."),
                exclude_paths: vec![".*test.*".to_string()],
                exclude_names: vec![],
                include_hidden: false,
                follow_symlinks: true,
            },
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_report_has_three_parts() {
        let reporter = TerminalReporter::new().color_enabled(false);
        let text = reporter.render_report(&sample_report()).unwrap();

        // Part 1: manifest with triggering rule
        assert!(text.contains("Excluded files (2):"));
        assert!(text.contains("broken.py (parse error)"));
        assert!(text.contains("test_app.py (pattern .*test.*)"));

        // Part 2: per-file table
        assert!(text.contains("app.py"));
        assert!(text.contains("120"));

        // Part 3: totals line
        assert!(text.contains("Total: 2 files, 150 lines, 117 non-blank, 59 statements, 16 commented"));
    }

    #[test]
    fn test_render_report_without_manifest() {
        let reporter = TerminalReporter::new()
            .show_manifest(false)
            .color_enabled(false);
        let text = reporter.render_report(&sample_report()).unwrap();
        assert!(!text.contains("Excluded files"));
        assert!(text.contains("Total: 2 files"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = CensusReport {
            files: vec![],
            excluded: vec![],
            totals: AggregateRecord::default(),
            config: sample_report().config,
            generated_at: Utc::now(),
        };

        let reporter = TerminalReporter::new().color_enabled(false);
        let text = reporter.render_report(&report).unwrap();
        assert!(text.contains("No files excluded."));
        assert!(text.contains("No Python files counted."));
        assert!(text.contains("Total: 0 files"));
    }

    #[test]
    fn test_format_metrics_table_row_count() {
        let report = sample_report();
        let reporter = TerminalReporter::new();
        let table = reporter.format_metrics_table(&report.files);

        // Header row plus one row per file
        assert_eq!(table.len(), report.files.len() + 1);
    }

    #[test]
    fn test_format_file_path() {
        // Short path should remain unchanged
        let short_path = PathBuf::from("src/app.py");
        assert_eq!(format_file_path(&short_path), "src/app.py");

        // Long path should be truncated
        let long_path =
            PathBuf::from("very/long/path/to/some/deeply/nested/directory/structure/file.py");
        let formatted = format_file_path(&long_path);
        assert!(formatted.starts_with("..."));
        assert!(formatted.len() <= 63); // 60 + "..."
    }

    #[test]
    fn test_format_file_path_multibyte_truncation() {
        // Truncation offset can fall inside a multi-byte character;
        // the cut must move to the next char boundary, not panic
        let long_path = PathBuf::from(
            "каталог/подкаталог/очень/длинный/путь/до/исходников/пакета/модуль.py",
        );
        assert!(long_path.display().to_string().len() > 60);

        let formatted = format_file_path(&long_path);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("модуль.py"));
    }

    #[test]
    fn test_render_report_with_long_multibyte_path() {
        let mut report = sample_report();
        report.files[0].path = PathBuf::from(
            "каталог/подкаталог/очень/длинный/путь/до/исходников/пакета/модуль.py",
        );

        let reporter = TerminalReporter::new().color_enabled(false);
        let text = reporter.render_report(&report).unwrap();
        assert!(text.contains("модуль.py"));
    }

    #[test]
    fn test_totals_line_format() {
        let totals = AggregateRecord {
            files: 3,
            total_lines: 10,
            non_blank_lines: 8,
            statement_count: 5,
            comment_lines: 2,
        };
        let line = render_totals_line(&totals);
        assert_eq!(
            line,
            "Total: 3 files, 10 lines, 8 non-blank, 5 statements, 2 commented"
        );
    }
}
