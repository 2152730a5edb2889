use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-file metrics, immutable once produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    pub path: PathBuf,
    pub total_lines: usize,
    pub non_blank_lines: usize,
    pub statement_count: usize,
    pub comment_lines: usize,
}

/// Why a file was left out of the census
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Path matched an exclusion pattern
    PathPattern { pattern: String },
    /// Source failed to parse
    ParseError,
    /// File could not be read
    Io { message: String },
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::PathPattern { pattern } => write!(f, "pattern {pattern}"),
            ExclusionReason::ParseError => write!(f, "parse error"),
            ExclusionReason::Io { message } => write!(f, "io error: {message}"),
        }
    }
}

/// An excluded file and the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedFile {
    pub path: PathBuf,
    pub reason: ExclusionReason,
}

/// Sums over all included files; excluded files contribute zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub files: usize,
    pub total_lines: usize,
    pub non_blank_lines: usize,
    pub statement_count: usize,
    pub comment_lines: usize,
}

impl AggregateRecord {
    /// Fold a set of per-file records into totals
    pub fn accumulate(records: &[CountRecord]) -> Self {
        let mut totals = Self::default();
        for record in records {
            totals.files += 1;
            totals.total_lines += record.total_lines;
            totals.non_blank_lines += record.non_blank_lines;
            totals.statement_count += record.statement_count;
            totals.comment_lines += record.comment_lines;
        }
        totals
    }
}

/// Configuration used for the census run, echoed into the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusConfig {
    pub root: PathBuf,
    pub exclude_paths: Vec<String>,
    pub exclude_names: Vec<String>,
    pub include_hidden: bool,
    pub follow_symlinks: bool,
}

/// Complete census report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusReport {
    pub files: Vec<CountRecord>,
    pub excluded: Vec<ExcludedFile>,
    pub totals: AggregateRecord,
    pub config: CensusConfig,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, lines: usize, non_blank: usize, stmts: usize, comments: usize) -> CountRecord {
        CountRecord {
            path: PathBuf::from(path),
            total_lines: lines,
            non_blank_lines: non_blank,
            statement_count: stmts,
            comment_lines: comments,
        }
    }

    #[test]
    fn test_accumulate_sums_all_fields() {
        let records = vec![
            record("a.py", 100, 80, 40, 10),
            record("b.py", 50, 30, 12, 5),
            record("c.py", 7, 7, 3, 0),
        ];

        let totals = AggregateRecord::accumulate(&records);
        assert_eq!(totals.files, 3);
        assert_eq!(totals.total_lines, 157);
        assert_eq!(totals.non_blank_lines, 117);
        assert_eq!(totals.statement_count, 55);
        assert_eq!(totals.comment_lines, 15);
    }

    #[test]
    fn test_accumulate_empty() {
        let totals = AggregateRecord::accumulate(&[]);
        assert_eq!(totals, AggregateRecord::default());
    }

    #[test]
    fn test_exclusion_reason_display() {
        let reason = ExclusionReason::PathPattern {
            pattern: ".*test.*".to_string(),
        };
        assert_eq!(reason.to_string(), "pattern .*test.*");

        assert_eq!(ExclusionReason::ParseError.to_string(), "parse error");

        let reason = ExclusionReason::Io {
            message: "permission denied".to_string(),
        };
        assert!(reason.to_string().contains("permission denied"));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = CensusReport {
            files: vec![record("a.py", 10, 8, 4, 1)],
            excluded: vec![ExcludedFile {
                path: PathBuf::from("bad.py"),
                reason: ExclusionReason::ParseError,
            }],
            totals: AggregateRecord::accumulate(&[record("a.py", 10, 8, 4, 1)]),
            config: CensusConfig {
                root: PathBuf::from("."),
                exclude_paths: vec![],
                exclude_names: vec![],
                include_hidden: false,
                follow_symlinks: true,
            },
            generated_at: Utc::now(),
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: CensusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.files, report.files);
        assert_eq!(back.excluded, report.excluded);
        assert_eq!(back.totals, report.totals);
    }
}
