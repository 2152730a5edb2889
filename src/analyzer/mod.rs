use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::error::{CensusError, Result};

pub mod comments;
pub mod exclude;
pub mod lines;
pub mod python;
pub mod records;
pub mod statements;
pub mod walker;

pub use comments::count_comment_lines;
pub use exclude::ExclusionRules;
pub use lines::{classify_lines, LineTally};
pub use python::PythonParser;
pub use records::{
    AggregateRecord, CensusConfig, CensusReport, CountRecord, ExcludedFile, ExclusionReason,
};
pub use statements::count_statements;
pub use walker::{Discovery, FileWalker, FilterConfig, WalkStats};

/// Outcome of analyzing one file: counted or excluded with a reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Counted(CountRecord),
    Excluded(ExcludedFile),
}

/// Analyze a single file into a metrics record.
///
/// This only sequences the counters; parse failures and unreadable
/// files become exclusions instead of aborting the run, and an
/// excluded file contributes nothing to any aggregate.
pub fn analyze_file(path: &Path, rules: &ExclusionRules) -> FileOutcome {
    match try_analyze(path, rules) {
        Ok(record) => FileOutcome::Counted(record),
        Err(CensusError::Parse(_)) => FileOutcome::Excluded(ExcludedFile {
            path: path.to_path_buf(),
            reason: ExclusionReason::ParseError,
        }),
        Err(err) => FileOutcome::Excluded(ExcludedFile {
            path: path.to_path_buf(),
            reason: ExclusionReason::Io {
                message: err.to_string(),
            },
        }),
    }
}

fn try_analyze(path: &Path, rules: &ExclusionRules) -> Result<CountRecord> {
    let source = fs::read_to_string(path)?;

    let mut parser = PythonParser::new()?;
    let tree = parser.parse(&source)?;

    let tally = classify_lines(&source);
    let statement_count = count_statements(tree.root_node(), &source, rules);
    let comment_lines = count_comment_lines(&tree, &source);

    Ok(CountRecord {
        path: path.to_path_buf(),
        total_lines: tally.total_lines,
        non_blank_lines: tally.non_blank_lines,
        statement_count,
        comment_lines,
    })
}

/// Census engine: discovery, per-file analysis, aggregation
pub struct CensusEngine {
    walker: FileWalker,
    rules: ExclusionRules,
    config: CensusConfig,
    show_progress: bool,
}

impl CensusEngine {
    /// Create an engine from CLI arguments
    pub fn from_cli_args(args: &CliArgs) -> Result<Self> {
        let rules = ExclusionRules::compile(&args.exclude_paths, &args.exclude_names)?;

        let filter_config = FilterConfig {
            include_hidden: args.include_hidden,
            follow_symlinks: !args.no_follow_symlinks,
        };

        let config = CensusConfig {
            root: args.target_path(),
            exclude_paths: args.exclude_paths.clone(),
            exclude_names: args.exclude_names.clone(),
            include_hidden: args.include_hidden,
            follow_symlinks: !args.no_follow_symlinks,
        };

        Ok(Self {
            walker: FileWalker::with_config(filter_config),
            rules,
            config,
            show_progress: args.verbose,
        })
    }

    /// Run the census over a root directory (or single file)
    pub fn run<P: AsRef<Path>>(&self, root: P) -> Result<CensusReport> {
        let root = root.as_ref();

        if self.show_progress {
            println!("Scanning Python files under: {}", root.display());
        }

        let discovery = self.walker.discover(root, &self.rules)?;

        if self.show_progress {
            println!("{}", discovery.stats.summary());
        }

        let outcomes = self.analyze_files(&discovery.files);

        let mut files = Vec::new();
        let mut excluded = discovery.excluded;

        for outcome in outcomes {
            match outcome {
                FileOutcome::Counted(record) => files.push(record),
                FileOutcome::Excluded(entry) => excluded.push(entry),
            }
        }

        // Parallel analysis completes in arbitrary order; sort so the
        // report is identical run to run.
        files.sort_by(|a, b| a.path.cmp(&b.path));
        excluded.sort_by(|a, b| a.path.cmp(&b.path));

        let totals = AggregateRecord::accumulate(&files);

        if self.show_progress {
            println!(
                "Counted {} files, excluded {}",
                totals.files,
                excluded.len()
            );
        }

        Ok(CensusReport {
            files,
            excluded,
            totals,
            config: self.config.clone(),
            generated_at: Utc::now(),
        })
    }

    /// Analyze files in parallel; each file stands alone, so the only
    /// shared step is collecting the outcomes afterwards
    fn analyze_files(&self, files: &[std::path::PathBuf]) -> Vec<FileOutcome> {
        let progress_bar = if self.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.set_message("Analyzing files...");
            Some(pb)
        } else {
            None
        };

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| {
                if let Some(ref pb) = progress_bar {
                    pb.inc(1);
                }
                analyze_file(file, &self.rules)
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Analysis completed");
        }

        outcomes
    }
}
