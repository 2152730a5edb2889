use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Default)]
pub enum ColorMode {
    /// Auto-detect based on terminal (TTY)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors (for piping)
    Never,
}

/// CLI arguments for the census application
#[derive(Parser)]
#[command(name = "pycensus")]
#[command(about = "Count lines, statements, and comments across a Python codebase")]
#[command(version)]
#[command(
    long_about = "A CLI tool that recursively discovers Python files under a root directory, \
parses each with a tree-sitter AST parser, and reports per-file and aggregate counts of \
total lines, non-blank lines, statements, and commented lines. Files and definition names \
can be excluded with regular expressions; files that fail to parse are listed as excluded \
and contribute nothing to the totals."
)]
pub struct CliArgs {
    /// Directory or single file to analyze (default: current directory)
    #[arg(value_name = "PATH", help = "Path to the directory or file to analyze")]
    pub path: Option<PathBuf>,

    /// Regex patterns excluding whole files by path
    #[arg(
        long = "exclude-path",
        value_name = "REGEX",
        help = "Exclude files whose path matches this regex (repeatable)"
    )]
    pub exclude_paths: Vec<String>,

    /// Regex patterns excluding function/class bodies by name
    #[arg(
        long = "exclude-name",
        value_name = "REGEX",
        help = "Skip def/class definitions whose name matches this regex (repeatable)"
    )]
    pub exclude_names: Vec<String>,

    /// Output format selection
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help = "Choose output format")]
    pub output: OutputFormat,

    /// Write the report to a file instead of only stdout
    #[arg(long, value_name = "FILE", help = "Custom path for the report file")]
    pub output_file: Option<PathBuf>,

    /// Include hidden files in analysis
    #[arg(long, help = "Include hidden files and directories")]
    pub include_hidden: bool,

    /// Do not follow symbolic links during discovery
    #[arg(long, help = "Do not follow symbolic links")]
    pub no_follow_symlinks: bool,

    /// Enable verbose output with progress reporting
    #[arg(short, long, help = "Show detailed progress information")]
    pub verbose: bool,

    /// Color output mode
    #[arg(
        long,
        value_enum,
        default_value_t = ColorMode::Auto,
        help = "Control color output (auto, always, never)"
    )]
    pub color: ColorMode,
}

/// Output format options
#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal table output only
    Table,
    /// JSON report only
    Json,
    /// Both terminal table and JSON report
    Both,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Both => write!(f, "both"),
        }
    }
}

impl CliArgs {
    /// Validate CLI arguments and return meaningful errors
    pub fn validate(&self) -> Result<(), crate::error::CensusError> {
        // Validate path if provided; a single file is a valid root,
        // discovery handles it without walking
        if let Some(ref path) = self.path {
            if !path.exists() {
                return Err(crate::error::CensusError::invalid_path(path));
            }
        }

        // Exclusion patterns must compile before any file is touched
        for pattern in self.exclude_paths.iter().chain(self.exclude_names.iter()) {
            regex::Regex::new(pattern)?;
        }

        // Validate output file path if provided
        if let Some(ref output_path) = self.output_file {
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(crate::error::CensusError::validation_error(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get the target path for analysis (current directory if not specified)
    pub fn target_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .cloned()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the JSON report path (defaults to pycensus-report.json)
    pub fn json_output_path(&self) -> PathBuf {
        self.output_file
            .as_ref()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("pycensus-report.json"))
    }

    /// Check if JSON output should be generated
    pub fn should_output_json(&self) -> bool {
        matches!(self.output, OutputFormat::Json | OutputFormat::Both)
    }

    /// Check if terminal output should be displayed
    pub fn should_output_terminal(&self) -> bool {
        matches!(self.output, OutputFormat::Table | OutputFormat::Both)
    }

    /// Determine if colors should be used based on ColorMode and TTY detection
    pub fn should_use_colors(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => atty::is(atty::Stream::Stdout),
        }
    }
}

// Implement Default for testing convenience
impl Default for CliArgs {
    fn default() -> Self {
        Self {
            path: None,
            exclude_paths: Vec::new(),
            exclude_names: Vec::new(),
            output: OutputFormat::Table,
            output_file: None,
            include_hidden: false,
            no_follow_symlinks: false,
            verbose: false,
            color: ColorMode::Auto,
        }
    }
}
