use regex::Regex;

use crate::error::Result;

/// Compiled exclusion rules, built once from configuration and passed
/// by parameter through the walker and analyzer.
///
/// Path rules exclude whole files; name rules exclude def/class
/// definitions (header and body) inside otherwise analyzed files.
#[derive(Debug, Default, Clone)]
pub struct ExclusionRules {
    path_rules: Vec<Regex>,
    name_rules: Vec<Regex>,
}

impl ExclusionRules {
    /// Compile rules from raw pattern strings
    pub fn compile(path_patterns: &[String], name_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            path_rules: compile_patterns(path_patterns)?,
            name_rules: compile_patterns(name_patterns)?,
        })
    }

    /// Match a file path against the path rules, returning the first
    /// triggering pattern
    pub fn match_path(&self, path: &str) -> Option<&str> {
        self.path_rules
            .iter()
            .find(|rule| rule.is_match(path))
            .map(|rule| rule.as_str())
    }

    /// Match a definition name against the name rules, returning the
    /// first triggering pattern
    pub fn match_name(&self, name: &str) -> Option<&str> {
        self.name_rules
            .iter()
            .find(|rule| rule.is_match(name))
            .map(|rule| rule.as_str())
    }

    /// Whether any name rules are configured at all
    pub fn has_name_rules(&self) -> bool {
        !self.name_rules.is_empty()
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(Into::into))
        .collect()
}
