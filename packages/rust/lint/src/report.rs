//! Lint findings and the report printed by the gate.

use std::fmt;
use std::path::PathBuf;

/// Where in a file a violation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// JSON path into a structured payload, e.g. `$.links[0]`.
    JsonPath(String),
    /// 1-based line number in a text payload.
    Line(usize),
    /// The file as a whole.
    File,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonPath(path) => f.write_str(path),
            Self::Line(line) => write!(f, "{line}"),
            Self::File => Ok(()),
        }
    }
}

/// What the violation is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A blocklist entry matched; carries the entry's name.
    Blocked(&'static str),
    /// A `.json` file did not parse.
    InvalidJson,
    /// The file could not be read as UTF-8 text.
    Unreadable,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blocked(name) => name,
            Self::InvalidJson => "INVALID_JSON",
            Self::Unreadable => "UNREADABLE",
        }
    }
}

/// One lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub file: PathBuf,
    pub location: Location,
    pub rule: Rule,
    /// Offending value (or error detail), truncated.
    pub preview: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.display();
        match &self.rule {
            Rule::Blocked(name) => write!(
                f,
                "{file}:{}: blocked token {name}: {}",
                self.location, self.preview
            ),
            Rule::InvalidJson => write!(f, "{file}: invalid JSON ({})", self.preview),
            Rule::Unreadable => write!(f, "{file}: unreadable ({})", self.preview),
        }
    }
}

/// Outcome of a lint run.
#[derive(Debug, Clone)]
pub struct LintReport {
    /// Path the run was invoked on.
    pub target: PathBuf,
    /// Eligible files inspected.
    pub files_scanned: usize,
    /// Every violation, in file order.
    pub violations: Vec<Violation>,
}

impl LintReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "Publish lint passed: {}", self.target.display());
        }
        writeln!(f, "Publish lint failed:")?;
        for violation in &self.violations {
            write!(f, "\n- {violation}")?;
        }
        Ok(())
    }
}
