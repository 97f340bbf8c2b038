//! Publish lint gate.
//!
//! Re-scans exported payloads for blocked tokens using the same table the
//! sanitizer uses. Collection never stops at the first finding: every
//! violation in every eligible file ends up in the [`LintReport`].

mod report;

pub use report::{LintReport, Location, Rule, Violation};

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use folio_shared::{FolioError, LintConfig, Result, matching_patterns};

/// Options for a lint run.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Extensions (no dot, lowercase) scanned line-by-line.
    pub text_extensions: Vec<String>,
    /// Maximum characters kept in a violation preview.
    pub preview_chars: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self::from(&LintConfig::default())
    }
}

impl From<&LintConfig> for LintOptions {
    fn from(config: &LintConfig) -> Self {
        Self {
            text_extensions: config
                .text_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            preview_chars: config.preview_chars,
        }
    }
}

enum FileKind {
    Json,
    Text,
}

impl LintOptions {
    fn classify(&self, path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if ext == "json" {
            Some(FileKind::Json)
        } else if self.text_extensions.contains(&ext) {
            Some(FileKind::Text)
        } else {
            None
        }
    }

    fn preview(&self, value: &str) -> String {
        value.chars().take(self.preview_chars).collect()
    }
}

/// Lint a file or a directory tree.
///
/// Fails only when there is nothing to scan: `target` does not exist or
/// holds no files.
#[instrument(skip_all, fields(path = %target.display()))]
pub fn lint_path(target: &Path, options: &LintOptions) -> Result<LintReport> {
    let mut violations = Vec::new();
    let files = collect_files(target, options, &mut violations);
    if files.is_empty() && violations.is_empty() {
        return Err(FolioError::NothingToScan {
            path: target.to_path_buf(),
        });
    }

    let mut files_scanned = 0;
    for file in &files {
        let Some(kind) = options.classify(file) else {
            debug!(path = %file.display(), "skipping ineligible file");
            continue;
        };
        files_scanned += 1;
        match kind {
            FileKind::Json => lint_json_file(file, options, &mut violations),
            FileKind::Text => lint_text_file(file, options, &mut violations),
        }
    }

    info!(
        files_scanned,
        violations = violations.len(),
        "lint complete"
    );

    Ok(LintReport {
        target: target.to_path_buf(),
        files_scanned,
        violations,
    })
}

/// Every string leaf and object key of `value` that matches a blocked pattern.
///
/// Paths are rendered as `$`, `.key` and `[index]` segments.
pub fn lint_value(value: &Value, file: &Path, options: &LintOptions) -> Vec<Violation> {
    let mut violations = Vec::new();
    walk(value, "$".to_string(), file, options, &mut violations);
    violations
}

fn walk(value: &Value, pointer: String, file: &Path, options: &LintOptions, out: &mut Vec<Violation>) {
    match value {
        Value::String(text) => check_string(text, Location::JsonPath(pointer), file, options, out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, format!("{pointer}[{index}]"), file, options, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let path = format!("{pointer}.{key}");
                check_string(key, Location::JsonPath(path.clone()), file, options, out);
                walk(item, path, file, options, out);
            }
        }
        _ => {}
    }
}

/// One violation per matching pattern.
fn check_string(
    text: &str,
    location: Location,
    file: &Path,
    options: &LintOptions,
    out: &mut Vec<Violation>,
) {
    for pattern in matching_patterns(text) {
        out.push(Violation {
            file: file.to_path_buf(),
            location: location.clone(),
            rule: Rule::Blocked(pattern.name),
            preview: options.preview(text),
        });
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Files under `target`, sorted. Walk errors become `UNREADABLE` violations.
fn collect_files(target: &Path, options: &LintOptions, violations: &mut Vec<Violation>) -> Vec<PathBuf> {
    if target.is_file() {
        return vec![target.to_path_buf()];
    }
    if !target.exists() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(target).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to walk lint target");
                violations.push(Violation {
                    file: e.path().unwrap_or(target).to_path_buf(),
                    location: Location::File,
                    rule: Rule::Unreadable,
                    preview: options.preview(&e.to_string()),
                });
            }
        }
    }
    debug!(count = files.len(), "collected lint files");
    files
}

fn read_file(path: &Path, options: &LintOptions, out: &mut Vec<Violation>) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable lint input");
            out.push(Violation {
                file: path.to_path_buf(),
                location: Location::File,
                rule: Rule::Unreadable,
                preview: options.preview(&e.to_string()),
            });
            None
        }
    }
}

fn lint_json_file(path: &Path, options: &LintOptions, out: &mut Vec<Violation>) {
    let Some(raw) = read_file(path, options, out) else {
        return;
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => out.extend(lint_value(&value, path, options)),
        Err(e) => out.push(Violation {
            file: path.to_path_buf(),
            location: Location::File,
            rule: Rule::InvalidJson,
            preview: options.preview(&e.to_string()),
        }),
    }
}

fn lint_text_file(path: &Path, options: &LintOptions, out: &mut Vec<Violation>) {
    let Some(text) = read_file(path, options, out) else {
        return;
    };
    for (index, line) in text.lines().enumerate() {
        check_string(line, Location::Line(index + 1), path, options, out);
    }
}
