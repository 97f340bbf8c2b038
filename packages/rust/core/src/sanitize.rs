//! Blocked-token sanitizer.
//!
//! Every string headed for a public payload passes through [`sanitize_text`]
//! or [`sanitize_list`]. Both are idempotent.

use std::sync::LazyLock;

use regex::Regex;

use folio_shared::is_blocked;

/// Internal annotation suffixes that never go public, even on an otherwise safe line.
static ANNOTATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\s*\(Confidence:.*$",
        r"(?i)\s*\(Evidence:.*$",
        r"(?i)\s*\(publication-safe phrasing approved\)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid annotation regex"))
    .collect()
});

/// Remove annotation suffixes from a single line and trim it.
///
/// Repeats until nothing changes, since removing one annotation can expose another.
pub fn strip_annotations(line: &str) -> String {
    let mut current = line.trim().to_string();
    loop {
        let mut next = current.clone();
        for pattern in ANNOTATION_PATTERNS.iter() {
            next = pattern.replace_all(&next, "").into_owned();
        }
        let next = next.trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// A line is public iff it is non-empty after trimming and carries no blocked token.
pub fn is_public_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !is_blocked(line)
}

/// Sanitize one line: strip annotations, then keep it only if public.
fn sanitize_line(line: &str) -> Option<String> {
    let stripped = strip_annotations(line);
    is_public_line(&stripped).then_some(stripped)
}

/// Sanitize multi-line text line by line, dropping private lines.
pub fn sanitize_text(text: &str) -> String {
    text.lines()
        .filter_map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Sanitize each item, dropping any item that is not public.
///
/// An item is all-or-nothing: a multi-line item containing a blocked
/// line is dropped entirely rather than partially kept.
pub fn sanitize_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| sanitize_item(item.as_ref()))
        .collect()
}

fn sanitize_item(item: &str) -> Option<String> {
    let mut kept = Vec::new();
    for line in item.lines() {
        let stripped = strip_annotations(line);
        if stripped.is_empty() {
            continue;
        }
        if is_blocked(&stripped) {
            return None;
        }
        kept.push(stripped);
    }
    let joined = kept.join("\n");
    is_public_line(&joined).then_some(joined)
}
