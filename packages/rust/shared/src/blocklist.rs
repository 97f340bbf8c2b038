//! The blocked-token table.
//!
//! One table, consumed by both the export-time sanitizer and the lint gate.
//! Any string matching an entry here must never reach a public payload.

use std::sync::LazyLock;

use regex::Regex;

/// Bump whenever an entry is added, removed, or its pattern changes.
pub const BLOCKLIST_VERSION: u32 = 1;

/// Category of a blocked token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockedKind {
    /// Unresolved placeholder left by the interview process.
    Placeholder,
    /// Content the author explicitly marked as not for sharing.
    PrivateMarker,
    /// Local filesystem path.
    PathLeak,
    /// Bare "missing" marker for absent evidence or data.
    MissingMarker,
}

/// A single named, compiled entry of the blocklist.
#[derive(Debug)]
pub struct BlockedPattern {
    /// Stable name reported by the lint gate (e.g. `PRIVATE_PATH`).
    pub name: &'static str,
    pub kind: BlockedKind,
    pub regex: Regex,
}

impl BlockedPattern {
    fn new(name: &'static str, kind: BlockedKind, pattern: &str) -> Self {
        Self {
            name,
            kind,
            regex: Regex::new(pattern).expect("valid blocklist regex"),
        }
    }

    /// Whether this pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

static BLOCKED_PATTERNS: LazyLock<Vec<BlockedPattern>> = LazyLock::new(|| {
    vec![
        BlockedPattern::new(
            "NEEDS_CLARIFICATION",
            BlockedKind::Placeholder,
            r"(?i)NEEDS_CLARIFICATION",
        ),
        BlockedPattern::new(
            "PRIVATE_UNSHARED",
            BlockedKind::PrivateMarker,
            r"(?i)PRIVATE[_/]UNSHARED",
        ),
        BlockedPattern::new("PRIVATE_PATH", BlockedKind::PathLeak, r"(?i)/Users/"),
        BlockedPattern::new(
            "MISSING_MARKER",
            BlockedKind::MissingMarker,
            r"(?i)\bMISSING\b",
        ),
    ]
});

/// The ordered blocklist.
pub fn blocked_patterns() -> &'static [BlockedPattern] {
    &BLOCKED_PATTERNS
}

/// Whether `text` contains any blocked token.
pub fn is_blocked(text: &str) -> bool {
    BLOCKED_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Every pattern that matches `text`, in table order.
pub fn matching_patterns(text: &str) -> impl Iterator<Item = &'static BlockedPattern> + '_ {
    BLOCKED_PATTERNS.iter().filter(move |p| p.is_match(text))
}
