//! Structured-field merging.
//!
//! Each field is resolved on its own from an ordered candidate chain; the
//! first candidate that is non-empty after sanitization wins. No field's
//! chain reads another field's resolved value, so evaluation order is irrelevant.

use folio_shared::{StructuredFields, StructuredOverrides};

use crate::sanitize::{sanitize_list, sanitize_text};

/// Values derived from the parsed narrative, used when overrides are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsedFallbacks<'a> {
    /// Preface `Context` field (empty when the context key is private).
    pub context: &'a str,
    /// Preface stack list.
    pub stack: &'a [String],
    /// Bullets of the visible `what_i_built` section.
    pub what_i_built: &'a [String],
    /// Bullets of the visible `impact` section.
    pub impact: &'a [String],
}

/// First candidate list that is non-empty once sanitized.
pub fn first_non_empty_list(candidates: &[&[String]]) -> Vec<String> {
    candidates
        .iter()
        .map(|&candidate| sanitize_list(candidate))
        .find(|list| !list.is_empty())
        .unwrap_or_default()
}

/// First candidate text that is non-empty once sanitized.
pub fn first_non_empty_text(candidates: &[&str]) -> String {
    candidates
        .iter()
        .map(|candidate| sanitize_text(candidate))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Merge overrides with parsed fallbacks.
pub fn merge_structured_fields(
    overrides: &StructuredOverrides,
    parsed: &ParsedFallbacks<'_>,
) -> StructuredFields {
    let ov = overrides;

    StructuredFields {
        public_summary: first_non_empty_text(&[
            ov.public_summary.as_deref().unwrap_or_default(),
            parsed.context,
        ]),
        highlights: first_non_empty_list(&[
            ov.highlights.as_slice(),
            ov.what_i_built.as_slice(),
            parsed.what_i_built,
        ]),
        outcomes: first_non_empty_list(&[
            ov.outcomes.as_slice(),
            ov.impact_highlights.as_slice(),
            parsed.impact,
        ]),
        what_i_built: first_non_empty_list(&[
            ov.what_i_built.as_slice(),
            ov.highlights.as_slice(),
            parsed.what_i_built,
        ]),
        impact_highlights: first_non_empty_list(&[
            ov.impact_highlights.as_slice(),
            ov.outcomes.as_slice(),
            parsed.impact,
        ]),
        stack: first_non_empty_list(&[ov.stack.as_slice(), parsed.stack]),
    }
}
