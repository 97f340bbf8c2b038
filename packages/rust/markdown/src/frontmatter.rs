//! Leading `---` fenced metadata block.
//!
//! A document may open with a YAML block delimited by two lines consisting
//! solely of `---`. Without a closing fence the whole text stays body.

use tracing::debug;

const FENCE: &str = "---";

/// Split `text` into `(frontmatter, body)`.
///
/// Returns `(None, text)` unless the first line is a fence and a later line
/// closes it.
pub(crate) fn split(text: &str) -> (Option<&str>, &str) {
    let Some(first_line_end) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_line_end].trim_end() != FENCE {
        return (None, text);
    }

    let inner_start = first_line_end + 1;
    let mut offset = inner_start;
    for line in text[inner_start..].split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let inner = &text[inner_start..offset];
            let body = &text[offset + line.len()..];
            return (Some(inner), body);
        }
        offset += line.len();
    }

    (None, text)
}

/// Parse frontmatter YAML into a JSON value.
///
/// Malformed YAML yields `None`; frontmatter never fails a parse.
pub(crate) fn parse(raw: &str) -> Option<serde_json::Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str::<serde_json::Value>(raw) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => {
            debug!("frontmatter is not a mapping, ignoring");
            None
        }
        Err(e) => {
            debug!(error = %e, "malformed frontmatter, ignoring");
            None
        }
    }
}
