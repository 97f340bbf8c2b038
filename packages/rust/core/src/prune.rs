//! Deep sanitize-and-prune over arbitrary JSON.
//!
//! String leaves are sanitized first; then, bottom-up, entries that ended up
//! as `""`, `[]`, `{}`, or `null` are removed from their parent. Object
//! entries whose key carries a blocked token are removed outright.

use serde_json::Value;

use folio_shared::is_blocked;

use crate::sanitize::sanitize_text;

/// Sanitize every string leaf and drop entries left empty.
///
/// The root itself is never removed, so a fully-empty input prunes to an
/// empty container of the same kind.
pub fn deep_prune(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize_text(&text)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(deep_prune)
                .filter(|item| !is_empty(item))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !is_blocked(key))
                .map(|(key, item)| (key, deep_prune(item)))
                .filter(|(_, item)| !is_empty(item))
                .collect(),
        ),
        other => other,
    }
}

/// `null`, empty string, empty array, or empty object.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn removes_empties_bottom_up() {
        let input = json!({
            "name": "Jane Doe",
            "links": {"github": "", "notes": "/Users/jane/notes"},
            "skills": {"languages": ["Rust", "NEEDS_CLARIFICATION"], "other": []},
            "experience": [{"company": "MISSING", "highlights": [null, ""]}],
            "years": 12,
            "remote": false,
        });

        let pruned = deep_prune(input);

        assert_eq!(
            pruned,
            json!({
                "name": "Jane Doe",
                "skills": {"languages": ["Rust"]},
                "years": 12,
                "remote": false,
            })
        );
    }

    #[test]
    fn all_placeholder_structure_prunes_to_empty() {
        let input = json!({
            "a": "NEEDS_CLARIFICATION",
            "b": [[{"c": "PRIVATE_UNSHARED"}], []],
            "d": {"e": {"f": null}},
        });
        assert_eq!(deep_prune(input), json!({}));
        assert_eq!(deep_prune(json!(["", [""], {}])), json!([]));
    }

    #[test]
    fn clean_structure_is_unchanged() {
        let input = json!({
            "headline": "Staff engineer",
            "roles": ["Platform", "Data"],
            "nested": [{"k": ["v"]}],
            "score": 0,
        });
        assert_eq!(deep_prune(input.clone()), input);
    }

    #[test]
    fn blocked_keys_are_dropped() {
        let input = json!({
            "links": {"/Users/jane/notes": "x", "github": "https://github.com/jane"},
            "MISSING": {"detail": "kept?"},
        });
        assert_eq!(
            deep_prune(input),
            json!({"links": {"github": "https://github.com/jane"}})
        );
    }

    #[test]
    fn strings_are_sanitized_line_by_line() {
        let pruned = deep_prune(json!({"summary": "Leads data teams.\nPRIVATE/UNSHARED: comp"}));
        assert_eq!(pruned, json!({"summary": "Leads data teams."}));
    }
}
