//! Profile payload assembly.

use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use folio_shared::{SUPPORTED_VOICES, Voice};

use crate::prune::{deep_prune, is_empty};
use crate::sanitize::sanitize_text;
use crate::voice::{rewrite, to_first_person, to_third_person};

/// Top-level profile blocks that may be published. Anything else in the
/// record (assessments, targeting notes, story banks) stays private.
pub const PROFILE_FIELDS: [&str; 13] = [
    "name",
    "headline",
    "location",
    "links",
    "summary",
    "target_roles",
    "skills",
    "experience",
    "featured_projects",
    "leadership_profile",
    "current_focus",
    "writing",
    "portfolio_style_profile",
];

/// Build the public profile from a raw profile record.
///
/// Non-object records are treated as empty. `display_name` is sanitized
/// before use; the emitted `name` falls back to it when the record has none
/// worth publishing.
#[instrument(skip_all, fields(voice = %voice))]
pub fn assemble_profile(record: &Value, voice: Voice, display_name: &str) -> Value {
    let display_name = sanitize_text(display_name);
    let display_name = display_name.as_str();
    let mut profile: Map<String, Value> = match record {
        Value::Object(map) => PROFILE_FIELDS
            .iter()
            .filter_map(|&field| {
                let value = deep_prune(map.get(field)?.clone());
                (!is_empty(&value)).then(|| (field.to_string(), value))
            })
            .collect(),
        _ => Map::new(),
    };

    if !profile.contains_key("name") && !display_name.is_empty() {
        profile.insert("name".into(), Value::String(display_name.to_string()));
    }

    let summary = profile
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if !summary.is_empty() {
        profile.insert(
            "summary".into(),
            Value::String(rewrite(&summary, voice, display_name)),
        );
        profile.insert(
            "voice_variants".into(),
            json!({
                "first_person": {"summary": to_first_person(&summary)},
                "third_person": {"summary": to_third_person(&summary, display_name)},
            }),
        );
    }

    profile.insert("selected_voice".into(), json!(voice));
    profile.insert("supported_voices".into(), json!(SUPPORTED_VOICES));

    debug!(fields = profile.len(), "assembled profile");
    Value::Object(profile)
}

/// The profile's `featured_projects`, in order, ignoring non-string entries.
pub fn featured_order(profile: &Value) -> Vec<String> {
    profile
        .get("featured_projects")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
