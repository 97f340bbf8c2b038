//! Project payload assembly.
//!
//! Combines a parsed narrative with its `website.json` overrides into a
//! [`ProjectPayload`], then into the pruned JSON that gets written.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use folio_markdown::{ProjectDocument, UNTITLED_PROJECT};
use folio_shared::{
    FolioError, ProjectOverrides, ProjectPayload, PublicDisplay, Result, TimelineDisplay,
    Visibility, Voice,
};

use crate::merge::{ParsedFallbacks, first_non_empty_text, merge_structured_fields};
use crate::prune::deep_prune;
use crate::sanitize::{sanitize_list, sanitize_text};
use crate::visibility::{VisibilityMap, filter_sections};
use crate::voice::build_voice_variants;

/// Parse `website.json` content leniently.
///
/// Invalid JSON yields empty overrides. Each top-level block is decoded on
/// its own, so one malformed block does not discard the others.
pub fn parse_overrides(raw: &str) -> ProjectOverrides {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "malformed overrides, treating as empty");
            return ProjectOverrides::default();
        }
    };
    let Value::Object(map) = value else {
        warn!("overrides are not a JSON object, treating as empty");
        return ProjectOverrides::default();
    };

    ProjectOverrides {
        section_visibility: visibility_block(&map),
        display: block(&map, "display"),
        structured_fields: block(&map, "structured_fields"),
        voice_variants: block(&map, "voice_variants"),
    }
}

fn block<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> T {
    match map.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!(block = key, error = %e, "ignoring malformed override block");
            T::default()
        }),
    }
}

/// `section_visibility` is decoded per entry: a value that is not a string
/// resolves to private rather than discarding the whole block.
fn visibility_block(map: &Map<String, Value>) -> BTreeMap<String, Visibility> {
    match map.get("section_visibility") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(key, value)| {
                let visibility = match value {
                    Value::String(raw) => Visibility::from(raw.clone()),
                    other => {
                        warn!(key = %key, value = %other, "non-string visibility, treating as private");
                        Visibility::Private
                    }
                };
                (key.clone(), visibility)
            })
            .collect(),
        Some(other) => {
            warn!(value = %other, "ignoring malformed section_visibility block");
            BTreeMap::new()
        }
    }
}

/// Assemble the payload for one project.
#[instrument(skip_all, fields(slug = %slug, voice = %voice))]
pub fn assemble_project(
    slug: &str,
    document: &ProjectDocument,
    overrides: &ProjectOverrides,
    voice: Voice,
    display_name: &str,
) -> ProjectPayload {
    let display_name = sanitize_text(display_name);
    let visibility = VisibilityMap::default()
        .with_overrides(&document.frontmatter_visibility())
        .with_overrides(&overrides.section_visibility);

    let public_sections = filter_sections(&document.sections, &visibility);

    let context = if visibility.is_public("context") {
        sanitize_text(&document.context)
    } else {
        String::new()
    };

    let bullets_of = |key: &str| -> &[String] {
        public_sections
            .iter()
            .find(|section| section.key == key)
            .map(|section| section.bullets.as_slice())
            .unwrap_or_default()
    };

    let structured = merge_structured_fields(
        &overrides.structured_fields,
        &ParsedFallbacks {
            context: &context,
            stack: &document.stack,
            what_i_built: bullets_of("what_i_built"),
            impact: bullets_of("impact"),
        },
    );
    let voice_variants = build_voice_variants(&structured, &overrides.voice_variants, &display_name);

    let timeline_display = overrides.display.timeline_display;
    let when = match timeline_display {
        TimelineDisplay::Show => sanitize_text(&document.when),
        TimelineDisplay::Hide => String::new(),
    };

    let title = first_non_empty_text(&[
        overrides.display.title.as_deref().unwrap_or_default(),
        document.title.as_str(),
        UNTITLED_PROJECT,
    ]);

    debug!(
        sections = public_sections.len(),
        dropped = document.sections.len() - public_sections.len(),
        "assembled project"
    );

    ProjectPayload {
        slug: slug.to_string(),
        title,
        when,
        my_role: sanitize_text(&document.my_role),
        stack: sanitize_list(&document.stack),
        display: PublicDisplay { timeline_display },
        selected_content: voice_variants.get(voice).clone(),
        selected_voice: voice,
        context,
        public_sections,
        structured_fields: structured,
        voice_variants,
    }
}

/// Serialize a payload and deep-prune it into its publishable form.
pub fn to_public_json(payload: &ProjectPayload) -> Result<Value> {
    let value = serde_json::to_value(payload)
        .map_err(|e| FolioError::Serialization(format!("project {}: {e}", payload.slug)))?;
    Ok(deep_prune(value))
}
