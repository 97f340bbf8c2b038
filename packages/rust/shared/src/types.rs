//! Core domain types for Folio: parsed sections, per-project overrides,
//! and the public payload contract consumed by a site renderer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

/// Narrative voice of rewritten public text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    #[default]
    FirstPerson,
    ThirdPerson,
}

/// Every voice a payload carries a variant for.
pub const SUPPORTED_VOICES: [Voice; 2] = [Voice::FirstPerson, Voice::ThirdPerson];

impl Voice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstPerson => "first_person",
            Self::ThirdPerson => "third_person",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first_person" => Ok(Self::FirstPerson),
            "third_person" => Ok(Self::ThirdPerson),
            other => Err(format!(
                "unknown voice '{other}': expected 'first_person' or 'third_person'"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Visibility / display flags
// ---------------------------------------------------------------------------

/// Public/private classification of a section key.
///
/// Deserialization is fail-closed: any value other than `public` is private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Visibility {
    Public,
    Private,
}

impl From<String> for Visibility {
    fn from(value: String) -> Self {
        if value.trim() == "public" {
            Self::Public
        } else {
            Self::Private
        }
    }
}

/// Whether a project's `when` field is shown publicly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TimelineDisplay {
    Show,
    #[default]
    Hide,
}

impl From<String> for TimelineDisplay {
    fn from(value: String) -> Self {
        if value.trim() == "show" {
            Self::Show
        } else {
            Self::Hide
        }
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// One `## Heading` block of a project narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text as written.
    pub heading: String,
    /// Normalized slug of the heading; the join point to the visibility map.
    pub key: String,
    /// Non-bullet prose, joined with newlines.
    pub body: String,
    /// Bullet items with the marker stripped, in source order.
    pub bullets: Vec<String>,
}

// ---------------------------------------------------------------------------
// Per-project overrides (`website.json`)
// ---------------------------------------------------------------------------

/// Publication controls and structured fields supplied next to a narrative.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectOverrides {
    #[serde(default)]
    pub section_visibility: BTreeMap<String, Visibility>,
    #[serde(default)]
    pub display: DisplayOverrides,
    #[serde(default)]
    pub structured_fields: StructuredOverrides,
    #[serde(default)]
    pub voice_variants: VoiceVariantOverrides,
}

/// `display` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayOverrides {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timeline_display: TimelineDisplay,
}

/// `structured_fields` block. Empty lists mean "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredOverrides {
    #[serde(default)]
    pub public_summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub what_i_built: Vec<String>,
    #[serde(default)]
    pub impact_highlights: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
}

/// `voice_variants` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceVariantOverrides {
    #[serde(default)]
    pub first_person: VoiceVariantOverride,
    #[serde(default)]
    pub third_person: VoiceVariantOverride,
}

impl VoiceVariantOverrides {
    pub fn for_voice(&self, voice: Voice) -> &VoiceVariantOverride {
        match voice {
            Voice::FirstPerson => &self.first_person,
            Voice::ThirdPerson => &self.third_person,
        }
    }
}

/// Explicit text for one voice. Shaped like [`StructuredOverrides`] minus `stack`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceVariantOverride {
    #[serde(default)]
    pub public_summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub what_i_built: Vec<String>,
    #[serde(default)]
    pub impact_highlights: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public payload
// ---------------------------------------------------------------------------

/// Merged, sanitized summary fields of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredFields {
    pub public_summary: String,
    pub highlights: Vec<String>,
    pub outcomes: Vec<String>,
    pub what_i_built: Vec<String>,
    pub impact_highlights: Vec<String>,
    pub stack: Vec<String>,
}

/// Structured fields rewritten into one voice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceVariant {
    pub public_summary: String,
    pub highlights: Vec<String>,
    pub outcomes: Vec<String>,
    pub what_i_built: Vec<String>,
    pub impact_highlights: Vec<String>,
}

/// Both voice variants of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceVariants {
    pub first_person: VoiceVariant,
    pub third_person: VoiceVariant,
}

impl VoiceVariants {
    pub fn get(&self, voice: Voice) -> &VoiceVariant {
        match voice {
            Voice::FirstPerson => &self.first_person,
            Voice::ThirdPerson => &self.third_person,
        }
    }
}

/// Display flags carried into the public payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicDisplay {
    pub timeline_display: TimelineDisplay,
}

/// The publish-safe payload of a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    pub slug: String,
    pub title: String,
    pub when: String,
    pub context: String,
    pub my_role: String,
    pub stack: Vec<String>,
    pub display: PublicDisplay,
    pub public_sections: Vec<Section>,
    pub structured_fields: StructuredFields,
    pub voice_variants: VoiceVariants,
    pub selected_voice: Voice,
    pub selected_content: VoiceVariant,
}

/// Root structure for `index.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteIndex {
    pub voice: Voice,
    pub career_file: String,
    /// Featured projects first (in profile order), then the rest by slug.
    pub projects: Vec<String>,
    pub supported_voices: Vec<Voice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_parses_and_displays() {
        assert_eq!("third_person".parse::<Voice>(), Ok(Voice::ThirdPerson));
        assert_eq!(Voice::FirstPerson.to_string(), "first_person");
        assert!("second_person".parse::<Voice>().is_err());
    }

    #[test]
    fn visibility_is_fail_closed() {
        let map: BTreeMap<String, Visibility> =
            serde_json::from_str(r#"{"a": "public", "b": "private", "c": "hidden"}"#)
                .expect("parse");
        assert_eq!(map["a"], Visibility::Public);
        assert_eq!(map["b"], Visibility::Private);
        assert_eq!(map["c"], Visibility::Private);
    }

    #[test]
    fn timeline_defaults_to_hide() {
        let display: DisplayOverrides = serde_json::from_str("{}").expect("parse");
        assert_eq!(display.timeline_display, TimelineDisplay::Hide);

        let display: DisplayOverrides =
            serde_json::from_str(r#"{"timeline_display": "show"}"#).expect("parse");
        assert_eq!(display.timeline_display, TimelineDisplay::Show);
    }

    #[test]
    fn overrides_fill_missing_blocks_with_defaults() {
        let overrides: ProjectOverrides = serde_json::from_str(
            r#"{"structured_fields": {"highlights": ["Built a pipeline"]}}"#,
        )
        .expect("parse");
        assert_eq!(overrides.structured_fields.highlights, vec!["Built a pipeline"]);
        assert!(overrides.section_visibility.is_empty());
        assert!(overrides.voice_variants.first_person.public_summary.is_none());
    }

    #[test]
    fn payload_serializes_voice_and_visibility_as_strings() {
        let index = SiteIndex {
            voice: Voice::ThirdPerson,
            career_file: "career.public.json".into(),
            projects: vec!["fraud-detection".into()],
            supported_voices: SUPPORTED_VOICES.to_vec(),
        };
        let json = serde_json::to_value(&index).expect("serialize");
        assert_eq!(json["voice"], "third_person");
        assert_eq!(json["supported_voices"][0], "first_person");

        let vis = serde_json::to_value(Visibility::Private).expect("serialize");
        assert_eq!(vis, "private");
    }
}
