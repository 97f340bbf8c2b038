//! Voice normalization.
//!
//! Deterministic rewriting of sanitized text into first or third person.
//! Both functions are total and leave empty input empty.

use std::sync::LazyLock;

use regex::Regex;

use folio_shared::{
    StructuredFields, Voice, VoiceVariant, VoiceVariantOverride, VoiceVariantOverrides,
    VoiceVariants,
};

use crate::merge::{first_non_empty_list, first_non_empty_text};

/// `Leads ...`, `Manages ...`: a capitalized word ending in `s`.
///
/// Known false positives: any sentence opening with a plural noun or a
/// name ending in `s` ("Metrics improved", "Chris built") is left as-is.
static THIRD_PERSON_VERB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+s\b").expect("verb regex"));

/// Rewrite `text` into first person.
pub fn to_first_person(text: &str) -> String {
    let cleaned = text.trim();
    if cleaned.is_empty() || cleaned.starts_with("I ") || THIRD_PERSON_VERB_RE.is_match(cleaned) {
        return cleaned.to_string();
    }
    format!("I {}", lowercase_first(cleaned))
}

/// Rewrite `text` into third person about `display_name`.
pub fn to_third_person(text: &str, display_name: &str) -> String {
    let cleaned = text.trim();
    if cleaned.is_empty() || cleaned.starts_with(display_name) {
        return cleaned.to_string();
    }
    if let Some(rest) = cleaned.strip_prefix("I ") {
        return format!("{display_name} {rest}");
    }
    format!("{display_name} {}", lowercase_first(cleaned))
}

/// Rewrite `text` into `voice`.
pub fn rewrite(text: &str, voice: Voice, display_name: &str) -> String {
    match voice {
        Voice::FirstPerson => to_first_person(text),
        Voice::ThirdPerson => to_third_person(text, display_name),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compute both voice variants of merged structured fields.
///
/// A non-empty per-voice override replaces the merged value, and is still
/// sanitized and rewritten exactly once.
pub fn build_voice_variants(
    structured: &StructuredFields,
    overrides: &VoiceVariantOverrides,
    display_name: &str,
) -> VoiceVariants {
    VoiceVariants {
        first_person: build_variant(
            structured,
            overrides.for_voice(Voice::FirstPerson),
            Voice::FirstPerson,
            display_name,
        ),
        third_person: build_variant(
            structured,
            overrides.for_voice(Voice::ThirdPerson),
            Voice::ThirdPerson,
            display_name,
        ),
    }
}

fn build_variant(
    base: &StructuredFields,
    ov: &VoiceVariantOverride,
    voice: Voice,
    display_name: &str,
) -> VoiceVariant {
    let list = |explicit: &[String], merged: &[String]| -> Vec<String> {
        first_non_empty_list(&[explicit, merged])
            .iter()
            .map(|item| rewrite(item, voice, display_name))
            .collect()
    };

    let summary = first_non_empty_text(&[
        ov.public_summary.as_deref().unwrap_or_default(),
        base.public_summary.as_str(),
    ]);

    VoiceVariant {
        public_summary: rewrite(&summary, voice, display_name),
        highlights: list(&ov.highlights, &base.highlights),
        outcomes: list(&ov.outcomes, &base.outcomes),
        what_i_built: list(&ov.what_i_built, &base.what_i_built),
        impact_highlights: list(&ov.impact_highlights, &base.impact_highlights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "Jane Doe";

    #[test]
    fn empty_stays_empty() {
        assert_eq!(to_first_person(""), "");
        assert_eq!(to_third_person("   ", NAME), "");
    }

    #[test]
    fn first_person_prepends_and_lowercases() {
        assert_eq!(to_first_person("Built a fraud model."), "I built a fraud model.");
        assert_eq!(to_first_person("I shipped it."), "I shipped it.");
    }

    #[test]
    fn first_person_leaves_third_person_verbs_alone() {
        assert_eq!(to_first_person("Leads a team of five."), "Leads a team of five.");
        // Known false positive of the heuristic: plural nouns are left alone too.
        assert_eq!(to_first_person("Metrics improved."), "Metrics improved.");
    }

    #[test]
    fn third_person_rewrites_prefix() {
        assert_eq!(to_third_person("I shipped it.", NAME), "Jane Doe shipped it.");
        assert_eq!(to_third_person("Built a model.", NAME), "Jane Doe built a model.");
        assert_eq!(to_third_person("Jane Doe leads.", NAME), "Jane Doe leads.");
    }

    #[test]
    fn lowercase_first_handles_multibyte() {
        assert_eq!(to_first_person("Écrit le moteur"), "I écrit le moteur");
    }

    #[test]
    fn variants_use_overrides_then_merged_fields() {
        let structured = StructuredFields {
            public_summary: "Built a fraud model.".into(),
            highlights: vec!["Designed features".into()],
            outcomes: vec!["Cut review time by 30%".into()],
            what_i_built: vec!["Designed features".into()],
            impact_highlights: vec!["Cut review time by 30%".into()],
            stack: vec!["Python".into()],
        };
        let overrides = VoiceVariantOverrides {
            third_person: VoiceVariantOverride {
                public_summary: Some("I led fraud modelling (Confidence: HIGH)".into()),
                highlights: vec!["NEEDS_CLARIFICATION".into()],
                ..Default::default()
            },
            ..Default::default()
        };

        let variants = build_voice_variants(&structured, &overrides, NAME);

        assert_eq!(variants.first_person.public_summary, "I built a fraud model.");
        assert_eq!(variants.first_person.outcomes, vec!["I cut review time by 30%"]);
        assert_eq!(variants.third_person.public_summary, "Jane Doe led fraud modelling");
        // Override sanitized to nothing falls back to the merged value.
        assert_eq!(variants.third_person.highlights, vec!["Jane Doe designed features"]);
    }

    #[test]
    fn override_is_rewritten_exactly_once() {
        let overrides = VoiceVariantOverrides {
            first_person: VoiceVariantOverride {
                highlights: vec!["Built the thing".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let variants = build_voice_variants(&StructuredFields::default(), &overrides, NAME);
        assert_eq!(variants.first_person.highlights, vec!["I built the thing"]);
        assert!(variants.third_person.highlights.is_empty());
        assert_eq!(variants.get(Voice::ThirdPerson).public_summary, "");
    }
}
