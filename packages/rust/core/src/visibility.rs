//! Section visibility.
//!
//! Resolution order for a section key: project override, then frontmatter,
//! then the built-in default table. Unknown keys are public.

use std::collections::BTreeMap;

use folio_shared::{Section, Visibility};

use crate::sanitize::{sanitize_list, sanitize_text};

/// Built-in visibility for known section keys.
pub const DEFAULT_SECTION_VISIBILITY: [(&str, Visibility); 9] = [
    ("context", Visibility::Public),
    ("what_i_built", Visibility::Public),
    ("impact", Visibility::Public),
    ("constraints_tradeoffs", Visibility::Public),
    ("team_collaboration", Visibility::Public),
    ("leadership_delivery", Visibility::Public),
    ("role_relevance", Visibility::Public),
    ("evidence", Visibility::Private),
    ("notes_lessons", Visibility::Public),
];

/// Section key to visibility, seeded from [`DEFAULT_SECTION_VISIBILITY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMap {
    entries: BTreeMap<String, Visibility>,
}

impl Default for VisibilityMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SECTION_VISIBILITY
                .iter()
                .map(|(key, vis)| ((*key).to_string(), *vis))
                .collect(),
        }
    }
}

impl VisibilityMap {
    /// Layer `overrides` on top of the current entries. Later layers win.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a Visibility)>,
    ) -> Self {
        for (key, vis) in overrides {
            self.entries.insert(key.clone(), *vis);
        }
        self
    }

    /// Resolved visibility of `key`.
    pub fn resolve(&self, key: &str) -> Visibility {
        self.entries.get(key).copied().unwrap_or(Visibility::Public)
    }

    pub fn is_public(&self, key: &str) -> bool {
        self.resolve(key) == Visibility::Public
    }
}

/// Keep only public sections, sanitized, dropping any left with nothing to say.
pub fn filter_sections(sections: &[Section], map: &VisibilityMap) -> Vec<Section> {
    sections
        .iter()
        .filter(|section| map.is_public(&section.key))
        .filter_map(|section| {
            let body = sanitize_text(&section.body);
            let bullets = sanitize_list(&section.bullets);
            if body.is_empty() && bullets.is_empty() {
                return None;
            }
            Some(Section {
                heading: section.heading.clone(),
                key: section.key.clone(),
                body,
                bullets,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(key: &str, body: &str, bullets: &[&str]) -> Section {
        Section {
            heading: key.to_string(),
            key: key.to_string(),
            body: body.to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        }
    }

    #[test]
    fn defaults_mark_only_evidence_private() {
        let map = VisibilityMap::default();
        assert!(map.is_public("impact"));
        assert!(map.is_public("notes_lessons"));
        assert!(!map.is_public("evidence"));
    }

    #[test]
    fn unknown_keys_are_public() {
        assert!(VisibilityMap::default().is_public("side_quests"));
    }

    #[test]
    fn explicit_override_beats_default() {
        let overrides = BTreeMap::from([("evidence".to_string(), Visibility::Public)]);
        let map = VisibilityMap::default().with_overrides(&overrides);
        assert_eq!(map.resolve("evidence"), Visibility::Public);
    }

    #[test]
    fn later_layers_win() {
        let frontmatter = BTreeMap::from([("impact".to_string(), Visibility::Private)]);
        let website = BTreeMap::from([("impact".to_string(), Visibility::Public)]);
        let map = VisibilityMap::default()
            .with_overrides(&frontmatter)
            .with_overrides(&website);
        assert!(map.is_public("impact"));
    }

    #[test]
    fn filter_drops_private_and_empty_sections() {
        let sections = vec![
            section("impact", "", &["Cut review time by 30%"]),
            section("evidence", "Dashboard export", &["link"]),
            section("notes_lessons", "NEEDS_CLARIFICATION", &["MISSING"]),
            section("constraints_tradeoffs", "Tight budget", &[]),
        ];
        let kept = filter_sections(&sections, &VisibilityMap::default());
        let keys: Vec<&str> = kept.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["impact", "constraints_tradeoffs"]);
    }

    #[test]
    fn filter_sanitizes_kept_sections() {
        let sections = vec![section(
            "impact",
            "Summary\nPRIVATE_UNSHARED revenue",
            &["Reduced false positives by NEEDS_CLARIFICATION", "Cut review time by 30%"],
        )];
        let kept = filter_sections(&sections, &VisibilityMap::default());
        assert_eq!(kept[0].body, "Summary");
        assert_eq!(kept[0].bullets, vec!["Cut review time by 30%"]);
    }
}
