//! Project narrative parsing.
//!
//! Turns a `project.md` document into a typed [`ProjectDocument`]: optional
//! frontmatter, the `# Title`, labelled preface fields (`**When:**`,
//! `**Context:**`, `**My role:**`, `**Stack:**`), and ordered `## Sections`.
//!
//! Parsing is total. Degenerate input yields a mostly-empty document, never an error.

mod frontmatter;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use folio_shared::{Section, Visibility};

/// Title used when a document has no `# Heading` line.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Parsed representation of a project narrative.
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    /// The H1 title, or [`UNTITLED_PROJECT`].
    pub title: String,
    /// `**When:**` preface field.
    pub when: String,
    /// `**Context:**` preface field.
    pub context: String,
    /// `**My role:**` preface field.
    pub my_role: String,
    /// Bullets under the `**Stack:**` label.
    pub stack: Vec<String>,
    /// Sections in source order. Keys are unique.
    pub sections: Vec<Section>,
    /// Leading YAML block, if present and a mapping.
    pub frontmatter: Option<serde_json::Value>,
    by_key: BTreeMap<String, usize>,
}

impl ProjectDocument {
    /// Look up a section by its normalized key.
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.by_key.get(key).map(|&i| &self.sections[i])
    }

    /// `section_visibility` entries declared in the frontmatter.
    pub fn frontmatter_visibility(&self) -> BTreeMap<String, Visibility> {
        let Some(map) = self
            .frontmatter
            .as_ref()
            .and_then(|fm| fm.get("section_visibility"))
            .and_then(|v| v.as_object())
        else {
            return BTreeMap::new();
        };

        map.iter()
            .map(|(key, value)| {
                let raw = value.as_str().unwrap_or_default().to_string();
                (key.clone(), Visibility::from(raw))
            })
            .collect()
    }
}

impl Default for ProjectDocument {
    fn default() -> Self {
        parse_project_document("")
    }
}

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `# Title`.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("H1 regex"));

/// Matches `## Section Title`.
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s+(.+)$").expect("H2 regex"));

/// Matches `**Label:** value` anywhere on a line.
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+):\*\*[ \t]*(.*)$").expect("meta regex"));

static KEY_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("key regex"));

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a project narrative into structured data.
#[instrument(skip_all, fields(len = text.len()))]
pub fn parse_project_document(text: &str) -> ProjectDocument {
    let normalized = text.replace("\r\n", "\n");
    let (raw_frontmatter, body) = frontmatter::split(&normalized);
    let frontmatter = raw_frontmatter.and_then(frontmatter::parse);
    let lines: Vec<&str> = body.trim().lines().collect();

    let title = lines
        .iter()
        .filter_map(|line| H1_RE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED_PROJECT.to_string());

    let first_section = lines
        .iter()
        .position(|line| H2_RE.is_match(line))
        .unwrap_or(lines.len());
    let (preface, rest) = lines.split_at(first_section);

    let (sections, by_key) = parse_sections(rest);

    let doc = ProjectDocument {
        title,
        when: extract_meta(preface, "When"),
        context: extract_meta(preface, "Context"),
        my_role: extract_meta(preface, "My role"),
        stack: extract_stack(preface),
        sections,
        frontmatter,
        by_key,
    };

    debug!(
        title = %doc.title,
        sections = doc.sections.len(),
        stack = doc.stack.len(),
        has_frontmatter = doc.frontmatter.is_some(),
        "parsed project document"
    );

    doc
}

/// Normalize a heading into a section key: lower-case, runs of
/// non-alphanumerics collapsed to `_`, trimmed of `_`.
pub fn section_key(heading: &str) -> String {
    let lowered = heading.trim().to_lowercase();
    KEY_RUN_RE
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Value of the first `**{label}:**` line in the preface, or empty.
fn extract_meta(preface: &[&str], label: &str) -> String {
    preface
        .iter()
        .filter_map(|line| META_RE.captures(line))
        .find(|caps| &caps[1] == label)
        .map(|caps| caps[2].trim().to_string())
        .unwrap_or_default()
}

/// Bullets following the `**Stack:**` label, up to the next heading.
fn extract_stack(preface: &[&str]) -> Vec<String> {
    let Some(start) = preface.iter().position(|line| line.contains("**Stack:**")) else {
        return Vec::new();
    };

    preface[start + 1..]
        .iter()
        .take_while(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| bullet_text(line))
        .map(String::from)
        .collect()
}

/// Split section lines at each `## Heading`. Duplicate keys: last wins,
/// keeping the position of the first occurrence.
fn parse_sections(lines: &[&str]) -> (Vec<Section>, BTreeMap<String, usize>) {
    let mut sections: Vec<Section> = Vec::new();
    let mut by_key: BTreeMap<String, usize> = BTreeMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    let mut flush = |entry: Option<(String, Vec<&str>)>| {
        let Some((heading, body)) = entry else {
            return;
        };
        let section = build_section(heading, &body);
        match by_key.get(&section.key) {
            Some(&i) => {
                debug!(key = %section.key, "duplicate section heading, keeping the last");
                sections[i] = section;
            }
            None => {
                by_key.insert(section.key.clone(), sections.len());
                sections.push(section);
            }
        }
    };

    for line in lines {
        if let Some(caps) = H2_RE.captures(line) {
            flush(current.take());
            current = Some((caps[1].trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    flush(current.take());

    (sections, by_key)
}

fn build_section(heading: String, lines: &[&str]) -> Section {
    let mut bullets = Vec::new();
    let mut prose = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match bullet_text(line) {
            Some(item) => bullets.push(item.to_string()),
            None => prose.push(*line),
        }
    }

    Section {
        key: section_key(&heading),
        heading,
        body: prose.join("\n").trim().to_string(),
        bullets,
    }
}

/// Text of a `- item` or `* item` line, marker stripped.
fn bullet_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .map(str::trim)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
