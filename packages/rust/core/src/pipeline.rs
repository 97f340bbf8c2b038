//! End-to-end export: career root → sanitized payloads → public output directory.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use folio_markdown::{ProjectDocument, parse_project_document};
use folio_shared::{
    FolioError, ProjectOverrides, ProjectPayload, Result, SUPPORTED_VOICES, SiteIndex, Voice,
};

use crate::profile::{assemble_profile, featured_order};
use crate::project::{assemble_project, parse_overrides, to_public_json};
use crate::sanitize::sanitize_text;

/// Profile record at the root of a career repository.
pub const CAREER_FILE: &str = "career.json";
/// Directory holding one subdirectory per project.
pub const PROJECTS_DIR: &str = "projects";
/// Narrative document inside a project directory.
pub const PROJECT_DOCUMENT: &str = "project.md";
/// Override file inside a project directory.
pub const PROJECT_OVERRIDES: &str = "website.json";
/// Public profile written to the output directory.
pub const PROFILE_OUTPUT: &str = "career.public.json";
/// Index written to the output directory.
pub const INDEX_OUTPUT: &str = "index.json";

/// Configuration for [`export_site`].
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Career repository root.
    pub root: PathBuf,
    /// Output directory. Relative paths resolve against `root`.
    pub out_dir: PathBuf,
    /// Voice used for `selected_content` and the profile summary.
    pub voice: Voice,
    /// Name used when rewriting into third person.
    pub display_name: String,
}

impl ExportConfig {
    /// Output directory, resolved against the root when relative.
    pub fn resolved_out_dir(&self) -> PathBuf {
        if self.out_dir.is_absolute() {
            self.out_dir.clone()
        } else {
            self.root.join(&self.out_dir)
        }
    }
}

/// One assembled project.
#[derive(Debug, Clone)]
pub struct ExportedProject {
    pub payload: ProjectPayload,
    /// Pruned JSON, as written to disk.
    pub public: Value,
}

/// Result of [`export_site`].
#[derive(Debug)]
pub struct ExportResult {
    pub out_dir: PathBuf,
    pub index: SiteIndex,
    pub profile: Value,
    /// Assembled projects, sorted by slug.
    pub projects: Vec<ExportedProject>,
    pub elapsed: Duration,
}

/// Progress callback for reporting export status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a project has been assembled.
    fn project_exported(&self, slug: &str, current: usize, total: usize);
    /// Called when the export completes.
    fn done(&self, result: &ExportResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn project_exported(&self, _slug: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &ExportResult) {}
}

/// Run the full export.
///
/// 1. Read and assemble the profile
/// 2. Discover project directories
/// 3. Assemble projects concurrently
/// 4. Write project payloads, profile, and index
#[instrument(skip_all, fields(root = %config.root.display(), voice = %config.voice))]
pub async fn export_site(
    config: &ExportConfig,
    progress: &dyn ProgressReporter,
) -> Result<ExportResult> {
    let start = Instant::now();
    let display_name = sanitize_text(config.display_name.trim());
    if display_name.is_empty() {
        return Err(FolioError::config(
            "display name must not be empty or consist only of private content",
        ));
    }

    info!(root = %config.root.display(), "starting export");

    // --- Phase 1: Profile ---
    progress.phase("Reading profile");
    let record = read_profile_record(&config.root.join(CAREER_FILE)).await?;
    let profile = assemble_profile(&record, config.voice, &display_name);

    // --- Phase 2: Discovery ---
    progress.phase("Discovering projects");
    let projects_dir = config.root.join(PROJECTS_DIR);
    let slugs = discover_projects(&projects_dir).await?;
    let total = slugs.len();

    // --- Phase 3: Assemble ---
    progress.phase("Assembling projects");
    let mut tasks = JoinSet::new();
    for slug in slugs {
        let dir = projects_dir.join(&slug);
        let voice = config.voice;
        let name = display_name.clone();
        tasks.spawn_blocking(move || export_project_dir(&dir, &slug, voice, &name));
    }

    let mut projects = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        let project = joined
            .map_err(|e| FolioError::validation(format!("project task failed: {e}")))??;
        progress.project_exported(&project.payload.slug, projects.len() + 1, total);
        projects.push(project);
    }
    projects.sort_by(|a, b| a.payload.slug.cmp(&b.payload.slug));

    // --- Phase 4: Write ---
    progress.phase("Writing payloads");
    let out_dir = config.resolved_out_dir();
    let out_projects = out_dir.join(PROJECTS_DIR);
    tokio::fs::create_dir_all(&out_projects)
        .await
        .map_err(|e| FolioError::io(&out_projects, e))?;

    for project in &projects {
        let path = out_projects.join(format!("{}.json", project.payload.slug));
        write_json_atomic(&path, &project.public).await?;
    }
    write_json_atomic(&out_dir.join(PROFILE_OUTPUT), &profile).await?;

    let slugs: Vec<&str> = projects.iter().map(|p| p.payload.slug.as_str()).collect();
    let index = SiteIndex {
        voice: config.voice,
        career_file: PROFILE_OUTPUT.to_string(),
        projects: order_projects(&slugs, &featured_order(&profile)),
        supported_voices: SUPPORTED_VOICES.to_vec(),
    };
    write_json_atomic(&out_dir.join(INDEX_OUTPUT), &index).await?;

    let result = ExportResult {
        out_dir,
        index,
        profile,
        projects,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        out_dir = %result.out_dir.display(),
        project_count = result.projects.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "export complete"
    );

    Ok(result)
}

/// Featured slugs first, in featured order, then the rest sorted.
/// Featured slugs with no exported project are skipped.
pub fn order_projects(slugs: &[&str], featured: &[String]) -> Vec<String> {
    let available: BTreeSet<&str> = slugs.iter().copied().collect();
    let mut seen = BTreeSet::new();
    let mut ordered = Vec::with_capacity(available.len());

    for slug in featured {
        if available.contains(slug.as_str()) && seen.insert(slug.as_str()) {
            ordered.push(slug.clone());
        }
    }
    for slug in available {
        if seen.insert(slug) {
            ordered.push(slug.to_string());
        }
    }
    ordered
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Read `career.json`. A missing or malformed record is treated as empty.
async fn read_profile_record(path: &Path) -> Result<Value> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "profile record not found, using empty profile");
            return Ok(Value::Object(Default::default()));
        }
        Err(e) => return Err(FolioError::io(path, e)),
    };

    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "malformed profile record, using empty profile");
        Value::Object(Default::default())
    }))
}

/// Non-hidden subdirectories of `projects_dir`, sorted.
///
/// A directory name that would not survive sanitization is skipped: the slug
/// is published verbatim in the payload, the index, and the output file name.
async fn discover_projects(projects_dir: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(projects_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %projects_dir.display(), "no projects directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(FolioError::io(projects_dir, e)),
    };

    let mut slugs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FolioError::io(projects_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FolioError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 project directory");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if sanitize_text(&name) != name {
            warn!(slug = %name, "skipping project whose directory name is not publishable");
            continue;
        }
        slugs.push(name);
    }

    slugs.sort();
    debug!(count = slugs.len(), "discovered projects");
    Ok(slugs)
}

/// Read, assemble, and prune one project directory.
fn export_project_dir(
    dir: &Path,
    slug: &str,
    voice: Voice,
    display_name: &str,
) -> Result<ExportedProject> {
    let document = match read_optional(&dir.join(PROJECT_DOCUMENT))? {
        Some(text) => parse_project_document(&text),
        None => ProjectDocument::default(),
    };
    let overrides = match read_optional(&dir.join(PROJECT_OVERRIDES))? {
        Some(raw) => parse_overrides(&raw),
        None => ProjectOverrides::default(),
    };

    let payload = assemble_project(slug, &document, &overrides, voice, display_name);
    let public = to_public_json(&payload)?;
    Ok(ExportedProject { payload, public })
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "optional input missing");
            Ok(None)
        }
        Err(e) => Err(FolioError::io(path, e)),
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write pretty JSON with a trailing newline (write to temp, then rename).
async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(data)
        .map_err(|e| FolioError::Serialization(format!("{}: {e}", path.display())))?;
    json.push('\n');

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("payload.json");
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    tokio::fs::write(&temp, json)
        .await
        .map_err(|e| FolioError::io(&temp, e))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| FolioError::io(path, e))?;

    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}
