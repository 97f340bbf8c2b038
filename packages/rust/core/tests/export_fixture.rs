//! End-to-end export of the `fixtures/career` repository, gated by lint.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use folio_core::pipeline::{INDEX_OUTPUT, PROFILE_OUTPUT};
use folio_core::{ExportConfig, SilentProgress, export_site};
use folio_lint::{LintOptions, lint_path};
use folio_shared::Voice;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures/career")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn export(voice: Voice, out: &Path) {
    let config = ExportConfig {
        root: fixture_root(),
        out_dir: out.to_path_buf(),
        voice,
        display_name: "Jane Doe".into(),
    };
    export_site(&config, &SilentProgress).await.unwrap();
}

#[tokio::test]
async fn fixture_exports_clean_payloads() {
    let out = tempfile::tempdir().unwrap();
    export(Voice::FirstPerson, out.path()).await;

    let fraud = read_json(&out.path().join("projects/fraud-detection.json"));
    assert_eq!(fraud["title"], "Real-time Fraud Detection");
    assert_eq!(fraud["when"], "2022");
    assert_eq!(
        fraud["context"],
        "Built a real-time fraud scoring model for card payments."
    );
    assert_eq!(fraud["stack"], json!(["Python", "Kafka"]));
    assert_eq!(
        fraud["structured_fields"]["highlights"],
        json!(["Streaming feature pipeline", "Model serving layer with shadow deploys"])
    );
    assert_eq!(
        fraud["structured_fields"]["impact_highlights"],
        json!(["Cut manual review time by 30%"])
    );
    assert_eq!(
        fraud["selected_content"]["public_summary"],
        "I designed and shipped real-time fraud scoring."
    );
    assert_eq!(
        fraud["voice_variants"]["third_person"]["highlights"],
        json!(["Jane Doe designed the streaming feature pipeline"])
    );
    let keys: Vec<&str> = fraud["public_sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["what_i_built", "impact"]);

    let search = read_json(&out.path().join("projects/search-ranking.json"));
    assert!(search.get("when").is_none());
    assert_eq!(
        search["structured_fields"]["outcomes"],
        json!(["Improved click-through by 12%"])
    );

    let tooling = read_json(&out.path().join("projects/internal-tooling.json"));
    assert_eq!(tooling["title"], "Untitled Project");
    assert_eq!(
        tooling["structured_fields"]["highlights"],
        json!(["Deploy CLI used by 40 engineers"])
    );
    assert_eq!(tooling["display"]["timeline_display"], "hide");

    let profile = read_json(&out.path().join(PROFILE_OUTPUT));
    assert_eq!(
        profile["summary"],
        "I built fraud and search systems used by millions."
    );
    assert_eq!(profile["links"], json!({"github": "https://github.com/janedoe"}));
    assert_eq!(profile["skills"]["domains"], json!(["Fraud detection", "Ranking"]));
    assert!(profile.get("assessment").is_none());
    assert!(profile.get("story_bank").is_none());

    let index = read_json(&out.path().join(INDEX_OUTPUT));
    assert_eq!(
        index["projects"],
        json!(["search-ranking", "fraud-detection", "internal-tooling"])
    );
    assert_eq!(index["supported_voices"], json!(["first_person", "third_person"]));

    let report = lint_path(out.path(), &LintOptions::default()).unwrap();
    assert!(report.passed(), "{report}");
    assert_eq!(report.files_scanned, 5);
}

#[tokio::test]
async fn third_person_export_passes_lint() {
    let out = tempfile::tempdir().unwrap();
    export(Voice::ThirdPerson, out.path()).await;

    let profile = read_json(&out.path().join(PROFILE_OUTPUT));
    assert_eq!(
        profile["summary"],
        "Jane Doe built fraud and search systems used by millions."
    );
    let report = lint_path(out.path(), &LintOptions::default()).unwrap();
    assert!(report.passed(), "{report}");
}

#[test]
fn private_source_fails_lint() {
    let report = lint_path(&fixture_root(), &LintOptions::default()).unwrap();
    assert!(!report.passed());
    let names: Vec<&str> = report.violations.iter().map(|v| v.rule.name()).collect();
    assert!(names.contains(&"PRIVATE_PATH"));
    assert!(names.contains(&"NEEDS_CLARIFICATION"));
    assert!(names.contains(&"MISSING_MARKER"));
}
