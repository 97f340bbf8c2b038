//! Application configuration for Folio.
//!
//! User config lives at `~/.folio/folio.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::Voice;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "folio.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".folio";

// ---------------------------------------------------------------------------
// Config structs (matching folio.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Export defaults.
    #[serde(default)]
    pub export: ExportDefaults,

    /// Lint gate settings.
    #[serde(default)]
    pub lint: LintConfig,
}

/// `[export]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Name used when rewriting text into third person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Voice selected for top-level content.
    #[serde(default)]
    pub voice: Voice,

    /// Output directory, relative to the career root unless absolute.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            display_name: None,
            voice: Voice::default(),
            out_dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> String {
    "public_site".into()
}

/// `[lint]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Extensions scanned line-by-line (without the leading dot).
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,

    /// Maximum characters of an offending value shown in a report.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_text_extensions() -> Vec<String> {
    ["md", "txt", "yml", "yaml"].map(String::from).to_vec()
}
fn default_preview_chars() -> usize {
    140
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.folio/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| FolioError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.folio/folio.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| FolioError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| FolioError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FolioError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FolioError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
