//! Shared types, error model, configuration, and the blocked-token table for Folio.
//!
//! This crate is the foundation depended on by all other Folio crates.
//! It provides:
//! - [`FolioError`], the unified error type
//! - Domain and payload types ([`Section`], [`ProjectOverrides`], [`ProjectPayload`], [`Voice`])
//! - Configuration ([`AppConfig`], [`ExportDefaults`], [`LintConfig`], config loading)
//! - The [`blocklist`] shared by export-time sanitization and the lint gate

pub mod blocklist;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use blocklist::{
    BLOCKLIST_VERSION, BlockedKind, BlockedPattern, blocked_patterns, is_blocked, matching_patterns,
};
pub use config::{
    AppConfig, ExportDefaults, LintConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{FolioError, Result};
pub use types::{
    DisplayOverrides, ProjectOverrides, ProjectPayload, PublicDisplay, Section, SiteIndex,
    StructuredFields, StructuredOverrides, SUPPORTED_VOICES, TimelineDisplay, Visibility, Voice,
    VoiceVariant, VoiceVariantOverride, VoiceVariantOverrides, VoiceVariants,
};
