//! Core export logic for folio.
//!
//! Sanitization, section visibility, structured-field merging, and voice
//! normalization, composed into project and profile payloads and the
//! on-disk export (`export_site`).

pub mod merge;
pub mod pipeline;
pub mod profile;
pub mod project;
pub mod prune;
pub mod sanitize;
pub mod visibility;
pub mod voice;

pub use pipeline::{
    ExportConfig, ExportResult, ExportedProject, ProgressReporter, SilentProgress, export_site,
};
