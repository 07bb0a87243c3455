// crates/storecheck-core/src/runtime/environment.rs
// ============================================================================
// Module: Environment Manifest
// Description: Writes the run-metadata properties file into the results directory.
// Purpose: Let the external report tool render run environment details.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The report tool picks up an `environment.properties` file from the
//! results directory and renders its entries on the report landing page.
//! The manifest is written once during suite start, after cleaning; an empty
//! entry list writes nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Manifest Writer
// ============================================================================

/// Filename of the environment manifest inside the results directory.
pub const ENVIRONMENT_FILE_NAME: &str = "environment.properties";

/// Writes `key=value` lines into `<results_dir>/environment.properties`.
///
/// Returns the manifest path when written, or `None` when `entries` is empty
/// and nothing was written. The results directory is created when missing.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory or file cannot be
/// written.
pub fn write_environment_manifest(
    results_dir: &Path,
    entries: &[(String, String)],
) -> Result<Option<PathBuf>, io::Error> {
    if entries.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(results_dir)?;
    let mut content = String::new();
    for (key, value) in entries {
        content.push_str(key);
        content.push('=');
        content.push_str(value);
        content.push('\n');
    }
    let path = results_dir.join(ENVIRONMENT_FILE_NAME);
    fs::write(&path, content)?;
    Ok(Some(path))
}
