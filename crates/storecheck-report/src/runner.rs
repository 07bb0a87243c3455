// crates/storecheck-report/src/runner.rs
// ============================================================================
// Module: Report Tool Runner
// Description: Subprocess invocation of the external report generator.
// Purpose: Turn raw results into a rendered report after the suite finishes.
// Dependencies: storecheck-core, std
// ============================================================================

//! ## Overview
//! The runner shells out to the report tool with the fixed command line
//! `<tool> generate <results-dir> --clean -o <output-dir>`, inheriting
//! stdout and stderr so progress streams through. The tool binary resolves
//! from an environment variable override or the configured name on `PATH`;
//! its presence is a precondition of the environment, not of this crate.
//! A tool that ran and exited non-zero is an outcome, not an error; report
//! generation is best-effort and never changes the suite result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use storecheck_core::ReportError;
use storecheck_core::ReportOutcome;
use storecheck_core::ReportRunner;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable overriding the report tool binary.
pub const REPORT_TOOL_ENV_VAR: &str = "STORECHECK_REPORT_TOOL";
/// Default report tool binary name resolved via `PATH`.
pub const DEFAULT_REPORT_TOOL: &str = "allure";
/// Default rendered-report output directory.
pub const DEFAULT_REPORT_OUTPUT_DIR: &str = "allure-report";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the report runner.
///
/// # Invariants
/// - `tool` names a binary resolvable via `PATH` unless overridden by
///   [`REPORT_TOOL_ENV_VAR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllureRunnerConfig {
    /// Report tool binary name or path.
    pub tool: String,
    /// Directory receiving the rendered report.
    pub output_dir: PathBuf,
}

impl Default for AllureRunnerConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_REPORT_TOOL.to_string(),
            output_dir: PathBuf::from(DEFAULT_REPORT_OUTPUT_DIR),
        }
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Subprocess-backed report runner.
#[derive(Debug, Clone, Default)]
pub struct AllureRunner {
    /// Runner configuration.
    config: AllureRunnerConfig,
}

impl AllureRunner {
    /// Creates a runner from the given configuration.
    #[must_use]
    pub const fn new(config: AllureRunnerConfig) -> Self {
        Self {
            config,
        }
    }

    /// Resolves the tool binary: env-var override first, configured name second.
    fn resolve_tool(&self) -> OsString {
        env::var_os(REPORT_TOOL_ENV_VAR)
            .unwrap_or_else(|| OsString::from(self.config.tool.clone()))
    }
}

impl ReportRunner for AllureRunner {
    fn generate(&self, results_dir: &Path) -> Result<ReportOutcome, ReportError> {
        let status = Command::new(self.resolve_tool())
            .arg("generate")
            .arg(results_dir)
            .arg("--clean")
            .arg("-o")
            .arg(&self.config.output_dir)
            .stdin(Stdio::null())
            .status()
            .map_err(|err| ReportError::Spawn(err.to_string()))?;
        if status.success() {
            Ok(ReportOutcome::Generated)
        } else {
            Ok(ReportOutcome::Failed {
                code: status.code(),
            })
        }
    }
}
