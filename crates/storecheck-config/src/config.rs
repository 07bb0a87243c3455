// crates/storecheck-config/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Configuration loading and validation for Storecheck runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: storecheck-core, storecheck-client, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. Missing or invalid configuration fails closed: a suite with a bad
//! base URL or absent administrator identity must not start. Loaded values
//! convert into the session context, client config, and run config the
//! lifecycle controller consumes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use storecheck_client::ApiClientConfig;
use storecheck_core::SessionContext;
use storecheck_core::SuiteRunConfig;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "storecheck.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "STORECHECK_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum client timeout in milliseconds.
pub(crate) const MIN_CLIENT_TIMEOUT_MS: u64 = 100;
/// Maximum client timeout in milliseconds.
pub(crate) const MAX_CLIENT_TIMEOUT_MS: u64 = 300_000;
/// Maximum user agent length.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 128;
/// Maximum number of environment manifest entries.
pub(crate) const MAX_ENVIRONMENT_ENTRIES: usize = 64;
/// Default credentials document path.
const DEFAULT_CREDENTIALS_PATH: &str = "resources/token.json";
/// Default identifiers document path.
const DEFAULT_IDENTIFIERS_PATH: &str = "resources/ids.json";
/// Default raw-results directory.
const DEFAULT_RESULTS_DIR: &str = "allure-results";
/// Default report tool binary name.
const DEFAULT_REPORT_TOOL: &str = "allure";
/// Default rendered-report output directory.
const DEFAULT_REPORT_OUTPUT_DIR: &str = "allure-report";
/// Default client timeout in milliseconds.
const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 30_000;
/// Default client user agent.
const DEFAULT_USER_AGENT: &str = "storecheck/0.1";

// ============================================================================
// SECTION: Configuration Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file failed to parse as TOML.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config contents failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Storecheck suite configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// Backend base URL.
    pub base_url: String,
    /// State document paths.
    #[serde(default)]
    pub store: StoreSection,
    /// Raw-results directory.
    #[serde(default)]
    pub results: ResultsSection,
    /// Pre-provisioned administrator identity.
    pub admin: AdminSection,
    /// HTTP client settings.
    #[serde(default)]
    pub client: ClientSection,
    /// Report tool settings.
    #[serde(default)]
    pub report: ReportSection,
    /// Environment manifest entries rendered by the report tool.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// State document paths.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// Path of the credentials document.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    /// Path of the identifiers document.
    #[serde(default = "default_identifiers_path")]
    pub identifiers_path: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            identifiers_path: default_identifiers_path(),
        }
    }
}

/// Raw-results directory settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsSection {
    /// Directory collecting raw results for the report tool.
    #[serde(default = "default_results_dir")]
    pub dir: PathBuf,
}

impl Default for ResultsSection {
    fn default() -> Self {
        Self {
            dir: default_results_dir(),
        }
    }
}

/// Pre-provisioned administrator identity.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSection {
    /// Administrator account email.
    pub email: String,
    /// Administrator account password.
    pub password: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSection {
    /// Request timeout in milliseconds.
    #[serde(default = "default_client_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_client_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Report tool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Report tool binary name or path.
    #[serde(default = "default_report_tool")]
    pub tool: String,
    /// Directory receiving the rendered report.
    #[serde(default = "default_report_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            tool: default_report_tool(),
            output_dir: default_report_output_dir(),
        }
    }
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl SuiteConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::Invalid(format!("base_url does not parse: {err}")))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid(format!(
                    "base_url has unsupported scheme {scheme}"
                )));
            }
        }
        if self.admin.email.is_empty() || !self.admin.email.contains('@') {
            return Err(ConfigError::Invalid("admin email must be a non-empty address".to_string()));
        }
        if self.admin.password.is_empty() {
            return Err(ConfigError::Invalid("admin password must not be empty".to_string()));
        }
        if self.client.timeout_ms < MIN_CLIENT_TIMEOUT_MS
            || self.client.timeout_ms > MAX_CLIENT_TIMEOUT_MS
        {
            return Err(ConfigError::Invalid(format!(
                "client timeout_ms must be within {MIN_CLIENT_TIMEOUT_MS}..={MAX_CLIENT_TIMEOUT_MS}"
            )));
        }
        if self.client.user_agent.is_empty()
            || self.client.user_agent.len() > MAX_USER_AGENT_LENGTH
        {
            return Err(ConfigError::Invalid("client user_agent length is invalid".to_string()));
        }
        validate_path(&self.store.credentials_path)?;
        validate_path(&self.store.identifiers_path)?;
        if self.store.credentials_path == self.store.identifiers_path {
            return Err(ConfigError::Invalid(
                "credentials and identifiers documents must be distinct files".to_string(),
            ));
        }
        validate_path(&self.results.dir)?;
        validate_path(&self.report.output_dir)?;
        if self.report.tool.is_empty() {
            return Err(ConfigError::Invalid("report tool must not be empty".to_string()));
        }
        if self.environment.len() > MAX_ENVIRONMENT_ENTRIES {
            return Err(ConfigError::Invalid("too many environment entries".to_string()));
        }
        for (key, value) in &self.environment {
            if key.is_empty() || key.contains('=') || key.contains('\n') {
                return Err(ConfigError::Invalid(format!("invalid environment key {key:?}")));
            }
            if value.contains('\n') {
                return Err(ConfigError::Invalid(format!(
                    "environment value for {key} must be a single line"
                )));
            }
        }
        Ok(())
    }

    /// Returns the session context described by this configuration.
    #[must_use]
    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(
            self.base_url.clone(),
            self.store.credentials_path.clone(),
            self.store.identifiers_path.clone(),
        )
    }

    /// Returns the API client configuration described by this configuration.
    #[must_use]
    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            timeout_ms: self.client.timeout_ms,
            user_agent: self.client.user_agent.clone(),
        }
    }

    /// Returns the suite run configuration described by this configuration.
    #[must_use]
    pub fn suite_run_config(&self) -> SuiteRunConfig {
        SuiteRunConfig {
            results_dir: self.results.dir.clone(),
            environment: self
                .environment
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the effective config path from argument, env var, or default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(
        || {
            env::var_os(CONFIG_ENV_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

/// Validates path length and component limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("path must not be empty".to_string()));
    }
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds total length limit".to_string()));
    }
    for component in path.components() {
        if let Component::Normal(part) = component
            && part.len() > MAX_PATH_COMPONENT_LENGTH
        {
            return Err(ConfigError::Invalid("path component exceeds length limit".to_string()));
        }
    }
    Ok(())
}

/// Returns the default credentials document path.
fn default_credentials_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_PATH)
}

/// Returns the default identifiers document path.
fn default_identifiers_path() -> PathBuf {
    PathBuf::from(DEFAULT_IDENTIFIERS_PATH)
}

/// Returns the default raw-results directory.
fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}

/// Returns the default report tool name.
fn default_report_tool() -> String {
    DEFAULT_REPORT_TOOL.to_string()
}

/// Returns the default rendered-report output directory.
fn default_report_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_OUTPUT_DIR)
}

/// Returns the default client timeout in milliseconds.
const fn default_client_timeout_ms() -> u64 {
    DEFAULT_CLIENT_TIMEOUT_MS
}

/// Returns the default client user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
