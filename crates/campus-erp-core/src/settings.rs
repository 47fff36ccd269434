//! Application settings for the campus-erp client.
//!
//! [`Settings`] holds everything the front-end core needs to talk to the ERP
//! backend: endpoint URLs, request timeout, paging and upload defaults, and
//! logging configuration. Settings load from a TOML file with sensible
//! defaults for every key, and a `CAMPUS_ERP_API_BASE_URL` environment
//! variable overrides the base URL for deployment switching.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The complete client configuration.
///
/// # Examples
///
/// ```
/// use campus_erp_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_page_size, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the ERP REST API (no trailing slash).
    pub api_base_url: String,
    /// Path of the login endpoint, relative to the base URL.
    pub token_path: String,
    /// Absolute URL of the token refresh endpoint.
    pub token_refresh_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Timeout for requests carrying file uploads, in seconds.
    pub upload_timeout_secs: u64,
    /// Default page size for list views.
    pub default_page_size: usize,
    /// Default upload size cap in megabytes, used when a field descriptor
    /// does not set its own.
    pub max_upload_mb: u64,
    /// Log filter directive (e.g. "info", "campus_erp=debug").
    pub log_level: String,
    /// Pretty human-readable logs when `true`, JSON otherwise.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://erp.example.com/api".to_string(),
            token_path: "/token/".to_string(),
            token_refresh_url: "https://erp.example.com/api/token/refresh/".to_string(),
            request_timeout_secs: 100,
            upload_timeout_secs: 100,
            default_page_size: 10,
            max_upload_mb: 10,
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let mut settings: Self = toml::from_str(content)
            .map_err(|e| CoreError::Serialization(format!("invalid settings TOML: {e}")))?;
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Applies environment overrides (`CAMPUS_ERP_API_BASE_URL`).
    fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("CAMPUS_ERP_API_BASE_URL") {
            if !base.is_empty() {
                self.api_base_url = base;
            }
        }
    }

    /// Checks invariants the rest of the stack relies on.
    fn validate(&self) -> CoreResult<()> {
        if self.api_base_url.is_empty() {
            return Err(CoreError::Configuration(
                "api_base_url must not be empty".to_string(),
            ));
        }
        if self.default_page_size == 0 {
            return Err(CoreError::Configuration(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Joins a path onto the base URL, normalizing the slash between them.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Installs the global settings instance.
///
/// Returns an error if settings were already initialized.
pub fn init_settings(settings: Settings) -> CoreResult<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| CoreError::Configuration("settings already initialized".to_string()))
}

/// Returns the global settings, falling back to defaults if
/// [`init_settings`] was never called.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.default_page_size, 10);
        assert_eq!(s.max_upload_mb, 10);
        // Uploads are the slowest requests; they never get less time than
        // a plain request.
        assert!(s.upload_timeout_secs >= s.request_timeout_secs);
        assert!(!s.debug);
    }

    #[test]
    fn test_from_toml_partial() {
        let s = Settings::from_toml_str(
            r#"
            api_base_url = "https://erp.school.test/api"
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(s.api_base_url, "https://erp.school.test/api");
        assert!(s.debug);
        // untouched keys keep their defaults
        assert_eq!(s.request_timeout_secs, 100);
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(Settings::from_toml_str("api_base_url = [1,2]").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let result = Settings::from_toml_str("default_page_size = 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_joining() {
        let s = Settings {
            api_base_url: "https://erp.school.test/api/".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.api_url("/master/classes/"),
            "https://erp.school.test/api/master/classes/"
        );
        assert_eq!(
            s.api_url("master/classes/"),
            "https://erp.school.test/api/master/classes/"
        );
    }
}
