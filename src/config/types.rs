use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Shortcut;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Locale codes the site can display. The first entry is only an ordering hint;
    /// `default_locale` decides the fallback.
    pub supported_locales: Vec<String>,
    pub default_locale: String,

    /// Name of the URL query parameter carrying an explicit locale request.
    pub query_parameter: String,
    /// Key of the persisted locale preference.
    pub storage_key: String,
    /// Preference file, relative to the workspace root.
    pub preference_file: String,

    /// Directory holding `<locale>.json` overrides for the built-in table.
    pub translations_dir: Option<String>,

    /// Keyboard shortcut toggling between two locales (e.g. "Alt+L").
    pub toggle_shortcut: String,

    /// Id of the element the locale switcher is inserted after.
    pub switcher_anchor_id: String,

    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConfig {
    /// GitHub REST endpoint describing the repository.
    pub api_url: String,
    /// Upper bound on the single status request.
    pub timeout_secs: u64,
    /// Id of the element that receives the status panel.
    pub container_id: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com/repos/takawasi/sca-cognitive-architecture"
                .to_string(),
            timeout_secs: 8,
            container_id: "github-status".to_string(),
        }
    }
}

impl SiteSettings {
    /// # Errors
    /// - No supported locale, or a duplicated one
    /// - Default locale is not supported
    /// - Empty query parameter / storage key
    /// - Invalid shortcut, API URL or timeout
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.supported_locales.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: [\"en\", \"ja\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.supported_locales.iter().enumerate() {
            if locale.is_empty() {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    "The locale code cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        if !self.supported_locales.contains(&self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The default locale '{}' must be one of the supported locales",
                    self.default_locale
                ),
            ));
        }

        if self.query_parameter.is_empty() {
            errors.push(ValidationError::new(
                "queryParameter",
                "The parameter name cannot be empty. Example: \"lang\"",
            ));
        }

        if self.storage_key.is_empty() {
            errors.push(ValidationError::new(
                "storageKey",
                "The storage key cannot be empty. Example: \"sca-language\"",
            ));
        }

        if let Err(e) = self.toggle_shortcut.parse::<Shortcut>() {
            errors.push(ValidationError::new("toggleShortcut", e.to_string()));
        }

        if let Err(e) = url::Url::parse(&self.repository.api_url) {
            errors.push(ValidationError::new(
                "repository.apiUrl",
                format!("Invalid URL '{}': {e}", self.repository.api_url),
            ));
        }

        if self.repository.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "repository.timeoutSecs",
                "The timeout must be at least 1 second",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Parsed form of `toggle_shortcut`, falling back to Alt+L.
    #[must_use]
    pub fn shortcut(&self) -> Shortcut {
        self.toggle_shortcut.parse().unwrap_or_default()
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            supported_locales: vec!["en".to_string(), "ja".to_string()],
            default_locale: "en".to_string(),
            query_parameter: "lang".to_string(),
            storage_key: "sca-language".to_string(),
            preference_file: ".sca-site/preferences.json".to_string(),
            translations_dir: None,
            toggle_shortcut: "Alt+L".to_string(),
            switcher_anchor_id: "nav-github".to_string(),
            repository: RepositoryConfig::default(),
        }
    }
}
