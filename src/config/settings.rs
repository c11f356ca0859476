//! Persisted client settings.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Allowed request timeout, in seconds.
pub const TIMEOUT_RANGE: RangeInclusive<u64> = 5..=120;

/// Allowed market page size.
pub const PAGE_SIZE_RANGE: RangeInclusive<u32> = 10..=500;

const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "PALADIUM";

/// How the API key is attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `Authorization: <key>`
    Plain,
    /// Custom header named by [`Config::auth_header`].
    #[serde(rename = "X-API-Key")]
    ApiKeyHeader,
    /// `?apikey=<key>` on the query string.
    Query,
}

impl AuthScheme {
    /// All schemes, in the order the settings form cycles through them.
    pub const ALL: [AuthScheme; 4] = [
        AuthScheme::Bearer,
        AuthScheme::Plain,
        AuthScheme::ApiKeyHeader,
        AuthScheme::Query,
    ];

    /// The scheme after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => write!(f, "Bearer"),
            Self::Plain => write!(f, "Plain"),
            Self::ApiKeyHeader => write!(f, "X-API-Key"),
            Self::Query => write!(f, "Query"),
        }
    }
}

/// Main configuration struct.
///
/// Serialized as a flat JSON object. Components receive a clone at
/// construction; changing settings means building new components from a
/// new value, see [`crate::App::apply_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL.
    pub api_base: String,
    /// API key.
    pub api_key: String,
    /// How the key is sent.
    pub auth_scheme: AuthScheme,
    /// Header name used with [`AuthScheme::ApiKeyHeader`].
    pub auth_header: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Number of market listings requested per page.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://api.paladium.games".to_string(),
            api_key: String::new(),
            auth_scheme: AuthScheme::Bearer,
            auth_header: "X-API-Key".to_string(),
            timeout: 15,
            page_size: 50,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    ///
    /// A missing or unreadable file is replaced with the defaults before
    /// loading. `PALADIUM_*` environment variables override file values.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(default_path);

        if !Self::is_readable(&config_path) {
            tracing::info!(path = %config_path.display(), "writing default configuration");
            Self::default().save(Some(config_path.clone()))?;
        }

        let layered = config::Config::builder()
            .add_source(
                config::File::from(config_path.as_path()).format(config::FileFormat::Json),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: Self = layered.try_deserialize()?;
        Ok(loaded.clamped())
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Return a copy with numeric fields pulled into their allowed ranges.
    pub fn clamped(mut self) -> Self {
        self.timeout = self
            .timeout
            .clamp(*TIMEOUT_RANGE.start(), *TIMEOUT_RANGE.end());
        self.page_size = self
            .page_size
            .clamp(*PAGE_SIZE_RANGE.start(), *PAGE_SIZE_RANGE.end());
        self
    }

    fn is_readable(path: &Path) -> bool {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Self>(&content).ok())
            .is_some()
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join(CONFIG_FILE))
        .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join("config.json")
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(&dir);

        let config = Config::load(Some(path.clone())).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        let written: Config =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    fn test_invalid_file_is_replaced_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let config = Config::load(Some(path.clone())).unwrap();

        assert_eq!(config, Config::default());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"api_base\""));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(&dir);
        let config = Config {
            api_base: "http://localhost:8080".to_string(),
            api_key: "secret".to_string(),
            auth_scheme: AuthScheme::ApiKeyHeader,
            auth_header: "X-Token".to_string(),
            timeout: 30,
            page_size: 100,
        };

        config.save(Some(path.clone())).unwrap();
        let loaded = Config::load(Some(path)).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"api_key": "abc", "auth_scheme": "Query"}"#).unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.auth_scheme, AuthScheme::Query);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout, 15);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"timeout": 1, "page_size": 9000}"#).unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.timeout, 5);
        assert_eq!(config.page_size, 500);
    }

    #[test]
    fn test_auth_scheme_serialized_names() {
        assert_eq!(
            serde_json::to_string(&AuthScheme::ApiKeyHeader).unwrap(),
            "\"X-API-Key\""
        );
        assert_eq!(
            serde_json::from_str::<AuthScheme>("\"Plain\"").unwrap(),
            AuthScheme::Plain
        );
        assert_eq!(AuthScheme::ApiKeyHeader.to_string(), "X-API-Key");
    }

    #[test]
    fn test_auth_scheme_cycles() {
        assert_eq!(AuthScheme::Bearer.next(), AuthScheme::Plain);
        assert_eq!(AuthScheme::Query.next(), AuthScheme::Bearer);
    }
}
