//! Runtime settings: service endpoints, the trailer credential and HTTP limits.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file (`reel-search.toml` in the working directory, or an
//!    explicit path)
//! 3. environment variables such as `REEL__TRAILER__API_KEY`

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "reel-search";
pub const DEFAULT_CATALOG_URL: &str = "https://yts.mx/api/v2";
pub const DEFAULT_TRAILER_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const ENV_PREFIX: &str = "REEL";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub trailer: TrailerSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Root of the YTS v2 API; also serves suggestions
    pub base_url: String,
}

#[derive(Clone, Deserialize)]
pub struct TrailerSettings {
    pub base_url: String,
    /// Video search credential. Lookups are skipped while unset.
    #[serde(default)]
    pub api_key: Option<String>,
    pub embed_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Upper bound for every single external call
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    /// Load settings from defaults, `path` (or the default file when present)
    /// and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Self::builder_with_defaults()?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(settings)
    }

    /// A config builder preloaded with every default value
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("catalog.base_url", DEFAULT_CATALOG_URL)?
            .set_default("trailer.base_url", DEFAULT_TRAILER_URL)?
            .set_default("trailer.embed_base_url", trailer::DEFAULT_EMBED_BASE_URL)?
            .set_default("http.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("http.user_agent", default_user_agent())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// One pooled HTTP client for every service, bounded by the configured timeout
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(self.http.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings {
                base_url: DEFAULT_CATALOG_URL.to_string(),
            },
            trailer: TrailerSettings {
                base_url: DEFAULT_TRAILER_URL.to_string(),
                api_key: None,
                embed_base_url: trailer::DEFAULT_EMBED_BASE_URL.to_string(),
            },
            http: HttpSettings {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                user_agent: default_user_agent(),
            },
        }
    }
}

impl std::fmt::Debug for TrailerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailerSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("embed_base_url", &self.embed_base_url)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("reel-search/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Settings::builder_with_defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_match_default_impl() {
        let loaded = from_toml("");
        let default = Settings::default();

        assert_eq!(loaded.catalog.base_url, default.catalog.base_url);
        assert_eq!(loaded.trailer.base_url, default.trailer.base_url);
        assert_eq!(loaded.trailer.embed_base_url, default.trailer.embed_base_url);
        assert_eq!(loaded.trailer.api_key, None);
        assert_eq!(loaded.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(loaded.http.user_agent.starts_with("reel-search/"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings = from_toml(
            r#"
            [catalog]
            base_url = "http://localhost:9000/api/v2"

            [trailer]
            api_key = "abc123"

            [http]
            timeout_secs = 3
            "#,
        );

        assert_eq!(settings.catalog.base_url, "http://localhost:9000/api/v2");
        assert_eq!(settings.trailer.api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.trailer.base_url, DEFAULT_TRAILER_URL);
        assert_eq!(settings.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/definitely/not/here/reel-search.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut settings = Settings::default();
        settings.trailer.api_key = Some("super-secret".to_string());

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_http_client_builds() {
        assert!(Settings::default().http_client().is_ok());
    }
}
