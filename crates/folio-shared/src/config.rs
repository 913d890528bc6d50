//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE_SIZE, DEFAULT_SIBLING_COUNT, MAX_PAGE_SIZE};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub csrf: CsrfSettings,
    pub content: ContentSettings,
    pub contact: ContactSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Origins allowed by CORS. Empty means same-origin only.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CsrfSettings {
    /// Mark the CSRF cookie `Secure` (HTTPS only).
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentSettings {
    pub path: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub sibling_count: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactSettings {
    pub inbox_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
    /// Write rolling log files here instead of stdout.
    #[serde(default)]
    pub directory: Option<String>,
}

impl AppConfig {
    /// Loads defaults, then `config/default`, `config/{APP_ENV}` and
    /// `FOLIO__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Built-in defaults only, no files or environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_builder()?.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "folio")?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("csrf.cookie_secure", false)?
            .set_default("content.path", "content/site.toml")?
            .set_default("content.default_page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("content.max_page_size", MAX_PAGE_SIZE as i64)?
            .set_default("content.sibling_count", DEFAULT_SIBLING_COUNT as i64)?
            .set_default("contact.inbox_path", "data/contact-inbox.jsonl")?
            .set_default("log.filter", "info,folio_api=debug")
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::defaults().unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.name, "folio");
        assert!(config.app.cors_origins.is_empty());
        assert!(!config.csrf.cookie_secure);
        assert_eq!(config.content.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.content.max_page_size, MAX_PAGE_SIZE);
        assert_eq!(config.content.sibling_count, DEFAULT_SIBLING_COUNT);
        assert!(config.log.directory.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config: AppConfig = AppConfig::defaults_builder()
            .unwrap()
            .add_source(File::from_str(
                r#"
                [app]
                env = "production"
                port = 3000

                [csrf]
                cookie_secure = true
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.port, 3000);
        assert!(config.csrf.cookie_secure);
        assert!(config.is_production());
        assert_eq!(config.app.host, "127.0.0.1");
    }
}
