use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] ConfigError),

    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_db_port(),
            name: String::new(),
            user: String::new(),
            password: String::new(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_db_port() -> u16 { 5432 }
fn default_connect_timeout() -> u64 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct OracleSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_model() -> String { "gpt-3.5-turbo-instruct".to_string() }
fn default_max_tokens() -> u32 { 300 }
fn default_oracle_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Candidates beyond this count are dropped before composing; 0 disables the cap
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_max_candidates() -> usize { crate::core::handler::DEFAULT_MAX_CANDIDATES }

impl MatchingSettings {
    pub fn candidate_cap(&self) -> Option<usize> {
        (self.max_candidates > 0).then_some(self.max_candidates)
    }
}

/// Legacy environment names mapped onto config keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("OPENAI_API_KEY", "oracle.api_key"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GIG__)
    /// 5. DB_HOST, DB_NAME, DB_USER, DB_PASSWORD, DB_PORT and OPENAI_API_KEY
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GIG__DATABASE__HOST -> database.host
            .add_source(
                Environment::with_prefix("GIG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings, |key| std::env::var(key).ok())?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    ///
    /// The file replaces config/default and config/local; environment
    /// variables still apply on top of it.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        Self::load_from_with(path, |key| std::env::var(key).ok())
    }

    fn load_from_with<P, F>(path: P, lookup: F) -> Result<Self, SettingsError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GIG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings, lookup)?;

        Self::from_config(settings)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fail fast on required values that are absent or blank
    pub fn validate(&self) -> Result<(), SettingsError> {
        let required = [
            ("database.host", &self.database.host),
            ("database.name", &self.database.name),
            ("database.user", &self.database.user),
            ("database.password", &self.database.password),
            ("oracle.api_key", &self.oracle.api_key),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(SettingsError::Missing(key));
            }
        }

        Ok(())
    }
}

fn apply_env_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(*var) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const COMPLETE: &str = r#"
        [database]
        host = "localhost"
        name = "gig"
        user = "gig"
        password = "secret"

        [oracle]
        api_key = "sk-test"
    "#;

    fn parse(toml: &str) -> Result<Settings, SettingsError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Settings::from_config(config)
    }

    #[test]
    fn test_defaults() {
        let settings = parse(COMPLETE).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.oracle.model, "gpt-3.5-turbo-instruct");
        assert_eq!(settings.oracle.max_tokens, 300);
        assert_eq!(settings.matching.candidate_cap(), Some(100));
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let toml = COMPLETE.replace(r#"api_key = "sk-test""#, "");
        let err = parse(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Missing("oracle.api_key")));
    }

    #[test]
    fn test_blank_password_fails_fast() {
        let toml = COMPLETE.replace(r#"password = "secret""#, r#"password = "  ""#);
        let err = parse(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Missing("database.password")));
    }

    #[test]
    fn test_legacy_env_names_override() {
        let base = Config::builder()
            .add_source(File::from_str(COMPLETE, FileFormat::Toml))
            .build()
            .unwrap();

        let config = apply_env_overrides(base, |var| match var {
            "DB_HOST" => Some("db.internal".to_string()),
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        })
        .unwrap();

        let settings = Settings::from_config(config).unwrap();
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.oracle.api_key, "sk-env");
        assert_eq!(settings.database.name, "gig");
    }

    #[test]
    fn test_empty_config_reports_first_missing_value() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, SettingsError::Missing("database.host")));
    }

    #[test]
    fn test_load_from_path_applies_legacy_env_names() {
        let path = std::env::temp_dir().join(format!("gig-matcher-{}.toml", uuid::Uuid::new_v4()));
        let toml = COMPLETE.replace(r#"host = "localhost""#, "");
        std::fs::write(&path, toml).unwrap();

        let without_env = Settings::load_from_with(&path, |_| None);
        let with_env = Settings::load_from_with(&path, |var| {
            (var == "DB_HOST").then(|| "db.internal".to_string())
        });
        std::fs::remove_file(&path).ok();

        assert!(matches!(without_env, Err(SettingsError::Missing("database.host"))));
        assert_eq!(with_env.unwrap().database.host, "db.internal");
    }

    #[test]
    fn test_zero_disables_cap() {
        let settings = MatchingSettings { max_candidates: 0 };
        assert_eq!(settings.candidate_cap(), None);
    }
}
