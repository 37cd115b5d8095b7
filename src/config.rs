use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mensentaal.db?mode=rwc";

/// Environment variables recognized on top of the config file.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_ALLOW_ORIGINS: &str = "ALLOW_ORIGINS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_CONFIG: &str = "DATABASE_CONFIG";
pub const ENV_DATABASE_PASSWORD: &str = "DATABASE_PASSWORD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed to call the API with credentials (the Vite dev server by default)
    pub allow_origin: String,
    /// Directory holding the built frontend; unmatched paths fall back to its index.html
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allow_origin: "http://localhost:5173".to_string(),
            static_dir: "dist".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "openai" or "openai-compatible"
    pub provider: String,
    pub model: String,
    pub api_key_env: Option<String>,
    /// For OpenAI-compatible gateways
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Whole-request timeout for the completion call. There is no retry.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            base_url: None,
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Connection details injected by the hosting platform as a JSON blob.
/// The password is never part of it and arrives separately.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDatabaseConfig {
    #[serde(default = "default_engine")]
    pub engine: String,
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(alias = "user")]
    pub username: String,
    #[serde(alias = "database", alias = "dbName")]
    pub dbname: String,
}

fn default_engine() -> String {
    "postgres".to_string()
}

impl Config {
    /// Load config from the working directory or user config directory
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path)
                .with_context(|| format!("failed to load config from {}", config_path));
        }

        if let Ok(config) = Self::load_from_path("mensentaal.toml") {
            debug!("Loaded config from ./mensentaal.toml");
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("mensentaal").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides. Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self) {
        if let Some(model) = non_empty_env(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(port) = non_empty_env(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring {}={:?}: not a valid port", ENV_PORT, port),
            }
        }
        if let Some(origin) = non_empty_env(ENV_ALLOW_ORIGINS) {
            self.server.allow_origin = origin;
        }
        if let Some(url) = non_empty_env(ENV_DATABASE_URL) {
            self.database.url = Some(url);
        }
    }

    /// Get API key from environment variable specified in config
    pub fn get_api_key(&self) -> Result<String> {
        match &self.llm.api_key_env {
            Some(env_var) => {
                if env_var.to_lowercase() == "none" {
                    return Ok(String::new());
                }

                // Local gateways often run without a key
                if self.llm.provider == "openai-compatible" {
                    return Ok(env::var(env_var).unwrap_or_default());
                }

                env::var(env_var).map_err(|_| {
                    anyhow::anyhow!("API key not found in environment variable: {}", env_var)
                })
            }
            None => Ok(String::new()),
        }
    }

    /// Resolve the database connection string.
    ///
    /// Order: `database.url` (already overridden by `DATABASE_URL`), then a URL
    /// derived from `DATABASE_CONFIG` + `DATABASE_PASSWORD`, then the bundled
    /// SQLite default.
    pub fn resolve_database_url(&self) -> Result<String> {
        if let Some(url) = self.database.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }

        if let Some(raw) = non_empty_env(ENV_DATABASE_CONFIG) {
            let password = non_empty_env(ENV_DATABASE_PASSWORD).with_context(|| {
                format!(
                    "{} is set but {} is missing",
                    ENV_DATABASE_CONFIG, ENV_DATABASE_PASSWORD
                )
            })?;
            debug!("Deriving database URL from {}", ENV_DATABASE_CONFIG);
            return derive_database_url(&raw, &password);
        }

        Ok(DEFAULT_DATABASE_URL.to_string())
    }
}

/// Build a connection URL from the platform JSON config and a password.
pub fn derive_database_url(raw_json: &str, password: &str) -> Result<String> {
    let platform: PlatformDatabaseConfig = serde_json::from_str(raw_json)
        .with_context(|| format!("{} is not valid JSON", ENV_DATABASE_CONFIG))?;

    let (scheme, default_port) = match platform.engine.to_lowercase().as_str() {
        "postgres" | "postgresql" | "pg" => ("postgres", 5432),
        other => bail!("Unsupported database engine in {}: {}", ENV_DATABASE_CONFIG, other),
    };

    let base = format!(
        "{}://{}:{}/{}",
        scheme,
        platform.host,
        platform.port.unwrap_or(default_port),
        platform.dbname
    );
    let mut url = reqwest::Url::parse(&base)
        .with_context(|| format!("invalid host or database name in {}", ENV_DATABASE_CONFIG))?;
    // set_* percent-encodes, so credentials with reserved characters survive
    url.set_username(&platform.username)
        .map_err(|_| anyhow::anyhow!("cannot set username on database URL"))?;
    url.set_password(Some(password))
        .map_err(|_| anyhow::anyhow!("cannot set password on database URL"))?;
    Ok(url.to_string())
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
