use std::path::PathBuf;

use common::{AssetValidator, MAX_UPLOAD_SIZE, MediaType, ValidationError};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public origin used when building asset URLs. Defaults to
    /// `http://localhost:{port}`.
    #[serde(default)]
    pub base_url: Option<String>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("http://localhost:{}", self.port),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres URL. Empty selects the in-memory video repository.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Filesystem,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory served under `/assets` when using the filesystem backend.
    pub assets_root: PathBuf,
    pub max_upload_size: u64,
    /// Accepted thumbnail media types. Empty accepts any.
    #[serde(default)]
    pub allowed_media_types: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Filesystem,
            assets_root: PathBuf::from("./assets"),
            max_upload_size: MAX_UPLOAD_SIZE,
            allowed_media_types: Vec::new(),
        }
    }
}

impl StorageConfig {
    pub fn validator(&self) -> Result<AssetValidator, ValidationError> {
        let allowed = self
            .allowed_media_types
            .iter()
            .map(|raw| MediaType::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AssetValidator::new(self.max_upload_size).with_allowed_media_types(allowed))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8091)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "")?
            .set_default("storage.backend", "filesystem")?
            .set_default("storage.assets_root", "./assets")?
            .set_default("storage.max_upload_size", MAX_UPLOAD_SIZE as i64)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., TUBELY__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("TUBELY").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must be set".into()));
        }
        if self.storage.max_upload_size == 0 {
            return Err(ConfigError::Message(
                "storage.max_upload_size must be positive".into(),
            ));
        }
        self.storage
            .validator()
            .map_err(|e| ConfigError::Message(format!("storage.allowed_media_types: {e}")))?;
        Ok(())
    }
}
