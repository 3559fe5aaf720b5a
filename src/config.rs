// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::errors::{Result, SimulateurError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

/// Settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite connection string, e.g. `sqlite:data/simulateur.db` or `sqlite::memory:`.
    pub database_url: String,
}

/// Optional TOML file pointed at by `SIMULATEUR_CONFIG`. Every key may be omitted.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database_url: Option<String>,
}

/// Settings of the command-line client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl ServerConfig {
    /// Load configuration from the optional TOML file, then environment overrides.
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var("SIMULATEUR_CONFIG") {
            Ok(path) => FileConfig::load(path)?,
            Err(_) => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merges a file configuration with variables read through `lookup`.
    /// Variables win over the file; defaults fill whatever is left.
    pub fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("SIMULATEUR_HOST")
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("SIMULATEUR_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                SimulateurError::Config(format!("SIMULATEUR_PORT '{}' is not a valid port: {}", raw, e))
            })?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let database_url = match lookup("DATABASE_URL").or(file.database_url) {
            Some(url) => url,
            None => default_database_url()?,
        };
        if !database_url.starts_with("sqlite:") {
            return Err(SimulateurError::Config(
                "DATABASE_URL must start with 'sqlite:'".to_string(),
            ));
        }

        Ok(ServerConfig { host, port, database_url })
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("SIMULATEUR_URL")
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        ClientConfig { base_url }
    }
}

/// `sqlite:<user data dir>/simulateur/simulateur.db`
fn default_database_url() -> Result<String> {
    let dir: PathBuf = dirs::data_dir()
        .ok_or_else(|| {
            SimulateurError::Config(
                "No user data directory available; please set DATABASE_URL.".to_string(),
            )
        })?
        .join("simulateur");
    Ok(format!("sqlite:{}", dir.join("simulateur.db").display()))
}
