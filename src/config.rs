use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    /// Directory with the built browser client, served for unmatched paths.
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Whether `/api/users/register` accepts new accounts.
    #[serde(default = "default_true")]
    pub registration: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { registration: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            page_size: default_page_size(),
        }
    }
}

fn default_port() -> String {
    "3031".to_string()
}

fn default_true() -> bool {
    true
}

fn default_recent_limit() -> usize {
    5
}

fn default_page_size() -> usize {
    6
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("moviecat.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("dbdir: /var/lib/moviecat\n").unwrap();
        assert_eq!(config.listen.port, "3031");
        assert!(config.auth.registration);
        assert_eq!(config.catalog.recent_limit, 5);
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(
            config.get_database_path().as_deref(),
            Some("/var/lib/moviecat/moviecat.db")
        );
    }

    #[test]
    fn test_explicit_sqlite_wins() {
        let yaml = "
listen:
  address: 127.0.0.1
  port: \"8080\"
dbdir: /tmp
database:
  sqlite:
    filename: /data/movies.db
auth:
  registration: false
catalog:
  page_size: 12
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "8080");
        assert!(!config.auth.registration);
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.recent_limit, 5);
        assert_eq!(config.get_database_path().as_deref(), Some("/data/movies.db"));
    }
}
