//! Configuration file handling.
//!
//! The home directory (`$HOME/expenses` by default) holds `config.json` and the SQLite database
//! `expenses.sqlite`.

use crate::error::{ErrorType, IntoResult};
use crate::store::SqliteStore;
use crate::tracker::Tracker;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const DEFAULT_CURRENCY_SYMBOL: &str = "€";
const CONFIG_JSON: &str = "config.json";
const EXPENSES_SQLITE: &str = "expenses.sqlite";

/// The canonical home directory, the path of `config.json` and its contents.
type HomeFiles = (PathBuf, PathBuf, ConfigFile);

/// The `Config` object represents the home directory of the app. You instantiate it by providing
/// the path to the home directory and from there it loads `config.json` and opens the database.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: SqliteStore,
}

impl Config {
    /// Creates the home directory if needed, writes an initial `config.json` and creates the
    /// database.
    ///
    /// # Errors
    /// - Returns an error if a database already exists in `dir` or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let (root, config_path, config_file) = Self::create_inner(dir.into())
            .await
            .pub_result(ErrorType::Config)?;
        let store = SqliteStore::init(root.join(EXPENSES_SQLITE)).await?;
        Ok(Self {
            root,
            config_path,
            config_file,
            store,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load and validate the config file
    /// - open the database, upgrading its schema if it is out of date
    ///
    /// Database failures are returned as [`Error::Storage`](crate::Error::Storage), everything
    /// else as [`Error::Config`](crate::Error::Config).
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let (root, config_path, config_file) = Self::load_inner(home.into())
            .await
            .pub_result(ErrorType::Config)?;
        let store = SqliteStore::load(root.join(EXPENSES_SQLITE)).await?;
        Ok(Self {
            root,
            config_path,
            config_file,
            store,
        })
    }

    async fn create_inner(maybe_relative: PathBuf) -> anyhow::Result<HomeFiles> {
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let sqlite_path = root.join(EXPENSES_SQLITE);
        if sqlite_path.exists() {
            bail!(
                "A database already exists at '{}', it has already been initialized",
                sqlite_path.display()
            );
        }

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;
        Ok((root, config_path, config_file))
    }

    async fn load_inner(maybe_relative: PathBuf) -> anyhow::Result<HomeFiles> {
        if !maybe_relative.is_dir() {
            bail!(
                "The home directory is missing '{}', run init first",
                maybe_relative.display()
            );
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        Ok((root, config_path, config_file))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn sqlite_path(&self) -> &Path {
        self.store.path()
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// A tracker over this home directory's database.
    pub fn tracker(&self) -> Tracker<SqliteStore> {
        Tracker::new(self.store.clone())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "currency_symbol": "€"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Printed in front of amounts in tables
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path` and validates it.
    async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version <= CONFIG_VERSION,
            "The config file version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to `path` as pretty JSON.
    async fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("expenses_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.root().is_absolute());
        assert!(config.config_path().is_file());
        assert!(config.sqlite_path().is_file());
        assert_eq!(config.currency_symbol(), "€");

        let written = utils::read(config.config_path()).await.unwrap();
        assert!(written.contains("\"app_name\": \"expenses\""));
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("already been initialized"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.sqlite_path(), loaded.sqlite_path());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("home directory is missing"));
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_config_load_wrong_app_name() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        utils::write(
            config.config_path(),
            r#"{"app_name": "budget", "config_version": 1}"#,
        )
        .await
        .unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_load_missing_database() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        config.store().close().await;
        tokio::fs::remove_file(config.sqlite_path()).await.unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("The database file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_currency_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "expenses", "config_version": 1}"#)
            .await
            .unwrap();
        let config_file = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config_file, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_newer_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "expenses", "config_version": 9}"#)
            .await
            .unwrap();
        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("newer than this program supports"));
    }
}
