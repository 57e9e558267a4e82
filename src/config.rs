//! Configuration file handling for fin.
//!
//! The configuration file is stored at `$FIN_HOME/config.json` and says where the ledger's data
//! file lives. Everything else about the layout of `$FIN_HOME` is fixed.

use crate::error::{ErrorType, IntoResult, Res};
use crate::store::LedgerStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "fin";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";
const TRANSACTIONS_CSV: &str = "transactions.csv";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FIN_HOME` and from there it loads `$FIN_HOME/config.json`. It provides the
/// `LedgerStore` for the configured data file.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: LedgerStore,
}

impl Config {
    /// Creates the home directory and:
    /// - Writes an initial `config.json` file with default settings
    /// - Creates the data file, with only a header row, if it does not exist yet
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub(crate) fn create(dir: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the fin home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let config = Self::assemble(root, config_path, config_file);

        // Loading a missing data file creates it.
        let _ = config
            .store
            .load()
            .context("Unable to create the data file")?;
        Ok(config)
    }

    /// This will
    /// - validate that `fin_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    ///
    /// The data file is not read here, see `LedgerStore::load`.
    pub fn load(fin_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(fin_home.into()).pub_result(ErrorType::Config)
    }

    fn load_inner(maybe_relative: PathBuf) -> Res<Self> {
        let root = utils::canonicalize(&maybe_relative).context("fin home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'fin init' to create it",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;
        let config = Self::assemble(root, config_path, config_file);
        debug!("Using data file {}", config.store.path().display());
        Ok(config)
    }

    fn assemble(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let data_path = resolve(&root, config_file.data_file());
        Self {
            root,
            config_path,
            config_file,
            store: LedgerStore::new(data_path),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The path to the data file, after resolving it against `root` if it was relative.
    pub fn data_path(&self) -> &Path {
        self.store.path()
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn config_version(&self) -> u8 {
        self.config_file.config_version
    }
}

/// Returns `p` if it is absolute, otherwise `root` joined with `p`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fin",
///   "config_version": 1,
///   "data_file": "data/transactions.csv"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fin"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the CSV data file (optional, relative to `$FIN_HOME` or absolute)
    /// Defaults to $FIN_HOME/data/transactions.csv if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: Some(default_data_file()),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, if `app_name` is wrong, or if the
    /// file was written by a newer version of fin.
    fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is unsupported. Is a newer version of fin available?",
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    /// Gets the data file path.
    ///
    /// If the path is relative, it should be interpreted as relative to `$FIN_HOME`.
    fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DATA_DIR).join(TRANSACTIONS_CSV)
}
