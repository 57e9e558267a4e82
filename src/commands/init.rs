use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and:
/// - Creates an initial `config.json` file with default settings
/// - Creates an empty data file with just the header row
///
/// # Arguments
/// - `fin_home` - The directory that will be the root of data directory, e.g. `$HOME/fin`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub fn init(fin_home: &Path) -> Result<Out<()>> {
    let config = Config::create(fin_home)
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the fin directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("fin");
        let out = init(&home).unwrap();
        assert!(out.message().contains("Successfully created"));
        assert!(out.structure().is_none());

        let config = Config::load(&home).unwrap();
        assert!(config.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_init_twice() {
        let dir = TempDir::new().unwrap();
        init(dir.path()).unwrap();
        let err = init(dir.path()).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }
}
