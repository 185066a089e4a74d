use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the home directory with an initial `config.json` and an empty database.
///
/// # Errors
/// - Returns an error if the directory was already initialized or any file operation fails.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home).await?;
    Ok(format!(
        "Created the expenses database at {}",
        config.sqlite_path().display()
    )
    .into())
}
