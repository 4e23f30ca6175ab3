//! Write the seed catalog to the data file.

use std::path::Path;

use tracing::info;

use super::CommandError;

/// Write the seed catalog to `data_file`.
///
/// An existing file is left alone unless `force` is set.
///
/// # Errors
///
/// Returns an error if the file or its directory cannot be written.
pub async fn run(data_file: &Path, force: bool) -> Result<(), CommandError> {
    if marketplace_api::db::write_seed(data_file, force).await? {
        info!(path = %data_file.display(), "Seed catalog written");
    } else {
        info!(
            path = %data_file.display(),
            "Data file already exists, use --force to overwrite"
        );
    }
    Ok(())
}
