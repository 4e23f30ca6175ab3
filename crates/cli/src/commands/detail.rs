//! Print the enriched detail of a stored product.

use std::path::Path;

use marketplace_api::db::JsonStore;
use marketplace_api::services::ProductService;
use marketplace_core::types::ProductId;

use super::CommandError;

/// Load the catalog and render product `id` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the data file cannot be loaded or the product does
/// not exist.
pub async fn render(data_file: &Path, id: i64) -> Result<String, CommandError> {
    let store = JsonStore::open(data_file).await?;
    let detail = ProductService::new(&store)
        .get_enriched(ProductId::new(id))
        .await?;
    Ok(serde_json::to_string_pretty(&detail)?)
}
