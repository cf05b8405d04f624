use async_trait::async_trait;

use super::model::{ImageIndexEntry, ProductImage};
use crate::domain::errors::CatalogError;
use crate::domain::shared::value_objects::ProductId;

/// Service port for the upstream product-image catalog.
///
/// `list_image_index` returns the raw listing, duplicates and malformed records
/// included. `fetch_image_detail` resolves the image payload of one product.
#[async_trait]
pub trait ProductImageCatalog: Send + Sync {
    async fn list_image_index(&self) -> Result<Vec<ImageIndexEntry>, CatalogError>;

    async fn fetch_image_detail(&self, product_id: &ProductId)
    -> Result<ProductImage, CatalogError>;
}
