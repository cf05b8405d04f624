use async_trait::async_trait;

use crate::domain::product_image::errors::ProductImageError;
use crate::domain::product_image::model::{AggregatedProductImage, ImageIndexEntry};

pub struct AggregateIndexParams {
    pub entries: Vec<ImageIndexEntry>,
}

#[async_trait]
pub trait AggregateProductImagesUseCase: Send + Sync {
    /// Lists the catalog's image index and aggregates it.
    async fn execute(&self) -> Result<Vec<AggregatedProductImage>, ProductImageError>;

    /// Aggregates an index listing supplied by the caller.
    async fn execute_for(
        &self,
        params: AggregateIndexParams,
    ) -> Result<Vec<AggregatedProductImage>, ProductImageError>;
}
