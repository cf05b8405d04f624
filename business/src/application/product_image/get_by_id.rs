use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::CatalogError;
use crate::domain::logger::Logger;
use crate::domain::product_image::aggregator::ImageAggregator;
use crate::domain::product_image::errors::ProductImageError;
use crate::domain::product_image::model::{ImageIndexEntry, ProductImage};
use crate::domain::product_image::services::ProductImageCatalog;
use crate::domain::product_image::use_cases::get_by_id::{
    GetProductImageParams, GetProductImageUseCase,
};

pub struct GetProductImageUseCaseImpl {
    pub catalog: Arc<dyn ProductImageCatalog>,
    pub aggregator: ImageAggregator,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductImageUseCase for GetProductImageUseCaseImpl {
    async fn execute(
        &self,
        params: GetProductImageParams,
    ) -> Result<ProductImage, ProductImageError> {
        self.logger.info(&format!(
            "Fetching image detail for product {}",
            params.product_id
        ));

        let catalog = &self.catalog;
        let single = [ImageIndexEntry::new(params.product_id)];

        let mut aggregated = self
            .aggregator
            .aggregate(&single, |product_id| {
                let catalog = catalog.clone();
                async move { catalog.fetch_image_detail(&product_id).await }
            })
            .await
            .map_err(|err| match err {
                ProductImageError::FetchFailed {
                    cause: CatalogError::NotFound,
                    ..
                } => ProductImageError::NotFound,
                other => {
                    self.logger
                        .error(&format!("Image detail fetch failed: {}", other));
                    other
                }
            })?;

        aggregated.pop().map(|a| a.images).ok_or(ProductImageError::NotFound)
    }
}
