use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product_image::aggregator::ImageAggregator;
use crate::domain::product_image::errors::ProductImageError;
use crate::domain::product_image::model::{AggregatedProductImage, ImageIndexEntry};
use crate::domain::product_image::services::ProductImageCatalog;
use crate::domain::product_image::use_cases::aggregate::{
    AggregateIndexParams, AggregateProductImagesUseCase,
};

pub struct AggregateProductImagesUseCaseImpl {
    pub catalog: Arc<dyn ProductImageCatalog>,
    pub aggregator: ImageAggregator,
    pub logger: Arc<dyn Logger>,
}

impl AggregateProductImagesUseCaseImpl {
    async fn aggregate_entries(
        &self,
        entries: &[ImageIndexEntry],
    ) -> Result<Vec<AggregatedProductImage>, ProductImageError> {
        let catalog = &self.catalog;
        let logger = &self.logger;

        if let Ok(product_ids) = ImageAggregator::distinct_product_ids(entries) {
            logger.debug(&format!(
                "{} index entries, {} distinct products, {} duplicates skipped",
                entries.len(),
                product_ids.len(),
                entries.len() - product_ids.len()
            ));
        }

        let result = self
            .aggregator
            .aggregate(entries, |product_id| {
                logger.debug(&format!("Fetching image detail for product {}", product_id));
                let catalog = catalog.clone();
                async move { catalog.fetch_image_detail(&product_id).await }
            })
            .await;

        match &result {
            Ok(aggregated) => self.logger.info(&format!(
                "Aggregated {} index entries into {} product images",
                entries.len(),
                aggregated.len()
            )),
            Err(err) => match err.failing_product_id() {
                Some(product_id) => self.logger.error(&format!(
                    "Image aggregation aborted at product {}: {}",
                    product_id, err
                )),
                None => self
                    .logger
                    .error(&format!("Image aggregation rejected: {}", err)),
            },
        }

        result
    }
}

#[async_trait]
impl AggregateProductImagesUseCase for AggregateProductImagesUseCaseImpl {
    async fn execute(&self) -> Result<Vec<AggregatedProductImage>, ProductImageError> {
        self.logger.info("Listing product image index");

        let entries = self.catalog.list_image_index().await.map_err(|cause| {
            self.logger
                .error(&format!("Product image index listing failed: {}", cause));
            ProductImageError::ListingFailed(cause)
        })?;

        self.aggregate_entries(&entries).await
    }

    async fn execute_for(
        &self,
        params: AggregateIndexParams,
    ) -> Result<Vec<AggregatedProductImage>, ProductImageError> {
        self.logger.info(&format!(
            "Aggregating {} supplied index entries",
            params.entries.len()
        ));

        self.aggregate_entries(&params.entries).await
    }
}
