use std::sync::Arc;

use logger::TracingLogger;

use catalog::client::CatalogClient;
use catalog::product_image_catalog::HttpProductImageCatalog;

use business::application::product_image::aggregate::AggregateProductImagesUseCaseImpl;
use business::application::product_image::get_by_id::GetProductImageUseCaseImpl;
use business::domain::product_image::services::ProductImageCatalog;

use crate::config::catalog_config::CatalogConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_image_api: crate::api::product_image::routes::ProductImageApi,
}

impl DependencyContainer {
    pub fn new(config: &CatalogConfig) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let catalog_client = CatalogClient::new(config.base_url.clone(), config.request_timeout);
        let catalog: Arc<dyn ProductImageCatalog> =
            Arc::new(HttpProductImageCatalog::new(catalog_client));

        // Product image use cases
        let aggregate_use_case = Arc::new(AggregateProductImagesUseCaseImpl {
            catalog: catalog.clone(),
            aggregator: config.aggregator(),
            logger: logger.clone(),
        });
        let get_use_case = Arc::new(GetProductImageUseCaseImpl {
            catalog,
            aggregator: config.aggregator(),
            logger,
        });

        let product_image_api = crate::api::product_image::routes::ProductImageApi::new(
            aggregate_use_case,
            get_use_case,
        );

        Self {
            health_api,
            product_image_api,
        }
    }
}
