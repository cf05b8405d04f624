use std::time::Duration;

use reqwest::Client;
use url::Url;

use business::domain::shared::value_objects::ProductId;

const PRODUCT_IMAGES_PATH: &str = "product-images";

/// Shared HTTP client configuration for the product-image catalog.
pub struct CatalogClient {
    pub client: Client,
    pub base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: Url, request_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_default();

        Self { client, base_url }
    }

    /// Returns the image index listing URL.
    pub fn index_url(&self) -> Url {
        self.endpoint(&[PRODUCT_IMAGES_PATH])
    }

    /// Returns the image detail URL of one product, with the id percent-encoded.
    pub fn detail_url(&self, product_id: &ProductId) -> Url {
        self.endpoint(&[PRODUCT_IMAGES_PATH, product_id.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
