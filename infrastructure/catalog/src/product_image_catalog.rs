use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use business::domain::errors::CatalogError;
use business::domain::product_image::model::{ImageIndexEntry, ProductImage};
use business::domain::product_image::services::ProductImageCatalog;
use business::domain::shared::value_objects::ProductId;

use crate::client::CatalogClient;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageDetailPayload {
    content_type: String,
    image_bytes: String,
}

/// Detail responses come either flat or wrapped under `images`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageDetailResponse {
    Wrapped { images: ImageDetailPayload },
    Flat(ImageDetailPayload),
}

pub struct HttpProductImageCatalog {
    client: CatalogClient,
}

impl HttpProductImageCatalog {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, CatalogError> {
        let response = self
            .client
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|_| CatalogError::Unreachable)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|_| CatalogError::InvalidPayload)
    }

    /// Index records without a usable `productId` are kept as malformed entries
    /// so the aggregator can reject the listing with their position.
    fn parse_index(data: serde_json::Value) -> Result<Vec<ImageIndexEntry>, CatalogError> {
        let records = data.as_array().ok_or(CatalogError::InvalidPayload)?;

        Ok(records
            .iter()
            .map(|record| {
                record
                    .get("productId")
                    .and_then(ProductId::from_json)
                    .map(ImageIndexEntry::new)
                    .unwrap_or_else(ImageIndexEntry::malformed)
            })
            .collect())
    }

    fn parse_detail(data: serde_json::Value) -> Result<ProductImage, CatalogError> {
        let payload = match serde_json::from_value::<ImageDetailResponse>(data)
            .map_err(|_| CatalogError::InvalidPayload)?
        {
            ImageDetailResponse::Wrapped { images } => images,
            ImageDetailResponse::Flat(payload) => payload,
        };

        ProductImage::new(payload.content_type, payload.image_bytes)
            .map_err(|_| CatalogError::InvalidPayload)
    }
}

#[async_trait]
impl ProductImageCatalog for HttpProductImageCatalog {
    async fn list_image_index(&self) -> Result<Vec<ImageIndexEntry>, CatalogError> {
        let data = self.get_json(self.client.index_url()).await?;
        Self::parse_index(data)
    }

    async fn fetch_image_detail(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductImage, CatalogError> {
        let data = self.get_json(self.client.detail_url(product_id)).await?;
        Self::parse_detail(data)
    }
}
