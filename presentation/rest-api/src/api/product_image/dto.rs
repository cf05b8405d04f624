use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use business::domain::product_image::model::{
    AggregatedProductImage, ImageIndexEntry, ProductImage,
};
use business::domain::shared::value_objects::ProductId;

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductImageResponse {
    /// MIME type of the image
    pub content_type: String,
    /// Base64-encoded image data
    pub image_bytes: String,
}

impl From<ProductImage> for ProductImageResponse {
    fn from(image: ProductImage) -> Self {
        Self {
            content_type: image.content_type,
            image_bytes: image.image_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "camelCase")]
pub struct AggregatedProductImageResponse {
    /// Product identifier as listed upstream (string or number)
    pub product_id: serde_json::Value,
    pub images: ProductImageResponse,
}

impl From<AggregatedProductImage> for AggregatedProductImageResponse {
    fn from(aggregated: AggregatedProductImage) -> Self {
        Self {
            product_id: aggregated.product_id.to_json(),
            images: aggregated.images.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ImageIndexEntryRequest {
    /// Product identifier, as a string or a number
    #[oai(skip_serializing_if_is_none)]
    pub product_id: Option<serde_json::Value>,
}

impl From<ImageIndexEntryRequest> for ImageIndexEntry {
    fn from(request: ImageIndexEntryRequest) -> Self {
        request
            .product_id
            .as_ref()
            .and_then(ProductId::from_json)
            .map(ImageIndexEntry::new)
            .unwrap_or_else(ImageIndexEntry::malformed)
    }
}

#[derive(Debug, Clone, Object)]
pub struct AggregateIndexRequest {
    /// Image index listing; duplicates are collapsed
    pub entries: Vec<ImageIndexEntryRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_convert_numeric_request_id_into_entry() {
        let entry: ImageIndexEntry = ImageIndexEntryRequest {
            product_id: Some(json!(12)),
        }
        .into();

        assert_eq!(entry.product_id, Some(ProductId::Number("12".to_string())));
    }

    #[test]
    fn should_convert_missing_request_id_into_malformed_entry() {
        let entry: ImageIndexEntry = ImageIndexEntryRequest { product_id: None }.into();
        assert!(entry.product_id.is_none());
    }

    #[test]
    fn should_expose_aggregated_entry_fields() {
        let response: AggregatedProductImageResponse = AggregatedProductImage {
            product_id: ProductId::parse("p1").unwrap(),
            images: ProductImage {
                content_type: "image/png".to_string(),
                image_bytes: "AAA".to_string(),
            },
        }
        .into();

        assert_eq!(response.product_id, json!("p1"));
        assert_eq!(response.images.content_type, "image/png");
        assert_eq!(response.images.image_bytes, "AAA");
    }
}
