use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use super::errors::ProductImageError;
use crate::domain::shared::value_objects::ProductId;

/// Standard alphabet; padding is optional and trailing bits are not checked.
const IMAGE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// One record of the image index listing.
///
/// `product_id` is `None` when the upstream record carried no usable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageIndexEntry {
    pub product_id: Option<ProductId>,
}

impl ImageIndexEntry {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
        }
    }

    pub fn malformed() -> Self {
        Self { product_id: None }
    }
}

/// Image payload of a single product, with the binary kept base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub content_type: String,
    pub image_bytes: String,
}

impl ProductImage {
    pub fn new(
        content_type: impl Into<String>,
        image_bytes: impl Into<String>,
    ) -> Result<Self, ProductImageError> {
        let content_type = content_type.into();
        let image_bytes = image_bytes.into();

        if content_type.trim().is_empty() {
            return Err(ProductImageError::ContentTypeEmpty);
        }

        IMAGE_ENGINE
            .decode(image_bytes.as_bytes())
            .map_err(|_| ProductImageError::InvalidEncoding)?;

        Ok(Self {
            content_type,
            image_bytes,
        })
    }
}

/// One entry of an aggregation result: a distinct product and its image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProductImage {
    pub product_id: ProductId,
    pub images: ProductImage,
}
