use crate::domain::errors::CatalogError;
use crate::domain::shared::value_objects::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum ProductImageError {
    #[error("product_image.content_type_empty")]
    ContentTypeEmpty,
    #[error("product_image.invalid_encoding")]
    InvalidEncoding,
    #[error("product_image.not_found")]
    NotFound,
    #[error("product_image.malformed_entry")]
    MalformedEntry { position: usize },
    #[error("product_image.fetch_failed")]
    FetchFailed {
        product_id: ProductId,
        #[source]
        cause: CatalogError,
    },
    #[error("product_image.fetch_timeout")]
    FetchTimeout { product_id: ProductId },
    #[error("product_image.listing_failed")]
    ListingFailed(#[source] CatalogError),
}

impl ProductImageError {
    /// The product whose fetch aborted the call, if the failure is fetch-related.
    pub fn failing_product_id(&self) -> Option<&ProductId> {
        match self {
            ProductImageError::FetchFailed { product_id, .. }
            | ProductImageError::FetchTimeout { product_id } => Some(product_id),
            _ => None,
        }
    }
}
