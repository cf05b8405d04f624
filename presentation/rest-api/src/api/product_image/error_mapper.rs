use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product_image::errors::ProductImageError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductImageError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            ProductImageError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            ProductImageError::FetchTimeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "UpstreamTimeout"),
            ProductImageError::ContentTypeEmpty
            | ProductImageError::InvalidEncoding
            | ProductImageError::MalformedEntry { .. }
            | ProductImageError::FetchFailed { .. }
            | ProductImageError::ListingFailed(_) => (StatusCode::BAD_GATEWAY, "UpstreamError"),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
                product_id: self.failing_product_id().map(|id| id.to_string()),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::CatalogError;
    use business::domain::shared::value_objects::ProductId;

    #[test]
    fn should_map_fetch_failure_to_bad_gateway_with_product_id() {
        let err = ProductImageError::FetchFailed {
            product_id: ProductId::parse("p2").unwrap(),
            cause: CatalogError::Unreachable,
        };

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json.0.message, "product_image.fetch_failed");
        assert_eq!(json.0.product_id.as_deref(), Some("p2"));
    }

    #[test]
    fn should_map_timeout_to_gateway_timeout() {
        let err = ProductImageError::FetchTimeout {
            product_id: ProductId::parse("slow").unwrap(),
        };

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json.0.name, "UpstreamTimeout");
    }

    #[test]
    fn should_map_not_found_without_product_id() {
        let (status, json) = ProductImageError::NotFound.into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.message, "product_image.not_found");
        assert!(json.0.product_id.is_none());
    }
}
