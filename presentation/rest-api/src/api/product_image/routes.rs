use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::product_image::errors::ProductImageError;
use business::domain::product_image::model::AggregatedProductImage;
use business::domain::product_image::use_cases::aggregate::{
    AggregateIndexParams, AggregateProductImagesUseCase,
};
use business::domain::product_image::use_cases::get_by_id::{
    GetProductImageParams, GetProductImageUseCase,
};
use business::domain::shared::value_objects::ProductId;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product_image::dto::{
    AggregateIndexRequest, AggregatedProductImageResponse, ProductImageResponse,
};
use crate::api::tags::ApiTags;

pub struct ProductImageApi {
    aggregate_use_case: Arc<dyn AggregateProductImagesUseCase>,
    get_use_case: Arc<dyn GetProductImageUseCase>,
}

impl ProductImageApi {
    pub fn new(
        aggregate_use_case: Arc<dyn AggregateProductImagesUseCase>,
        get_use_case: Arc<dyn GetProductImageUseCase>,
    ) -> Self {
        Self {
            aggregate_use_case,
            get_use_case,
        }
    }
}

/// Product image API
///
/// Endpoints resolving the catalog's image index into one image per product.
#[OpenApi]
impl ProductImageApi {
    /// List product images
    ///
    /// Lists the catalog's image index and returns one image per distinct product,
    /// in first-seen order. Any failed image fetch fails the whole request.
    #[oai(path = "/product-images", method = "get", tag = "ApiTags::ProductImages")]
    async fn get_product_images(&self) -> AggregateProductImagesResponse {
        into_aggregate_response(self.aggregate_use_case.execute().await)
    }

    /// Aggregate a supplied image index
    ///
    /// Resolves the given index entries the same way `GET /product-images` resolves
    /// the catalog listing.
    #[oai(
        path = "/product-images/aggregate",
        method = "post",
        tag = "ApiTags::ProductImages"
    )]
    async fn aggregate_index(
        &self,
        body: Json<AggregateIndexRequest>,
    ) -> AggregateProductImagesResponse {
        let params = AggregateIndexParams {
            entries: body.0.entries.into_iter().map(|e| e.into()).collect(),
        };

        match self.aggregate_use_case.execute_for(params).await {
            Err(ProductImageError::MalformedEntry { position }) => {
                AggregateProductImagesResponse::BadRequest(ErrorResponse::json(
                    "ValidationError",
                    &format!("product_image.malformed_entry[{}]", position),
                ))
            }
            other => into_aggregate_response(other),
        }
    }

    /// Get a product image
    ///
    /// Returns the image of a single product.
    #[oai(path = "/product-images/:id", method = "get", tag = "ApiTags::ProductImages")]
    async fn get_product_image(&self, id: Path<String>) -> GetProductImageResponse {
        let product_id = match ProductId::parse(&id.0).filter(|_| !id.0.trim().is_empty()) {
            Some(product_id) => product_id,
            None => {
                return GetProductImageResponse::BadRequest(ErrorResponse::json(
                    "ValidationError",
                    "product_image.invalid_id",
                ));
            }
        };

        match self
            .get_use_case
            .execute(GetProductImageParams { product_id })
            .await
        {
            Ok(image) => GetProductImageResponse::Ok(Json(image.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductImageResponse::NotFound(json),
                    504 => GetProductImageResponse::GatewayTimeout(json),
                    _ => GetProductImageResponse::BadGateway(json),
                }
            }
        }
    }
}

fn into_aggregate_response(
    result: Result<Vec<AggregatedProductImage>, ProductImageError>,
) -> AggregateProductImagesResponse {
    match result {
        Ok(aggregated) => {
            let responses: Vec<AggregatedProductImageResponse> =
                aggregated.into_iter().map(|a| a.into()).collect();
            AggregateProductImagesResponse::Ok(Json(responses))
        }
        Err(err) => {
            let (status, json) = err.into_error_response();
            match status.as_u16() {
                504 => AggregateProductImagesResponse::GatewayTimeout(json),
                _ => AggregateProductImagesResponse::BadGateway(json),
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum AggregateProductImagesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<AggregatedProductImageResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductImageResponse {
    #[oai(status = 200)]
    Ok(Json<ProductImageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}
