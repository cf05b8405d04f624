use async_trait::async_trait;

use crate::domain::product_image::errors::ProductImageError;
use crate::domain::product_image::model::ProductImage;
use crate::domain::shared::value_objects::ProductId;

pub struct GetProductImageParams {
    pub product_id: ProductId,
}

#[async_trait]
pub trait GetProductImageUseCase: Send + Sync {
    async fn execute(&self, params: GetProductImageParams)
    -> Result<ProductImage, ProductImageError>;
}
