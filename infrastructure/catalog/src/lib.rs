pub mod client;
pub mod product_image_catalog;
