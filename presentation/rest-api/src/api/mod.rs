pub mod error;
pub mod health {
    pub mod routes;
}
pub mod product_image {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod tags;
