pub mod application {
    pub mod product_image {
        pub mod aggregate;
        pub mod get_by_id;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod product_image {
        pub mod aggregator;
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod use_cases {
            pub mod aggregate;
            pub mod get_by_id;
        }
    }
    pub mod shared {
        pub mod value_objects;
    }
}
