pub mod app;
pub mod deserializers;
pub mod errors;
pub mod extractors;
pub mod pagination;
pub mod quiz;
pub mod responses;
pub mod routes;
