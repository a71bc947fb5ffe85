//! Custom extractors for Axum handlers.

pub mod json_object;
pub mod query_params;

pub use json_object::JsonObject;
pub use query_params::QueryParams;
