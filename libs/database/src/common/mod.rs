//! Common utilities shared by the store modules

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
