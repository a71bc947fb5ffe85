use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("Vehicle not found: {0}")]
    NotFound(String),

    #[error("Invalid vehicle body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;

/// Convert VehicleError to AppError for standardized error responses
impl From<VehicleError> for AppError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::NotFound(id) => AppError::NotFound(format!("Vehicle {} not found", id)),
            VehicleError::InvalidBody(msg) => AppError::BadRequest(msg),
            VehicleError::Database(DatabaseError::NotConnected) => {
                AppError::DatabaseUnavailable(DatabaseError::NotConnected.to_string())
            }
            VehicleError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for VehicleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for VehicleError {
    fn from(err: mongodb::error::Error) -> Self {
        VehicleError::Database(DatabaseError::Mongo(err))
    }
}
