use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid booking body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidBody(msg) => AppError::BadRequest(msg),
            BookingError::Database(DatabaseError::NotConnected) => {
                AppError::DatabaseUnavailable(DatabaseError::NotConnected.to_string())
            }
            BookingError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for BookingError {
    fn from(err: mongodb::error::Error) -> Self {
        BookingError::Database(DatabaseError::Mongo(err))
    }
}
