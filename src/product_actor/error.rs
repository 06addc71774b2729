use axum::http::StatusCode;
use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors surfaced by product operations. The display strings are the exact
/// messages returned to HTTP callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Invalid product ID")]
    InvalidId,
    #[error("Product not found")]
    NotFound,
    #[error("Name, category, and price are required")]
    MissingFields,
    #[error("Price must be a positive number")]
    InvalidPrice,
    #[error("{0}")]
    InvalidField(&'static str),
    #[error("Invalid sort field")]
    InvalidSortField,
    #[error("Invalid sort order")]
    InvalidSortOrder,
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Product rejected: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::NotFound => StatusCode::NOT_FOUND,
            ProductError::ActorCommunicationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(_) => ProductError::NotFound,
            FrameworkError::DuplicateId(id) => ProductError::Rejected(format!("duplicate id {id}")),
            FrameworkError::Rejected(reason) => ProductError::Rejected(reason),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ProductError::ActorCommunicationError(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_errors_map_to_product_errors() {
        assert_eq!(ProductError::from(FrameworkError::NotFound(3)), ProductError::NotFound);
        assert_eq!(
            ProductError::from(FrameworkError::ActorDropped),
            ProductError::ActorCommunicationError("Actor dropped".to_string())
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ProductError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ProductError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ProductError::InvalidSortOrder.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProductError::ActorCommunicationError("Actor closed".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
