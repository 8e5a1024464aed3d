//! Boxoffice — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use boxoffice_core::error::DomainError;
use serde::Serialize;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::EventNotFound(_) => (StatusCode::NOT_FOUND, "event_not_found"),
            DomainError::PurchaseNotFound(_) => (StatusCode::NOT_FOUND, "purchase_not_found"),
            DomainError::SoldOut { .. } => (StatusCode::CONFLICT, "sold_out"),
            DomainError::InsufficientTickets { .. } => {
                (StatusCode::CONFLICT, "insufficient_tickets")
            }
            DomainError::AlreadyRated(_) => (StatusCode::CONFLICT, "already_rated"),
            DomainError::ConcurrencyConflict { .. } => {
                (StatusCode::CONFLICT, "concurrency_conflict")
            }
            DomainError::InvalidQuantity { .. } => (StatusCode::BAD_REQUEST, "invalid_quantity"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        let id = Uuid::new_v4();
        assert_eq!(status_of(DomainError::EventNotFound(id)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(DomainError::PurchaseNotFound(id)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_inventory_rejections_map_to_409() {
        let event_id = Uuid::new_v4();
        assert_eq!(
            status_of(DomainError::SoldOut { event_id }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::InsufficientTickets {
                event_id,
                available: 5,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::AlreadyRated(Uuid::new_v4())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_concurrency_conflict_maps_to_409() {
        assert_eq!(
            status_of(DomainError::ConcurrencyConflict {
                event_id: Uuid::new_v4(),
                expected: 1,
                actual: 2,
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::InvalidQuantity {
                quantity: 0,
                min: 1,
                max: 1000,
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
