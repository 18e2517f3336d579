use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use application::usecases::PaymentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// Newtype so the closed payment taxonomy can cross the axum boundary with
/// one status code per variant.
#[derive(Debug)]
pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PaymentError::InsufficientBalance => {
                (StatusCode::PAYMENT_REQUIRED, self.0.to_string())
            }
            PaymentError::InvalidAmount => (StatusCode::BAD_REQUEST, self.0.to_string()),
            PaymentError::DuplicatePurchase => (StatusCode::CONFLICT, self.0.to_string()),
            PaymentError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            PaymentError::Unauthorized { .. } => (StatusCode::FORBIDDEN, self.0.to_string()),
            PaymentError::InvoiceCreationFailed { .. } | PaymentError::PaymentCancelled => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            PaymentError::RecordWriteFailed { .. } => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
            PaymentError::Internal(err) => {
                // Don't leak internal error detail to client
                error!(error = ?err, "payments: internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
