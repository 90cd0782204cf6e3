//! Raffle error types with HTTP status code mapping.
//!
//! [`RaffleError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::Identity;
use crate::domain::ledger::LedgerError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "attached value 100 wei does not exceed minimum stake 10000000000000000 wei",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | State           | 409 Conflict               |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
/// | 4000–4999 | Raffle-Specific | 403 / 422 / 502            |
#[derive(Debug, thiserror::Error)]
pub enum RaffleError {
    /// The attached value does not exceed the minimum stake. Strict
    /// comparison: a deposit of exactly the minimum is rejected.
    #[error("attached value {attached} wei does not exceed minimum stake {minimum} wei")]
    InsufficientStake {
        /// Value attached to the call, in wei.
        attached: u128,
        /// Minimum stake threshold, in wei.
        minimum: u128,
    },

    /// A draw was attempted by someone other than the manager.
    #[error("caller {0} is not the pool manager")]
    Unauthorized(Identity),

    /// The payout transfer failed; the whole draw was rolled back.
    #[error("payout failed: {0}")]
    TransferFailure(#[from] LedgerError),

    /// A draw was attempted on an empty pool.
    #[error("no entrants in the pool")]
    NoEntrants,

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RaffleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::NoEntrants => 2001,
            Self::Internal(_) => 3000,
            Self::InsufficientStake { .. } => 4001,
            Self::Unauthorized(_) => 4002,
            Self::TransferFailure(_) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NoEntrants => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InsufficientStake { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::TransferFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RaffleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
