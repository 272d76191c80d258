//! Response types for the GranaApp engine API.
//!
//! This module defines the calculator payloads wrapped in
//! [`CalculationResult`](crate::models::CalculationResult) and the error
//! response structures for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{OvertimeSummary, PayBreakdown};

/// Result of `POST /overtime/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeResponse {
    /// The computed breakdown.
    #[serde(flatten)]
    pub breakdown: PayBreakdown,
    /// `total_minutes` rendered as `"{h}h {mm}m"`.
    pub formatted_total: String,
    /// `night_minutes` rendered as `"{h}h {mm}m"`.
    pub formatted_night: String,
}

/// The recalculated breakdown of one stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBreakdown {
    /// The entry identifier.
    pub id: String,
    /// The recalculated breakdown.
    pub breakdown: PayBreakdown,
}

/// Result of `POST /overtime/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeSummaryResponse {
    /// Per-entry breakdowns in request order.
    pub entries: Vec<EntryBreakdown>,
    /// Totals across all entries.
    pub summary: OvertimeSummary,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid amount error response.
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::new("INVALID_AMOUNT", message)
    }

    /// Classifies a JSON body rejection.
    ///
    /// Serde data errors are split by their message: a failed amount parse
    /// carries the [`EngineError::InvalidAmount`] text, and a missing field
    /// carries serde's `missing field` text.
    pub fn from_json_rejection(rejection: &JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("Invalid amount") {
                    Self::invalid_amount(body_text)
                } else if body_text.contains("missing field") {
                    Self::validation_error(body_text)
                } else {
                    Self::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                Self::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                Self::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => Self::malformed_json("Failed to parse request body"),
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PresetNotFound { kind, name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "PRESET_NOT_FOUND",
                    format!("{} preset not found: {}", kind, name),
                    format!("The {} preset '{}' is not configured", kind, name),
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid request field '{}': {}", field, message),
                    "The request combines or omits fields inconsistently",
                ),
            },
            EngineError::InvalidAmount { input, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount '{}'", input),
                    message,
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
