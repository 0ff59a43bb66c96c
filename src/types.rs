//! Response types for the F1 API.

use serde::Serialize;

/// Error body returned by every non-success response.
///
/// 404 carries a route-specific message; 500 always carries the literal
/// "Internal Server Error" with no underlying detail.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
