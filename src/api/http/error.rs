use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::ServiceError;

/// Transport-level error shell. Everything the service layer reports is a
/// single `ServiceError` kind; only malformed requests are distinguished,
/// and those never reach the service boundary.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Service(ServiceError),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        HttpError::Service(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Service(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.message),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
