//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sanjeevani_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Domain errors keep their taxonomy
/// kind so clients can branch without parsing messages.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Domain(#[from] sanjeevani_core::Error),
}

fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::Validation => StatusCode::BAD_REQUEST,
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::Conflict | ErrorKind::Capacity | ErrorKind::State => {
      StatusCode::CONFLICT
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let Self::Domain(err) = self;
    let status = status_for(err.kind());
    let body = json!({ "error": err.to_string(), "kind": err.kind() });
    (status, Json(body)).into_response()
  }
}
