use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use thiserror::Error;

/// Failures at the upstream fetch boundary. These never escape the
/// fetcher: they are logged and collapsed into "no data for this season".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    HttpStatus(StatusCode),

    #[error("unexpected upstream payload shape: {0}")]
    UpstreamShape(&'static str),
}

/// Error response for the HTTP layer. Reserved for genuinely unexpected
/// failures; "no data" outcomes are shaped by the handlers themselves.
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"status": "error", "message": message})),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}
