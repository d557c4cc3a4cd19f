use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::Response;
use serde::Serialize;
use sked_core::error::{CoreError, RecurrenceError};
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Invariant(&'static str),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::InvalidInput(_) | CoreError::Recurrence(_))
            | ApiError::Recurrence(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Core(_) | ApiError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Writes `{"error": ...}` with the status matching `error`.
pub fn write_error(res: &mut Response, error: &ApiError) {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(error = ?error, "request failed");
    } else {
        tracing::debug!(error = %error, "request rejected");
    }
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: error.to_string(),
    }));
}

/// Renders `result` as a JSON body or as an error response.
pub fn render_json<T: Serialize + Send>(res: &mut Response, result: ApiResult<T>) {
    match result {
        Ok(body) => res.render(Json(body)),
        Err(e) => write_error(res, &e),
    }
}
