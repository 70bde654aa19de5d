use typing_types::ErrorBody;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

/// Failure of an API handler, rendered as `{"error": ...}` with a matching status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Admin access required")]
    Forbidden,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Content-Length header is required")]
    LengthRequired,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unavailable(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::LengthRequired => StatusCode::LENGTH_REQUIRED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients; internal causes stay in the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("Request failed: {:#}", err);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        warp::reply::with_status(warp::reply::json(&body), self.status()).into_response()
    }
}

pub type ApiResult = Result<Response, ApiError>;

/// Collapses a handler result into the response sent on the wire.
pub fn respond(result: ApiResult) -> Response {
    match result {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub fn json_response<T: serde::Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

pub fn ok_json<T: serde::Serialize>(value: &T) -> ApiResult {
    Ok(json_response(value, StatusCode::OK))
}

pub fn created_json<T: serde::Serialize>(value: &T) -> ApiResult {
    Ok(json_response(value, StatusCode::CREATED))
}
