use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use satlink_common::ErrorBody;
use thiserror::Error;

use crate::module::tle::LocateError;
use crate::module::upstream::UpstreamError;

/// Errors surfaced to HTTP callers. Each variant keeps its own status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing '{0}' query param")]
    MissingParam(&'static str),

    /// Upstream catalog answered with an empty body
    #[error("No TLE found")]
    NotFound,

    /// Upstream text held no complete record
    #[error("Malformed TLE response")]
    Malformed(#[from] LocateError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Malformed(_) | ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("{}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingParam("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(LocateError::NoRecord).status(), StatusCode::BAD_GATEWAY);

        let upstream = UpstreamError::Status {
            url: "https://celestrak.org/x".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(ApiError::from(upstream).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::MissingParam("name").to_string(),
            "Missing 'name' query param"
        );
        assert_eq!(ApiError::from(LocateError::NoRecord).to_string(), "Malformed TLE response");

        let upstream = UpstreamError::Decode {
            url: "u".to_string(),
            reason: "eof".to_string(),
        };
        assert_eq!(
            ApiError::from(upstream).to_string(),
            "Upstream error: invalid response from u: eof"
        );
    }
}
