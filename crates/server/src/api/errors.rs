use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use shared::Error;

/// HTTP wrapper for the orchestrator error kinds, rendered as a consistent
/// JSON body: `{"error": {"code", "message"}}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// Status code for each error kind. Exactly one kind per failed request.
pub(crate) fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::SubnetExhausted(_) => StatusCode::CONFLICT,
        Error::Hypervisor(_) => StatusCode::BAD_GATEWAY,
        Error::Subprocess(_) | Error::Persistence(_) | Error::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        if status.is_server_error() {
            tracing::error!(code = self.0.code(), "Request failed: {:#}", self.0);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.0.code().to_string(),
                message: self.0.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_one_status() {
        assert_eq!(
            status_for(&Error::InvalidArgument("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&Error::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&Error::SubnetExhausted("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&Error::Hypervisor(anyhow::anyhow!("x"))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&Error::Subprocess(anyhow::anyhow!("x"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::Persistence(anyhow::anyhow!("x"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::Internal(anyhow::anyhow!("x"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
