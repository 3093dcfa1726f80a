use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{Error, ErrorCategory};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match &self.category {
            ErrorCategory::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::AccessDenied => StatusCode::UNAUTHORIZED,
            // An invalid form still renders a page for the submitter,
            // so it answers 200 with the validation messages in the body.
            ErrorCategory::InvalidForm(..) => StatusCode::OK,
            ErrorCategory::LoginFailed(..) => StatusCode::FORBIDDEN,
            ErrorCategory::SignupFailed(..) => StatusCode::BAD_REQUEST,
            ErrorCategory::Outage => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status_code, Json(self)).into_response()
    }
}
