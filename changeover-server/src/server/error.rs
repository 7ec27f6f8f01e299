//! Mapping of failures to HTTP responses

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::models::ErrorBody;
use crate::matrix::{ErrorKind, MatrixError};

/// Any failure a handler can return
#[derive(Debug)]
pub enum ApiError {
    Matrix(MatrixError),
    Multipart(MultipartError),
    MissingField(&'static str),
    /// Request body or query string could not be extracted
    Rejected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Matrix(err) => match err.kind() {
                ErrorKind::Conflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Multipart(err) => err.status(),
            ApiError::MissingField(_) | ApiError::Rejected(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Matrix(err) => err.to_string(),
            ApiError::Multipart(err) => err.body_text(),
            ApiError::MissingField(name) => format!("Field required: {}", name),
            ApiError::Rejected(text) => text.clone(),
        }
    }
}

impl From<MatrixError> for ApiError {
    fn from(err: MatrixError) -> Self {
        ApiError::Matrix(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (MatrixError::PartExists("A".into()), StatusCode::BAD_REQUEST),
            (MatrixError::MissingPartColumn, StatusCode::BAD_REQUEST),
            (MatrixError::PartNotFound("A".into()), StatusCode::NOT_FOUND),
            (
                MatrixError::Inconsistent("no row".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::MissingField("file").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
