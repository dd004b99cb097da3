use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Every failure a request can end in. Client mistakes map to 400,
/// anything raised by extraction or the model maps to 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Empty filename")]
    EmptyFilename,

    #[error("{0}")]
    Multipart(String),

    #[error("{0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::EmptyFilename | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        if status.is_server_error() {
            log::error!("Request failed: {}", error);
        } else {
            log::warn!("Rejected upload: {}", error);
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(ApiError::NoFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmptyFilename.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFile.to_string(), "No file uploaded");
        assert_eq!(ApiError::EmptyFilename.to_string(), "Empty filename");
    }

    #[test]
    fn upstream_errors_render_the_whole_chain() {
        let err: anyhow::Result<()> =
            Err(anyhow::anyhow!("invalid file header")).context("Failed to extract text from PDF");
        let api_error = ApiError::from(err.unwrap_err());

        assert_eq!(api_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            api_error.to_string(),
            "Failed to extract text from PDF: invalid file header"
        );
    }
}
