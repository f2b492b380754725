use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP callers by the auth endpoints.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credentials taken")]
    CredentialsConflict,
    #[error("Credentials incorrect")]
    CredentialsInvalid,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::CredentialsConflict | AuthError::CredentialsInvalid => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AuthError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (
            status,
            Json(json!({ "statusCode": status.as_u16(), "message": message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_are_forbidden() {
        assert_eq!(AuthError::CredentialsConflict.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::CredentialsInvalid.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::CredentialsConflict.to_string(), "Credentials taken");
        assert_eq!(AuthError::CredentialsInvalid.to_string(), "Credentials incorrect");
    }

    #[test]
    fn internal_error_hides_cause() {
        let resp = AuthError::Internal(anyhow::anyhow!("connection reset")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
