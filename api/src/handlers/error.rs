use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ks_core::errors::{AuthError, DomainError, TokenError};
use ks_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use ks_shared::validation::ValidationErrors;

/// Message shared by every "token was presented but is not usable" failure
pub const INVALID_SESSION_MESSAGE: &str = "Invalid or expired session";

/// Domain failure crossing the HTTP boundary
///
/// Handlers return `Result<HttpResponse, ApiError>`; the middleware and the
/// extractors build their rejections from the same mapping so a failure has
/// one status and one body wherever it surfaces.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = ValidationErrors::new();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        for (field, field_errors) in fields {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                collected.add_error(field, message, error.code.to_string());
            }
        }

        Self(DomainError::Validation {
            message: collected.joined_messages(),
        })
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match &self.0 {
            DomainError::Auth(auth_error) => match auth_error {
                AuthError::MissingToken => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new(error_codes::AUTHENTICATION_REQUIRED, "Authentication required"),
                ),
                // A deleted identity must look exactly like a bad token
                AuthError::InvalidSession | AuthError::IdentityNotFound => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new(error_codes::AUTHENTICATION_FAILED, INVALID_SESSION_MESSAGE),
                ),
                AuthError::InsufficientPermissions => (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions"),
                ),
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid email or password"),
                ),
                AuthError::EmailAlreadyRegistered => (
                    StatusCode::CONFLICT,
                    ErrorResponse::new(error_codes::CONFLICT, "Email already registered"),
                ),
            },
            DomainError::Token(TokenError::Invalid) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::AUTHENTICATION_FAILED, INVALID_SESSION_MESSAGE),
            ),
            DomainError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
            ),
            DomainError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(error_codes::NOT_FOUND, "Resource not found"),
            ),
            DomainError::Store(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable, please retry later",
                ),
            ),
            DomainError::Token(TokenError::GenerationFailed) | DomainError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
            ),
        }
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        self.status_and_body().1
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status_and_body().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        HttpResponse::build(status).json(body)
    }
}

/// Convert a domain error straight into its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError(error).error_response()
}

/// Body for payloads actix could not deserialize
pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}
