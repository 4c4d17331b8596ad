use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::ApiError;

use super::session_cookie;

/// Handler for POST /api/v1/auth/register
///
/// Creates a standard account and signs the caller in.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "password": "Abcdef12",
///     "display_name": "Ada"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `ApiResponse` wrapping the issued session; the token is also set as the
/// session cookie.
///
/// ## Errors
/// - 400 Bad Request: Invalid email or weak password (every unmet rule is listed)
/// - 409 Conflict: Email already registered
/// - 503 Service Unavailable: Store still failing after retries
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let request = request.into_inner();

    let session = state
        .accounts
        .register(&request.email, &request.password, request.display_name.as_deref())
        .await?;

    let cookie = session_cookie(&state.session, &session.token, session.expires_in);
    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(ApiResponse::success(session).with_message("Account created")))
}
