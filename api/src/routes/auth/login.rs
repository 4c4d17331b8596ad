use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::ApiError;

use super::session_cookie;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for a session token, returned in the body
/// and set as the HttpOnly session cookie.
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 503 Service Unavailable: Store still failing after retries
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let session = state.accounts.login(&request.email, &request.password).await?;

    let cookie = session_cookie(&state.session, &session.token, session.expires_in);
    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(session)))
}
