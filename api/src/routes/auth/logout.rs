use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;

use super::removal_cookie;

/// Handler for POST /api/v1/auth/logout
///
/// Clears the session cookie. Works with or without a session.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })
}
