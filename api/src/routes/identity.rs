//! Routes that read the identity attached by the gate

use actix_web::HttpResponse;

use ks_shared::ApiResponse;

use crate::dto::auth::WelcomeResponse;
use crate::middleware::auth::{AuthContext, OptionalAuth};

/// Handler for GET /api/v1/me (strict gate)
///
/// Returns the caller's normalized identity record.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(auth.identity))
}

/// Handler for GET /api/v1/welcome (optional gate)
///
/// Greets signed-in callers by name; everyone else gets the anonymous body.
pub async fn welcome(auth: OptionalAuth) -> HttpResponse {
    let body = match auth.into_inner() {
        Some(context) => WelcomeResponse::for_identity(context.identity),
        None => WelcomeResponse::anonymous(),
    };
    HttpResponse::Ok().json(body)
}
