//! Administrator-only routes

use actix_web::{web, HttpResponse};

use ks_core::errors::DomainError;
use ks_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/admin/identities/{id}
///
/// Looks up any identity record by subject id. Timestamps are returned as
/// ISO-8601 strings.
///
/// ## Errors
/// - 401 Unauthorized: No session, or the session does not resolve
/// - 403 Forbidden: Caller is not an administrator
/// - 404 Not Found: No identity record for the id
pub async fn get_identity(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let subject_id = path.into_inner();
    tracing::info!(admin = %auth.subject_id(), subject = %subject_id, "Administrator identity lookup");

    let record = state
        .identities
        .find_record(&subject_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            resource: format!("identity {}", subject_id),
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}
