//! Identity gate middleware for protecting API endpoints.
//!
//! The session token is read from the `Authorization: Bearer` header, or
//! failing that from the session cookie, and resolved through the
//! [`IdentityResolver`] registered as app data. Three modes exist:
//!
//! 1. Required: any failure rejects the request with 401
//! 2. Optional: failures are swallowed and the request continues anonymously
//! 3. Administrator: required, then a 403 unless the identity is an administrator
//!
//! Handlers read the outcome with the [`AuthContext`] and [`OptionalAuth`]
//! extractors.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use ks_core::domain::Identity;
use ks_core::errors::{AuthError, DomainError, DomainResult};
use ks_core::services::IdentityResolver;
use ks_shared::SessionConfig;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::{handle_domain_error, ApiError};

/// Authenticated identity injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Identity,
}

impl AuthContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn subject_id(&self) -> &str {
        &self.identity.id
    }

    pub fn is_administrator(&self) -> bool {
        self.identity.is_administrator()
    }
}

/// How the gate treats a request whose token does not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    Required,
    Optional,
    Administrator,
}

/// Identity gate middleware factory
#[derive(Debug, Clone, Copy)]
pub struct IdentityGate {
    mode: GateMode,
}

impl IdentityGate {
    /// Reject requests without a resolvable identity
    pub fn required() -> Self {
        Self { mode: GateMode::Required }
    }

    /// Attach an identity when one resolves, never reject
    pub fn optional() -> Self {
        Self { mode: GateMode::Optional }
    }

    /// Reject requests unless the identity holds the administrator role
    pub fn administrator() -> Self {
        Self { mode: GateMode::Administrator }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityGateMiddleware {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

/// Identity gate middleware service
pub struct IdentityGateMiddleware<S> {
    service: Rc<S>,
    mode: GateMode,
}

impl<S, B> Service<ServiceRequest> for IdentityGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;

        Box::pin(async move {
            let resolver = req.app_data::<web::Data<dyn IdentityResolver>>().cloned();
            let resolver = match resolver {
                Some(resolver) => resolver,
                None => {
                    tracing::error!("Identity resolver is not registered as app data");
                    let error = DomainError::Internal {
                        message: "identity resolver missing".to_string(),
                    };
                    return Ok(req.into_response(handle_domain_error(error)).map_into_right_body());
                }
            };

            let token = extract_session_token(&req);

            match gate(&**resolver, mode, token.as_deref()).await {
                Ok(Some(identity)) => {
                    req.extensions_mut().insert(AuthContext::new(identity));
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::info!(
                        path = %req.path(),
                        mode = ?mode,
                        error = %error,
                        "Request rejected by identity gate"
                    );
                    return Ok(req.into_response(handle_domain_error(error)).map_into_right_body());
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Apply one gate mode to a token
async fn gate(
    resolver: &dyn IdentityResolver,
    mode: GateMode,
    token: Option<&str>,
) -> DomainResult<Option<Identity>> {
    match mode {
        GateMode::Optional => Ok(resolver.resolve_optional(token).await),
        GateMode::Required => resolver.resolve(token).await.map(Some),
        GateMode::Administrator => {
            let identity = resolver.resolve(token).await?;
            resolver.authorize_admin(&identity)?;
            Ok(Some(identity))
        }
    }
}

/// Session token from the bearer header, falling back to the session cookie
fn extract_session_token(req: &ServiceRequest) -> Option<String> {
    if let Some(token) = extract_bearer_token(req) {
        return Some(token);
    }

    let cookie_name = req
        .app_data::<web::Data<SessionConfig>>()
        .map(|session| session.cookie_name.clone())
        .unwrap_or_else(|| SessionConfig::default().cookie_name);

    req.cookie(&cookie_name).map(|cookie| cookie.value().to_string())
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError::from(AuthError::MissingToken)));
        ready(result)
    }
}

/// Identity for routes behind the optional gate
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthContext>);

impl OptionalAuth {
    pub fn into_inner(self) -> Option<AuthContext> {
        self.0
    }
}

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(OptionalAuth(req.extensions().get::<AuthContext>().cloned())))
    }
}
