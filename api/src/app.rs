//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use ks_core::errors::DomainResult;
use ks_core::repositories::DocumentStore;
use ks_core::services::{
    AccountService, AccountServiceConfig, IdentityResolver, IdentityService, PasswordService,
    RetryPolicy, TokenService, TokenServiceConfig,
};
use ks_shared::{error_codes, AppConfig, ErrorResponse, SessionConfig};

use crate::handlers::error::bad_request;
use crate::middleware::IdentityGate;
use crate::routes::{admin, auth, health, identity};

/// Shared services, built once by the composition root
pub struct AppState {
    pub accounts: Arc<AccountService<dyn DocumentStore>>,
    pub identities: Arc<dyn IdentityResolver>,
    pub store: Arc<dyn DocumentStore>,
    pub session: SessionConfig,
    pub max_payload_size: usize,
}

impl AppState {
    /// Wire every service over an already-initialized store handle
    pub fn new(config: &AppConfig, store: Arc<dyn DocumentStore>) -> DomainResult<Self> {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from_jwt_config(
            &config.auth.jwt,
        ))?);

        let accounts = AccountService::new(
            Arc::clone(&store),
            Arc::clone(&tokens),
            PasswordService::new(config.auth.password.bcrypt_cost),
            AccountServiceConfig::from_retry_config(&config.retry),
        );

        let identities = IdentityService::with_retry(
            tokens,
            Arc::clone(&store),
            RetryPolicy::from_settings(&config.retry.default),
        );

        Ok(Self {
            accounts: Arc::new(accounts),
            identities: Arc::new(identities),
            store,
            session: config.auth.session.clone(),
            max_payload_size: config.server.max_payload_size,
        })
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let resolver: web::Data<dyn IdentityResolver> = web::Data::from(Arc::clone(&app_state.identities));
    let session = web::Data::new(app_state.session.clone());
    let json_config = web::JsonConfig::default()
        .limit(app_state.max_payload_size)
        .error_handler(|err, _req| {
            let response = bad_request(err.to_string());
            actix_web::error::InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(resolver)
        .app_data(session)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::register))
                        .route("/login", web::post().to(auth::login::login))
                        .route("/logout", web::post().to(auth::logout::logout)),
                )
                .service(
                    web::resource("/me")
                        .wrap(IdentityGate::required())
                        .route(web::get().to(identity::me)),
                )
                .service(
                    web::resource("/welcome")
                        .wrap(IdentityGate::optional())
                        .route(web::get().to(identity::welcome)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(IdentityGate::administrator())
                        .route("/identities/{id}", web::get().to(admin::get_identity)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, "Route not found"))
}
