//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{json, Value};

use ks_api::AppState;
use ks_core::repositories::{DocumentStore, WriteOp};
use ks_core::USERS_COLLECTION;
use ks_infra::MemoryStore;
use ks_shared::AppConfig;

pub const SECRET: &str = "api-test-secret-0123456789abcdef0123";
pub const PASSWORD: &str = "Abcdef12";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::with_secret(SECRET);
    config.auth.password.bcrypt_cost = 4;
    config
}

pub fn test_state() -> (web::Data<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(&test_config(), store.clone()).unwrap();
    (web::Data::new(state), store)
}

/// Register through the account service; returns `(token, subject_id)`
pub async fn register(state: &AppState, email: &str) -> (String, String) {
    let session = state.accounts.register(email, PASSWORD, Some("Tester")).await.unwrap();
    (session.token, session.user_id)
}

/// Overwrite the stored role of an identity record
pub async fn set_role(store: &MemoryStore, subject_id: &str, role: &str) {
    let mut record = store.get(USERS_COLLECTION, subject_id).await.unwrap().unwrap();
    record.insert("role".to_string(), json!(role));
    store
        .run_transaction(vec![WriteOp::set(USERS_COLLECTION, subject_id, record)])
        .await
        .unwrap();
}

pub async fn delete_identity(store: &MemoryStore, subject_id: &str) {
    store
        .run_transaction(vec![WriteOp::delete(USERS_COLLECTION, subject_id)])
        .await
        .unwrap();
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn call_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}
