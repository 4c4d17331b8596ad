//! Unit tests for the account service

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Credential, Role, CREDENTIALS_COLLECTION, USERS_COLLECTION};
use crate::errors::{AuthError, DomainError, StoreErrorKind};
use crate::repositories::{DocumentStore, MockDocumentStore};
use crate::services::auth::{AccountService, AccountServiceConfig};
use crate::services::identity::{IdentityResolver, IdentityService};
use crate::services::password::PasswordService;
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_service(store: Arc<MockDocumentStore>) -> (AccountService<MockDocumentStore>, Arc<TokenService>) {
    let tokens = Arc::new(
        TokenService::new(TokenServiceConfig::new("account-test-secret-with-enough-bytes")).unwrap(),
    );
    let service = AccountService::new(
        store,
        tokens.clone(),
        PasswordService::new(4),
        AccountServiceConfig::default(),
    );
    (service, tokens)
}

#[tokio::test]
async fn test_register_creates_both_records() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, tokens) = create_service(store.clone());

    let response = service
        .register("  Ada@Example.COM ", "Abcdef12", Some(" Ada "))
        .await
        .unwrap();

    assert_eq!(response.email, "ada@example.com");
    assert_eq!(response.role, Role::Standard);
    assert!(response.expires_in > 6 * 24 * 60 * 60);

    let credential = store.get(CREDENTIALS_COLLECTION, "ada@example.com").await.unwrap().unwrap();
    let credential = Credential::from_document(&credential).unwrap();
    assert_eq!(credential.subject_id, response.user_id);
    assert!(credential.password_hash.starts_with("$2"));

    let record = store.get(USERS_COLLECTION, &response.user_id).await.unwrap().unwrap();
    assert_eq!(record["email"], json!("ada@example.com"));
    assert_eq!(record["role"], json!("standard"));
    assert_eq!(record["display_name"], json!("Ada"));
    assert!(record["created_at"].get("_seconds").is_some());

    let claims = tokens.validate(&response.token).unwrap();
    assert_eq!(claims.sub, response.user_id);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, _) = create_service(store.clone());

    let error = service.register("not-an-email", "Abcdef12", None).await.unwrap_err();
    assert!(matches!(error, DomainError::Validation { ref message } if message.contains("email")));

    let error = service.register("a@example.com", "abc12345", None).await.unwrap_err();
    match error {
        DomainError::Validation { message } => {
            assert!(message.starts_with("Password must"), "{}", message);
            assert!(message.contains("uppercase"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let long_name = "x".repeat(101);
    let error = service
        .register("a@example.com", "Abcdef12", Some(&long_name))
        .await
        .unwrap_err();
    assert!(matches!(error, DomainError::Validation { .. }));

    assert_eq!(store.transaction_calls(), 0);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, _) = create_service(store.clone());

    service.register("a@example.com", "Abcdef12", None).await.unwrap();
    let error = service.register("A@example.com", "Abcdef12", None).await.unwrap_err();

    assert!(matches!(error, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
    assert_eq!(store.transaction_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_registration_retries_contention() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, _) = create_service(store.clone());
    store.fail_next_transactions(2, StoreErrorKind::Contention).await;

    let response = service.register("a@example.com", "Abcdef12", None).await.unwrap();

    assert_eq!(store.transaction_calls(), 3);
    assert!(store.contains(USERS_COLLECTION, &response.user_id).await);
}

#[tokio::test(start_paused = true)]
async fn test_registration_permanent_failure_is_not_retried() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, _) = create_service(store.clone());
    store.fail_next_transactions(1, StoreErrorKind::PermissionDenied).await;

    let error = service.register("a@example.com", "Abcdef12", None).await.unwrap_err();

    assert!(matches!(error, DomainError::Store(ref e) if e.kind == StoreErrorKind::PermissionDenied));
    assert_eq!(store.transaction_calls(), 1);
    assert!(!store.contains(CREDENTIALS_COLLECTION, "a@example.com").await);
}

#[tokio::test]
async fn test_registration_disabled() {
    let store = Arc::new(MockDocumentStore::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("s3cret-s3cret-s3cret-s3cret-s3cret")).unwrap());
    let config = AccountServiceConfig {
        allow_registration: false,
        ..Default::default()
    };
    let service = AccountService::new(store, tokens, PasswordService::new(4), config);

    let error = service.register("a@example.com", "Abcdef12", None).await.unwrap_err();
    assert!(matches!(error, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_login_success_uses_record_role() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, tokens) = create_service(store.clone());
    let registered = service.register("a@example.com", "Abcdef12", None).await.unwrap();

    // Promote out of band
    let mut record = store.get(USERS_COLLECTION, &registered.user_id).await.unwrap().unwrap();
    record.insert("role".to_string(), json!("administrator"));
    store.insert(USERS_COLLECTION, &registered.user_id, record).await;

    let response = service.login("A@Example.com", "Abcdef12").await.unwrap();

    assert_eq!(response.user_id, registered.user_id);
    assert_eq!(response.role, Role::Administrator);
    assert_eq!(tokens.validate(&response.token).unwrap().role, Role::Administrator);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, _) = create_service(store.clone());
    let registered = service.register("a@example.com", "Abcdef12", None).await.unwrap();

    let wrong_password = service.login("a@example.com", "Abcdef13").await.unwrap_err();
    let unknown_email = service.login("b@example.com", "Abcdef12").await.unwrap_err();

    store.remove(USERS_COLLECTION, &registered.user_id).await;
    let orphaned = service.login("a@example.com", "Abcdef12").await.unwrap_err();

    for error in [wrong_password, unknown_email, orphaned] {
        assert!(matches!(error, DomainError::Auth(AuthError::InvalidCredentials)));
    }
}

#[tokio::test]
async fn test_registered_session_resolves_to_identity() {
    let store = Arc::new(MockDocumentStore::new());
    let (service, tokens) = create_service(store.clone());
    let resolver = IdentityService::new(tokens, store);

    let response = service.register("a@example.com", "Abcdef12", Some("Ada")).await.unwrap();
    let identity = resolver.resolve(Some(&response.token)).await.unwrap();

    assert_eq!(identity.id, response.user_id);
    assert_eq!(identity.profile["display_name"], json!("Ada"));
    // Store timestamp comes back as an ISO string
    assert!(identity.profile["created_at"].as_str().unwrap().ends_with('Z'));
}
