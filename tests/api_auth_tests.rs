//! API authentication and validation boundary tests
//!
//! These drive the assembled router with in-memory requests and a lazy
//! database pool. Every path under test is rejected before any query runs
//! (or, for the pass-through case, fails loudly at the pool), so no real
//! database is required.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use tower::util::ServiceExt;
use uuid::Uuid;

use loandesk_server::auth::{generate_access_token, AuthService};
use loandesk_server::gateway::PaymentGateway;
use loandesk_server::loan_service::LoanService;
use loandesk_server::models::{User, UserRole};
use loandesk_server::payment_service::PaymentService;
use loandesk_server::routes;
use loandesk_server::state::AppState;

const TEST_SECRET: &str = "api-test-secret";

fn test_app() -> axum::Router {
    // Port 9 (discard) never hosts Postgres; the lazy pool only matters for
    // the one test that deliberately reaches past authentication.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgresql://127.0.0.1:9/loandesk_test")
        .expect("Lazy pool construction should not fail");

    let state = AppState::new(
        Arc::new(AuthService::new(
            pool.clone(),
            TEST_SECRET.to_string(),
            3600,
        )),
        Arc::new(LoanService::new(pool.clone(), 8.0)),
        Arc::new(PaymentService::new(pool)),
        Arc::new(PaymentGateway::new(
            "http://127.0.0.1:9".to_string(),
            "sk_test_dummy".to_string(),
            "usd".to_string(),
        )),
    );

    routes::api_router().with_state(state)
}

fn token_for(role: UserRole, ttl_seconds: i64) -> String {
    let user = User {
        id: Uuid::new_v4(),
        name: "Test Caller".to_string(),
        email: "caller@example.com".to_string(),
        phone: String::new(),
        password_hash: "irrelevant".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    generate_access_token(&user, TEST_SECRET, ttl_seconds).expect("Token generation")
}

async fn error_code(response: axum::response::Response) -> (StatusCode, String, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body should be readable");
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("Body should be JSON");
    (
        status,
        json["error"]["code"].as_str().unwrap_or_default().to_string(),
        json["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    )
}

// ============================================================================
// Missing / Broken Credentials
// ============================================================================

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/loans")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/loans")
        .header(header::AUTHORIZATION, "Bearer not.a.real.token")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized_with_expiry_message() {
    let token = token_for(UserRole::Customer, -120);

    let request = Request::builder()
        .uri("/api/payments/history")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, _, message) = error_code(response).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        message.contains("expired"),
        "Expiry must be distinguishable from other token failures, got: {}",
        message
    );
}

// ============================================================================
// Role Enforcement
// ============================================================================

#[tokio::test]
async fn test_customer_cannot_read_loan_stats() {
    let token = token_for(UserRole::Customer, 3600);

    let request = Request::builder()
        .uri("/api/loans/stats")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code, "FORBIDDEN");
}

#[tokio::test]
async fn test_customer_cannot_list_all_payments() {
    let token = token_for(UserRole::Customer, 3600);

    let request = Request::builder()
        .uri("/api/payments/all")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code, "FORBIDDEN");
}

#[tokio::test]
async fn test_customer_cannot_list_users() {
    let token = token_for(UserRole::Customer, 3600);

    let request = Request::builder()
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code, "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_token_passes_role_gate() {
    let token = token_for(UserRole::Admin, 3600);

    let request = Request::builder()
        .uri("/api/loans/stats")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    // Authentication and authorization both pass; only the unreachable
    // database stops the request.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Request Validation
// ============================================================================

#[tokio::test]
async fn test_register_rejects_invalid_payload_before_touching_db() {
    let body = serde_json::json!({
        "name": "",
        "email": "not-an-email",
        "password": "123"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_apply_rejects_non_positive_amount() {
    let token = token_for(UserRole::Customer, 3600);
    let body = serde_json::json!({
        "amount": 0,
        "tenure": 12,
        "reason": "Working capital"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/loans/apply")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_pay_rejects_non_positive_amount() {
    let token = token_for(UserRole::Customer, 3600);
    let body = serde_json::json!({
        "loanId": Uuid::new_v4(),
        "amount": -50
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/payments/pay")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_intent_rejects_amount_past_ceiling() {
    // An unbounded amount would overflow the gateway's minor-unit
    // conversion; validation must stop it before any gateway call.
    let token = token_for(UserRole::Customer, 3600);
    let body = serde_json::json!({
        "amount": i64::MAX
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/payments/create-intent")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    let (status, code, _) = error_code(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code, "VALIDATION_ERROR");
}
