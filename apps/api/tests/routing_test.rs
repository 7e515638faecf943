//! ルーター全体の結合テスト
//!
//! `build_app` で構築した本物のルーターに対し、ルート登録・404 フォール
//! バック・レスポンス形状を確認する。ユースケースはスタブに差し替え、
//! データベースには接続しない。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use tower::ServiceExt;
use tsunagu_api::{
    app_builder::build_app,
    error::ApiError,
    handler::UserState,
    usecase::{CreateUserInput, UserUseCase},
};
use tsunagu_domain::user::{Email, User, UserId, UserName};

struct StubUserUseCase;

#[async_trait]
impl UserUseCase for StubUserUseCase {
    async fn create_user(&self, input: CreateUserInput) -> Result<User, ApiError> {
        Ok(User::from_db(
            UserId::from_i64(1),
            UserName::new(input.username).map_err(|e| ApiError::Validation(e.to_string()))?,
            Email::new(input.email).map_err(|e| ApiError::Validation(e.to_string()))?,
            Utc::now(),
        ))
    }
}

fn create_test_app() -> Router {
    let state = Arc::new(UserState {
        usecase: Arc::new(StubUserUseCase),
    });
    build_app(state)
}

#[tokio::test]
async fn test_exampleは厳密にstatus_okを返す() {
    let sut = create_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/example")
        .body(Body::empty())
        .unwrap();

    let response = sut.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], br#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_healthは200とステータスを返す() {
    let sut = create_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = sut.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_未登録のパスは404を返す() {
    for path in ["/", "/missing", "/users/1", "/example/sub"] {
        let sut = create_test_app();

        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "GET {path} は 404 になること"
        );
    }
}

#[tokio::test]
async fn test_usersへのpostが201を返す() {
    let sut = create_test_app();

    let body = serde_json::json!({
        "username": "yamada_taro",
        "email": "taro@example.com",
        "password": "password123"
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = sut.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["id"], 1);
    assert!(json.get("password").is_none());
}
